//! Fixed-gain pole-placement state feedback.
//!
//! The plant reports its output `Vo` and a secondary state `V1`; the
//! controller answers with `Vi = K_OUTPUT * Vo + K_STATE * V1`. The gains were
//! chosen offline by pole placement and are constants, not tuned at runtime.
//! There is no saturation, no rate limiting and no NaN/Inf guard.

pub mod controller;
pub mod error;
pub mod gains;

pub use controller::{Controller, Exchange, PlantState};
pub use error::{ControlError, Result};
pub use gains::{ControlGains, K_OUTPUT, K_STATE};
