//! Blocking TCP transport for plant control links.
//!
//! Provides the lowest layer of poleplace:
//! - [`PlantListener`]: a listening socket that can be restricted to a single
//!   named network interface (`SO_BINDTODEVICE` on Linux)
//! - [`PlantStream`]: one accepted or connected plant link
//!
//! Everything else builds on top of these two types.

pub mod error;
pub mod listener;
pub mod stream;

pub use error::{Result, TransportError};
pub use listener::{
    ListenerConfig, PlantListener, DEFAULT_BACKLOG, DEFAULT_INTERFACE, DEFAULT_PORT,
};
pub use stream::PlantStream;
