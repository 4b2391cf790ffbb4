//! Pole-placement control server for quantized plant links over TCP.
//!
//! A plant simulator (or hardware rig) connects, sends its output `Vo` and a
//! secondary state `V1` as two signed bytes, and receives the control input
//! `Vi` as one signed byte. Each connection carries exactly one exchange.
//!
//! # Crate Structure
//!
//! - [`transport`]: TCP listener with optional interface binding
//! - [`codec`]: Sample quantization and the fixed-size wire format
//! - [`control`]: Feedback gains and the control law
//! - [`session`]: Session handler, log sinks and the sequential server

/// Re-export transport types.
pub mod transport {
    pub use poleplace_transport::*;
}

/// Re-export codec types.
pub mod codec {
    pub use poleplace_codec::*;
}

/// Re-export control types.
pub mod control {
    pub use poleplace_control::*;
}

/// Re-export session types.
pub mod session {
    pub use poleplace_session::*;
}
