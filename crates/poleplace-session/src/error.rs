/// Errors that can occur while serving or running a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport-level error (setup, accept, socket options).
    #[error("transport error: {0}")]
    Transport(#[from] poleplace_transport::TransportError),

    /// Wire-level error (short read, short write, I/O).
    #[error("wire error: {0}")]
    Codec(#[from] poleplace_codec::CodecError),

    /// Controller configuration error.
    #[error("control error: {0}")]
    Control(#[from] poleplace_control::ControlError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
