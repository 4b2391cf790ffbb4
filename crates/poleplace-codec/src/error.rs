/// Errors that can occur while quantizing or transferring samples.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The quantization gain is zero or not finite.
    #[error("invalid quantization gain {0} (must be finite and non-zero)")]
    InvalidGain(f64),

    /// The peer closed the connection before a full message arrived.
    #[error("short read ({received} of {expected} bytes)")]
    ShortRead { expected: usize, received: usize },

    /// The peer stopped accepting data before a full message was written.
    #[error("short write ({written} of {expected} bytes)")]
    ShortWrite { expected: usize, written: usize },

    /// An I/O error occurred while reading or writing samples.
    #[error("wire I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
