use poleplace_codec::CodecError;

/// Errors that can occur while configuring the controller.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// A feedback gain is NaN or infinite.
    #[error("gain {name} must be finite (got {value})")]
    NonFiniteGain { name: &'static str, value: f64 },

    /// The quantizer could not be configured.
    #[error("quantizer error: {0}")]
    Quantizer(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, ControlError>;
