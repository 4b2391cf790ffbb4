use std::fmt;

use poleplace_codec::CodecError;
use poleplace_control::ControlError;
use poleplace_session::SessionError;

pub const SUCCESS: i32 = 0;
/// Setup, accept and exchange failures all exit with 1.
pub const FAILURE: i32 = 1;
pub const USAGE: i32 = 64;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn control_error(context: &str, err: ControlError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::InvalidGain(_) => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Control(err) => control_error(context, err),
        SessionError::Codec(err) => codec_error(context, err),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use poleplace_transport::TransportError;

    use super::*;

    #[test]
    fn transport_failures_exit_with_one() {
        let err = session_error(
            "setup failed",
            SessionError::Transport(TransportError::Accept(std::io::Error::other("boom"))),
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.starts_with("setup failed: "));
    }

    #[test]
    fn invalid_constants_are_usage_errors() {
        let err = session_error(
            "invalid constants",
            SessionError::Control(ControlError::Quantizer(CodecError::InvalidGain(0.0))),
        );
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn short_exchange_exits_with_one() {
        let err = session_error(
            "exchange failed",
            SessionError::Codec(CodecError::ShortRead {
                expected: 1,
                received: 0,
            }),
        );
        assert_eq!(err.code, FAILURE);
        assert!(err.message.contains("short read (0 of 1 bytes)"));
    }
}
