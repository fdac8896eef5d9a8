//! Error types.

use thiserror::Error;

/// Failures talking to the remote task collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout, reset).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// The server answered but the body was not the JSON we expected.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// True when the server was reached and rejected the request.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Required fields were missing; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    /// The terminal could not be set up, drawn or restored.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn setup_terminal() -> Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "not a tty"))?;
        Ok(())
    }

    #[test]
    fn terminal_failures_convert_into_app_errors() {
        let err = setup_terminal().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "terminal error: not a tty");
    }
}
