use std::path::PathBuf;

use lapline::ScrollError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure reading a live-feed snapshot.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot read feed {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("scroll engine: {0}")]
    Scroll(#[from] ScrollError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl AppError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_constructor_formats_message() {
        let error = AppError::invalid("--speed must be positive");
        assert_eq!(error.to_string(), "invalid argument: --speed must be positive");
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn scroll_error_converts() {
        let error: AppError = ScrollError::ZeroViewport.into();
        assert_eq!(error.to_string(), "scroll engine: viewport width must be at least 1 column");
    }

    #[test]
    fn feed_read_error_names_path() {
        let error = FeedError::Read {
            path: PathBuf::from("/tmp/feed.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.to_string().starts_with("cannot read feed /tmp/feed.json"));
    }
}
