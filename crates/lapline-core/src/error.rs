#![forbid(unsafe_code)]

//! Errors raised by the scroll engine.

/// Invalid scroll engine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The viewport must be at least one column wide.
    #[error("viewport width must be at least 1 column")]
    ZeroViewport,
}
