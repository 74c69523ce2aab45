#![forbid(unsafe_code)]

//! Scroll engine for the lapline ticker.
//!
//! [`ScrollEngine`] turns one frame of [`Content`](lapline_text::Content) into
//! an endlessly looping, fixed-width window. Hosts drive it one column at a
//! time with [`ScrollEngine::step`] and read frames back with
//! [`ScrollEngine::visible_window`].
//!
//! # Feature Flags
//!
//! - `tracing`: emit structured `tracing` events on load and wrap.

pub mod error;
pub mod logging;
pub mod scroll;

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};

pub use error::ScrollError;
pub use scroll::{
    DEFAULT_SEPARATOR, DEFAULT_SEPARATOR_COLOR, ScrollConfig, ScrollEngine, ScrollState,
    WrapPolicy,
};
