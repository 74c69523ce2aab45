#![forbid(unsafe_code)]

//! lapline public facade.
//!
//! Re-exports the types a ticker host needs from the internal crates and
//! offers a small prelude.
//!
//! ```
//! use lapline::prelude::*;
//!
//! let mut engine = ScrollEngine::new(12)?;
//! engine.load(Content::from_fragments(vec![format_position(1), format_speed(182.5)]));
//! assert_eq!(engine.frame_text(12), "P1182.50mph ");
//! # Ok::<(), lapline::Error>(())
//! ```

// --- Style re-exports ------------------------------------------------------

pub use lapline_style::{Color, ColorCache, ColorError, ColorProfile, Rgb, palette};

// --- Text re-exports -------------------------------------------------------

pub use lapline_text::{Content, Fragment, FragmentStyle};

// --- Core re-exports -------------------------------------------------------

pub use lapline_core::{
    DEFAULT_SEPARATOR, ScrollConfig, ScrollEngine, ScrollError, ScrollState, WrapPolicy,
};

// --- Format re-exports -----------------------------------------------------

pub use lapline_format::{
    DisplayOptions, Driver, LiveData, RunType, Session, Vehicle, compact_lines,
    format_flag, format_gap, format_lap_time, format_manufacturer, format_position,
    format_speed, leaderboard_lines, scroll_content,
};

// --- Render re-exports -----------------------------------------------------

pub use lapline_render::{AnsiPresenter, FragmentSink, Presented, RecordingSink};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for lapline hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure while presenting.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Invalid color input.
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Invalid scroll engine input.
    #[error(transparent)]
    Scroll(#[from] ScrollError),
}

/// Standard result type for lapline APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnsiPresenter, ColorProfile, Content, DisplayOptions, Error, Fragment, FragmentSink,
        LiveData, Result, Rgb, ScrollConfig, ScrollEngine, WrapPolicy, format_position,
        format_speed, palette,
    };

    pub use crate::{core, format, render, style, text};
}

pub use lapline_core as core;
pub use lapline_format as format;
pub use lapline_render as render;
pub use lapline_style as style;
pub use lapline_text as text;
