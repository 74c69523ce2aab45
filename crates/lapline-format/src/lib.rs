#![forbid(unsafe_code)]

//! Race data formatting for lapline.
//!
//! - [`model`] - session snapshot types ([`LiveData`], [`Vehicle`], [`Session`])
//! - [`rules`] - pure value-to-fragment rules (position, gap, flag, ...)
//! - [`board`] - builders that turn a snapshot into ticker content or panels
//!
//! # Example
//! ```
//! use lapline_format::rules::format_gap;
//! use lapline_style::palette;
//!
//! let gap = format_gap(2.5, 10, 12);
//! assert_eq!(gap.as_str(), "-2L");
//! assert_eq!(gap.color(), palette::RED);
//! ```

pub mod board;
pub mod model;
pub mod rules;

pub use board::{DisplayOptions, compact_lines, leaderboard_lines, scroll_content};
pub use model::{Driver, LiveData, RunType, Session, Vehicle};
pub use rules::{
    format_flag, format_gap, format_lap_time, format_manufacturer, format_position, format_speed,
};
