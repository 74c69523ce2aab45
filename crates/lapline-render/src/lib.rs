#![forbid(unsafe_code)]

//! Terminal output for lapline.
//!
//! - [`ansi`] - pure escape-sequence writers
//! - [`FragmentSink`] - where frames go
//! - [`AnsiPresenter`] - the terminal sink, with color-profile downgrade
//! - [`RecordingSink`] - in-memory sink for tests and headless runs
//!
//! # Feature Flags
//!
//! - `tracing`: spans around each presented frame.

pub mod ansi;
pub mod presenter;
pub mod sink;

pub use presenter::AnsiPresenter;
pub use sink::{FragmentSink, Presented, RecordingSink};
