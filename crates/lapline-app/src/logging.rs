//! Tracing subscriber setup.
//!
//! Stdout is the display, so log lines only ever go to a file. Without
//! `--log-file` no subscriber is installed and every event is dropped.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Filter used when neither `LAPLINE_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVE: &str = "lapline=info";

/// Pick the filter directive: `LAPLINE_LOG`, then `RUST_LOG`, then the default.
#[must_use]
pub fn directive(lapline_log: Option<&str>, rust_log: Option<&str>) -> String {
    [lapline_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_owned()
}

/// Install the global subscriber writing to `log_file`.
///
/// Returns whether a subscriber was installed.
pub fn init(log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let lapline_log = std::env::var("LAPLINE_LOG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = directive(lapline_log.as_deref(), rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).map_err(|err| AppError::Logging {
        message: format!("bad filter {directive:?}: {err}"),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| AppError::Logging {
            message: err.to_string(),
        })?;

    tracing::info!(path = %path.display(), directive, "logging initialized");
    Ok(true)
}
