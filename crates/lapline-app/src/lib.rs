#![forbid(unsafe_code)]

//! The `lapline` terminal ticker.
//!
//! Wires a snapshot source (the seeded demo race or a live-feed JSON file)
//! through the formatting rules into an ANSI presenter on stdout.

pub mod cli;
pub mod demo;
pub mod error;
pub mod feed;
pub mod logging;
pub mod runner;
pub mod session;

use std::io;

use clap::Parser;
use lapline::AnsiPresenter;

use crate::cli::{Cli, SourceSetting, TickerConfig};
use crate::demo::DemoFeed;
use crate::error::Result;
use crate::feed::{DataSource, FileFeed};
use crate::runner::{RunSummary, Ticker};
use crate::session::{CancelToken, SessionOptions, TerminalSession};

/// Parse the process arguments and run the ticker.
pub fn run_from_env() -> Result<RunSummary> {
    run(Cli::parse())
}

/// Run the ticker with already-parsed arguments.
pub fn run(cli: Cli) -> Result<RunSummary> {
    let config = TickerConfig::try_from(cli)?;
    logging::init(config.log_file.as_deref())?;

    let source: Box<dyn DataSource> = match &config.source {
        SourceSetting::Demo { seed } => Box::new(DemoFeed::new(*seed)),
        SourceSetting::File(path) => Box::new(FileFeed::new(path.clone())),
    };
    let profile = config.color.resolve();
    tracing::debug!(?profile, "color profile resolved");

    let cancel = CancelToken::new();
    let session = TerminalSession::new(
        SessionOptions {
            hide_cursor: true,
            handle_signals: true,
        },
        cancel.clone(),
    )?;
    let mut presenter = AnsiPresenter::new(io::stdout(), profile).with_sync_output(true);

    let outcome = Ticker::new(config, source, &mut presenter, cancel).run();

    let finished = presenter.finish_line();
    drop(session);
    conclude(outcome, finished)
}

/// The loop's own error outranks a failure to close the last line.
fn conclude(outcome: Result<RunSummary>, finished: io::Result<()>) -> Result<RunSummary> {
    match (outcome, finished) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(err)) => Err(err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close)) => {
            tracing::warn!(error = %close, "could not finish the ticker line");
            Err(err)
        }
    }
}
