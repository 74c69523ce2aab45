//! Command-line options and the validated ticker configuration.
//!
//! Every flag has a `LAPLINE_*` environment fallback; explicit flags win.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use lapline::{ColorProfile, DEFAULT_SEPARATOR, DisplayOptions, WrapPolicy};

use crate::error::{AppError, Result};

const EXAMPLES: &str = "\
EXAMPLES:
    lapline                              Scrolling ticker fed by the demo source
    lapline --mode leaderboard           Full leaderboard panel
    lapline --mode compact -n 15         Compact rows, top 15
    lapline -s 0.05 --no-speed           Faster scroll, no speeds
    lapline --feed live-feed.json        Read snapshots from a live-feed JSON file";

/// What the ticker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    /// Single-line scrolling ticker.
    Scroll,
    /// Full multi-line leaderboard.
    Leaderboard,
    /// Compact multi-row panel.
    Compact,
}

/// Color output selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from NO_COLOR, COLORTERM and TERM.
    Auto,
    Truecolor,
    Ansi256,
    Ansi16,
    Mono,
}

impl ColorChoice {
    #[must_use]
    pub fn resolve(self) -> ColorProfile {
        match self {
            Self::Auto => ColorProfile::detect(),
            Self::Truecolor => ColorProfile::TrueColor,
            Self::Ansi256 => ColorProfile::Ansi256,
            Self::Ansi16 => ColorProfile::Ansi16,
            Self::Mono => ColorProfile::Mono,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "lapline",
    about = "Scrolling motorsport leaderboard ticker for the terminal",
    version,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Display mode.
    #[arg(short, long, value_enum, default_value_t = DisplayMode::Scroll, env = "LAPLINE_MODE")]
    pub mode: DisplayMode,

    /// Number of positions to show.
    #[arg(short = 'n', long, default_value_t = 20, env = "LAPLINE_POSITIONS")]
    pub positions: usize,

    /// Seconds between scroll steps.
    #[arg(short, long, default_value_t = 0.08, env = "LAPLINE_SPEED")]
    pub speed: f64,

    /// Seconds between data refreshes.
    #[arg(short, long, default_value_t = 2.0, env = "LAPLINE_REFRESH")]
    pub refresh: f64,

    /// Display width in columns (0 = terminal width).
    #[arg(short, long, default_value_t = 120, env = "LAPLINE_WIDTH")]
    pub width: usize,

    /// Hide speed and lap time info.
    #[arg(long)]
    pub no_speed: bool,

    /// Hide gap to leader.
    #[arg(long)]
    pub no_gap: bool,

    /// Hide manufacturer info.
    #[arg(long)]
    pub no_mfr: bool,

    /// Hide the flag indicator.
    #[arg(long)]
    pub no_flag: bool,

    /// Rows for compact mode.
    #[arg(long, default_value_t = 5, env = "LAPLINE_ROWS")]
    pub rows: usize,

    /// Text placed between the end of the ticker and its next loop.
    #[arg(long, default_value = DEFAULT_SEPARATOR, env = "LAPLINE_SEPARATOR")]
    pub separator: String,

    /// Wrap the scroll cursor exactly at the cycle length.
    #[arg(long)]
    pub exact_wrap: bool,

    /// Color output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, env = "LAPLINE_COLOR")]
    pub color: ColorChoice,

    /// Live-feed JSON file to read snapshots from (default: demo data).
    #[arg(long, env = "LAPLINE_FEED")]
    pub feed: Option<PathBuf>,

    /// Seed for the demo data source.
    #[arg(long, default_value_t = 0, env = "LAPLINE_SEED")]
    pub seed: u64,

    /// Stop after this many scroll cycles or panel refreshes (0 = run forever).
    #[arg(long, default_value_t = 0, env = "LAPLINE_CYCLES")]
    pub cycles: u64,

    /// Write logs to this file.
    #[arg(long, env = "LAPLINE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Viewport width: fixed, or follow the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSetting {
    Fixed(usize),
    Terminal,
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSetting {
    Demo { seed: u64 },
    File(PathBuf),
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    pub mode: DisplayMode,
    pub scroll_interval: Duration,
    pub refresh_interval: Duration,
    pub width: WidthSetting,
    pub display: DisplayOptions,
    pub separator: String,
    pub wrap: WrapPolicy,
    pub color: ColorChoice,
    pub source: SourceSetting,
    /// 0 = unlimited.
    pub cycles: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Scroll,
            scroll_interval: Duration::from_millis(80),
            refresh_interval: Duration::from_secs(2),
            width: WidthSetting::Fixed(120),
            display: DisplayOptions::default(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            wrap: WrapPolicy::Settle,
            color: ColorChoice::Auto,
            source: SourceSetting::Demo { seed: 0 },
            cycles: 0,
            log_file: None,
        }
    }
}

impl TickerConfig {
    /// Check an interval given in seconds.
    fn interval(flag: &str, seconds: f64) -> Result<Duration> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(AppError::invalid(format!(
                "{flag} must be a positive number of seconds, got {seconds}"
            )));
        }
        Duration::try_from_secs_f64(seconds)
            .map_err(|err| AppError::invalid(format!("{flag}: {err}")))
    }

    /// Reject settings the ticker cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.scroll_interval.is_zero() {
            return Err(AppError::invalid("--speed must be positive"));
        }
        if self.refresh_interval.is_zero() {
            return Err(AppError::invalid("--refresh must be positive"));
        }
        if self.display.positions == 0 {
            return Err(AppError::invalid("--positions must be at least 1"));
        }
        if self.display.compact_rows == 0 {
            return Err(AppError::invalid("--rows must be at least 1"));
        }
        Ok(())
    }
}

impl TryFrom<Cli> for TickerConfig {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self> {
        let config = Self {
            mode: cli.mode,
            scroll_interval: Self::interval("--speed", cli.speed)?,
            refresh_interval: Self::interval("--refresh", cli.refresh)?,
            width: match cli.width {
                0 => WidthSetting::Terminal,
                columns => WidthSetting::Fixed(columns),
            },
            display: DisplayOptions {
                positions: cli.positions,
                show_speed: !cli.no_speed,
                show_gap: !cli.no_gap,
                show_laps: true,
                show_manufacturer: !cli.no_mfr,
                show_flag: !cli.no_flag,
                compact_rows: cli.rows,
            },
            separator: cli.separator,
            wrap: if cli.exact_wrap {
                WrapPolicy::Exact
            } else {
                WrapPolicy::Settle
            },
            color: cli.color,
            source: match cli.feed {
                Some(path) => SourceSetting::File(path),
                None => SourceSetting::Demo { seed: cli.seed },
            },
            cycles: cli.cycles,
            log_file: cli.log_file,
        };
        config.validate()?;
        Ok(config)
    }
}
