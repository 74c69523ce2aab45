//! Render loops: the scrolling ticker and the refreshing panels.

use std::time::Instant;

use lapline::palette;
use lapline::{
    Content, DisplayOptions, Fragment, FragmentSink, LiveData, ScrollConfig, ScrollEngine,
    compact_lines, leaderboard_lines, scroll_content,
};

use crate::cli::{DisplayMode, TickerConfig, WidthSetting};
use crate::error::Result;
use crate::feed::DataSource;
use crate::session::{CancelToken, terminal_width};

/// Shown while no snapshot has been fetched yet.
pub const WAITING_MESSAGE: &str = "Waiting for live data...";

/// Counters reported when a run ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Completed scroll cycles or panel refreshes.
    pub cycles: u64,
    /// Fetch attempts.
    pub fetches: u64,
    /// Fetch attempts that failed.
    pub failed_fetches: u64,
}

type PanelBuilder = fn(&LiveData, &DisplayOptions) -> Vec<Content>;

/// Drives a data source into a sink at the configured cadence.
pub struct Ticker<S, K> {
    config: TickerConfig,
    source: S,
    sink: K,
    cancel: CancelToken,
    width_probe: fn() -> usize,
    snapshot: Option<LiveData>,
    last_fetch: Option<Instant>,
    summary: RunSummary,
}

impl<S: DataSource, K: FragmentSink> Ticker<S, K> {
    pub fn new(config: TickerConfig, source: S, sink: K, cancel: CancelToken) -> Self {
        Self {
            config,
            source,
            sink,
            cancel,
            width_probe: terminal_width,
            snapshot: None,
            last_fetch: None,
            summary: RunSummary::default(),
        }
    }

    /// Replace the terminal width probe used for `WidthSetting::Terminal`.
    #[must_use]
    pub fn with_width_probe(mut self, probe: fn() -> usize) -> Self {
        self.width_probe = probe;
        self
    }

    /// Run until cancelled or the cycle limit is reached.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!(
            mode = ?self.config.mode,
            source = %self.source.describe(),
            cycles = self.config.cycles,
            "ticker starting"
        );
        match self.config.mode {
            DisplayMode::Scroll => self.run_scroll()?,
            DisplayMode::Leaderboard => self.run_panels(leaderboard_lines)?,
            DisplayMode::Compact => self.run_panels(compact_lines)?,
        }
        tracing::info!(summary = ?self.summary, "ticker stopped");
        Ok(self.summary)
    }

    /// Counters so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Give the sink back.
    pub fn into_sink(self) -> K {
        self.sink
    }

    fn viewport_width(&self) -> usize {
        match self.config.width {
            WidthSetting::Fixed(columns) => columns,
            WidthSetting::Terminal => (self.width_probe)().max(1),
        }
    }

    fn limit_reached(&self) -> bool {
        self.config.cycles > 0 && self.summary.cycles >= self.config.cycles
    }

    /// Fetch a new snapshot when the refresh interval has passed.
    ///
    /// A failed fetch keeps the previous snapshot.
    fn refresh(&mut self) {
        let due = self
            .last_fetch
            .is_none_or(|at| at.elapsed() >= self.config.refresh_interval);
        if !due {
            return;
        }
        self.last_fetch = Some(Instant::now());
        self.summary.fetches += 1;
        match self.source.fetch() {
            Ok(data) => {
                tracing::debug!(
                    vehicles = data.vehicles.len(),
                    lap = data.session.lap_number,
                    "snapshot fetched"
                );
                self.snapshot = Some(data);
            }
            Err(err) => {
                self.summary.failed_fetches += 1;
                tracing::warn!(error = %err, "fetch failed, keeping previous snapshot");
            }
        }
    }

    fn run_scroll(&mut self) -> Result<()> {
        let mut width = self.viewport_width();
        let config = ScrollConfig::new(width)?
            .separator(self.config.separator.clone())
            .wrap(self.config.wrap);
        let mut engine = ScrollEngine::with_config(config)?;

        while !self.cancel.is_cancelled() && !self.limit_reached() {
            self.refresh();
            let Some(data) = &self.snapshot else {
                self.sink
                    .present_line(&[Fragment::new(WAITING_MESSAGE, palette::GRAY)])?;
                self.summary.frames += 1;
                self.summary.cycles += 1;
                if !self.cancel.sleep(self.config.refresh_interval) {
                    break;
                }
                continue;
            };

            engine.load(scroll_content(data, &self.config.display));
            if engine.period() == 0 {
                break;
            }
            tracing::debug!(period = engine.period(), width, "scroll cycle starting");

            // A resize changes the period mid-cycle, so run until the engine wraps.
            while !engine.is_cycle_complete() {
                if self.cancel.take_resized() && self.config.width == WidthSetting::Terminal {
                    width = self.viewport_width();
                    engine.set_viewport_width(width)?;
                    tracing::debug!(width, "viewport resized");
                }
                self.sink.present_line(&engine.visible_window(width))?;
                self.summary.frames += 1;
                engine.step();
                if !self.cancel.sleep(self.config.scroll_interval) {
                    return Ok(());
                }
            }
            self.summary.cycles += 1;
        }
        Ok(())
    }

    fn run_panels(&mut self, build: PanelBuilder) -> Result<()> {
        while !self.cancel.is_cancelled() && !self.limit_reached() {
            self.refresh();
            let lines = match &self.snapshot {
                Some(data) => build(data, &self.config.display),
                None => vec![Content::from_fragments(vec![Fragment::new(
                    WAITING_MESSAGE,
                    palette::GRAY,
                )])],
            };
            self.sink.present_panel(&lines)?;
            self.summary.frames += 1;
            self.summary.cycles += 1;
            if self.limit_reached() || !self.cancel.sleep(self.config.refresh_interval) {
                break;
            }
        }
        Ok(())
    }
}
