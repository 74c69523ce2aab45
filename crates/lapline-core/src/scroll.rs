#![forbid(unsafe_code)]

//! Circular scroll engine for single-line tickers.
//!
//! The engine owns one frame of [`Content`] and a cursor into a *virtual
//! timeline* made of the content, a separator, and the content again:
//!
//! ```text
//!  position 0                    total_length
//!  |                             |
//!  [ content ..................... ][ sep ][ content ..................... ]
//!  |<-- window: width -->|
//! ```
//!
//! Reading a window never copies the timeline; the content is walked twice
//! with an offset. The cursor cycles through `total_length + viewport_width`
//! offsets, so the tail of the content fully leaves the viewport before the
//! head comes around again.
//!
//! # Wrap policy
//!
//! [`WrapPolicy::Settle`] (the default) wraps the raw cursor to 0 only once it
//! *exceeds* `total_length + viewport_width`, so one extra raw value is visited
//! per cycle. That value renders exactly like offset 0 (a one-frame pause at
//! the loop point). [`WrapPolicy::Exact`] wraps at the period itself.
//!
//! # Example
//! ```
//! use lapline_core::scroll::{ScrollConfig, ScrollEngine};
//! use lapline_style::palette;
//! use lapline_text::{Content, Fragment};
//!
//! let mut engine = ScrollEngine::with_config(ScrollConfig::new(4)?.separator("-"))?;
//! engine.load(Content::from_fragments(vec![
//!     Fragment::new("AB", palette::RED),
//!     Fragment::new("CDE", palette::BLUE),
//! ]));
//! assert_eq!(engine.frame_text(4), "ABCD");
//! engine.step();
//! engine.step();
//! engine.step();
//! assert_eq!(engine.frame_text(4), "DE-A");
//! # Ok::<(), lapline_core::ScrollError>(())
//! ```

use std::borrow::Cow;
use std::iter;

use lapline_style::{Rgb, palette};
use lapline_text::{Content, Fragment};

use crate::error::ScrollError;

/// Separator placed between the two copies of the content.
pub const DEFAULT_SEPARATOR: &str = "   |   ";

/// Color of the separator fragment.
pub const DEFAULT_SEPARATOR_COLOR: Rgb = palette::GRAY;

/// When the raw cursor wraps back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapPolicy {
    /// Wrap once the cursor exceeds the period (one settle frame per cycle).
    #[default]
    Settle,
    /// Wrap exactly at the period.
    Exact,
}

/// Cursor state of a scroll engine.
///
/// A plain value: every transition returns a new state instead of mutating
/// in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollState {
    /// Raw cursor, in `[0, total_length + viewport_width]`.
    pub position: usize,
    /// Width the caller intends to read windows at; bounds the wraparound.
    pub viewport_width: usize,
}

impl ScrollState {
    /// State at the start of a cycle.
    #[must_use]
    pub const fn new(viewport_width: usize) -> Self {
        Self {
            position: 0,
            viewport_width,
        }
    }

    /// Same viewport, cursor back at 0.
    #[must_use]
    pub const fn reset(self) -> Self {
        Self::new(self.viewport_width)
    }

    /// Number of distinct offsets in one cycle over content of `total_length`.
    #[must_use]
    pub const fn period(self, total_length: usize) -> usize {
        total_length.saturating_add(self.viewport_width)
    }

    /// The state after one step.
    #[must_use]
    pub const fn stepped(self, total_length: usize, wrap: WrapPolicy) -> Self {
        let period = self.period(total_length);
        let next = self.position.saturating_add(1);
        let wrapped = match wrap {
            WrapPolicy::Settle => next > period,
            WrapPolicy::Exact => next >= period,
        };
        Self {
            position: if wrapped { 0 } else { next },
            viewport_width: self.viewport_width,
        }
    }

    /// Effective offset into the virtual timeline (the settle frame maps to 0).
    #[must_use]
    pub const fn offset(self, total_length: usize) -> usize {
        let period = self.period(total_length);
        if period == 0 {
            0
        } else {
            self.position % period
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    viewport_width: usize,
    separator: Cow<'static, str>,
    separator_color: Rgb,
    wrap: WrapPolicy,
}

impl ScrollConfig {
    /// Defaults for a viewport `viewport_width` columns wide.
    ///
    /// # Errors
    /// [`ScrollError::ZeroViewport`] if `viewport_width` is 0.
    pub fn new(viewport_width: usize) -> Result<Self, ScrollError> {
        if viewport_width == 0 {
            return Err(ScrollError::ZeroViewport);
        }
        Ok(Self {
            viewport_width,
            separator: Cow::Borrowed(DEFAULT_SEPARATOR),
            separator_color: DEFAULT_SEPARATOR_COLOR,
            wrap: WrapPolicy::default(),
        })
    }

    /// Replace the separator text.
    #[must_use]
    pub fn separator(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.separator = text.into();
        self
    }

    /// Replace the separator color.
    #[must_use]
    pub fn separator_color(mut self, color: Rgb) -> Self {
        self.separator_color = color;
        self
    }

    /// Choose the wrap policy.
    #[must_use]
    pub fn wrap(mut self, wrap: WrapPolicy) -> Self {
        self.wrap = wrap;
        self
    }

    /// Viewport width in columns.
    #[must_use]
    pub const fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// Configured wrap policy.
    #[must_use]
    pub const fn wrap_policy(&self) -> WrapPolicy {
        self.wrap
    }
}

/// Single-cursor, single-content scrolling compositor.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    content: Content,
    separator: Fragment,
    state: ScrollState,
    wrap: WrapPolicy,
    cycles: u64,
}

impl ScrollEngine {
    /// Engine with default separator and wrap policy.
    ///
    /// # Errors
    /// [`ScrollError::ZeroViewport`] if `viewport_width` is 0.
    pub fn new(viewport_width: usize) -> Result<Self, ScrollError> {
        Self::with_config(ScrollConfig::new(viewport_width)?)
    }

    /// Engine from an explicit configuration.
    ///
    /// # Errors
    /// [`ScrollError::ZeroViewport`] if the configured viewport is 0 wide.
    pub fn with_config(config: ScrollConfig) -> Result<Self, ScrollError> {
        if config.viewport_width == 0 {
            return Err(ScrollError::ZeroViewport);
        }
        Ok(Self {
            content: Content::new(),
            separator: Fragment::new(config.separator, config.separator_color),
            state: ScrollState::new(config.viewport_width),
            wrap: config.wrap,
            cycles: 0,
        })
    }

    /// Replace the content and rewind the cursor.
    pub fn load(&mut self, content: Content) {
        crate::debug!(
            fragments = content.len(),
            total_length = content.total_length(),
            "ticker content loaded"
        );
        self.content = content;
        self.state = self.state.reset();
        self.cycles = 0;
    }

    /// Advance the cursor by one column.
    pub fn step(&mut self) {
        let total = self.content.total_length();
        let before = self.state.offset(total);
        self.state = self.state.stepped(total, self.wrap);
        if before != 0 && self.state.offset(total) == 0 {
            self.cycles += 1;
            crate::trace!(cycles = self.cycles, "scroll cycle complete");
        }
    }

    /// The fragments visible in a `width`-column window at the current cursor.
    ///
    /// Fragments straddling the window edge are clipped to their visible
    /// characters; style is never altered. The result may be shorter than
    /// `width` when the timeline runs out, and is empty for empty content or
    /// a zero width.
    #[must_use]
    pub fn visible_window(&self, width: usize) -> Vec<Fragment> {
        let total = self.content.total_length();
        if width == 0 || total == 0 {
            return Vec::new();
        }

        let start = self.state.position % total.saturating_add(width);
        let end = start.saturating_add(width);
        let mut visible = Vec::new();
        let mut cursor = 0usize;

        for fragment in self.timeline() {
            let frag_start = cursor;
            let frag_end = cursor + fragment.char_len();

            if frag_end > start && frag_start < end {
                let slice =
                    fragment.slice_chars(start.saturating_sub(frag_start), end - frag_start);
                if !slice.is_empty() {
                    visible.push(slice);
                }
            }

            cursor = frag_end;
            if cursor >= end {
                break;
            }
        }

        visible
    }

    /// Plain text of [`visible_window`](Self::visible_window).
    #[must_use]
    pub fn frame_text(&self, width: usize) -> String {
        lapline_text::plain_text(&self.visible_window(width))
    }

    /// Content, separator, content: the virtual timeline, without copying.
    fn timeline(&self) -> impl Iterator<Item = &Fragment> {
        self.content
            .iter()
            .chain(iter::once(&self.separator))
            .chain(self.content.iter())
    }

    /// Resize the viewport, keeping the cursor inside the new period.
    ///
    /// # Errors
    /// [`ScrollError::ZeroViewport`] if `viewport_width` is 0.
    pub fn set_viewport_width(&mut self, viewport_width: usize) -> Result<(), ScrollError> {
        if viewport_width == 0 {
            return Err(ScrollError::ZeroViewport);
        }
        let position = self.state.position;
        self.state = ScrollState {
            position,
            viewport_width,
        };
        if position > self.state.period(self.content.total_length()) {
            self.state = self.state.reset();
        }
        Ok(())
    }

    /// Number of steps in one full cycle (0 when there is nothing to scroll).
    #[must_use]
    pub fn period(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.state.period(self.content.total_length())
        }
    }

    /// Effective offset of the cursor within the current cycle.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.state.offset(self.content.total_length())
    }

    /// Cycles finished since the last [`load`](Self::load).
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Whether at least one full cycle has been shown since the last load.
    #[must_use]
    pub const fn is_cycle_complete(&self) -> bool {
        self.cycles > 0
    }

    /// Current cursor state.
    #[must_use]
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// Current raw cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.state.position
    }

    /// Loaded content.
    #[must_use]
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// Separator fragment placed between the two copies of the content.
    #[must_use]
    pub const fn separator(&self) -> &Fragment {
        &self.separator
    }

    /// Wrap policy in force.
    #[must_use]
    pub const fn wrap_policy(&self) -> WrapPolicy {
        self.wrap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: usize, separator: &'static str) -> ScrollEngine {
        ScrollEngine::with_config(ScrollConfig::new(width).unwrap().separator(separator)).unwrap()
    }

    fn ab_cde() -> Content {
        Content::from_fragments(vec![
            Fragment::new("AB", palette::RED),
            Fragment::new("CDE", palette::BLUE),
        ])
    }

    fn steps(engine: &mut ScrollEngine, n: usize) {
        for _ in 0..n {
            engine.step();
        }
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert_eq!(ScrollEngine::new(0).unwrap_err(), ScrollError::ZeroViewport);
        assert_eq!(ScrollConfig::new(0).unwrap_err(), ScrollError::ZeroViewport);
        let mut engine = ScrollEngine::new(3).unwrap();
        assert_eq!(
            engine.set_viewport_width(0),
            Err(ScrollError::ZeroViewport)
        );
    }

    #[test]
    fn boundary_example_clips_second_fragment() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        let window = engine.visible_window(4);
        assert_eq!(
            window,
            vec![
                Fragment::new("AB", palette::RED),
                Fragment::new("CD", palette::BLUE)
            ]
        );
    }

    #[test]
    fn window_walks_through_separator_into_second_copy() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        steps(&mut engine, 3);
        let window = engine.visible_window(4);
        assert_eq!(lapline_text::plain_text(&window), "DE-A");
        assert_eq!(window[0].color(), palette::BLUE);
        assert_eq!(window[1].color(), palette::GRAY);
        assert_eq!(window[2].color(), palette::RED);
    }

    #[test]
    fn fragment_spanning_both_edges_is_sliced_once() {
        let mut engine = engine(2, "-");
        engine.load(Content::from_fragments(vec![Fragment::new("ABCDE", palette::CYAN)
            .with_bold(true)]));
        steps(&mut engine, 2);
        let window = engine.visible_window(2);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].as_str(), "CD");
        assert!(window[0].is_bold());
    }

    #[test]
    fn empty_content_yields_empty_window() {
        let mut engine = engine(10, "-");
        assert!(engine.visible_window(10).is_empty());
        engine.load(Content::from_fragments(vec![Fragment::empty(palette::RED)]));
        assert!(engine.visible_window(10).is_empty());
        steps(&mut engine, 7);
        assert!(engine.visible_window(10).is_empty());
        assert_eq!(engine.period(), 0);
    }

    #[test]
    fn zero_width_yields_empty_window() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        assert!(engine.visible_window(0).is_empty());
    }

    #[test]
    fn wide_window_returns_whole_timeline() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        let window = engine.visible_window(50);
        assert_eq!(lapline_text::plain_text(&window), "ABCDE-ABCDE");
    }

    #[test]
    fn empty_fragments_never_reach_the_window() {
        let mut engine = engine(3, "|");
        engine.load(Content::from_fragments(vec![
            Fragment::new("A", palette::RED),
            Fragment::empty(palette::GREEN),
            Fragment::new("B", palette::BLUE),
        ]));
        let window = engine.visible_window(3);
        assert!(window.iter().all(|f| !f.is_empty()));
        assert_eq!(lapline_text::plain_text(&window), "AB|");
    }

    #[test]
    fn default_separator_is_gray_bar() {
        let engine = ScrollEngine::new(5).unwrap();
        assert_eq!(engine.separator().as_str(), DEFAULT_SEPARATOR);
        assert_eq!(engine.separator().color(), palette::GRAY);
        assert!(!engine.separator().is_bold());
        assert_eq!(engine.wrap_policy(), WrapPolicy::Settle);
    }

    #[test]
    fn settle_policy_visits_period_once_before_wrapping() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        let period = engine.period();
        assert_eq!(period, 9);

        steps(&mut engine, period);
        assert_eq!(engine.position(), period);
        assert_eq!(engine.offset(), 0);
        // The settle frame renders like frame 0.
        assert_eq!(engine.frame_text(4), "ABCD");

        engine.step();
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn exact_policy_wraps_at_period() {
        let config = ScrollConfig::new(4).unwrap().wrap(WrapPolicy::Exact);
        let mut engine = ScrollEngine::with_config(config).unwrap();
        engine.load(ab_cde());
        let period = engine.period();
        steps(&mut engine, period - 1);
        assert_eq!(engine.position(), 8);
        engine.step();
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn cycle_counter_counts_each_period_once() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        assert!(!engine.is_cycle_complete());
        steps(&mut engine, 9);
        assert_eq!(engine.cycles_completed(), 1);
        // Settle frame -> 0 is not a second cycle.
        engine.step();
        assert_eq!(engine.cycles_completed(), 1);
        steps(&mut engine, 9);
        assert_eq!(engine.cycles_completed(), 2);
    }

    #[test]
    fn reload_rewinds_cursor_every_time() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        steps(&mut engine, 6);
        engine.load(ab_cde());
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.cycles_completed(), 0);
        engine.load(ab_cde());
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.frame_text(4), "ABCD");
    }

    #[test]
    fn resize_keeps_cursor_when_in_range() {
        let mut engine = engine(4, "-");
        engine.load(ab_cde());
        steps(&mut engine, 3);
        engine.set_viewport_width(10).unwrap();
        assert_eq!(engine.position(), 3);
        assert_eq!(engine.period(), 15);
    }

    #[test]
    fn resize_rewinds_cursor_past_new_period() {
        let mut engine = engine(10, "-");
        engine.load(ab_cde());
        steps(&mut engine, 12);
        engine.set_viewport_width(2).unwrap();
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.state().viewport_width, 2);
    }

    #[test]
    fn state_transitions_are_pure() {
        let state = ScrollState::new(3);
        let next = state.stepped(5, WrapPolicy::Settle);
        assert_eq!(state.position, 0);
        assert_eq!(next.position, 1);
        let at_period = ScrollState {
            position: 8,
            viewport_width: 3,
        };
        assert_eq!(at_period.stepped(5, WrapPolicy::Settle).position, 0);
        assert_eq!(at_period.offset(5), 0);
        assert_eq!(at_period.reset().position, 0);
    }

    #[test]
    fn oversized_window_reads_whole_timeline() {
        let mut engine = ScrollEngine::new(4).unwrap();
        engine.load(Content::from_fragments(vec![Fragment::new("AB", palette::RED)]));
        assert_eq!(engine.frame_text(usize::MAX), "AB   |   AB");

        engine.step();
        assert_eq!(engine.frame_text(usize::MAX), "B   |   AB");
    }

    #[test]
    fn huge_viewport_does_not_overflow() {
        let mut engine = ScrollEngine::new(usize::MAX).unwrap();
        engine.load(Content::from_fragments(vec![Fragment::new("X", palette::RED)]));
        assert_eq!(engine.period(), usize::MAX);
        engine.step();
        assert_eq!(engine.position(), 1);
        assert_eq!(engine.frame_text(3), "   ");
    }
}
