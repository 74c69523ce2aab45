#![forbid(unsafe_code)]

//! Style-tracked ANSI presenter.
//!
//! Writes ticker frames in place (carriage return, erase line, fragments) and
//! panels as a full-screen repaint. Colors are downgraded through a
//! [`ColorCache`] to the terminal's [`ColorProfile`]; an SGR sequence is only
//! emitted when the style actually changes between fragments.
//!
//! ```
//! use lapline_render::AnsiPresenter;
//! use lapline_render::FragmentSink;
//! use lapline_style::{ColorProfile, palette};
//! use lapline_text::Fragment;
//!
//! let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::Mono);
//! presenter.present_line(&[Fragment::new("P1", palette::GOLD)])?;
//! let out = presenter.into_inner()?;
//! assert_eq!(out, b"\r\x1b[2KP1\x1b[0m");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use lapline_style::{ColorCache, ColorProfile};
use lapline_text::{Content, Fragment, FragmentStyle};

use crate::ansi::{self, EraseLineMode};
use crate::sink::FragmentSink;

/// Size of the internal write buffer.
const BUFFER_CAPACITY: usize = 8 * 1024;

/// ANSI presenter over any writer.
pub struct AnsiPresenter<W: Write> {
    writer: BufWriter<W>,
    colors: ColorCache,
    /// Style currently active on the terminal (None = reset/unknown).
    current_style: Option<FragmentStyle>,
    /// Wrap each frame in DEC 2026 synchronized output.
    sync_output: bool,
}

impl<W: Write> AnsiPresenter<W> {
    /// Create a presenter that downgrades colors to `profile`.
    pub fn new(writer: W, profile: ColorProfile) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            colors: ColorCache::new(profile),
            current_style: None,
            sync_output: false,
        }
    }

    /// Enable or disable synchronized output brackets.
    #[must_use]
    pub fn with_sync_output(mut self, enabled: bool) -> Self {
        self.sync_output = enabled;
        self
    }

    /// The profile colors are downgraded to.
    #[inline]
    #[must_use]
    pub fn profile(&self) -> ColorProfile {
        self.colors.profile()
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        if self.sync_output {
            ansi::sync_begin(&mut self.writer)?;
        }
        Ok(())
    }

    fn end_frame(&mut self) -> io::Result<()> {
        if self.sync_output {
            ansi::sync_end(&mut self.writer)?;
        }
        self.writer.flush()
    }

    fn emit_fragment(&mut self, fragment: &Fragment) -> io::Result<()> {
        let style = fragment.style();
        if self.current_style != Some(style) {
            if self.current_style.is_some() {
                ansi::sgr_reset(&mut self.writer)?;
            }
            let color = self.colors.downgrade_rgb(style.color);
            ansi::sgr_fg(&mut self.writer, color)?;
            if style.bold {
                ansi::sgr_bold(&mut self.writer)?;
            }
            self.current_style = Some(style);
        }
        self.writer.write_all(fragment.as_str().as_bytes())
    }

    fn emit_run<'a>(&mut self, fragments: impl IntoIterator<Item = &'a Fragment>) -> io::Result<()> {
        for fragment in fragments {
            if !fragment.is_empty() {
                self.emit_fragment(fragment)?;
            }
        }
        ansi::sgr_reset(&mut self.writer)?;
        self.current_style = None;
        Ok(())
    }

    /// Move past the ticker line so the shell prompt starts clean.
    pub fn finish_line(&mut self) -> io::Result<()> {
        ansi::sgr_reset(&mut self.writer)?;
        self.current_style = None;
        ansi::lf(&mut self.writer)?;
        self.writer.flush()
    }

    /// Flush any buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get the inner writer, flushing first.
    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

impl<W: Write> FragmentSink for AnsiPresenter<W> {
    fn present_line(&mut self, fragments: &[Fragment]) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("present_line", fragments = fragments.len()).entered();

        self.begin_frame()?;
        ansi::cr(&mut self.writer)?;
        ansi::erase_line(&mut self.writer, EraseLineMode::All)?;
        self.emit_run(fragments)?;
        self.end_frame()
    }

    fn present_panel(&mut self, lines: &[Content]) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("present_panel", lines = lines.len()).entered();

        self.begin_frame()?;
        ansi::erase_display(&mut self.writer)?;
        ansi::cup(&mut self.writer, 0, 0)?;
        for line in lines {
            self.emit_run(line)?;
            ansi::lf(&mut self.writer)?;
        }
        self.end_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapline_style::palette;

    fn output(presenter: AnsiPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn true_color_line() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::TrueColor);
        presenter
            .present_line(&[
                Fragment::new("P1", palette::GOLD).with_bold(true),
                Fragment::new(" #5", palette::WHITE),
            ])
            .unwrap();
        assert_eq!(
            output(presenter),
            "\r\x1b[2K\x1b[38;2;255;215;0m\x1b[1mP1\x1b[0m\x1b[38;2;255;255;255m #5\x1b[0m"
        );
    }

    #[test]
    fn repeated_style_is_not_re_emitted() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::TrueColor);
        presenter
            .present_line(&[
                Fragment::new("A", palette::RED),
                Fragment::new("B", palette::RED),
            ])
            .unwrap();
        assert_eq!(output(presenter), "\r\x1b[2K\x1b[38;2;255;0;0mAB\x1b[0m");
    }

    #[test]
    fn ansi256_profile_downgrades() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::Ansi256);
        presenter
            .present_line(&[Fragment::new("x", palette::RED)])
            .unwrap();
        assert_eq!(output(presenter), "\r\x1b[2K\x1b[38;5;196mx\x1b[0m");
    }

    #[test]
    fn mono_profile_emits_no_color() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::Mono);
        presenter
            .present_line(&[
                Fragment::new("LEADER", palette::GOLD).with_bold(true),
                Fragment::new(" x", palette::GRAY),
            ])
            .unwrap();
        let out = output(presenter);
        assert!(!out.contains("38;"));
        assert_eq!(out, "\r\x1b[2K\x1b[1mLEADER\x1b[0m x\x1b[0m");
    }

    #[test]
    fn empty_fragments_are_skipped() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::Mono);
        presenter
            .present_line(&[Fragment::empty(palette::RED), Fragment::new("x", palette::RED)])
            .unwrap();
        assert_eq!(output(presenter), "\r\x1b[2Kx\x1b[0m");
    }

    #[test]
    fn panel_repaints_whole_screen() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::Mono);
        presenter
            .present_panel(&[
                Content::from_fragments(vec![Fragment::new("head", palette::WHITE)]),
                Content::new(),
            ])
            .unwrap();
        assert_eq!(
            output(presenter),
            "\x1b[2J\x1b[1;1Hhead\x1b[0m\n\x1b[0m\n"
        );
    }

    #[test]
    fn sync_output_brackets_frame() {
        let mut presenter =
            AnsiPresenter::new(Vec::new(), ColorProfile::Mono).with_sync_output(true);
        presenter.present_line(&[]).unwrap();
        assert_eq!(output(presenter), "\x1b[?2026h\r\x1b[2K\x1b[0m\x1b[?2026l");
    }

    #[test]
    fn finish_line_resets_and_moves_down() {
        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::TrueColor);
        presenter
            .present_line(&[Fragment::new("LEADER", palette::GOLD).with_bold(true)])
            .unwrap();
        presenter.finish_line().unwrap();
        assert_eq!(
            output(presenter),
            "\r\x1b[2K\x1b[38;2;255;215;0m\x1b[1mLEADER\x1b[0m\x1b[0m\n"
        );
    }
}
