#![forbid(unsafe_code)]

//! Output sinks for rendered frames.

use std::io;

use lapline_text::{Content, Fragment};

/// Destination for ticker frames and static panels.
///
/// A sink renders fragments in order, with no gaps and no reordering.
pub trait FragmentSink {
    /// Replace the single ticker line with `fragments`.
    fn present_line(&mut self, fragments: &[Fragment]) -> io::Result<()>;

    /// Replace the whole screen with one panel of lines.
    fn present_panel(&mut self, lines: &[Content]) -> io::Result<()>;
}

impl<S: FragmentSink + ?Sized> FragmentSink for &mut S {
    fn present_line(&mut self, fragments: &[Fragment]) -> io::Result<()> {
        (**self).present_line(fragments)
    }

    fn present_panel(&mut self, lines: &[Content]) -> io::Result<()> {
        (**self).present_panel(lines)
    }
}

/// One presented frame, as captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presented {
    Line(Vec<Fragment>),
    Panel(Vec<Content>),
}

impl Presented {
    /// Plain text of the frame, panel lines joined with `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Line(fragments) => lapline_text::plain_text(fragments),
            Self::Panel(lines) => lines
                .iter()
                .map(Content::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    frames: Vec<Presented>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in presentation order.
    #[must_use]
    pub fn frames(&self) -> &[Presented] {
        &self.frames
    }

    /// Plain text of every frame.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.frames.iter().map(Presented::plain_text).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FragmentSink for RecordingSink {
    fn present_line(&mut self, fragments: &[Fragment]) -> io::Result<()> {
        self.frames.push(Presented::Line(fragments.to_vec()));
        Ok(())
    }

    fn present_panel(&mut self, lines: &[Content]) -> io::Result<()> {
        self.frames.push(Presented::Panel(lines.to_vec()));
        Ok(())
    }
}
