#![forbid(unsafe_code)]

//! Fragment: the atomic unit of styled ticker text.
//!
//! A fragment is a run of text drawn in one color, optionally bold. It:
//! - borrows string literals (`Cow<str>`) and owns formatted text
//! - caches its character count, since windowing measures it every frame
//! - can be sliced at **character** positions, keeping its style
//!
//! Fragments carry no position; their place in a frame is their index in the
//! enclosing [`Content`](crate::Content).
//!
//! # Example
//! ```
//! use lapline_style::palette;
//! use lapline_text::Fragment;
//!
//! let seg = Fragment::new("LEADER", palette::GOLD).with_bold(true);
//! assert_eq!(seg.char_len(), 6);
//!
//! let (left, right) = seg.split_at_char(3);
//! assert_eq!(left.as_str(), "LEA");
//! assert_eq!(right.as_str(), "DER");
//! assert!(right.is_bold());
//! ```

use std::borrow::Cow;

use lapline_style::Rgb;

/// Style attributes shared by every character of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FragmentStyle {
    /// Foreground color.
    pub color: Rgb,
    /// Bold emphasis.
    pub bold: bool,
}

impl FragmentStyle {
    /// Plain (non-bold) style in the given color.
    #[must_use]
    pub const fn plain(color: Rgb) -> Self {
        Self { color, bold: false }
    }

    /// Bold style in the given color.
    #[must_use]
    pub const fn bold(color: Rgb) -> Self {
        Self { color, bold: true }
    }
}

/// An immutable run of colored text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    text: Cow<'static, str>,
    chars: usize,
    style: FragmentStyle,
}

impl Fragment {
    /// Create a plain fragment.
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>, color: Rgb) -> Self {
        Self::styled(text, FragmentStyle::plain(color))
    }

    /// Create a fragment with an explicit style.
    #[must_use]
    pub fn styled(text: impl Into<Cow<'static, str>>, style: FragmentStyle) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { text, chars, style }
    }

    /// Create an empty fragment; it renders as nothing.
    #[must_use]
    pub const fn empty(color: Rgb) -> Self {
        Self {
            text: Cow::Borrowed(""),
            chars: 0,
            style: FragmentStyle::plain(color),
        }
    }

    /// Return a copy with the bold flag set to `bold`.
    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.style.bold = bold;
        self
    }

    /// The text content.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Foreground color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.style.color
    }

    /// Whether the fragment is bold.
    #[inline]
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.style.bold
    }

    /// Color and bold flag together.
    #[inline]
    #[must_use]
    pub const fn style(&self) -> FragmentStyle {
        self.style
    }

    /// Number of characters (Unicode scalar values).
    #[inline]
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.chars
    }

    /// Whether the fragment has no text.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Slice the characters `[start, end)` into a new fragment of the same style.
    ///
    /// Out-of-range bounds are clamped to the fragment; an inverted range
    /// yields an empty fragment.
    #[must_use]
    pub fn slice_chars(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.chars);
        let start = start.min(end);
        if start == 0 && end == self.chars {
            return self.clone();
        }
        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        Self {
            text: Cow::Owned(self.text[from..to].to_string()),
            chars: end - start,
            style: self.style,
        }
    }

    /// Split at a character position into `(left, right)`.
    ///
    /// Does not panic; a position past the end returns `(self, empty)`.
    #[must_use]
    pub fn split_at_char(&self, pos: usize) -> (Self, Self) {
        (self.slice_chars(0, pos), self.slice_chars(pos, self.chars))
    }

    /// Concatenate another fragment's text, keeping this fragment's style.
    #[must_use]
    pub fn concat_text(&self, other: &Fragment) -> Self {
        let mut text = String::with_capacity(self.text.len() + other.text.len());
        text.push_str(&self.text);
        text.push_str(&other.text);
        Self {
            text: Cow::Owned(text),
            chars: self.chars + other.chars,
            style: self.style,
        }
    }
}

/// Byte offset of the `n`th character (or the end of the string).
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapline_style::palette;

    #[test]
    fn new_counts_chars_not_bytes() {
        let seg = Fragment::new("Hämlin", palette::WHITE);
        assert_eq!(seg.char_len(), 6);
        assert_eq!(seg.as_str().len(), 7);
    }

    #[test]
    fn empty_fragment_is_legal() {
        let seg = Fragment::empty(palette::GRAY);
        assert!(seg.is_empty());
        assert_eq!(seg.char_len(), 0);
        assert_eq!(Fragment::new("", palette::RED).char_len(), 0);
    }

    #[test]
    fn with_bold_sets_flag_only() {
        let seg = Fragment::new("P1", palette::GOLD).with_bold(true);
        assert!(seg.is_bold());
        assert_eq!(seg.color(), palette::GOLD);
        assert_eq!(seg.style(), FragmentStyle::bold(palette::GOLD));
    }

    #[test]
    fn slice_chars_middle() {
        let seg = Fragment::new("ABCDE", palette::BLUE).with_bold(true);
        let mid = seg.slice_chars(1, 4);
        assert_eq!(mid.as_str(), "BCD");
        assert_eq!(mid.char_len(), 3);
        assert_eq!(mid.style(), seg.style());
    }

    #[test]
    fn slice_chars_clamps_bounds() {
        let seg = Fragment::new("ABC", palette::RED);
        assert_eq!(seg.slice_chars(1, 99).as_str(), "BC");
        assert_eq!(seg.slice_chars(5, 9).as_str(), "");
        assert_eq!(seg.slice_chars(2, 1).as_str(), "");
    }

    #[test]
    fn slice_chars_multibyte() {
        let seg = Fragment::new("→ĀB", palette::CYAN);
        assert_eq!(seg.slice_chars(1, 2).as_str(), "Ā");
        assert_eq!(seg.slice_chars(0, 1).as_str(), "→");
    }

    #[test]
    fn split_at_char_zero_and_beyond() {
        let seg = Fragment::new("Lap", palette::WHITE);
        let (l, r) = seg.split_at_char(0);
        assert_eq!((l.as_str(), r.as_str()), ("", "Lap"));
        let (l, r) = seg.split_at_char(10);
        assert_eq!((l.as_str(), r.as_str()), ("Lap", ""));
    }

    #[test]
    fn concat_text_keeps_left_style() {
        let a = Fragment::new("#2", palette::FORD_BLUE).with_bold(true);
        let b = Fragment::new("4", palette::WHITE);
        let joined = a.concat_text(&b);
        assert_eq!(joined.as_str(), "#24");
        assert_eq!(joined.char_len(), 3);
        assert_eq!(joined.style(), a.style());
    }
}
