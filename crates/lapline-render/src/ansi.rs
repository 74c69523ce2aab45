#![forbid(unsafe_code)]

//! The escape sequences a ticker needs, written straight to any [`Write`].
//!
//! Only foreground color and bold are ever set. A single-line frame is
//! redrawn in place with carriage return plus erase-line; a panel repaints
//! from the home position after erasing the display. Nothing here tracks
//! state; [`AnsiPresenter`](crate::AnsiPresenter) decides what to emit.

use std::io::{self, Write};

use lapline_style::{Ansi16, Color, MonoColor};

// =============================================================================
// SGR
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// SGR bold: `CSI 1 m`
pub const SGR_BOLD: &[u8] = b"\x1b[1m";

/// Write SGR reset.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// Write SGR bold.
#[inline]
pub fn sgr_bold<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_BOLD)
}

/// True color foreground: `CSI 38;2;r;g;b m`
pub fn sgr_fg_rgb<W: Write>(w: &mut W, r: u8, g: u8, b: u8) -> io::Result<()> {
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// 256-color foreground: `CSI 38;5;n m`
pub fn sgr_fg_256<W: Write>(w: &mut W, index: u8) -> io::Result<()> {
    write!(w, "\x1b[38;5;{index}m")
}

/// 16-color foreground: 30-37 normal, 90-97 bright.
pub fn sgr_fg_16<W: Write>(w: &mut W, color: Ansi16) -> io::Result<()> {
    let index = color.as_u8();
    let code = if index < 8 { 30 + index } else { 90 + index - 8 };
    write!(w, "\x1b[{code}m")
}

/// Foreground for an already-downgraded color.
///
/// Monochrome colors emit nothing; the terminal default is the only "color".
pub fn sgr_fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Rgb(rgb) => sgr_fg_rgb(w, rgb.r, rgb.g, rgb.b),
        Color::Ansi256(index) => sgr_fg_256(w, index),
        Color::Ansi16(ansi) => sgr_fg_16(w, ansi),
        Color::Mono(MonoColor::Black | MonoColor::White) => Ok(()),
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// CUP: `CSI row ; col H`. Input is 0-indexed.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", row.saturating_add(1), col.saturating_add(1))
}

/// Carriage return.
#[inline]
pub fn cr<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Line feed.
#[inline]
pub fn lf<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\n")
}

// =============================================================================
// Erase
// =============================================================================

/// EL (Erase Line) mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLineMode {
    /// Erase from cursor to end of line.
    ToEnd,
    /// Erase entire line.
    All,
}

/// EL: `CSI n K`
pub fn erase_line<W: Write>(w: &mut W, mode: EraseLineMode) -> io::Result<()> {
    match mode {
        EraseLineMode::ToEnd => w.write_all(b"\x1b[K"),
        EraseLineMode::All => w.write_all(b"\x1b[2K"),
    }
}

/// ED entire screen: `CSI 2 J`
pub fn erase_display<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

// =============================================================================
// Synchronized output
// =============================================================================

/// Begin synchronized update: `CSI ? 2026 h`
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";

/// End synchronized update: `CSI ? 2026 l`
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

#[inline]
pub fn sync_begin<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_BEGIN)
}

#[inline]
pub fn sync_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_END)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapline_style::Rgb;

    fn to_bytes<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    // SGR

    #[test]
    fn sgr_reset_and_bold() {
        assert_eq!(to_bytes(sgr_reset), b"\x1b[0m");
        assert_eq!(to_bytes(sgr_bold), b"\x1b[1m");
    }

    #[test]
    fn sgr_fg_rgb_bytes() {
        assert_eq!(
            to_bytes(|w| sgr_fg_rgb(w, 255, 215, 0)),
            b"\x1b[38;2;255;215;0m"
        );
    }

    #[test]
    fn sgr_fg_256_bytes() {
        assert_eq!(to_bytes(|w| sgr_fg_256(w, 220)), b"\x1b[38;5;220m");
    }

    #[test]
    fn sgr_fg_16_normal_and_bright() {
        assert_eq!(to_bytes(|w| sgr_fg_16(w, Ansi16::Red)), b"\x1b[31m");
        assert_eq!(to_bytes(|w| sgr_fg_16(w, Ansi16::BrightCyan)), b"\x1b[96m");
    }

    #[test]
    fn sgr_fg_dispatches_on_variant() {
        assert_eq!(
            to_bytes(|w| sgr_fg(w, Color::Rgb(Rgb::new(1, 2, 3)))),
            b"\x1b[38;2;1;2;3m"
        );
        assert_eq!(to_bytes(|w| sgr_fg(w, Color::Ansi256(16))), b"\x1b[38;5;16m");
        assert_eq!(to_bytes(|w| sgr_fg(w, Color::Mono(MonoColor::White))), b"");
    }

    // Cursor and erase

    #[test]
    fn cup_is_one_indexed() {
        assert_eq!(to_bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(to_bytes(|w| cup(w, 4, 9)), b"\x1b[5;10H");
    }

    #[test]
    fn erase_sequences() {
        assert_eq!(to_bytes(|w| erase_line(w, EraseLineMode::All)), b"\x1b[2K");
        assert_eq!(to_bytes(|w| erase_line(w, EraseLineMode::ToEnd)), b"\x1b[K");
        assert_eq!(to_bytes(erase_display), b"\x1b[2J");
    }

    #[test]
    fn sync_sequences() {
        assert_eq!(to_bytes(sync_begin), b"\x1b[?2026h");
        assert_eq!(to_bytes(sync_end), b"\x1b[?2026l");
    }
}
