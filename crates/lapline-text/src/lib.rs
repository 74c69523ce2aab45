#![forbid(unsafe_code)]

//! Text primitives for lapline.
//!
//! - [`Fragment`] - immutable run of colored text with character-aware slicing
//! - [`FragmentStyle`] - color plus bold flag
//! - [`Content`] - one frame: an ordered run of fragments with a cached length
//!
//! # Example
//! ```
//! use lapline_style::palette;
//! use lapline_text::{Content, Fragment};
//!
//! let frame: Content = [
//!     Fragment::new("P1", palette::GOLD).with_bold(true),
//!     Fragment::new(" K. Larson", palette::WHITE),
//! ]
//! .into_iter()
//! .collect();
//! assert_eq!(frame.total_length(), 12);
//! ```

pub mod content;
pub mod fragment;

pub use content::Content;
pub use fragment::{Fragment, FragmentStyle};

/// Concatenated text of a window of fragments.
#[must_use]
pub fn plain_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::as_str).collect()
}

/// Total character count of a window of fragments.
#[must_use]
pub fn char_len(fragments: &[Fragment]) -> usize {
    fragments.iter().map(Fragment::char_len).sum()
}
