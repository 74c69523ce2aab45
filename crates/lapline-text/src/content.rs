#![forbid(unsafe_code)]

//! Content: one frame of ticker text.
//!
//! Content is an ordered run of [`Fragment`]s with a cached total character
//! length. Frames are rebuilt from fresh data and swapped in whole; nothing
//! edits a frame once it has been handed to a scroll engine.

use crate::Fragment;

/// An ordered sequence of fragments representing one refresh snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    fragments: Vec<Fragment>,
    total_length: usize,
}

impl Content {
    /// Create an empty frame.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
            total_length: 0,
        }
    }

    /// Create a frame from a vector of fragments.
    #[must_use]
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        let total_length = fragments.iter().map(Fragment::char_len).sum();
        Self {
            fragments,
            total_length,
        }
    }

    /// Total number of characters across all fragments.
    #[inline]
    #[must_use]
    pub const fn total_length(&self) -> usize {
        self.total_length
    }

    /// Whether the frame has no visible characters.
    ///
    /// A frame made only of empty fragments counts as empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_length == 0
    }

    /// Number of fragments (including empty ones).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.total_length += fragment.char_len();
        self.fragments.push(fragment);
    }

    /// Append every fragment of `other`.
    pub fn append(&mut self, other: Content) {
        self.total_length += other.total_length;
        self.fragments.extend(other.fragments);
    }

    /// Sequence concatenation of two frames.
    #[must_use]
    pub fn concat(mut self, other: Content) -> Self {
        self.append(other);
        self
    }

    /// The fragments, in display order.
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Iterate over fragments.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    /// Concatenated text of all fragments.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.total_length);
        for fragment in &self.fragments {
            out.push_str(fragment.as_str());
        }
        out
    }

    /// Merge adjacent fragments that share a style and drop empty ones.
    ///
    /// Rendering the result produces exactly the same characters in the same
    /// colors; it only shrinks the fragment count.
    #[must_use]
    pub fn coalesced(&self) -> Self {
        let mut merged: Vec<Fragment> = Vec::with_capacity(self.fragments.len());
        for fragment in self.fragments.iter().filter(|f| !f.is_empty()) {
            match merged.last_mut() {
                Some(last) if last.style() == fragment.style() => {
                    *last = last.concat_text(fragment);
                }
                _ => merged.push(fragment.clone()),
            }
        }
        Self {
            fragments: merged,
            total_length: self.total_length,
        }
    }

    /// Take the fragments back out of the frame.
    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

impl From<Vec<Fragment>> for Content {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::from_fragments(fragments)
    }
}

impl FromIterator<Fragment> for Content {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::from_fragments(iter.into_iter().collect())
    }
}

impl Extend<Fragment> for Content {
    fn extend<I: IntoIterator<Item = Fragment>>(&mut self, iter: I) {
        for fragment in iter {
            self.push(fragment);
        }
    }
}

impl IntoIterator for Content {
    type Item = Fragment;
    type IntoIter = std::vec::IntoIter<Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Content {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
