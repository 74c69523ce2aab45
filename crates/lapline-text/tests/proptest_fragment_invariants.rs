//! Property-based invariant tests for fragments and content frames.
//!
//! 1. Splitting a fragment never loses or duplicates characters.
//! 2. Slices keep the source style.
//! 3. A slice is never longer than its requested range.
//! 4. Coalescing never changes the rendered text or length.

use lapline_style::Rgb;
use lapline_text::{Content, Fragment, FragmentStyle};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn style_strategy() -> impl Strategy<Value = FragmentStyle> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<bool>())
        .prop_map(|(r, g, b, bold)| FragmentStyle {
            color: Rgb::new(r, g, b),
            bold,
        })
}

fn fragment_strategy() -> impl Strategy<Value = Fragment> {
    ("[a-zA-Z0-9 #+.é→]{0,12}", style_strategy())
        .prop_map(|(text, style)| Fragment::styled(text, style))
}

proptest! {
    #[test]
    fn split_preserves_text(fragment in fragment_strategy(), pos in 0usize..20) {
        let (left, right) = fragment.split_at_char(pos);
        prop_assert_eq!(format!("{}{}", left.as_str(), right.as_str()), fragment.as_str());
        prop_assert_eq!(left.char_len() + right.char_len(), fragment.char_len());
    }

    #[test]
    fn slice_keeps_style(fragment in fragment_strategy(), a in 0usize..20, b in 0usize..20) {
        let slice = fragment.slice_chars(a, b);
        prop_assert_eq!(slice.style(), fragment.style());
        prop_assert!(slice.char_len() <= b.saturating_sub(a));
        prop_assert_eq!(slice.char_len(), slice.as_str().chars().count());
    }

    #[test]
    fn coalesce_preserves_rendering(fragments in prop::collection::vec(fragment_strategy(), 0..16)) {
        let content = Content::from_fragments(fragments);
        let merged = content.coalesced();
        prop_assert_eq!(merged.plain_text(), content.plain_text());
        prop_assert_eq!(merged.total_length(), content.total_length());
        prop_assert!(merged.len() <= content.len());
    }
}
