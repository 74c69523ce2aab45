//! Property-based tests for presenter output.
//!
//! 1. Stripping escape sequences from a presented line leaves exactly the
//!    fragment text, in order.
//! 2. Every presented line ends with an SGR reset.
//! 3. The recording sink and the ANSI presenter agree on the text.

use lapline_render::{AnsiPresenter, FragmentSink, RecordingSink};
use lapline_style::{ColorProfile, Rgb};
use lapline_text::{Fragment, FragmentStyle};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn fragment_strategy() -> impl Strategy<Value = Fragment> {
    ("[a-zA-Z0-9 #+.|]{0,10}", any::<(u8, u8, u8)>(), any::<bool>()).prop_map(
        |(text, (r, g, b), bold)| {
            Fragment::styled(
                text,
                FragmentStyle {
                    color: Rgb::new(r, g, b),
                    bold,
                },
            )
        },
    )
}

fn profile_strategy() -> impl Strategy<Value = ColorProfile> {
    prop_oneof![
        Just(ColorProfile::Mono),
        Just(ColorProfile::Ansi16),
        Just(ColorProfile::Ansi256),
        Just(ColorProfile::TrueColor),
    ]
}

/// Drop CSI sequences and carriage returns.
fn strip_controls(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
            }
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

proptest! {
    #[test]
    fn stripped_output_is_the_text(
        fragments in prop::collection::vec(fragment_strategy(), 0..12),
        profile in profile_strategy(),
    ) {
        let mut presenter = AnsiPresenter::new(Vec::new(), profile);
        presenter.present_line(&fragments).unwrap();
        let bytes = presenter.into_inner().unwrap();

        prop_assert_eq!(strip_controls(&bytes), lapline_text::plain_text(&fragments));
        prop_assert!(bytes.ends_with(b"\x1b[0m"));
    }

    #[test]
    fn recording_and_ansi_agree(fragments in prop::collection::vec(fragment_strategy(), 0..12)) {
        let mut recording = RecordingSink::new();
        recording.present_line(&fragments).unwrap();

        let mut presenter = AnsiPresenter::new(Vec::new(), ColorProfile::TrueColor);
        presenter.present_line(&fragments).unwrap();
        let bytes = presenter.into_inner().unwrap();

        prop_assert_eq!(recording.texts(), vec![strip_controls(&bytes)]);
    }
}
