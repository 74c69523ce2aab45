//! Property-based tests for color validation and profile downgrade.
//!
//! 1. Channel validation accepts exactly 0..=255 per channel.
//! 2. Downgrading lands in the profile's color space.
//! 3. Downgrading is idempotent.
//! 4. The cache answers exactly like an uncached downgrade.

use lapline_style::{Color, ColorCache, ColorProfile, Rgb};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn profile_strategy() -> impl Strategy<Value = ColorProfile> {
    prop_oneof![
        Just(ColorProfile::Mono),
        Just(ColorProfile::Ansi16),
        Just(ColorProfile::Ansi256),
        Just(ColorProfile::TrueColor),
    ]
}

fn fits_profile(color: Color, profile: ColorProfile) -> bool {
    match profile {
        ColorProfile::TrueColor => matches!(color, Color::Rgb(_)),
        ColorProfile::Ansi256 => matches!(color, Color::Ansi256(_)),
        ColorProfile::Ansi16 => matches!(color, Color::Ansi16(_)),
        ColorProfile::Mono => matches!(color, Color::Mono(_)),
    }
}

proptest! {
    #[test]
    fn channel_validation(r in -300i32..600, g in -300i32..600, b in -300i32..600) {
        let valid = [r, g, b].iter().all(|c| (0..=255).contains(c));
        let parsed = Rgb::try_from_channels(r, g, b);
        prop_assert_eq!(parsed.is_ok(), valid);
        if let Ok(rgb) = parsed {
            prop_assert_eq!((i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b)), (r, g, b));
        }
    }

    #[test]
    fn downgrade_fits_profile(rgb in rgb_strategy(), profile in profile_strategy()) {
        let color = Color::Rgb(rgb).downgrade(profile);
        prop_assert!(fits_profile(color, profile));
        prop_assert_eq!(color.downgrade(profile), color);
    }

    #[test]
    fn cache_matches_direct_downgrade(
        colors in prop::collection::vec(rgb_strategy(), 1..64),
        profile in profile_strategy(),
    ) {
        let mut cache = ColorCache::with_capacity(profile, 8);
        for rgb in colors {
            prop_assert_eq!(cache.downgrade_rgb(rgb), Color::Rgb(rgb).downgrade(profile));
            prop_assert!(cache.len() <= 8);
        }
    }
}
