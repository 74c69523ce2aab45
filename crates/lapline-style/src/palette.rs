//! Named ticker colors.
//!
//! The generic entries match the classic LED-matrix palette; the series and
//! manufacturer entries are brand approximations.

use crate::Rgb;

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
pub const CYAN: Rgb = Rgb::new(0, 255, 255);
pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
pub const GRAY: Rgb = Rgb::new(128, 128, 128);
pub const GOLD: Rgb = Rgb::new(255, 215, 0);

/// Series header and caution-flag yellow.
pub const CAUTION_YELLOW: Rgb = Rgb::new(255, 200, 0);
pub const TOYOTA_RED: Rgb = Rgb::new(235, 0, 0);
pub const CHEVY_GOLD: Rgb = Rgb::new(255, 204, 0);
pub const FORD_BLUE: Rgb = Rgb::new(0, 60, 150);
