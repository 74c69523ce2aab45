#![forbid(unsafe_code)]

//! Color handling for lapline.
//!
//! - [`Rgb`] is the color every fragment carries.
//! - [`palette`] names the colors the formatting rules use.
//! - [`ColorProfile`] and [`Color::downgrade`] adapt true-color output to
//!   terminals that only speak 256, 16 or zero colors.
//!
//! # Example
//! ```
//! use lapline_style::{Color, ColorProfile, Rgb, palette};
//!
//! let gold = Color::Rgb(palette::GOLD);
//! assert!(matches!(gold.downgrade(ColorProfile::Ansi256), Color::Ansi256(_)));
//!
//! assert!(Rgb::try_from_channels(0, 300, 0).is_err());
//! ```

pub mod color;
pub mod palette;

pub use color::{
    Ansi16, Color, ColorCache, ColorError, ColorProfile, MonoColor, Rgb, ansi16_to_rgb,
    ansi256_to_rgb, rgb_to_256, rgb_to_ansi16, rgb_to_mono,
};
