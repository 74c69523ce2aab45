//! Colors as the ticker carries them ([`Rgb`]) and as a terminal can show
//! them ([`Color`] at a given [`ColorProfile`]).

use std::collections::HashMap;

/// Error raised when a color is built from channel values outside `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// A channel value does not fit in a byte.
    #[error("{channel} channel out of range: {value} (expected 0..=255)")]
    ChannelOutOfRange {
        /// Which channel was rejected (`"red"`, `"green"` or `"blue"`).
        channel: &'static str,
        /// The offending value.
        value: i32,
    },
}

/// How many colors the output terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorProfile {
    /// Text only; bold survives, color does not.
    Mono,
    /// The sixteen base colors.
    Ansi16,
    /// xterm 256-color palette.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl ColorProfile {
    /// Resolve detection flags. An explicit opt-out wins over any capability.
    #[must_use]
    pub const fn from_flags(true_color: bool, colors_256: bool, no_color: bool) -> Self {
        match (no_color, true_color, colors_256) {
            (true, _, _) => Self::Mono,
            (false, true, _) => Self::TrueColor,
            (false, false, true) => Self::Ansi256,
            (false, false, false) => Self::Ansi16,
        }
    }

    /// Pick a profile from the raw values of `NO_COLOR`, `COLORTERM` and `TERM`.
    #[must_use]
    pub fn from_env_values(
        no_color: Option<&str>,
        colorterm: Option<&str>,
        term: Option<&str>,
    ) -> Self {
        let no_color = no_color.is_some_and(|v| !v.is_empty());
        let true_color = colorterm.is_some_and(|v| {
            v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit")
        });
        let colors_256 = term.is_some_and(|v| v.contains("256color"));
        Self::from_flags(true_color, colors_256, no_color)
    }

    /// Profile of the current process environment.
    #[must_use]
    pub fn detect() -> Self {
        let var = |name| std::env::var(name).ok();
        let (no_color, colorterm, term) = (var("NO_COLOR"), var("COLORTERM"), var("TERM"));
        Self::from_env_values(no_color.as_deref(), colorterm.as_deref(), term.as_deref())
    }

    #[must_use]
    pub const fn supports_true_color(self) -> bool {
        matches!(self, Self::TrueColor)
    }
}

/// A 24-bit color; every fragment carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide integer channels, rejecting anything outside `0..=255`.
    pub fn try_from_channels(r: i32, g: i32, b: i32) -> Result<Self, ColorError> {
        Ok(Self::new(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// `0xRRGGBB`.
    #[must_use]
    pub const fn as_key(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }

    /// BT.709 luma, rounded to a byte.
    #[must_use]
    pub fn luminance_u8(self) -> u8 {
        let weighted = [(self.r, 2126u32), (self.g, 7152), (self.b, 722)]
            .into_iter()
            .map(|(c, w)| u32::from(c) * w)
            .sum::<u32>();
        u8::try_from((weighted + 5_000) / 10_000).unwrap_or(u8::MAX)
    }

    fn distance_sq(self, other: Self) -> u64 {
        let d = |a: u8, b: u8| u64::from(a.abs_diff(b)).pow(2);
        2126 * d(self.r, other.r) + 7152 * d(self.g, other.g) + 722 * d(self.b, other.b)
    }
}

impl TryFrom<(i32, i32, i32)> for Rgb {
    type Error = ColorError;

    fn try_from((r, g, b): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::try_from_channels(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

fn channel(name: &'static str, value: i32) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange {
        channel: name,
        value,
    })
}

/// The sixteen base terminal colors, in SGR index order (0-7 normal, 8-15 bright).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Black = 0,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// SGR index, 0 through 15.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Variant for an index, `None` above 15.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0..=15 => Some(Self::ALL[value as usize]),
            _ => None,
        }
    }
}

/// Light or dark, for terminals without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonoColor {
    Black,
    White,
}

/// A color expressed at the fidelity of some [`ColorProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(Rgb),
    Ansi256(u8),
    Ansi16(Ansi16),
    Mono(MonoColor),
}

impl Color {
    /// Approximate 24-bit value of this color.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Rgb(rgb) => rgb,
            Self::Ansi256(index) => ansi256_to_rgb(index),
            Self::Ansi16(base) => ansi16_to_rgb(base),
            Self::Mono(MonoColor::Black) => Rgb::new(0, 0, 0),
            Self::Mono(MonoColor::White) => Rgb::new(255, 255, 255),
        }
    }

    /// Nearest color the `profile` can show. Never upgrades.
    #[must_use]
    pub fn downgrade(self, profile: ColorProfile) -> Self {
        let Rgb { r, g, b } = self.to_rgb();
        match (profile, self) {
            (ColorProfile::TrueColor, _)
            | (ColorProfile::Ansi256, Self::Ansi256(_) | Self::Ansi16(_) | Self::Mono(_))
            | (ColorProfile::Ansi16, Self::Ansi16(_) | Self::Mono(_)) => self,
            (ColorProfile::Ansi256, Self::Rgb(_)) => Self::Ansi256(rgb_to_256(r, g, b)),
            (ColorProfile::Ansi16, _) => Self::Ansi16(rgb_to_ansi16(r, g, b)),
            (ColorProfile::Mono, _) => Self::Mono(rgb_to_mono(r, g, b)),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

/// Bounded memo of downgrade results for one profile (clears on overflow).
///
/// A ticker repaints the same handful of palette colors every frame, so the
/// nearest-color search runs once per distinct color.
#[derive(Debug)]
pub struct ColorCache {
    profile: ColorProfile,
    capacity: usize,
    entries: HashMap<u32, Color>,
}

impl ColorCache {
    /// Cache holding up to 256 colors.
    #[must_use]
    pub fn new(profile: ColorProfile) -> Self {
        Self::with_capacity(profile, 256)
    }

    /// Cache holding up to `capacity` colors (at least one).
    #[must_use]
    pub fn with_capacity(profile: ColorProfile, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            profile,
            capacity,
            entries: HashMap::with_capacity(capacity.min(256)),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> ColorProfile {
        self.profile
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Downgrade `rgb` to this cache's profile.
    pub fn downgrade_rgb(&mut self, rgb: Rgb) -> Color {
        let key = rgb.as_key();
        if let Some(&color) = self.entries.get(&key) {
            return color;
        }
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        let color = Color::Rgb(rgb).downgrade(self.profile);
        self.entries.insert(key, color);
        color
    }
}

// xterm defaults for the sixteen base colors.
const BASE_COLORS: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

// Channel levels of the 6x6x6 color cube (indices 16..=231).
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

#[must_use]
pub fn ansi16_to_rgb(color: Ansi16) -> Rgb {
    BASE_COLORS[usize::from(color.as_u8())]
}

/// Nearest xterm 256-color index. Pure grays use the 24-step gray ramp.
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            level => 232 + ((level - 8) / 10).min(23),
        };
    }
    16 + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

fn cube_level(v: u8) -> u8 {
    match v {
        0..=47 => 0,
        48..=114 => 1,
        _ => (v - 35) / 40,
    }
}

#[must_use]
pub fn ansi256_to_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => BASE_COLORS[usize::from(index)],
        232..=255 => {
            let gray = 8 + 10 * (index - 232);
            Rgb::new(gray, gray, gray)
        }
        _ => {
            let cube = usize::from(index - 16);
            Rgb::new(
                CUBE_LEVELS[cube / 36],
                CUBE_LEVELS[(cube / 6) % 6],
                CUBE_LEVELS[cube % 6],
            )
        }
    }
}

/// Closest base color by luma-weighted distance.
#[must_use]
pub fn rgb_to_ansi16(r: u8, g: u8, b: u8) -> Ansi16 {
    let target = Rgb::new(r, g, b);
    Ansi16::ALL
        .into_iter()
        .zip(BASE_COLORS)
        .min_by_key(|&(_, base)| target.distance_sq(base))
        .map_or(Ansi16::Black, |(color, _)| color)
}

/// White at luma 128 and above, black below.
#[must_use]
pub fn rgb_to_mono(r: u8, g: u8, b: u8) -> MonoColor {
    if Rgb::new(r, g, b).luminance_u8() >= 128 {
        MonoColor::White
    } else {
        MonoColor::Black
    }
}
