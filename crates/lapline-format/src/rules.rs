#![forbid(unsafe_code)]

//! Formatting rules: race values to styled fragments.
//!
//! Every function here is pure and total. Unknown codes fall back to a
//! neutral rendering instead of failing.

use lapline_style::{Rgb, palette};
use lapline_text::{Fragment, FragmentStyle};

/// Placeholder for a gap that cannot be shown.
pub const GAP_PLACEHOLDER: &str = "+--.---";
/// Placeholder for a missing lap time.
pub const LAP_TIME_PLACEHOLDER: &str = "---.---";
/// Placeholder for a missing speed.
pub const SPEED_PLACEHOLDER: &str = "--.-mph";

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Style of a running position.
///
/// Rank 0 is not a valid position and renders like the back of the field.
#[must_use]
pub const fn position_style(position: u32) -> FragmentStyle {
    match position {
        1 => FragmentStyle::bold(palette::GOLD),
        2..=3 => FragmentStyle::bold(palette::GREEN),
        4..=10 => FragmentStyle::plain(palette::WHITE),
        _ => FragmentStyle::plain(palette::GRAY),
    }
}

/// `"P<n>"` colored by rank.
#[must_use]
pub fn format_position(position: u32) -> Fragment {
    Fragment::styled(format!("P{position}"), position_style(position))
}

// ---------------------------------------------------------------------------
// Gap to leader
// ---------------------------------------------------------------------------

/// Gap to the leader.
///
/// A zero gap is the leader itself. A car that has completed fewer laps than
/// the leader shows laps down regardless of its time gap. Otherwise the band
/// is chosen on the raw gap, then the value is rounded for display, so
/// `4.999` lands in the yellow band as `+5.00`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_gap(delta: f64, laps_completed: u32, leader_laps: u32) -> Fragment {
    if delta == 0.0 {
        return Fragment::new("LEADER", palette::GOLD).with_bold(true);
    }
    if laps_completed < leader_laps {
        let laps_down = leader_laps - laps_completed;
        return Fragment::new(format!("-{laps_down}L"), palette::RED);
    }
    if !delta.is_finite() {
        return Fragment::new(GAP_PLACEHOLDER, palette::GRAY);
    }

    let gap = delta.max(0.0);
    if gap < 1.0 {
        Fragment::new(format!("+{gap:.3}"), palette::GREEN)
    } else if gap < 5.0 {
        Fragment::new(format!("+{gap:.2}"), palette::YELLOW)
    } else {
        Fragment::new(format!("+{gap:.1}"), palette::ORANGE)
    }
}

// ---------------------------------------------------------------------------
// Flag
// ---------------------------------------------------------------------------

/// Ticker label and color for a flag code, if the flag is shown at all.
#[must_use]
pub const fn flag_label(code: i32) -> Option<(&'static str, Rgb)> {
    match code {
        1 => Some(("GREEN", palette::GREEN)),
        2 => Some(("CAUTION", palette::CAUTION_YELLOW)),
        3 => Some(("RED FLAG", palette::RED)),
        4 => Some(("WHITE FLAG", palette::WHITE)),
        5 => Some(("CHECKERED", palette::WHITE)),
        8 => Some(("HOT TRACK", palette::ORANGE)),
        9 => Some(("COLD TRACK", palette::CYAN)),
        _ => None,
    }
}

/// Bracketed flag indicator: `" ["`, the bold label, `"] "`.
///
/// Codes without a label (0, 6, 7, anything unknown) produce nothing.
#[must_use]
pub fn format_flag(code: i32) -> Vec<Fragment> {
    match flag_label(code) {
        Some((label, color)) => vec![
            Fragment::new(" [", palette::GRAY),
            Fragment::new(label, color).with_bold(true),
            Fragment::new("] ", palette::GRAY),
        ],
        None => Vec::new(),
    }
}

/// Status word for a flag code in panel views.
#[must_use]
pub const fn flag_status_text(code: i32) -> &'static str {
    match code {
        0 => "NONE",
        1 => "GREEN",
        2 => "YELLOW",
        3 => "RED",
        4 => "WHITE",
        5 => "CHECKERED",
        8 => "HOT TRACK",
        9 => "COLD TRACK",
        _ => "UNKNOWN",
    }
}

/// Status color for a flag code in panel views.
#[must_use]
pub const fn flag_status_color(code: i32) -> Rgb {
    match code {
        1 => palette::GREEN,
        2 => palette::YELLOW,
        3 => palette::RED,
        8 => palette::ORANGE,
        9 => palette::BLUE,
        _ => palette::WHITE,
    }
}

// ---------------------------------------------------------------------------
// Manufacturer, speed, lap time
// ---------------------------------------------------------------------------

/// Brand color for a manufacturer code.
#[must_use]
pub fn manufacturer_color(code: &str) -> Rgb {
    match code {
        "Tyt" => palette::TOYOTA_RED,
        "Chv" => palette::CHEVY_GOLD,
        "Frd" => palette::FORD_BLUE,
        _ => palette::WHITE,
    }
}

/// The manufacturer code in its brand color.
#[must_use]
pub fn format_manufacturer(code: &str) -> Fragment {
    Fragment::new(code.to_owned(), manufacturer_color(code))
}

/// Best-lap speed, two decimals, in mph.
#[must_use]
pub fn format_speed(speed: f64) -> Fragment {
    if speed > 0.0 && speed.is_finite() {
        Fragment::new(format!("{speed:.2}mph"), palette::CYAN)
    } else {
        Fragment::new(SPEED_PLACEHOLDER, palette::GRAY)
    }
}

/// Lap time: `M:SS.mmm` from one minute up, `S.sssS` below.
///
/// The time is rounded to whole milliseconds first, so a time just under a
/// minute boundary carries into the minute.
#[must_use]
pub fn format_lap_time(seconds: f64) -> Fragment {
    if !(seconds > 0.0 && seconds.is_finite()) {
        return Fragment::new(LAP_TIME_PLACEHOLDER, palette::GRAY);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (seconds * 1000.0).round() as u64;
    let (mins, secs, ms) = (millis / 60_000, (millis % 60_000) / 1000, millis % 1000);
    let text = if mins > 0 {
        format!("{mins}:{secs:02}.{ms:03}")
    } else {
        format!("{secs}.{ms:03}s")
    };
    Fragment::new(text, palette::WHITE)
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Full series name.
#[must_use]
pub const fn series_name(series_id: i32) -> &'static str {
    match series_id {
        1 => "NASCAR Cup Series",
        2 => "NASCAR Xfinity Series",
        3 => "NASCAR Craftsman Truck Series",
        _ => "NASCAR",
    }
}

/// Short series tag for the ticker header.
#[must_use]
pub const fn series_short(series_id: i32) -> &'static str {
    match series_id {
        1 => "CUP",
        2 => "NXS",
        3 => "TRUCK",
        _ => "NASCAR",
    }
}

/// `M:SS` clock for elapsed session seconds.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
