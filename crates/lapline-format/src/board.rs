#![forbid(unsafe_code)]

//! Content builders: one snapshot to a scrolling line or a static panel.

use lapline_style::palette;
use lapline_text::{Content, Fragment, FragmentStyle};

use crate::model::{LiveData, Vehicle};
use crate::rules::{
    flag_status_color, flag_status_text, format_clock, format_flag, format_gap,
    format_manufacturer, format_position, format_speed, manufacturer_color, position_style,
    series_short,
};

/// What the builders include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// How many cars to list.
    pub positions: usize,
    pub show_speed: bool,
    pub show_gap: bool,
    pub show_laps: bool,
    pub show_manufacturer: bool,
    pub show_flag: bool,
    /// Row count for the compact panel.
    pub compact_rows: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            positions: 20,
            show_speed: true,
            show_gap: true,
            show_laps: true,
            show_manufacturer: true,
            show_flag: true,
            compact_rows: 5,
        }
    }
}

fn gray(text: &'static str) -> Fragment {
    Fragment::new(text, palette::GRAY)
}

fn white(text: impl Into<std::borrow::Cow<'static, str>>) -> Fragment {
    Fragment::new(text, palette::WHITE)
}

// ---------------------------------------------------------------------------
// Scrolling line
// ---------------------------------------------------------------------------

/// The single-line ticker for one snapshot.
#[must_use]
pub fn scroll_content(data: &LiveData, options: &DisplayOptions) -> Content {
    let session = &data.session;
    let mut content = Content::new();

    content.push(
        Fragment::new(format!(" {} ", series_short(session.series_id)), palette::CAUTION_YELLOW)
            .with_bold(true),
    );
    content.push(white(format!("{} ", session.run_type.name())));
    content.push(Fragment::new(format!("@ {} ", session.track_name), palette::CYAN));

    if options.show_flag {
        content.extend(format_flag(session.flag_state));
    }

    if session.run_type.is_race() {
        if options.show_laps {
            content.push(white(format!("Lap {}/{} ", session.lap_number, session.laps_in_race)));
            if session.is_closing_laps() {
                content.push(
                    Fragment::new(format!("({} TO GO!) ", session.laps_to_go), palette::RED)
                        .with_bold(true),
                );
            }
        }
    } else {
        content.push(Fragment::new(
            format!("[{}] ", format_clock(session.elapsed_time)),
            palette::GRAY,
        ));
    }

    content.push(gray(" | "));

    if let Some(leader) = data.leader() {
        content.push(Fragment::new("LEADER: ", palette::GOLD).with_bold(true));
        content.push(white(format!("#{} ", leader.number)).with_bold(true));
        content.push(white(format!("{} ", leader.driver.short_name)));
        if options.show_manufacturer {
            content.push(format_manufacturer(&leader.manufacturer));
            content.push(white(" "));
        }
        if options.show_speed && leader.best_lap_speed > 0.0 {
            content.push(format_speed(leader.best_lap_speed));
        }
        content.push(gray(" | "));
    }

    let leader_laps = data.leader().map(|v| v.laps_completed);
    for vehicle in data.top_n(options.positions) {
        push_scroll_vehicle(&mut content, vehicle, leader_laps, data, options);
        content.push(Fragment::new("  ", palette::BLACK));
    }

    if session.run_type.is_race() {
        content.push(gray(" | "));
        content.push(Fragment::new(
            format!("Lead Changes: {} ", session.num_lead_changes),
            palette::CYAN,
        ));
        content.push(Fragment::new(
            format!("Cautions: {} ", session.num_cautions),
            palette::YELLOW,
        ));
    }

    content
}

fn push_scroll_vehicle(
    content: &mut Content,
    vehicle: &Vehicle,
    leader_laps: Option<u32>,
    data: &LiveData,
    options: &DisplayOptions,
) {
    content.push(format_position(vehicle.running_position));
    content.push(white(" "));
    content.push(
        Fragment::new(format!("#{}", vehicle.number), manufacturer_color(&vehicle.manufacturer))
            .with_bold(true),
    );
    content.push(white(" "));
    content.push(white(vehicle.driver.short_name.clone()));

    if options.show_gap && vehicle.running_position > 1 {
        content.push(white(" "));
        let leader_laps = leader_laps.unwrap_or(vehicle.laps_completed);
        content.push(format_gap(vehicle.delta, vehicle.laps_completed, leader_laps));
    }

    if options.show_speed && data.session.run_type.is_timed() && vehicle.best_lap_speed > 0.0 {
        content.push(white(" "));
        content.push(Fragment::new(
            format!("{:.2}", vehicle.best_lap_speed),
            palette::CYAN,
        ));
    }
}

// ---------------------------------------------------------------------------
// Leaderboard panel
// ---------------------------------------------------------------------------

/// Full multi-line leaderboard.
#[must_use]
pub fn leaderboard_lines(data: &LiveData, options: &DisplayOptions) -> Vec<Content> {
    let session = &data.session;
    let is_race = session.run_type.is_race();
    let mut lines = Vec::new();

    lines.push(Content::from_fragments(vec![
        Fragment::new(session.run_name.clone(), palette::YELLOW).with_bold(true),
        white(" @ "),
        Fragment::new(session.track_name.clone(), palette::CYAN).with_bold(true),
    ]));

    let mut status = Content::new();
    status.push(
        Fragment::new(
            format!("[{}]", flag_status_text(session.flag_state)),
            flag_status_color(session.flag_state),
        )
        .with_bold(true),
    );
    if is_race {
        status.push(white(format!("  Lap {}/{}", session.lap_number, session.laps_in_race)));
        if session.is_closing_laps() {
            status.push(
                Fragment::new(format!("  {} TO GO!", session.laps_to_go), palette::RED)
                    .with_bold(true),
            );
        }
    } else {
        status.push(white(format!("  Elapsed: {}", format_clock(session.elapsed_time))));
    }
    lines.push(status);
    lines.push(Content::new());

    let header = if is_race {
        format!("{:<4} {:<4} {:<18} {:<10} {:<6} {:<5}", "Pos", "#", "Driver", "Gap", "Laps", "Stops")
    } else {
        format!(
            "{:<4} {:<4} {:<18} {:<12} {:<10} {:<5}",
            "Pos", "#", "Driver", "Best Time", "Speed", "Laps"
        )
    };
    lines.push(Content::from_fragments(vec![white(header).with_bold(true)]));

    let leader_laps = data.leader().map(|v| v.laps_completed);
    for vehicle in data.top_n(options.positions) {
        let mut row = Content::new();
        row.push(Fragment::styled(
            format!("P{:<3}", vehicle.running_position),
            position_style(vehicle.running_position),
        ));
        row.push(white(" "));
        row.push(Fragment::new(
            format!("#{:<3}", vehicle.number),
            manufacturer_color(&vehicle.manufacturer),
        ));
        row.push(white(format!(" {:<18} ", vehicle.driver.short_name)));

        let detail = if is_race {
            format!(
                "{:<10} {:<6} {:<5}",
                panel_gap(vehicle, leader_laps),
                vehicle.laps_completed,
                vehicle.pit_stops
            )
        } else {
            format!(
                "{:<12} {:<10} {:<5}",
                panel_decimal(vehicle.best_lap_time),
                panel_decimal(vehicle.best_lap_speed),
                vehicle.laps_completed
            )
        };
        row.push(white(detail));
        lines.push(row);
    }

    lines.push(Content::new());
    let stats = if is_race {
        format!(
            "Lead Changes: {} | Leaders: {} | Cautions: {} ({} laps)",
            session.num_lead_changes,
            session.num_leaders,
            session.num_cautions,
            session.num_caution_laps
        )
    } else {
        format!(
            "Cars on Track: {} | Total Entries: {}",
            data.on_track_count(),
            data.vehicles.len()
        )
    };
    lines.push(Content::from_fragments(vec![Fragment::new(stats, palette::GRAY)]));

    lines
}

fn panel_gap(vehicle: &Vehicle, leader_laps: Option<u32>) -> String {
    if vehicle.running_position == 1 {
        return "LEADER".to_owned();
    }
    match leader_laps {
        Some(leader) if vehicle.laps_completed < leader => {
            format!("-{}L", leader - vehicle.laps_completed)
        }
        _ if vehicle.delta < 10.0 => format!("+{:.3}", vehicle.delta),
        _ => format!("+{:.1}", vehicle.delta),
    }
}

fn panel_decimal(value: f64) -> String {
    if value > 0.0 {
        format!("{value:.3}")
    } else {
        "---".to_owned()
    }
}

// ---------------------------------------------------------------------------
// Compact panel
// ---------------------------------------------------------------------------

/// Session line followed by `compact_rows` rows of `P<n> #<num> <last name>`.
#[must_use]
pub fn compact_lines(data: &LiveData, options: &DisplayOptions) -> Vec<Content> {
    let session = &data.session;
    let series = series_short(session.series_id);
    let flag = Fragment::new(
        format!("[{}]", flag_status_text(session.flag_state)),
        flag_status_color(session.flag_state),
    );

    let mut info = Content::new();
    if session.run_type.is_race() {
        info.push(Fragment::new(series, palette::YELLOW).with_bold(true));
        info.push(white(" "));
        info.push(flag);
        info.push(white(format!(
            " Lap {}/{} @ {}",
            session.lap_number, session.laps_in_race, session.track_name
        )));
    } else {
        info.push(
            Fragment::new(format!("{series} {}", session.run_type.name()), palette::YELLOW)
                .with_bold(true),
        );
        info.push(white(" "));
        info.push(flag);
        info.push(white(format!(" @ {}", session.track_name)));
    }

    let rows = options.compact_rows.max(1);
    let vehicles = data.top_n(options.positions);
    let per_row = vehicles.len() / rows + 1;

    let mut lines = Vec::with_capacity(rows + 1);
    lines.push(info);
    for row in 0..rows {
        let start = (row * per_row).min(vehicles.len());
        let end = (start + per_row).min(vehicles.len());
        let mut line = Content::new();
        for (i, vehicle) in vehicles[start..end].iter().enumerate() {
            if i > 0 {
                line.push(white("  "));
            }
            let style = if vehicle.running_position == 1 {
                position_style(1)
            } else {
                FragmentStyle::plain(palette::WHITE)
            };
            line.push(Fragment::styled(format!("P{}", vehicle.running_position), style));
            line.push(white(" "));
            line.push(Fragment::new(
                format!("#{}", vehicle.number),
                manufacturer_color(&vehicle.manufacturer),
            ));
            let last: String = vehicle.driver.last_name.chars().take(10).collect();
            line.push(white(format!(" {last}")));
        }
        lines.push(line);
    }
    lines
}
