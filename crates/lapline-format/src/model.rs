#![forbid(unsafe_code)]

//! Race session snapshot: drivers, cars, and session state.

/// Kind of on-track session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunType {
    #[default]
    Practice,
    Qualifying,
    Race,
    /// Any other session code.
    Other(i32),
}

impl RunType {
    /// Map a feed code (1 practice, 2 qualifying, 3 race).
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Practice,
            2 => Self::Qualifying,
            3 => Self::Race,
            other => Self::Other(other),
        }
    }

    /// The feed code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Practice => 1,
            Self::Qualifying => 2,
            Self::Race => 3,
            Self::Other(code) => code,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::Qualifying => "Qualifying",
            Self::Race => "Race",
            Self::Other(_) => "Session",
        }
    }

    #[must_use]
    pub const fn is_race(self) -> bool {
        matches!(self, Self::Race)
    }

    /// Practice and qualifying are timed sessions where best speed matters.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Practice | Self::Qualifying)
    }
}

/// A driver entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Driver {
    pub driver_id: i64,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Ticker name, `"K. Larson"` style.
    pub short_name: String,
}

impl Driver {
    /// Build a driver, deriving the short name from first initial and last name.
    #[must_use]
    pub fn new(
        driver_id: i64,
        full_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let short_name = short_name(&first_name, &last_name);
        Self {
            driver_id,
            full_name: full_name.into(),
            first_name,
            last_name,
            short_name,
        }
    }
}

fn short_name(first_name: &str, last_name: &str) -> String {
    match first_name.chars().next() {
        Some(initial) => format!("{initial}. {last_name}"),
        None => last_name.to_owned(),
    }
}

/// One car in the field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vehicle {
    /// Car number as printed (may carry leading zeros).
    pub number: String,
    pub driver: Driver,
    /// Manufacturer code such as `"Chv"`.
    pub manufacturer: String,
    pub running_position: u32,
    pub laps_completed: u32,
    pub last_lap_time: f64,
    pub last_lap_speed: f64,
    pub best_lap_time: f64,
    pub best_lap_speed: f64,
    /// Time gap to the leader in seconds.
    pub delta: f64,
    pub is_on_track: bool,
    pub laps_led: u32,
    pub pit_stops: u32,
}

/// Session-level state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub series_id: i32,
    pub run_name: String,
    pub track_name: String,
    pub run_type: RunType,
    pub lap_number: u32,
    pub laps_in_race: u32,
    pub laps_to_go: u32,
    pub flag_state: i32,
    /// Elapsed session time in seconds.
    pub elapsed_time: u32,
    pub num_cautions: u32,
    pub num_caution_laps: u32,
    pub num_lead_changes: u32,
    pub num_leaders: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            series_id: 1,
            run_name: "Unknown".to_owned(),
            track_name: "Unknown".to_owned(),
            run_type: RunType::Practice,
            lap_number: 0,
            laps_in_race: 0,
            laps_to_go: 0,
            flag_state: 0,
            elapsed_time: 0,
            num_cautions: 0,
            num_caution_laps: 0,
            num_lead_changes: 0,
            num_leaders: 0,
        }
    }
}

impl Session {
    /// Whether the closing-laps warning applies.
    #[must_use]
    pub const fn is_closing_laps(&self) -> bool {
        self.run_type.is_race() && self.laps_to_go > 0 && self.laps_to_go <= 10
    }
}

/// One snapshot of the live feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveData {
    pub session: Session,
    pub vehicles: Vec<Vehicle>,
}

impl LiveData {
    #[must_use]
    pub fn new(session: Session, vehicles: Vec<Vehicle>) -> Self {
        Self { session, vehicles }
    }

    /// The car in position 1, else the first listed car.
    #[must_use]
    pub fn leader(&self) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.running_position == 1)
            .or_else(|| self.vehicles.first())
    }

    /// The first `n` cars by running position (stable for ties).
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<&Vehicle> {
        let mut sorted: Vec<&Vehicle> = self.vehicles.iter().collect();
        sorted.sort_by_key(|v| v.running_position);
        sorted.truncate(n);
        sorted
    }

    /// Cars currently on track.
    #[must_use]
    pub fn on_track_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_on_track).count()
    }
}
