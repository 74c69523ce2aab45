//! Snapshot sources and the live-feed JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use lapline::{Driver, LiveData, RunType, Session, Vehicle};
use serde::Deserialize;

use crate::error::FeedError;

/// Something that can produce a fresh race snapshot.
pub trait DataSource {
    /// Fetch the current snapshot.
    fn fetch(&mut self) -> Result<LiveData, FeedError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn fetch(&mut self) -> Result<LiveData, FeedError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Re-reads a live-feed JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileFeed {
    fn fetch(&mut self) -> Result<LiveData, FeedError> {
        let text = fs::read_to_string(&self.path).map_err(|source| FeedError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_live_feed(&text).map_err(|source| FeedError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Parse a live-feed document. Missing fields take their documented defaults.
pub fn parse_live_feed(json: &str) -> Result<LiveData, serde_json::Error> {
    let raw: RawFeed = serde_json::from_str(json)?;
    Ok(raw.into())
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFeed {
    series_id: i32,
    run_name: String,
    track_name: String,
    run_type: i32,
    lap_number: u32,
    laps_in_race: u32,
    laps_to_go: u32,
    flag_state: i32,
    elapsed_time: u32,
    number_of_caution_segments: u32,
    number_of_caution_laps: u32,
    number_of_lead_changes: u32,
    number_of_leaders: u32,
    vehicles: Vec<RawVehicle>,
}

impl Default for RawFeed {
    fn default() -> Self {
        Self {
            series_id: 1,
            run_name: "Unknown".to_owned(),
            track_name: "Unknown".to_owned(),
            run_type: 1,
            lap_number: 0,
            laps_in_race: 0,
            laps_to_go: 0,
            flag_state: 0,
            elapsed_time: 0,
            number_of_caution_segments: 0,
            number_of_caution_laps: 0,
            number_of_lead_changes: 0,
            number_of_leaders: 0,
            vehicles: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawVehicle {
    vehicle_number: String,
    vehicle_manufacturer: String,
    running_position: u32,
    laps_completed: u32,
    last_lap_time: Option<f64>,
    last_lap_speed: Option<f64>,
    best_lap_time: Option<f64>,
    best_lap_speed: Option<f64>,
    delta: Option<f64>,
    is_on_track: bool,
    laps_led: Vec<RawLapsLed>,
    pit_stops: Vec<serde_json::Value>,
    driver: RawDriver,
}

impl Default for RawVehicle {
    fn default() -> Self {
        Self {
            vehicle_number: String::new(),
            vehicle_manufacturer: String::new(),
            running_position: 99,
            laps_completed: 0,
            last_lap_time: None,
            last_lap_speed: None,
            best_lap_time: None,
            best_lap_speed: None,
            delta: None,
            is_on_track: false,
            laps_led: Vec::new(),
            pit_stops: Vec::new(),
            driver: RawDriver::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLapsLed {
    start_lap: i64,
    end_lap: i64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawDriver {
    driver_id: i64,
    full_name: String,
    first_name: String,
    last_name: String,
}

impl Default for RawDriver {
    fn default() -> Self {
        Self {
            driver_id: 0,
            full_name: "Unknown".to_owned(),
            first_name: String::new(),
            last_name: "Unknown".to_owned(),
        }
    }
}

impl From<RawDriver> for Driver {
    fn from(raw: RawDriver) -> Self {
        Driver::new(raw.driver_id, raw.full_name, raw.first_name, raw.last_name)
    }
}

impl From<RawVehicle> for Vehicle {
    fn from(raw: RawVehicle) -> Self {
        let laps_led: i64 = raw
            .laps_led
            .iter()
            .map(|span| span.end_lap - span.start_lap + 1)
            .sum();
        Vehicle {
            number: raw.vehicle_number,
            driver: raw.driver.into(),
            manufacturer: raw.vehicle_manufacturer,
            running_position: raw.running_position,
            laps_completed: raw.laps_completed,
            last_lap_time: raw.last_lap_time.unwrap_or(0.0),
            last_lap_speed: raw.last_lap_speed.unwrap_or(0.0),
            best_lap_time: raw.best_lap_time.unwrap_or(0.0),
            best_lap_speed: raw.best_lap_speed.unwrap_or(0.0),
            delta: raw.delta.unwrap_or(0.0),
            is_on_track: raw.is_on_track,
            laps_led: u32::try_from(laps_led.max(0)).unwrap_or(u32::MAX),
            pit_stops: u32::try_from(raw.pit_stops.len()).unwrap_or(u32::MAX),
        }
    }
}

impl From<RawFeed> for LiveData {
    fn from(raw: RawFeed) -> Self {
        let session = Session {
            series_id: raw.series_id,
            run_name: raw.run_name,
            track_name: raw.track_name,
            run_type: RunType::from_code(raw.run_type),
            lap_number: raw.lap_number,
            laps_in_race: raw.laps_in_race,
            laps_to_go: raw.laps_to_go,
            flag_state: raw.flag_state,
            elapsed_time: raw.elapsed_time,
            num_cautions: raw.number_of_caution_segments,
            num_caution_laps: raw.number_of_caution_laps,
            num_lead_changes: raw.number_of_lead_changes,
            num_leaders: raw.number_of_leaders,
        };
        LiveData::new(session, raw.vehicles.into_iter().map(Vehicle::from).collect())
    }
}
