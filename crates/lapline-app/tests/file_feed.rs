//! Live-feed files read through `FileFeed`.

use std::fs;

use lapline::{RunType, format_gap};
use lapline_app::error::FeedError;
use lapline_app::feed::{DataSource, FileFeed};

const FIXTURE: &str = include_str!("fixtures/live_feed.json");

fn fixture_feed() -> (tempfile::TempDir, FileFeed) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("live-feed.json");
    fs::write(&path, FIXTURE).unwrap();
    (dir, FileFeed::new(path))
}

#[test]
fn fixture_parses_into_snapshot() {
    let (_dir, mut feed) = fixture_feed();
    let data = feed.fetch().unwrap();

    assert_eq!(data.session.run_type, RunType::Race);
    assert_eq!(data.session.track_name, "Daytona International Speedway");
    assert_eq!(data.session.laps_to_go, 5);
    assert!(data.session.is_closing_laps());
    assert_eq!(data.session.num_cautions, 6);
    assert_eq!(data.vehicles.len(), 3);

    let leader = data.leader().unwrap();
    assert_eq!(leader.number, "5");
    assert_eq!(leader.driver.short_name, "K. Larson");
    assert_eq!(leader.laps_led, 41);
    assert_eq!(leader.pit_stops, 3);

    let hamlin = &data.vehicles[2];
    assert_eq!(hamlin.last_lap_time, 0.0);
    assert_eq!(hamlin.laps_led, 0);
    assert_eq!(
        format_gap(hamlin.delta, hamlin.laps_completed, leader.laps_completed).as_str(),
        "-1L"
    );
}

#[test]
fn file_is_reread_on_every_fetch() {
    let (_dir, mut feed) = fixture_feed();
    assert_eq!(feed.fetch().unwrap().session.lap_number, 195);

    let updated = FIXTURE.replace("\"lap_number\": 195", "\"lap_number\": 196");
    fs::write(feed.path(), updated).unwrap();
    assert_eq!(feed.fetch().unwrap().session.lap_number, 196);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut feed = FileFeed::new(dir.path().join("absent.json"));
    let err = feed.fetch().unwrap_err();
    assert!(matches!(err, FeedError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let (_dir, mut feed) = fixture_feed();
    fs::write(feed.path(), "{ \"vehicles\": [ ").unwrap();
    assert!(matches!(feed.fetch().unwrap_err(), FeedError::Parse { .. }));
}
