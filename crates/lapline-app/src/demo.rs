//! Seeded demo source: a short-track Cup race that evolves on each fetch.
//!
//! Deterministic for a given seed, so captured output is reproducible.

use lapline::{Driver, LiveData, RunType, Session, Vehicle};

use crate::error::FeedError;
use crate::feed::DataSource;

const ROSTER: [(&str, &str, &str, &str); 20] = [
    ("5", "Kyle", "Larson", "Chv"),
    ("24", "William", "Byron", "Chv"),
    ("54", "Ty", "Gibbs", "Tyt"),
    ("19", "Chase", "Briscoe", "Tyt"),
    ("20", "Christopher", "Bell", "Tyt"),
    ("11", "Denny", "Hamlin", "Tyt"),
    ("23", "Bubba", "Wallace", "Tyt"),
    ("17", "Chris", "Buescher", "Frd"),
    ("1", "Ross", "Chastain", "Chv"),
    ("45", "Tyler", "Reddick", "Tyt"),
    ("9", "Chase", "Elliott", "Chv"),
    ("77", "Carson", "Hocevar", "Chv"),
    ("8", "Kyle", "Busch", "Chv"),
    ("22", "Joey", "Logano", "Frd"),
    ("3", "Austin", "Dillon", "Chv"),
    ("12", "Ryan", "Blaney", "Frd"),
    ("6", "Brad", "Keselowski", "Frd"),
    ("48", "Alex", "Bowman", "Chv"),
    ("4", "Noah", "Gragson", "Frd"),
    ("21", "Josh", "Berry", "Frd"),
];

/// Base gap to the leader for each running position.
const BASE_GAPS: [f64; 20] = [
    0.0, 0.234, 0.567, 1.123, 2.456, 3.789, 5.012, 6.345, 8.234, 10.567, 12.890, 15.123, 18.456,
    22.789, 27.012, 31.340, 35.875, 40.102, 46.733, 52.418,
];

const LAPS_IN_RACE: u32 = 200;
const TRACK: &str = "Bowman Gray Stadium";

/// LCG with Numerical Recipes constants.
#[derive(Debug, Clone)]
struct SeededRng {
    state: u64,
}

impl SeededRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Value in `[min, max)`.
    fn next_range(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + (self.next_u64() >> 11) % (max - min)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

/// Demo data source.
#[derive(Debug, Clone)]
pub struct DemoFeed {
    rng: SeededRng,
    seed: u64,
    order: Vec<usize>,
    lap: u32,
    flag_state: i32,
    lead_changes: u32,
    cautions: u32,
}

impl DemoFeed {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            seed,
            order: (0..ROSTER.len()).collect(),
            lap: 0,
            flag_state: 1,
            lead_changes: 0,
            cautions: 0,
        }
    }

    /// Advance the race by one lap.
    fn advance(&mut self) {
        self.lap = if self.lap >= LAPS_IN_RACE { 1 } else { self.lap + 1 };

        if self.rng.chance(0.3) {
            let i = self.rng.next_range(0, self.order.len() as u64 - 1) as usize;
            self.order.swap(i, i + 1);
            if i == 0 {
                self.lead_changes += 1;
            }
        }

        if self.rng.chance(0.1) {
            self.flag_state = if self.flag_state == 1 {
                self.cautions += 1;
                2
            } else {
                1
            };
        }
    }

    fn snapshot(&mut self) -> LiveData {
        let session = Session {
            series_id: 1,
            run_name: format!("{TRACK} Clash"),
            track_name: TRACK.to_owned(),
            run_type: RunType::Race,
            lap_number: self.lap,
            laps_in_race: LAPS_IN_RACE,
            laps_to_go: LAPS_IN_RACE - self.lap,
            flag_state: self.flag_state,
            elapsed_time: self.lap * 17,
            num_cautions: self.cautions,
            num_caution_laps: self.cautions * 4,
            num_lead_changes: self.lead_changes,
            num_leaders: self.lead_changes.min(ROSTER.len() as u32 - 1) + 1,
        };

        let order = self.order.clone();
        let vehicles = order
            .into_iter()
            .enumerate()
            .map(|(slot, roster_idx)| {
                let (number, first, last, mfr) = ROSTER[roster_idx];
                let delta = if slot == 0 {
                    0.0
                } else {
                    (BASE_GAPS[slot] + self.rng.jitter(0.1)).max(0.001)
                };
                let best_lap_time = 15.2 + slot as f64 * 0.04 + self.rng.jitter(0.02);
                Vehicle {
                    number: number.to_owned(),
                    driver: Driver::new(
                        roster_idx as i64 + 1,
                        format!("{first} {last}"),
                        first,
                        last,
                    ),
                    manufacturer: mfr.to_owned(),
                    running_position: slot as u32 + 1,
                    laps_completed: self.lap,
                    last_lap_time: best_lap_time + 0.1,
                    last_lap_speed: 0.25 * 3600.0 / (best_lap_time + 0.1),
                    best_lap_time,
                    best_lap_speed: 0.25 * 3600.0 / best_lap_time,
                    delta,
                    is_on_track: true,
                    laps_led: 0,
                    pit_stops: self.lap / 60,
                }
            })
            .collect();

        LiveData::new(session, vehicles)
    }
}

impl DataSource for DemoFeed {
    fn fetch(&mut self) -> Result<LiveData, FeedError> {
        self.advance();
        Ok(self.snapshot())
    }

    fn describe(&self) -> String {
        format!("demo (seed {})", self.seed)
    }
}
