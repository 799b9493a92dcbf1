// tests/support/mocks/time.rs
use chrono::{DateTime, TimeZone, Utc};

/// Deterministic "now" shared by the clock and seeded rows.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap()
}

#[derive(Clone, Debug, Default)]
pub struct FixedClock;

impl certshop::application::ports::time::Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}
