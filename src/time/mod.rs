use std::cmp::Ordering;
use std::time::Duration;

const SECONDS_PER_QUARTER_HOUR: u64 = 15 * 60;

pub const fn duration_from_minutes(minutes: u64) -> Duration {
    Duration::from_secs(minutes * 60)
}

pub const fn duration_from_hours(hours: u64) -> Duration {
    duration_from_minutes(hours * 60)
}

pub trait DurationExt {
    #[must_use]
    fn seconds(&self) -> u64;

    /// The duration in hours as a fraction, e.g. `1.5` for 90 minutes.
    #[must_use]
    fn decimal_hours(&self) -> f64 {
        self.seconds() as f64 / 3600.0
    }

    /// Rounds to the closest multiple of 15 minutes.
    ///
    /// A duration exactly between two quarter hours is rounded to the even
    /// multiple, so 7:30 min becomes 0 min and 22:30 min becomes 30 min.
    #[must_use]
    fn round_to_quarter_hour(&self) -> Duration {
        let quarters = self.seconds() / SECONDS_PER_QUARTER_HOUR;
        let remainder = self.seconds() % SECONDS_PER_QUARTER_HOUR;

        let quarters = match (remainder * 2).cmp(&SECONDS_PER_QUARTER_HOUR) {
            Ordering::Less => quarters,
            Ordering::Greater => quarters + 1,
            Ordering::Equal => quarters + quarters % 2,
        };

        Duration::from_secs(quarters * SECONDS_PER_QUARTER_HOUR)
    }
}

impl DurationExt for Duration {
    fn seconds(&self) -> u64 {
        self.as_secs()
    }
}

mod date;
pub use date::*;
mod time_stamp;
pub use time_stamp::*;
mod working_duration;
pub use working_duration::*;
