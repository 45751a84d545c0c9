use std::ops::Add;
use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use derive_more::Display;
use thiserror::Error;

use crate::time::DurationExt;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[macro_export]
macro_rules! time_stamp {
    ( $hour:literal : $minute:literal ) => {{
        static_assertions::const_assert!($hour < 24);
        static_assertions::const_assert!($minute < 60);

        $crate::time::TimeStamp::new($hour, $minute, 0).expect("time stamp should be valid")
    }};
}

/// A wall clock time, displayed without seconds.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{:02}:{:02}", hour, minute)]
pub struct TimeStamp {
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTime {
    #[error("Time is not valid: {hour:02}:{minute:02}:{second:02}")]
    OutOfRange { hour: u8, minute: u8, second: u8 },
    #[error("\"{input}\" is not a valid time. Expected format: \"{format}\"")]
    ParseTimeError { input: String, format: String },
}

pub fn parse_time(input: &str, format: &str) -> Result<NaiveTime, InvalidTime> {
    NaiveTime::parse_from_str(input.trim(), format).map_err(|_| InvalidTime::ParseTimeError {
        input: input.to_string(),
        format: format.to_string(),
    })
}

impl TimeStamp {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, InvalidTime> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(InvalidTime::OutOfRange {
                hour,
                minute,
                second,
            });
        }

        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    // the maximum TimeStamp is 23:59:59, which would be 86399 seconds
    #[must_use]
    fn as_seconds(&self) -> u64 {
        self.hour as u64 * 3600 + self.minute as u64 * 60 + self.second as u64
    }

    /// Wraps around at midnight.
    #[must_use]
    fn from_seconds(seconds: u64) -> Self {
        let seconds = seconds % SECONDS_PER_DAY;

        Self {
            hour: (seconds / 3600) as u8,
            minute: ((seconds / 60) % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    /// Rounds to the closest quarter hour after midnight, 23:53 becomes 00:00.
    #[must_use]
    pub fn round_to_quarter_hour(&self) -> Self {
        Self::from_seconds(Duration::from_secs(self.as_seconds()).round_to_quarter_hour().as_secs())
    }
}

impl From<NaiveTime> for TimeStamp {
    fn from(time: NaiveTime) -> Self {
        // a leap second is reported as nanosecond overflow, the second itself is at most 59
        Self::from_seconds(time.num_seconds_from_midnight() as u64)
    }
}

impl Add<Duration> for TimeStamp {
    type Output = Self;

    fn add(self, duration: Duration) -> Self::Output {
        Self::from_seconds(self.as_seconds() + duration.as_secs() % SECONDS_PER_DAY)
    }
}
