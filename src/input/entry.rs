use std::time::Duration;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::time::{Date, TimeStamp};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry ends at {end} before it starts at {start}")]
pub struct EndBeforeStart {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// A single tracked time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeEntry {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeEntry {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, EndBeforeStart> {
        if end < start {
            return Err(EndBeforeStart { start, end });
        }

        Ok(Self { start, end })
    }

    /// The day the entry is accounted on, even if it continues past midnight.
    #[must_use]
    pub fn date(&self) -> Date {
        self.start.date()
    }

    #[must_use]
    pub fn start(&self) -> TimeStamp {
        TimeStamp::from(self.start.time())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        // the constructor guarantees that end >= start
        (self.end - self.start).to_std().unwrap_or_default()
    }
}
