use core::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::time::{self, Date, InvalidDate, InvalidWorkingDuration, WorkingDuration};
use crate::utils::StrExt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidVacation {
    #[error("expected a vacation in the form YYYY-MM-DD:YYYY-MM-DD:hh, but received: \"{input}\"")]
    Format { input: String },
    #[error(transparent)]
    Date(#[from] InvalidDate),
    #[error(transparent)]
    Hours(#[from] InvalidWorkingDuration),
    #[error("the vacation end {end} must not be before its start {start}")]
    EndBeforeStart { start: Date, end: Date },
}

/// A range of days with a fixed amount of paid working time per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VacationRange {
    start: Date,
    end: Date,
    paid_per_day: WorkingDuration,
}

impl VacationRange {
    pub fn new(
        start: Date,
        end: Date,
        paid_per_day: WorkingDuration,
    ) -> Result<Self, InvalidVacation> {
        if end < start {
            return Err(InvalidVacation::EndBeforeStart { start, end });
        }

        Ok(Self {
            start,
            end,
            paid_per_day,
        })
    }

    /// Parses a comma separated list of vacations.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, InvalidVacation> {
        input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::from_str)
            .collect()
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The last day of the vacation (inclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    #[must_use]
    pub const fn paid_per_day(&self) -> WorkingDuration {
        self.paid_per_day
    }

    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }
}

impl FromStr for VacationRange {
    type Err = InvalidVacation;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let format_error = || InvalidVacation::Format {
            input: string.to_string(),
        };

        if string.matches(':').count() != 2 {
            return Err(format_error());
        }

        let [Some(start), Some(end), Some(hours)] = string.split_exact::<3>(":") else {
            return Err(format_error());
        };

        Self::new(
            time::parse_date(start, time::ISO_DATE_FORMAT)?,
            time::parse_date(end, time::ISO_DATE_FORMAT)?,
            hours.parse()?,
        )
    }
}

impl fmt::Display for VacationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.end, self.paid_per_day)
    }
}
