use std::collections::btree_map::{self, BTreeMap};
use std::time::Duration;

use log::trace;
use thiserror::Error;

use crate::input::{TimeEntry, VacationRange};
use crate::time::{Date, TimeStamp, WorkingDuration};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Found work time on day {date} which is during vacations ({start} - {end})!")]
    WorkDuringVacation { date: Date, start: Date, end: Date },
}

/// Everything that happened on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    date: Date,
    entries: usize,
    worked: Duration,
    start: Option<TimeStamp>,
    vacation: Option<WorkingDuration>,
}

impl DailyTotal {
    #[must_use]
    pub const fn empty(date: Date) -> Self {
        Self {
            date,
            entries: 0,
            worked: Duration::ZERO,
            start: None,
            vacation: None,
        }
    }

    fn add_entry(&mut self, entry: &TimeEntry) {
        self.entries += 1;
        self.worked += entry.duration();
        self.start = Some(match self.start {
            Some(start) => start.min(entry.start()),
            None => entry.start(),
        });
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Whether there is at least one time entry on this day.
    #[must_use]
    pub const fn has_entries(&self) -> bool {
        self.entries > 0
    }

    #[must_use]
    pub fn worked(&self) -> WorkingDuration {
        WorkingDuration::new(self.worked)
    }

    /// The earliest start of all entries on this day.
    #[must_use]
    pub const fn start(&self) -> Option<TimeStamp> {
        self.start
    }

    #[must_use]
    pub const fn vacation(&self) -> Option<WorkingDuration> {
        self.vacation
    }

    /// Worked time plus vacation credit.
    #[must_use]
    pub fn total(&self) -> WorkingDuration {
        self.worked() + self.vacation.unwrap_or_default()
    }
}

/// Maps every date with entries or vacation to its [`DailyTotal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTotals {
    days: BTreeMap<Date, DailyTotal>,
}

impl DailyTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums the durations of all entries that start on the same day.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Self {
        let mut result = Self::new();

        for entry in entries {
            result.day_mut(entry.date()).add_entry(entry);
        }

        result
    }

    fn day_mut(&mut self, date: Date) -> &mut DailyTotal {
        self.days
            .entry(date)
            .or_insert_with(|| DailyTotal::empty(date))
    }

    #[cfg(test)]
    fn merge_vacations(&mut self, vacations: &[VacationRange]) -> Result<(), MergeError> {
        self.merge_vacations_within(vacations, Date::MIN, Date::MAX)
    }

    /// Credits the paid time of each vacation to every day it covers from
    /// `first` to `last` (inclusive).
    ///
    /// Work on a credited day is an error. Overlapping vacations are not
    /// checked, the vacation that comes first keeps the day.
    pub fn merge_vacations_within(
        &mut self,
        vacations: &[VacationRange],
        first: Date,
        last: Date,
    ) -> Result<(), MergeError> {
        for vacation in vacations {
            let days = vacation
                .days()
                .skip_while(|date| *date < first)
                .take_while(|date| *date <= last);

            for date in days {
                let day = self.day_mut(date);

                if day.has_entries() {
                    return Err(MergeError::WorkDuringVacation {
                        date,
                        start: vacation.start(),
                        end: vacation.end(),
                    });
                }

                if day.vacation.is_some() {
                    trace!("{} is already covered by an earlier vacation", date);
                    continue;
                }

                day.vacation = Some(vacation.paid_per_day());
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn get(&self, date: Date) -> Option<&DailyTotal> {
        self.days.get(&date)
    }

    pub fn iter(&self) -> btree_map::Values<'_, Date, DailyTotal> {
        self.days.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn total_worked(&self) -> WorkingDuration {
        self.iter().map(DailyTotal::worked).sum()
    }
}

impl<'a> IntoIterator for &'a DailyTotals {
    type Item = &'a DailyTotal;
    type IntoIter = btree_map::Values<'a, Date, DailyTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
