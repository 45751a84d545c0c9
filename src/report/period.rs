use derive_more::Display;

use crate::report::{DailyTotal, DailyTotals};
use crate::time::{Date, DateExt, InvalidDate, WorkingDuration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PeriodLabel {
    /// The end of the month the anchor date is in.
    #[display("Ende")]
    End,
    /// The beginning of the following month.
    #[display("Anfang")]
    Beginning,
}

/// A reporting window with one [`DailyTotal`] for every day in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    label: PeriodLabel,
    start: Date,
    end: Date,
    days: Vec<DailyTotal>,
}

impl ReportPeriod {
    /// The first and last day of both periods: `[anchor, anchor + 1 month)`
    /// and `[anchor + 1 month, anchor + 2 months)`.
    ///
    /// Both month offsets are computed from the anchor, so that clamping to
    /// the end of a short month does not shift the second period.
    pub fn bounds(anchor: Date) -> Result<[(Date, Date); 2], InvalidDate> {
        let next_month = anchor.add_months_clamped(1)?;
        let month_after = anchor.add_months_clamped(2)?;

        Ok([
            (anchor, next_month.previous_day()?),
            (next_month, month_after.previous_day()?),
        ])
    }

    /// Splits the two months after `anchor` into periods, see [`ReportPeriod::bounds`].
    pub fn split(anchor: Date, totals: &DailyTotals) -> Result<[Self; 2], InvalidDate> {
        let [(first_start, first_end), (second_start, second_end)] = Self::bounds(anchor)?;

        Ok([
            Self::new(PeriodLabel::End, first_start, first_end, totals),
            Self::new(PeriodLabel::Beginning, second_start, second_end, totals),
        ])
    }

    #[must_use]
    fn new(label: PeriodLabel, start: Date, end: Date, totals: &DailyTotals) -> Self {
        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| {
                totals
                    .get(date)
                    .cloned()
                    .unwrap_or_else(|| DailyTotal::empty(date))
            })
            .collect();

        Self {
            label,
            start,
            end,
            days,
        }
    }

    #[must_use]
    pub const fn label(&self) -> PeriodLabel {
        self.label
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// The last day of the period (inclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    #[must_use]
    pub fn days(&self) -> &[DailyTotal] {
        &self.days
    }

    /// The file name without extension, e.g. `Zeiterfassung_2021-01_Ende`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!(
            "Zeiterfassung_{}_{}",
            self.start.formatted("{year}-{month}"),
            self.label
        )
    }

    #[must_use]
    pub fn total_worked(&self) -> WorkingDuration {
        self.days.iter().map(DailyTotal::worked).sum()
    }

    #[must_use]
    pub fn has_entries(&self) -> bool {
        self.days.iter().any(DailyTotal::has_entries)
    }
}
