mod daily;
mod period;

pub use daily::*;
pub use period::*;

use anyhow::Context;
use log::{info, warn};

use crate::input::{TimeEntry, VacationRange};
use crate::time::Date;

/// Aggregates the entries per day, credits the vacations and splits the
/// result into the two periods after `anchor`.
pub fn build_reports(
    entries: &[TimeEntry],
    anchor: Date,
    vacations: &[VacationRange],
) -> anyhow::Result<[ReportPeriod; 2]> {
    let mut totals = DailyTotals::from_entries(entries);
    info!(
        "aggregated {} entries into {} days, worked: {}",
        entries.len(),
        totals.len(),
        totals.total_worked()
    );

    let [(first, _), (_, last)] = ReportPeriod::bounds(anchor)
        .with_context(|| format!("failed to split the months after {}", anchor))?;

    // work and vacations outside of both periods are not reported
    totals.merge_vacations_within(vacations, first, last)?;

    let periods = ReportPeriod::split(anchor, &totals)
        .with_context(|| format!("failed to split the months after {}", anchor))?;

    if periods.iter().all(|period| !period.has_entries()) {
        warn!(
            "There were no work times between {} and {}.",
            periods[0].start(),
            periods[1].end()
        );
    }

    Ok(periods)
}
