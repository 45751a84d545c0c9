use chrono::{Datelike, Months, Weekday};
use thiserror::Error;

pub use chrono::NaiveDate as Date;

/// The format of dates passed on the command line.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        static_assertions::const_assert!($month >= 1 && $month <= 12);
        static_assertions::const_assert!($day >= 1 && $day <= 31);

        $crate::time::Date::from_ymd_opt($year, $month, $day).expect("date should be valid")
    }};
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not a valid date. Expected format: \"{format}\"")]
    ParseDateError { input: String, format: String },
    #[error("date arithmetic on {date} is out of the supported range")]
    OutOfRange { date: Date },
}

pub fn parse_date(input: &str, format: &str) -> Result<Date, InvalidDate> {
    Date::parse_from_str(input.trim(), format).map_err(|_| InvalidDate::ParseDateError {
        input: input.to_string(),
        format: format.to_string(),
    })
}

pub trait DateExt: Sized {
    /// Adds calendar months to the date.
    ///
    /// If the day does not exist in the target month, the last day of that
    /// month is used instead (`2021-01-31` + 1 month = `2021-02-28`).
    fn add_months_clamped(&self, months: u32) -> Result<Self, InvalidDate>;

    fn previous_day(&self) -> Result<Self, InvalidDate>;

    #[must_use]
    fn is_weekend(&self) -> bool;

    /// Replaces `{year}`, `{month}` and `{day}` with the zero padded values.
    #[must_use]
    fn formatted(&self, f: &str) -> String;
}

impl DateExt for Date {
    fn add_months_clamped(&self, months: u32) -> Result<Self, InvalidDate> {
        self.checked_add_months(Months::new(months))
            .ok_or(InvalidDate::OutOfRange { date: *self })
    }

    fn previous_day(&self) -> Result<Self, InvalidDate> {
        self.pred_opt().ok_or(InvalidDate::OutOfRange { date: *self })
    }

    fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn formatted(&self, f: &str) -> String {
        f.replace("{year}", &format!("{:04}", self.year()))
            .replace("{month}", &format!("{:02}", self.month()))
            .replace("{day}", &format!("{:02}", self.day()))
    }
}
