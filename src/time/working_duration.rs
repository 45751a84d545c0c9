use core::fmt;
use std::iter::Sum;
use std::str::FromStr;
use std::time::Duration;

use derive_more::{Add, AddAssign, From, Into};
use thiserror::Error;

use crate::time::DurationExt;

#[macro_export]
macro_rules! working_duration {
    ( $hours:literal : $minutes:literal ) => {{
        static_assertions::const_assert!($minutes < 60);

        $crate::time::WorkingDuration::new($crate::time::duration_from_minutes(
            $hours * 60 + $minutes,
        ))
    }};
}

/// An amount of working time, displayed as decimal hours (`7.75`).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Add, AddAssign, From, Into,
)]
pub struct WorkingDuration(Duration);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("\"{input}\" is not a valid number of hours")]
pub struct InvalidWorkingDuration {
    input: String,
}

impl WorkingDuration {
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Anything above this is certainly a typo.
    const MAXIMUM_HOURS: f64 = 24.0 * 366.0;

    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn from_hours(hours: f64) -> Result<Self, InvalidWorkingDuration> {
        if !hours.is_finite() || hours < 0.0 || hours > Self::MAXIMUM_HOURS {
            return Err(InvalidWorkingDuration {
                input: hours.to_string(),
            });
        }

        Ok(Self(Duration::from_secs((hours * 3600.0).round() as u64)))
    }

    #[must_use]
    pub const fn to_duration(&self) -> Duration {
        self.0
    }

    #[must_use]
    pub fn round_to_quarter_hour(&self) -> Self {
        Self(self.0.round_to_quarter_hour())
    }
}

impl fmt::Display for WorkingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.decimal_hours())
    }
}

impl FromStr for WorkingDuration {
    type Err = InvalidWorkingDuration;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let hours = string
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidWorkingDuration {
                input: string.to_string(),
            })?;

        Self::from_hours(hours).map_err(|_| InvalidWorkingDuration {
            input: string.to_string(),
        })
    }
}

impl Sum for WorkingDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |total, duration| total + duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        assert_eq!(working_duration!(08:00).to_string(), "8.00");
        assert_eq!(working_duration!(07:45).to_string(), "7.75");
        assert_eq!(working_duration!(00:00).to_string(), "0.00");
        assert_eq!(working_duration!(10:20).to_string(), "10.33");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("8.0".parse::<WorkingDuration>(), Ok(working_duration!(08:00)));
        assert_eq!("8".parse::<WorkingDuration>(), Ok(working_duration!(08:00)));
        assert_eq!(" 3.5 ".parse::<WorkingDuration>(), Ok(working_duration!(03:30)));
        assert_eq!(
            "abc".parse::<WorkingDuration>(),
            Err(InvalidWorkingDuration {
                input: "abc".to_string()
            })
        );
        assert!("-1".parse::<WorkingDuration>().is_err());
        assert!("NaN".parse::<WorkingDuration>().is_err());
        assert!("inf".parse::<WorkingDuration>().is_err());
    }

    #[test]
    fn test_sum() {
        assert_eq!(
            [
                working_duration!(01:30),
                working_duration!(02:45),
                working_duration!(00:15)
            ]
            .into_iter()
            .sum::<WorkingDuration>(),
            working_duration!(04:30)
        );
        assert_eq!(
            std::iter::empty::<WorkingDuration>().sum::<WorkingDuration>(),
            WorkingDuration::ZERO
        );
    }
}
