//! Composite calendar-unit offsets for interval lengths and gaps.

use std::fmt;
use std::ops::{Add, Neg};

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Days used to approximate one month when an offset has to be compared
/// against a fixed-length duration. Month lengths vary, so this is only ever
/// used for frequency comparisons, never for date arithmetic.
pub const MONTH_LENGTH: i64 = 30;

/// A calendar offset composed of month, week, and day counts.
///
/// Months and weeks are not fixed-length durations, so an offset is kept as
/// per-unit counts and only resolved once it is applied to a concrete date.
/// Components may be negative; a negative gap makes intervals overlap their
/// predecessor.
///
/// # Example
///
/// ```
/// use demeter_calendar::Offset;
///
/// let length = Offset::parse("10d").unwrap();
/// assert_eq!(length, Offset::days(10));
///
/// let shifted = length + Offset::parse("-3d").unwrap();
/// assert_eq!(shifted, Offset::days(7));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    months: i32,
    weeks: i32,
    days: i32,
}

impl Offset {
    /// Creates an offset from explicit per-unit counts.
    pub fn new(months: i32, weeks: i32, days: i32) -> Self {
        Self {
            months,
            weeks,
            days,
        }
    }

    /// Creates a day-only offset.
    pub fn days(days: i32) -> Self {
        Self::new(0, 0, days)
    }

    /// Creates a week-only offset.
    pub fn weeks(weeks: i32) -> Self {
        Self::new(0, weeks, 0)
    }

    /// Creates a month-only offset.
    pub fn months(months: i32) -> Self {
        Self::new(months, 0, 0)
    }

    /// Parses a length string of the form `10d`, `2W`, or `3M` (optionally
    /// signed) into a single-unit offset.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] for any other input.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidOffset {
            input: input.to_string(),
        };

        if input.len() < 2 || !input.is_ascii() {
            return Err(invalid());
        }
        let (count, unit) = input.split_at(input.len() - 1);
        let n: i32 = count.parse().map_err(|_| invalid())?;
        match unit {
            "d" => Ok(Self::days(n)),
            "W" => Ok(Self::weeks(n)),
            "M" => Ok(Self::months(n)),
            _ => Err(invalid()),
        }
    }

    /// Returns the month component.
    pub fn n_months(self) -> i32 {
        self.months
    }

    /// Returns the week component.
    pub fn n_weeks(self) -> i32 {
        self.weeks
    }

    /// Returns the day component.
    pub fn n_days(self) -> i32 {
        self.days
    }

    /// Returns true if all components are zero.
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }

    /// Advances a date by this offset: months first (clamping the day of
    /// month to the target month's end), then weeks and days.
    pub fn add_to(self, date: NaiveDate) -> NaiveDate {
        let with_months = if self.months >= 0 {
            date.checked_add_months(Months::new(self.months as u32))
        } else {
            date.checked_sub_months(Months::new(-self.months as u32))
        };
        let date = with_months.expect("date arithmetic stays within chrono's representable range");

        let days = i64::from(self.weeks) * 7 + i64::from(self.days);
        let with_days = if days >= 0 {
            date.checked_add_days(Days::new(days as u64))
        } else {
            date.checked_sub_days(Days::new(-days as u64))
        };
        with_days.expect("date arithmetic stays within chrono's representable range")
    }

    /// Moves a date backwards by this offset. Equivalent to adding the
    /// negated offset.
    pub fn sub_from(self, date: NaiveDate) -> NaiveDate {
        (-self).add_to(date)
    }

    /// Returns the magnitude of this offset as an approximate day count,
    /// with months counted as a fixed 30 days.
    ///
    /// Only suitable for comparing offsets against sampling periods; exact
    /// date arithmetic always goes through [`Offset::add_to`].
    pub fn approx_days(self) -> i64 {
        let total = i64::from(self.months) * MONTH_LENGTH
            + i64::from(self.weeks) * 7
            + i64::from(self.days);
        total.abs()
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset {
            months: self.months + rhs.months,
            weeks: self.weeks + rhs.weeks,
            days: self.days + rhs.days,
        }
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset {
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
        }
    }
}

impl fmt::Display for Offset {
    /// Renders single-unit offsets in the shorthand grammar (`10d`, `2W`,
    /// `3M`); multi-unit offsets are concatenated largest unit first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0d");
        }
        let mut written = false;
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
            written = true;
        }
        if self.weeks != 0 {
            write!(f, "{}W", self.weeks)?;
            written = true;
        }
        if self.days != 0 || !written {
            write!(f, "{}d", self.days)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_days() {
        assert_eq!(Offset::parse("10d").unwrap(), Offset::days(10));
        assert_eq!(Offset::parse("0d").unwrap(), Offset::days(0));
    }

    #[test]
    fn parse_weeks_and_months() {
        assert_eq!(Offset::parse("2W").unwrap(), Offset::weeks(2));
        assert_eq!(Offset::parse("3M").unwrap(), Offset::months(3));
    }

    #[test]
    fn parse_signed() {
        assert_eq!(Offset::parse("-5d").unwrap(), Offset::days(-5));
        assert_eq!(Offset::parse("+7d").unwrap(), Offset::days(7));
        assert_eq!(Offset::parse("-1M").unwrap(), Offset::months(-1));
    }

    #[test]
    fn parse_invalid() {
        for input in ["", "d", "10", "1.5d", "10x", "10 d", "W10", "ten days"] {
            assert!(
                matches!(
                    Offset::parse(input),
                    Err(CalendarError::InvalidOffset { .. })
                ),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn add_component_wise() {
        let a = Offset::new(1, 2, 3);
        let b = Offset::new(0, -2, 4);
        assert_eq!(a + b, Offset::new(1, 0, 7));
    }

    #[test]
    fn neg_all_components() {
        assert_eq!(-Offset::new(1, -2, 3), Offset::new(-1, 2, -3));
    }

    #[test]
    fn add_to_days() {
        assert_eq!(
            Offset::days(180).add_to(date(2020, 12, 31)),
            date(2021, 6, 29)
        );
    }

    #[test]
    fn add_to_months_clamps_day() {
        // Jan 31 + 1 month lands on the last day of February.
        assert_eq!(Offset::months(1).add_to(date(2020, 1, 31)), date(2020, 2, 29));
        assert_eq!(Offset::months(1).add_to(date(2021, 1, 31)), date(2021, 2, 28));
    }

    #[test]
    fn add_to_months_before_days() {
        // Months are applied first, then the day component.
        let offset = Offset::new(1, 0, 2);
        assert_eq!(offset.add_to(date(2020, 1, 31)), date(2020, 3, 2));
    }

    #[test]
    fn sub_from_days() {
        assert_eq!(
            Offset::days(180).sub_from(date(2020, 12, 31)),
            date(2020, 7, 4)
        );
        assert_eq!(
            Offset::days(180).sub_from(date(2021, 12, 31)),
            date(2021, 7, 4)
        );
    }

    #[test]
    fn sub_from_months() {
        assert_eq!(
            Offset::months(10).sub_from(date(2020, 12, 1)),
            date(2020, 2, 1)
        );
    }

    #[test]
    fn add_to_negative_components() {
        assert_eq!(Offset::days(-5).add_to(date(2021, 1, 3)), date(2020, 12, 29));
    }

    #[test]
    fn approx_days_month_approximation() {
        assert_eq!(Offset::months(3).approx_days(), 90);
        assert_eq!(Offset::weeks(2).approx_days(), 14);
        assert_eq!(Offset::days(10).approx_days(), 10);
        assert_eq!(Offset::new(1, 1, 1).approx_days(), 38);
    }

    #[test]
    fn approx_days_is_a_magnitude() {
        assert_eq!(Offset::days(-10).approx_days(), 10);
        assert_eq!(Offset::months(-2).approx_days(), 60);
    }

    #[test]
    fn display_single_unit() {
        assert_eq!(Offset::days(10).to_string(), "10d");
        assert_eq!(Offset::weeks(2).to_string(), "2W");
        assert_eq!(Offset::months(3).to_string(), "3M");
        assert_eq!(Offset::days(0).to_string(), "0d");
        assert_eq!(Offset::days(-5).to_string(), "-5d");
    }

    #[test]
    fn display_multi_unit() {
        assert_eq!(Offset::new(1, 2, 3).to_string(), "1M2W3d");
    }

    #[test]
    fn display_parse_round_trip() {
        for s in ["10d", "2W", "3M", "-5d", "0d"] {
            let offset = Offset::parse(s).unwrap();
            assert_eq!(Offset::parse(&offset.to_string()).unwrap(), offset);
        }
    }
}
