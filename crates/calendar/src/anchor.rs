//! Anchor-date descriptors and their parser.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Number of days in each month (index 0 unused). February is always capped
/// at 28: an anchor must resolve in every year, so Feb 29 is not a valid
/// anchor date.
const DAYS_PER_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A yearly anchor date, the reference point all intervals of a calendar are
/// measured from.
///
/// Anchors carry no year; [`Anchor::resolve`] turns one into a concrete date
/// for a given anchor year. Parsed from a string with the following grammars,
/// checked in order (first match wins):
///
/// 1. `"MM-DD"` — month and day, e.g. `"12-31"`.
/// 2. `"MM"` — month only, e.g. `"4"`.
/// 3. `"Wnn-D"` — week number plus weekday (1 = Monday .. 7 = Sunday),
///    e.g. `"W01-4"` for the first Thursday of the year.
/// 4. `"Wnn"` — week number, weekday defaulting to Monday.
/// 5. English month names and abbreviations, e.g. `"December"` or `"jan"`.
///
/// # Example
///
/// ```
/// use demeter_calendar::Anchor;
///
/// let anchor: Anchor = "12-31".parse().unwrap();
/// assert_eq!(anchor.to_string(), "12-31");
/// assert_eq!(anchor.format_code(), "%m-%d");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// A fixed month and day, e.g. December 31st.
    MonthDay {
        /// Month number (1..=12).
        month: u32,
        /// Day within the month.
        day: u32,
    },
    /// The first day of a month.
    Month(u32),
    /// A week number plus weekday.
    Week {
        /// Week of the year (1..=52; week 1 starts at the year's first Monday).
        week: u32,
        /// Day of the week (1 = Monday .. 7 = Sunday).
        weekday: u32,
    },
}

impl Anchor {
    /// Parses an anchor descriptor string.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidAnchorFormat`] when the input matches
    /// none of the recognized grammars, and
    /// [`CalendarError::InvalidAnchorValue`] when a month, day, week, or
    /// weekday is out of range.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let format_err = || CalendarError::InvalidAnchorFormat {
            input: input.to_string(),
        };

        // "MM-DD"
        if let Some((month, day)) = input.split_once('-') {
            if is_short_number(month) && is_short_number(day) {
                let month: u32 = month.parse().map_err(|_| format_err())?;
                let day: u32 = day.parse().map_err(|_| format_err())?;
                check_month_day(month, day)?;
                return Ok(Self::MonthDay { month, day });
            }
        }

        // "MM"
        if is_short_number(input) {
            let month: u32 = input.parse().map_err(|_| format_err())?;
            check_month(month)?;
            return Ok(Self::Month(month));
        }

        // "Wnn-D" / "Wnn"
        if let Some(rest) = input.strip_prefix('W') {
            let (week, weekday) = match rest.split_once('-') {
                Some((week, weekday)) if is_short_number(week) && weekday.len() == 1 => {
                    let week: u32 = week.parse().map_err(|_| format_err())?;
                    let weekday: u32 = weekday.parse().map_err(|_| format_err())?;
                    (week, weekday)
                }
                None if is_short_number(rest) => {
                    let week: u32 = rest.parse().map_err(|_| format_err())?;
                    (week, 1)
                }
                _ => return Err(format_err()),
            };
            check_week_day(week, weekday)?;
            return Ok(Self::Week { week, weekday });
        }

        // Month names and abbreviations.
        if let Some(month) = month_from_name(input) {
            return Ok(Self::Month(month));
        }

        Err(format_err())
    }

    /// Returns the strftime-style format code describing the canonical
    /// string: `"%m-%d"`, `"%m"`, or `"W%W-%w"`.
    pub fn format_code(&self) -> &'static str {
        match self {
            Self::MonthDay { .. } => "%m-%d",
            Self::Month(_) => "%m",
            Self::Week { .. } => "W%W-%w",
        }
    }

    /// Resolves the anchor against a concrete year.
    ///
    /// For month anchors this is the first of the month; for week anchors,
    /// weeks are counted from the first Monday of the year (week 1).
    pub fn resolve(&self, year: i32) -> NaiveDate {
        match *self {
            Self::MonthDay { month, day } => NaiveDate::from_ymd_opt(year, month, day)
                .expect("month/day validated at construction and valid in every year"),
            Self::Month(month) => NaiveDate::from_ymd_opt(year, month, 1)
                .expect("month validated at construction"),
            Self::Week { week, weekday } => {
                let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("Jan 1 exists in every year");
                let to_monday = (7 - jan1.weekday().num_days_from_monday()) % 7;
                let first_monday = jan1 + Days::new(u64::from(to_monday));
                first_monday + Days::new(u64::from((week - 1) * 7 + (weekday - 1)))
            }
        }
    }
}

impl FromStr for Anchor {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Anchor {
    /// Renders the canonical anchor string. Parsing the output yields the
    /// same anchor back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MonthDay { month, day } => write!(f, "{month:02}-{day:02}"),
            Self::Month(month) => write!(f, "{month:02}"),
            Self::Week { week, weekday } => write!(f, "W{week:02}-{weekday}"),
        }
    }
}

/// One or two ASCII digits.
fn is_short_number(s: &str) -> bool {
    (1..=2).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_month(month: u32) -> Result<(), CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidAnchorValue {
            reason: format!("month number must be between 1 and 12, got {month}"),
        });
    }
    Ok(())
}

fn check_month_day(month: u32, day: u32) -> Result<(), CalendarError> {
    check_month(month)?;
    let max_day = DAYS_PER_MONTH[month as usize];
    if !(1..=max_day).contains(&day) {
        return Err(CalendarError::InvalidAnchorValue {
            reason: format!("day {day} is not a valid day for month {month}"),
        });
    }
    Ok(())
}

fn check_week_day(week: u32, weekday: u32) -> Result<(), CalendarError> {
    if week == 53 {
        return Err(CalendarError::InvalidAnchorValue {
            reason: "week 53 is not valid, as not every year contains a 53rd week".to_string(),
        });
    }
    if !(1..=52).contains(&week) {
        return Err(CalendarError::InvalidAnchorValue {
            reason: format!("week numbers must be between 1 and 52, got {week}"),
        });
    }
    if !(1..=7).contains(&weekday) {
        return Err(CalendarError::InvalidAnchorValue {
            reason: format!("weekday numbers must be between 1 and 7, got {weekday}"),
        });
    }
    Ok(())
}

/// English month names and three-letter abbreviations, lowercase.
fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}
