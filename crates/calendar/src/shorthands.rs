//! Shorthand constructors for commonly used calendars.
//!
//! Each builder fills a [`Calendar`] with evenly spaced intervals of a single
//! unit: one target block at the anchor and precursors extending back in
//! time. When `n_precursors` is zero, as many precursors are added as fit
//! within one year's cycle time.

use crate::calendar::Calendar;
use crate::error::CalendarError;
use crate::interval::Role;
use crate::offset::Offset;

/// Days in the yearly cycle used to derive how many intervals fit in a year.
const DAYS_PER_YEAR: i64 = 365;

/// Instantiates a daily calendar: day-based interval lengths, e.g. `"180d"`.
///
/// The first target interval starts at the anchor; precursor intervals are
/// built back in time from there.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidLength`] unless `length` is a strictly
/// positive day length such as `"2d"`, and
/// [`CalendarError::InvalidIntervalCount`] if `n_targets` is zero.
///
/// # Example
///
/// ```
/// use demeter_calendar::daily_calendar;
///
/// // Counting toward Christmas in 3-day steps.
/// let cal = daily_calendar("12-25", "3d", 1, 3, false).unwrap();
/// assert_eq!(cal.n_targets(), 1);
/// assert_eq!(cal.n_precursors(), 3);
/// ```
pub fn daily_calendar(
    anchor: &str,
    length: &str,
    n_targets: usize,
    n_precursors: usize,
    allow_overlap: bool,
) -> Result<Calendar, CalendarError> {
    let offset = parse_unit_length(length, "2d", |o| {
        o.n_days() > 0 && o.n_weeks() == 0 && o.n_months() == 0
    })?;
    let periods_per_year = (DAYS_PER_YEAR / i64::from(offset.n_days())) as usize;
    build(anchor, length, n_targets, n_precursors, periods_per_year, allow_overlap)
}

/// Instantiates a weekly calendar: week-based interval lengths, e.g. `"1W"`.
///
/// Unlike [`daily_calendar`] with a 7-day length, anchors are usually given
/// as week numbers (`"W40"`), aligning intervals to calendar weeks
/// (Monday-started) rather than arbitrary 7-day blocks.
pub fn weekly_calendar(
    anchor: &str,
    length: &str,
    n_targets: usize,
    n_precursors: usize,
    allow_overlap: bool,
) -> Result<Calendar, CalendarError> {
    let offset = parse_unit_length(length, "4W", |o| {
        o.n_weeks() > 0 && o.n_days() == 0 && o.n_months() == 0
    })?;
    let periods_per_year = (DAYS_PER_YEAR / (7 * i64::from(offset.n_weeks()))) as usize;
    build(anchor, length, n_targets, n_precursors, periods_per_year, allow_overlap)
}

/// Instantiates a monthly calendar: month-based interval lengths, e.g. `"3M"`,
/// usually anchored to a month name (`"December"`).
pub fn monthly_calendar(
    anchor: &str,
    length: &str,
    n_targets: usize,
    n_precursors: usize,
    allow_overlap: bool,
) -> Result<Calendar, CalendarError> {
    let offset = parse_unit_length(length, "2M", |o| {
        o.n_months() > 0 && o.n_days() == 0 && o.n_weeks() == 0
    })?;
    let periods_per_year = (12 / offset.n_months()) as usize;
    build(anchor, length, n_targets, n_precursors, periods_per_year, allow_overlap)
}

/// Parses a length string and checks it is a strictly positive amount of the
/// builder's unit.
fn parse_unit_length(
    length: &str,
    expected: &'static str,
    check: impl Fn(Offset) -> bool,
) -> Result<Offset, CalendarError> {
    let invalid = || CalendarError::InvalidLength {
        input: length.to_string(),
        expected,
    };
    let offset = Offset::parse(length).map_err(|_| invalid())?;
    if !check(offset) {
        return Err(invalid());
    }
    Ok(offset)
}

fn build(
    anchor: &str,
    length: &str,
    n_targets: usize,
    n_precursors: usize,
    periods_per_year: usize,
    allow_overlap: bool,
) -> Result<Calendar, CalendarError> {
    if n_targets == 0 {
        return Err(CalendarError::InvalidIntervalCount { n: n_targets });
    }

    let n_intervals = if n_precursors > 0 {
        n_precursors + n_targets
    } else {
        periods_per_year
    };
    let n_precursors = n_intervals.saturating_sub(n_targets);

    let mut cal = Calendar::new(anchor)?.with_allow_overlap(allow_overlap);
    cal.add_intervals(Role::Target, length, n_targets)?;
    if n_precursors > 0 {
        cal.add_intervals(Role::Precursor, length, n_precursors)?;
    }
    Ok(cal)
}
