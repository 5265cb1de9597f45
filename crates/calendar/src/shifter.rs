//! Shifting calendars in time to build staggered ensembles.

use crate::calendar::Calendar;
use crate::error::CalendarError;
use crate::interval::{Interval, Role};
use crate::offset::Offset;

/// Shifts an interval's gap by the given offset, returning the new gap.
///
/// Precursors are built backward in time, so the shift's sign is inverted
/// for them: a forward-in-time shift must shrink their backward-counted gap.
fn gap_shift(interval: &Interval, shift: Offset) -> Offset {
    let shift = if interval.is_target() { shift } else { -shift };
    interval.gap() + shift
}

/// Returns a copy of the calendar with all intervals shifted in time by
/// `shift`.
///
/// Only the gaps of the first target and first precursor are changed: every
/// other interval is defined relative to its predecessor, so shifting the
/// leading gap moves the whole block. The anchor itself stays put, which
/// keeps anchor years comparable across the shifted copies (important for
/// train/test splitting later on).
///
/// # Errors
///
/// Returns [`CalendarError::MissingFirstInterval`] if the calendar has no
/// target or no precursor intervals.
///
/// # Example
///
/// ```
/// use demeter_calendar::{calendar_shifter, Calendar, Offset, Role};
///
/// let mut cal = Calendar::new("07-01").unwrap();
/// cal.add_intervals(Role::Target, "7d", 1).unwrap();
/// cal.add_intervals_with_gap(Role::Precursor, "7d", "14d", 1).unwrap();
///
/// let shifted = calendar_shifter(&cal, Offset::days(7)).unwrap();
/// assert_eq!(shifted.targets()[0].gap(), Offset::days(7));
/// assert_eq!(shifted.precursors()[0].gap(), Offset::days(7));
/// ```
pub fn calendar_shifter(calendar: &Calendar, shift: Offset) -> Result<Calendar, CalendarError> {
    if calendar.targets.is_empty() {
        return Err(CalendarError::MissingFirstInterval { role: Role::Target });
    }
    if calendar.precursors.is_empty() {
        return Err(CalendarError::MissingFirstInterval {
            role: Role::Precursor,
        });
    }

    let mut shifted = calendar.clone();
    let new_target_gap = gap_shift(&calendar.targets[0], shift);
    let new_precursor_gap = gap_shift(&calendar.precursors[0], shift);
    shifted.targets[0].set_gap(new_target_gap);
    shifted.precursors[0].set_gap(new_precursor_gap);
    Ok(shifted)
}

/// Builds a staggered list of calendars by applying [`calendar_shifter`]
/// `n_shifts` times in sequence.
///
/// Returns `n_shifts + 1` calendars: the original plus one copy per
/// successive shift, offset by growing multiples of `shift`. Useful for
/// building an ensemble of train/test views without re-deriving anchor
/// years.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidShiftCount`] if `n_shifts` is zero, plus
/// any error from [`calendar_shifter`].
pub fn staggered_calendar(
    calendar: &Calendar,
    shift: Offset,
    n_shifts: usize,
) -> Result<Vec<Calendar>, CalendarError> {
    if n_shifts == 0 {
        return Err(CalendarError::InvalidShiftCount { n: n_shifts });
    }

    let mut staggered = Vec::with_capacity(n_shifts + 1);
    staggered.push(calendar.clone());
    for _ in 0..n_shifts {
        let shifted = calendar_shifter(staggered.last().expect("list starts non-empty"), shift)?;
        staggered.push(shifted);
    }
    Ok(staggered)
}
