//! The resampling entry points and their precondition checks.

use chrono::NaiveDateTime;
use demeter_calendar::{Calendar, CalendarError};
use tracing::warn;

use crate::error::ResampleError;
use crate::frequency::check_frequency;
use crate::input::{Gridded, Tabular, TimeSeries};
use crate::method::Reduction;
use crate::output::{Resampled, ResampledGrid, ResampledTable};

/// Names the resampler writes into tabular output.
const RESERVED_TABULAR: [&str; 3] = ["anchor_year", "i_interval", "is_target"];

/// Names the resampler writes into gridded output.
const RESERVED_GRIDDED: [&str; 5] = [
    "anchor_year",
    "i_interval",
    "is_target",
    "left_bound",
    "right_bound",
];

/// Resamples input data onto a mapped calendar's intervals.
///
/// Every sample is binned into the calendar's concrete intervals (half-open
/// `[left, right)`) and each bin is reduced with `how`. Intervals without
/// any samples resample to NaN. The result mirrors the input's shape:
/// tabular in, tabular out; gridded in, gridded out.
///
/// This is intended for upscaling: the calendar's intervals should be larger
/// than the data's sampling period. Downscaling fails early, since it would
/// produce mostly-NaN output.
///
/// # Errors
///
/// All preconditions are checked before any aggregation work:
/// - the calendar must be mapped ([`CalendarError::UnmappedCalendar`]);
/// - it must have at least one interval ([`ResampleError::NoIntervals`]);
/// - the input must not already define an output name
///   ([`ResampleError::ReservedName`]);
/// - the calendar must not be finer than the data's sampling period
///   ([`ResampleError::FrequencyTooCoarse`]).
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate, NaiveTime};
/// use demeter_calendar::daily_calendar;
/// use demeter_resample::{resample, Reduction, Tabular, TimeSeries};
///
/// let time: Vec<_> = (0..1097u64)
///     .map(|i| {
///         NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_time(NaiveTime::MIN)
///             + Days::new(i)
///     })
///     .collect();
/// let values: Vec<f64> = (0..1097).map(f64::from).collect();
/// let data = TimeSeries::Tabular(Tabular::from_series(time, "data", values).unwrap());
///
/// let mut calendar = daily_calendar("12-31", "180d", 1, 0, false).unwrap();
/// calendar.map_to_data(data.time()).unwrap();
///
/// let resampled = resample(&calendar, &data, &Reduction::Mean).unwrap();
/// ```
#[tracing::instrument(skip_all, fields(method = how.name()))]
pub fn resample(
    calendar: &Calendar,
    data: &TimeSeries,
    how: &Reduction,
) -> Result<Resampled, ResampleError> {
    match data {
        TimeSeries::Tabular(table) => {
            resample_tabular(calendar, table, how).map(Resampled::Table)
        }
        TimeSeries::Gridded(grid) => resample_gridded(calendar, grid, how).map(Resampled::Grid),
    }
}

/// Resamples tabular input onto a mapped calendar's intervals.
///
/// See [`resample`] for semantics and error conditions.
#[tracing::instrument(skip_all, fields(method = how.name()))]
pub fn resample_tabular(
    calendar: &Calendar,
    data: &Tabular,
    how: &Reduction,
) -> Result<ResampledTable, ResampleError> {
    let names = data.columns().iter().map(|c| c.name.as_str());
    preflight(calendar, data.time(), names, &RESERVED_TABULAR)?;
    crate::tabular::resample_tabular_impl(calendar, data, how)
}

/// Resamples gridded input onto a mapped calendar's intervals.
///
/// See [`resample`] for semantics and error conditions.
#[tracing::instrument(skip_all, fields(method = how.name()))]
pub fn resample_gridded(
    calendar: &Calendar,
    data: &Gridded,
    how: &Reduction,
) -> Result<ResampledGrid, ResampleError> {
    let names = data
        .vars()
        .iter()
        .flat_map(|v| std::iter::once(v.name.as_str()).chain(v.dims.iter().map(String::as_str)));
    preflight(calendar, data.time(), names, &RESERVED_GRIDDED)?;
    crate::gridded::resample_gridded_impl(calendar, data, how)
}

/// Resamples the same input onto every calendar of a list, e.g. a staggered
/// ensemble built with [`demeter_calendar::staggered_calendar`].
///
/// Results come back in the calendars' order, one per ensemble member; the
/// first failing member aborts the whole call.
pub fn resample_list(
    calendars: &[Calendar],
    data: &TimeSeries,
    how: &Reduction,
) -> Result<Vec<Resampled>, ResampleError> {
    calendars
        .iter()
        .map(|calendar| resample(calendar, data, how))
        .collect()
}

/// Runs all resampling preconditions, in order, before any work happens.
fn preflight<'a>(
    calendar: &Calendar,
    time: &[NaiveDateTime],
    names: impl Iterator<Item = &'a str>,
    reserved: &[&str],
) -> Result<(), ResampleError> {
    if calendar.mapping().is_none() {
        return Err(CalendarError::UnmappedCalendar.into());
    }
    if calendar.n_targets() + calendar.n_precursors() == 0 {
        return Err(ResampleError::NoIntervals);
    }
    for name in names {
        if reserved.contains(&name) {
            return Err(ResampleError::ReservedName {
                name: name.to_string(),
            });
        }
    }
    if let Some(aliasing) = check_frequency(calendar, time)? {
        warn!(
            calendar_days = aliasing.calendar_days,
            data_days = aliasing.data_days,
            "the input data frequency is very close to the calendar's frequency; \
             this risks aliasing or incorrect resampling"
        );
    }
    Ok(())
}
