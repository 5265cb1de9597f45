//! Sampling-frequency compatibility between calendars and input data.

use chrono::{Duration, NaiveDateTime};
use demeter_calendar::Calendar;

use crate::error::ResampleError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Non-fatal warning: the calendar's bins are barely larger than the data's
/// sample spacing and risk under-sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AliasingWarning {
    /// Smallest calendar interval length, in days (months counted as 30).
    pub calendar_days: f64,
    /// Inferred sampling period of the data, in days.
    pub data_days: f64,
}

/// Infers the sampling period of a time axis.
///
/// For a regular axis this is the common step; for an irregular one it
/// falls back to the minimum positive step (the two coincide for regular
/// axes, so a single scan covers both). Returns `None` when fewer than two
/// distinct timestamps are available.
pub(crate) fn infer_time_step(time: &[NaiveDateTime]) -> Option<Duration> {
    if time.len() < 2 {
        return None;
    }
    let mut sorted = time.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > Duration::zero())
        .min()
}

/// The smallest interval length of the calendar, with month lengths counted
/// as a fixed 30 days for comparability.
fn smallest_calendar_freq(calendar: &Calendar) -> Option<Duration> {
    calendar
        .targets()
        .iter()
        .chain(calendar.precursors())
        .map(|iv| Duration::days(iv.length().approx_days()))
        .min()
}

/// Compares the calendar's smallest interval against the data's sampling
/// period.
///
/// A calendar finer than the data is a hard usage error: it would silently
/// produce mostly-NaN output. A calendar at or below twice the sampling
/// period still works but risks aliasing, reported as a non-fatal warning.
pub(crate) fn check_frequency(
    calendar: &Calendar,
    time: &[NaiveDateTime],
) -> Result<Option<AliasingWarning>, ResampleError> {
    let Some(data_freq) = infer_time_step(time) else {
        return Ok(None);
    };
    let Some(calendar_freq) = smallest_calendar_freq(calendar) else {
        return Ok(None);
    };

    let calendar_days = calendar_freq.num_seconds() as f64 / SECONDS_PER_DAY;
    let data_days = data_freq.num_seconds() as f64 / SECONDS_PER_DAY;

    if calendar_freq < data_freq {
        return Err(ResampleError::FrequencyTooCoarse {
            calendar_days,
            data_days,
        });
    }
    if calendar_freq <= data_freq * 2 {
        return Ok(Some(AliasingWarning {
            calendar_days,
            data_days,
        }));
    }
    Ok(None)
}
