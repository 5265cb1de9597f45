//! Error types for the demeter-resample crate.

use demeter_calendar::CalendarError;

/// Error type for all fallible operations in the demeter-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Calendar error, e.g. an unmapped calendar or insufficient data
    /// coverage surfaced while materializing intervals.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Returned when the calendar has neither targets nor precursors.
    #[error("the calendar has no intervals: resampling is not possible")]
    NoIntervals,

    /// Returned when a reduction method name is not recognized.
    #[error("'{name}' is not a valid resampling method")]
    UnknownMethod {
        /// The unrecognized method name.
        name: String,
    },

    /// Returned when the input data already defines a name the resampler
    /// writes to its output.
    #[error("the input data contains the reserved name '{name}'; remove or rename it before resampling")]
    ReservedName {
        /// The colliding column, variable, or dimension name.
        name: String,
    },

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a gridded variable declares a different number of
    /// dimensions than its array carries.
    #[error("variable '{var}' declares {declared} dimensions but its array has {actual}")]
    DimMismatch {
        /// Name of the offending variable.
        var: String,
        /// Number of declared dimension names.
        declared: usize,
        /// Number of array dimensions.
        actual: usize,
    },

    /// Returned when input data has an empty time axis.
    #[error("the input time axis is empty")]
    EmptyTimeAxis,

    /// Returned when the calendar's intervals are finer than the data's
    /// sampling period, which would produce mostly-NaN output.
    #[error(
        "the calendar's smallest interval ({calendar_days} days) is finer than the \
         data's sampling period ({data_days} days); make the calendar's intervals \
         larger or use data of a higher time resolution"
    )]
    FrequencyTooCoarse {
        /// Smallest calendar interval length, in days (months counted as 30).
        calendar_days: f64,
        /// Inferred sampling period of the data, in days.
        data_days: f64,
    },
}
