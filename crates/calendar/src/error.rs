//! Error types for the demeter-calendar crate.

use chrono::NaiveDateTime;

use crate::interval::Role;

/// Error type for all fallible operations in the demeter-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when an anchor string matches none of the recognized grammars.
    #[error("anchor '{input}' does not match any recognized format")]
    InvalidAnchorFormat {
        /// The anchor string as provided by the caller.
        input: String,
    },

    /// Returned when an anchor string parses but holds an out-of-range value.
    #[error("invalid anchor value: {reason}")]
    InvalidAnchorValue {
        /// Description of the out-of-range component.
        reason: String,
    },

    /// Returned when an offset string is not of the form `<int>d`, `<int>W`,
    /// or `<int>M`.
    #[error("offset '{input}' is not a valid length string (expected e.g. '10d', '2W', '3M')")]
    InvalidOffset {
        /// The offset string as provided by the caller.
        input: String,
    },

    /// Returned when a shorthand builder receives a length in the wrong unit
    /// or with a non-positive count.
    #[error("invalid interval length '{input}': expected a strictly positive length like '{expected}'")]
    InvalidLength {
        /// The length string as provided by the caller.
        input: String,
        /// An example of a valid length for the builder in question.
        expected: &'static str,
    },

    /// Returned when zero intervals are requested from `add_intervals`.
    #[error("the number of intervals must be 1 or greater, got {n}")]
    InvalidIntervalCount {
        /// The invalid interval count.
        n: usize,
    },

    /// Returned when a year range has its start after its end.
    #[error("the start year ({start}) cannot be greater than the end year ({end})")]
    InvalidYearRange {
        /// First requested anchor year.
        start: i32,
        /// Last requested anchor year.
        end: i32,
    },

    /// Returned when intervals are requested before the calendar was mapped.
    #[error("cannot retrieve intervals without map_years or map_to_data having configured the calendar")]
    UnmappedCalendar,

    /// Returned when a data mapping is attempted against an empty time axis.
    #[error("the input time axis is empty")]
    EmptyTimeAxis,

    /// Returned when a data-mapped calendar cannot be realized for a single
    /// anchor year within the data's time span.
    #[error("the input data ({first}..{last}) cannot cover a single anchor year of the calendar")]
    InsufficientDataCoverage {
        /// Earliest timestamp of the input data.
        first: NaiveDateTime,
        /// Latest timestamp of the input data.
        last: NaiveDateTime,
    },

    /// Returned when a year range is resolved for a calendar without intervals.
    #[error("the calendar has no intervals")]
    NoIntervals,

    /// Returned when zero shifts are requested from `staggered_calendar`.
    #[error("the number of shifts must be 1 or greater, got {n}")]
    InvalidShiftCount {
        /// The invalid shift count.
        n: usize,
    },

    /// Returned when a shift is applied to a calendar lacking a first
    /// target or first precursor interval.
    #[error("cannot shift a calendar without any {role} intervals")]
    MissingFirstInterval {
        /// The role of the missing interval.
        role: Role,
    },
}
