//! Concrete half-open date intervals.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A concrete, half-open time interval `[left, right)`.
///
/// Spans are produced by materializing a calendar against an anchor year.
/// The left bound is included, the right bound is not, so adjacent spans
/// share a boundary without sharing any timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    left: NaiveDateTime,
    right: NaiveDateTime,
}

impl DateSpan {
    /// Creates a span from two timestamps.
    pub fn new(left: NaiveDateTime, right: NaiveDateTime) -> Self {
        Self { left, right }
    }

    /// Creates a span from two dates, with bounds at midnight.
    pub fn from_dates(left: NaiveDate, right: NaiveDate) -> Self {
        Self {
            left: left.and_time(NaiveTime::MIN),
            right: right.and_time(NaiveTime::MIN),
        }
    }

    /// Returns the inclusive left bound.
    pub fn left(&self) -> NaiveDateTime {
        self.left
    }

    /// Returns the exclusive right bound.
    pub fn right(&self) -> NaiveDateTime {
        self.right
    }

    /// Returns true if the timestamp falls within `[left, right)`.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.left <= ts && ts < self.right
    }

    /// Returns true if this span shares any time with `other`.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.left < other.right && other.left < self.right
    }
}

impl fmt::Display for DateSpan {
    /// Renders as `[left, right)`; bounds at midnight are shown as bare dates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_bound = |b: NaiveDateTime| {
            if b.time() == NaiveTime::MIN {
                b.date().to_string()
            } else {
                b.to_string()
            }
        };
        write!(f, "[{}, {})", fmt_bound(self.left), fmt_bound(self.right))
    }
}
