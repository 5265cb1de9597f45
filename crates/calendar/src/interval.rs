//! Target and precursor interval building blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::offset::Offset;

/// The role of an interval relative to the anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A period after the anchor: the event to be forecast.
    Target,
    /// A period before the anchor: predictor data.
    Precursor,
}

impl Role {
    /// Returns the lowercase name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Precursor => "precursor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic construction element of a calendar.
///
/// An interval is characterised by its role (target or precursor), its
/// length, and the gap between it and the previous interval of its role (or
/// the anchor date, for the first target/first precursor).
///
/// # Example
///
/// ```
/// use demeter_calendar::{Interval, Offset, Role};
///
/// let iv = Interval::new(Role::Target, Offset::days(7), Offset::days(0));
/// assert_eq!(iv.to_string(), "Interval(role='target', length='7d', gap='0d')");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    role: Role,
    length: Offset,
    gap: Offset,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(role: Role, length: Offset, gap: Offset) -> Self {
        Self { role, length, gap }
    }

    /// Returns the role of this interval.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether this is a target interval.
    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }

    /// Returns the interval's length.
    pub fn length(&self) -> Offset {
        self.length
    }

    /// Returns the gap between this interval and its predecessor.
    pub fn gap(&self) -> Offset {
        self.gap
    }

    /// Replaces the interval's length.
    pub fn set_length(&mut self, length: Offset) {
        self.length = length;
    }

    /// Replaces the gap between this interval and its predecessor.
    pub fn set_gap(&mut self, gap: Offset) {
        self.gap = gap;
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interval(role='{}', length='{}', gap='{}')",
            self.role, self.length, self.gap
        )
    }
}
