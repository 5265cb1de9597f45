//! Materialized interval tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::DateSpan;

/// One materialized interval: an anchor year, a signed interval index, and
/// the concrete dates it covers.
///
/// `i_interval` counts outward from the anchor date: `1, 2, ...` forward in
/// time for targets, `-1, -2, ...` backward in time for precursors. Index 0
/// does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    /// The anchor year this interval was realized for.
    pub anchor_year: i32,
    /// Signed interval index (negative = precursor, positive = target).
    pub i_interval: i32,
    /// The concrete half-open interval.
    pub span: DateSpan,
}

/// A 2-D table of concrete intervals keyed by `(anchor_year, i_interval)`.
///
/// Rows are anchor years sorted descending, columns are interval indices
/// sorted ascending (`-n .. -1, 1 .. m`). Both orderings are part of the
/// contract: display and downstream resampling rely on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTable {
    anchor_years: Vec<i32>,
    indices: Vec<i32>,
    /// Row-major spans, `anchor_years.len() * indices.len()` entries.
    spans: Vec<DateSpan>,
}

impl IntervalTable {
    pub(crate) fn new(anchor_years: Vec<i32>, indices: Vec<i32>, spans: Vec<DateSpan>) -> Self {
        debug_assert_eq!(anchor_years.len() * indices.len(), spans.len());
        Self {
            anchor_years,
            indices,
            spans,
        }
    }

    /// Returns the anchor years, sorted descending.
    pub fn anchor_years(&self) -> &[i32] {
        &self.anchor_years
    }

    /// Returns the interval indices, sorted ascending.
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    /// Returns the number of realized anchor years.
    pub fn n_years(&self) -> usize {
        self.anchor_years.len()
    }

    /// Returns the number of intervals per anchor year.
    pub fn n_intervals(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the table holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the span for a given anchor year and interval index.
    pub fn get(&self, anchor_year: i32, i_interval: i32) -> Option<DateSpan> {
        let row = self.anchor_years.iter().position(|&y| y == anchor_year)?;
        let col = self.indices.iter().position(|&i| i == i_interval)?;
        Some(self.spans[row * self.indices.len() + col])
    }

    /// Returns the spans of one anchor year, in ascending interval order.
    pub fn row(&self, anchor_year: i32) -> Option<&[DateSpan]> {
        let row = self.anchor_years.iter().position(|&y| y == anchor_year)?;
        let width = self.indices.len();
        Some(&self.spans[row * width..(row + 1) * width])
    }

    /// Iterates over all bins in row-major order: anchor years descending,
    /// interval indices ascending within each year.
    pub fn flat(&self) -> impl Iterator<Item = Bin> + '_ {
        self.spans.iter().enumerate().map(move |(i, &span)| {
            let width = self.indices.len();
            Bin {
                anchor_year: self.anchor_years[i / width],
                i_interval: self.indices[i % width],
                span,
            }
        })
    }
}

impl fmt::Display for IntervalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i_interval ")?;
        for idx in &self.indices {
            write!(f, " {idx:>24}")?;
        }
        writeln!(f)?;
        writeln!(f, "anchor_year")?;
        for (row, year) in self.anchor_years.iter().enumerate() {
            write!(f, "{year:<11}")?;
            let width = self.indices.len();
            for span in &self.spans[row * width..(row + 1) * width] {
                write!(f, " {:>24}", span.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
