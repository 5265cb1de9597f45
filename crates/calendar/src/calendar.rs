//! The calendar builder and its interval materialization engine.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anchor::Anchor;
use crate::error::CalendarError;
use crate::interval::{Interval, Role};
use crate::offset::Offset;
use crate::span::DateSpan;
use crate::table::IntervalTable;

/// Policy for matching a calendar against a dataset's time extent.
///
/// Controls how the realized anchor years are clipped to the data span when
/// a timestamp sits on or near an interval boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageMode {
    /// Keep an anchor year only if the data fully covers its last interval:
    /// the rightmost interval bound must not exceed the last data timestamp.
    #[default]
    Safe,
    /// Keep an anchor year as soon as its last interval begins within the
    /// data span. Trailing intervals may then be partially covered and
    /// resample to NaN-padded aggregates.
    Greedy,
}

/// How a calendar has been mapped onto concrete anchor years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mapping {
    /// An explicit, inclusive range of anchor years.
    Years {
        /// First anchor year to realize.
        first: i32,
        /// Last anchor year to realize.
        last: i32,
    },
    /// A range inferred from a dataset's first and last timestamps.
    Data {
        /// Earliest timestamp of the dataset.
        first: NaiveDateTime,
        /// Latest timestamp of the dataset.
        last: NaiveDateTime,
        /// Boundary policy used when resolving the year range.
        mode: CoverageMode,
    },
}

/// Build a calendar from scratch with basic construction elements.
///
/// A calendar is an anchor date plus ordered lists of target and precursor
/// intervals. Targets extend forward in time from the anchor, precursors
/// backward. Once mapped (to an explicit year range or to a dataset's time
/// extent) the calendar can be materialized into concrete intervals, one row
/// per realized anchor year.
///
/// Materialization is derived on demand: [`Calendar::get_intervals`] never
/// caches, so the calendar's canonical state is the anchor, the interval
/// lists, and the mapping alone.
///
/// # Example
///
/// ```
/// use demeter_calendar::{Calendar, Role};
///
/// let mut cal = Calendar::new("12-31").unwrap();
/// cal.add_intervals(Role::Target, "20d", 1).unwrap();
/// cal.add_intervals(Role::Precursor, "10d", 1).unwrap();
/// cal.map_years(2021, 2021).unwrap();
///
/// let intervals = cal.get_intervals().unwrap();
/// assert_eq!(intervals.anchor_years(), &[2021]);
/// assert_eq!(
///     intervals.get(2021, 1).unwrap().to_string(),
///     "[2021-12-31, 2022-01-20)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    anchor: Anchor,
    allow_overlap: bool,
    pub(crate) targets: Vec<Interval>,
    pub(crate) precursors: Vec<Interval>,
    mapping: Option<Mapping>,
}

impl Calendar {
    /// Creates an empty calendar around the given anchor descriptor.
    ///
    /// # Errors
    ///
    /// Returns an anchor parsing error for unrecognized or out-of-range
    /// anchor strings.
    pub fn new(anchor: &str) -> Result<Self, CalendarError> {
        Ok(Self::from_anchor(anchor.parse()?))
    }

    /// Creates an empty calendar from an already-parsed anchor.
    pub fn from_anchor(anchor: Anchor) -> Self {
        Self {
            anchor,
            allow_overlap: false,
            targets: Vec::new(),
            precursors: Vec::new(),
            mapping: None,
        }
    }

    /// Sets whether intervals of consecutive realized anchor years may
    /// overlap in time. Defaults to `false`, which makes materialization
    /// skip anchor years as needed so that no calendar time is shared
    /// between them.
    pub fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    /// Returns the anchor descriptor.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Returns whether intervals of different anchor years may overlap.
    pub fn allow_overlap(&self) -> bool {
        self.allow_overlap
    }

    /// Returns the target intervals, ordered outward from the anchor.
    pub fn targets(&self) -> &[Interval] {
        &self.targets
    }

    /// Returns the precursor intervals, ordered outward from the anchor.
    pub fn precursors(&self) -> &[Interval] {
        &self.precursors
    }

    /// Returns the number of target intervals.
    pub fn n_targets(&self) -> usize {
        self.targets.len()
    }

    /// Returns the number of precursor intervals.
    pub fn n_precursors(&self) -> usize {
        self.precursors.len()
    }

    /// Returns the current mapping, if any.
    pub fn mapping(&self) -> Option<&Mapping> {
        self.mapping.as_ref()
    }

    /// Appends a single pre-built interval to its role's list.
    pub fn append(&mut self, interval: Interval) -> &mut Self {
        if interval.is_target() {
            self.targets.push(interval);
        } else {
            self.precursors.push(interval);
        }
        self
    }

    /// Adds `n` intervals of the given role and length, with no gap to
    /// their predecessor.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidIntervalCount`] if `n` is zero, or an
    /// offset parsing error for a malformed length.
    pub fn add_intervals(
        &mut self,
        role: Role,
        length: &str,
        n: usize,
    ) -> Result<&mut Self, CalendarError> {
        self.add_intervals_with_gap(role, length, "0d", n)
    }

    /// Adds `n` intervals of the given role, length, and gap. The gap
    /// separates each interval from the preceding interval of its role (or
    /// from the anchor date, for the first target/precursor).
    pub fn add_intervals_with_gap(
        &mut self,
        role: Role,
        length: &str,
        gap: &str,
        n: usize,
    ) -> Result<&mut Self, CalendarError> {
        if n == 0 {
            return Err(CalendarError::InvalidIntervalCount { n });
        }
        let length = Offset::parse(length)?;
        let gap = Offset::parse(gap)?;
        for _ in 0..n {
            self.append(Interval::new(role, length, gap));
        }
        Ok(self)
    }

    /// Maps the calendar to an explicit, inclusive range of anchor years.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYearRange`] if `start > end`.
    pub fn map_years(&mut self, start: i32, end: i32) -> Result<&mut Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidYearRange { start, end });
        }
        self.mapping = Some(Mapping::Years {
            first: start,
            last: end,
        });
        Ok(self)
    }

    /// Maps the calendar to a dataset's time extent using the default
    /// [`CoverageMode::Safe`] policy.
    ///
    /// The time axis does not need to be sorted; only its minimum and
    /// maximum timestamps are stored.
    pub fn map_to_data(&mut self, time: &[NaiveDateTime]) -> Result<&mut Self, CalendarError> {
        self.map_to_data_with(time, CoverageMode::Safe)
    }

    /// Maps the calendar to a dataset's time extent with an explicit
    /// coverage policy.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyTimeAxis`] for an empty time axis.
    pub fn map_to_data_with(
        &mut self,
        time: &[NaiveDateTime],
        mode: CoverageMode,
    ) -> Result<&mut Self, CalendarError> {
        let (first, last) = match (time.iter().min(), time.iter().max()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(CalendarError::EmptyTimeAxis),
        };
        self.mapping = Some(Mapping::Data { first, last, mode });
        Ok(self)
    }

    /// Resolves the anchor for a specific year. This is the fixed point all
    /// of the year's intervals are built from: the boundary between interval
    /// -1 and interval 1.
    fn anchor_date(&self, year: i32) -> NaiveDate {
        self.anchor.resolve(year)
    }

    /// Builds the concrete intervals of one anchor year, ascending in time:
    /// precursors `-n .. -1`, then targets `1 .. m`.
    fn map_year(&self, year: i32) -> Vec<DateSpan> {
        let anchor = self.anchor_date(year);
        let mut spans = Vec::with_capacity(self.precursors.len() + self.targets.len());

        // Precursors walk backward from the anchor; built outward, then
        // reversed into ascending time order.
        let mut right = anchor;
        for block in &self.precursors {
            right = block.gap().sub_from(right);
            let left = block.length().sub_from(right);
            spans.push(DateSpan::from_dates(left, right));
            right = left;
        }
        spans.reverse();

        // Targets walk forward; each interval's right bound seeds the next.
        let mut left = anchor;
        for block in &self.targets {
            left = block.gap().add_to(left);
            let right = block.length().add_to(left);
            spans.push(DateSpan::from_dates(left, right));
            left = right;
        }
        spans
    }

    /// Signed interval indices in ascending order: `-n .. -1, 1 .. m`.
    fn interval_indices(&self) -> Vec<i32> {
        let n_precursors = self.precursors.len() as i32;
        let n_targets = self.targets.len() as i32;
        (-n_precursors..=-1).chain(1..=n_targets).collect()
    }

    /// Computes how many anchor years must be skipped between consecutive
    /// realized years so that the previous year's targets never overlap the
    /// current year's earliest precursor. Returns 0 when overlap is allowed.
    ///
    /// Prevents information leakage between anchor years: by default no
    /// calendar time is shared between them.
    pub fn skip_n_years(&self) -> i32 {
        if self.allow_overlap {
            return 0;
        }

        // A synthetic year is enough: the calendar's shape barely changes
        // between years, and the original uses the same proto-year.
        const PROTO_YEAR: i32 = 2000;

        let mut start = self.anchor_date(PROTO_YEAR);
        for precursor in &self.precursors {
            start = precursor.gap().sub_from(start);
            start = precursor.length().sub_from(start);
        }

        let mut skip = 0;
        loop {
            let mut prev_end = self.anchor_date(PROTO_YEAR - 1 - skip);
            for target in &self.targets {
                prev_end = target.gap().add_to(prev_end);
                prev_end = target.length().add_to(prev_end);
            }
            if prev_end > start {
                skip += 1;
            } else {
                return skip;
            }
        }
    }

    /// Resolves a data mapping into a concrete `(first_year, last_year)`
    /// range: the largest last year whose realized intervals satisfy the
    /// coverage policy against the last timestamp, and the smallest first
    /// year whose earliest interval still ends after the first timestamp.
    fn resolve_year_range(
        &self,
        first: NaiveDateTime,
        last: NaiveDateTime,
        mode: CoverageMode,
    ) -> Result<(i32, i32), CalendarError> {
        if self.targets.is_empty() && self.precursors.is_empty() {
            return Err(CalendarError::NoIntervals);
        }

        let mut last_year = last.year();
        loop {
            let spans = self.map_year(last_year);
            let latest = spans.last().expect("calendar has at least one interval");
            let covered = match mode {
                CoverageMode::Safe => latest.right() <= last,
                CoverageMode::Greedy => latest.left() <= last,
            };
            if covered {
                break;
            }
            last_year -= 1;
        }

        let mut first_year = first.year();
        loop {
            let spans = self.map_year(first_year);
            let earliest = spans.first().expect("calendar has at least one interval");
            if earliest.right() > first {
                break;
            }
            first_year += 1;
        }

        if last_year < first_year {
            return Err(CalendarError::InsufficientDataCoverage { first, last });
        }
        Ok((first_year, last_year))
    }

    /// Materializes the calendar into a table of concrete intervals.
    ///
    /// Rows are realized anchor years descending; columns are interval
    /// indices ascending. The table is recomputed from scratch on every
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnmappedCalendar`] if neither
    /// [`Calendar::map_years`] nor [`Calendar::map_to_data`] has configured
    /// the calendar, and [`CalendarError::InsufficientDataCoverage`] if a
    /// data mapping cannot realize a single anchor year.
    pub fn get_intervals(&self) -> Result<IntervalTable, CalendarError> {
        let mapping = self.mapping.as_ref().ok_or(CalendarError::UnmappedCalendar)?;
        let (first_year, last_year) = match *mapping {
            Mapping::Years { first, last } => (first, last),
            Mapping::Data { first, last, mode } => self.resolve_year_range(first, last, mode)?,
        };

        let step = self.skip_n_years() + 1;
        let mut years = Vec::new();
        let mut year = last_year;
        while year >= first_year {
            years.push(year);
            year -= step;
        }
        debug!(
            first_year,
            last_year,
            step,
            n_years = years.len(),
            "materializing calendar"
        );

        let indices = self.interval_indices();
        let mut spans = Vec::with_capacity(years.len() * indices.len());
        for &y in &years {
            spans.extend(self.map_year(y));
        }
        Ok(IntervalTable::new(years, indices, spans))
    }
}

impl fmt::Display for Calendar {
    /// Renders the calendar's full configuration as a readable code block,
    /// suitable for provenance metadata.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calendar(")?;
        writeln!(f, "    anchor='{}',", self.anchor)?;
        writeln!(f, "    allow_overlap={},", self.allow_overlap)?;
        match self.mapping {
            None => writeln!(f, "    mapping=None,")?,
            Some(Mapping::Years { first, last }) => {
                writeln!(f, "    mapping=years({first}, {last}),")?
            }
            Some(Mapping::Data { first, last, .. }) => {
                writeln!(f, "    mapping=data({first}, {last}),")?
            }
        }
        let intervals: Vec<&Interval> = self.targets.iter().chain(&self.precursors).collect();
        if intervals.is_empty() {
            writeln!(f, "    intervals=None")?;
        } else {
            writeln!(f, "    intervals=[")?;
            for interval in intervals {
                writeln!(f, "        {interval},")?;
            }
            writeln!(f, "    ]")?;
        }
        write!(f, ")")
    }
}
