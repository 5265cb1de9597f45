//! # demeter-calendar
//!
//! Anchor-date calendars of target and precursor intervals for seasonal
//! forecasting.
//!
//! A calendar is built from an anchor date (e.g. `"12-31"`) plus interval
//! building blocks: target periods after the anchor (the event to forecast)
//! and precursor periods before it (the predictor data). Mapping the
//! calendar to a year range or a dataset's time extent realizes it into
//! concrete per-year intervals, skipping anchor years as needed so that no
//! calendar time is shared between them (train/test leakage protection).
//!
//! ## Architecture
//!
//! ```text
//!  "12-31" ──parse──▶ Anchor ─┐
//!  "20d"   ──parse──▶ Offset ─┼─▶ Calendar ──map_years/map_to_data──▶ IntervalTable
//!                 Interval ───┘        │                                  │
//!                                 shifter/shorthands                 flat() bins
//! ```
//!
//! ## Quick start
//!
//! ```
//! use demeter_calendar::{Calendar, Role};
//!
//! let mut calendar = Calendar::new("12-31").unwrap();
//! calendar.add_intervals(Role::Target, "20d", 1).unwrap();
//! calendar.add_intervals(Role::Precursor, "10d", 1).unwrap();
//! calendar.map_years(2021, 2021).unwrap();
//!
//! let intervals = calendar.get_intervals().unwrap();
//! assert_eq!(intervals.anchor_years(), &[2021]);
//! assert_eq!(intervals.indices(), &[-1, 1]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `anchor` | Anchor-date descriptors and their parser |
//! | `offset` | Composite month/week/day offsets |
//! | `interval` | Target/precursor interval building blocks |
//! | `span` | Concrete half-open date intervals |
//! | `calendar` | The calendar builder and materialization engine |
//! | `table` | Materialized interval tables |
//! | `shorthands` | One-liner daily/weekly/monthly calendars |
//! | `shifter` | Staggered calendar ensembles |
//! | `error` | Error types |

mod anchor;
mod calendar;
mod error;
mod interval;
mod offset;
mod shifter;
mod shorthands;
mod span;
mod table;

pub use anchor::Anchor;
pub use calendar::{Calendar, CoverageMode, Mapping};
pub use error::CalendarError;
pub use interval::{Interval, Role};
pub use offset::{Offset, MONTH_LENGTH};
pub use shifter::{calendar_shifter, staggered_calendar};
pub use shorthands::{daily_calendar, monthly_calendar, weekly_calendar};
pub use span::DateSpan;
pub use table::{Bin, IntervalTable};
