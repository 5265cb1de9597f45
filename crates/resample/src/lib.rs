//! # demeter-resample
//!
//! Resampling of timeseries and gridded data onto demeter calendars.
//!
//! Given a mapped [`Calendar`], the resampler bins every input sample into
//! the calendar's concrete intervals and reduces each bin with a selectable
//! reduction (mean by default in most workflows). The output carries the
//! `(anchor_year, i_interval)` structure of the calendar plus an
//! `is_target` flag, ready for train/test construction.
//!
//! # Pipeline
//!
//! ```text
//!  ┌────────────┐     ┌──────────────┐     ┌───────────────┐
//!  │  Calendar   │────▶│  Flat bins   │────▶│  Containment  │
//!  │ (mapped)    │     │ (year, idx)  │     │    masks      │
//!  └────────────┘     └──────────────┘     └───────┬───────┘
//!                                                  ▼
//!  ┌────────────┐     ┌──────────────┐     ┌───────────────┐
//!  │   Output    │◀────│  is_target,  │◀────│  Per-bin      │
//!  │ table/grid  │     │   bounds     │     │  reduction    │
//!  └────────────┘     └──────────────┘     └───────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use chrono::{Days, NaiveDate, NaiveTime};
//! use demeter_calendar::daily_calendar;
//! use demeter_resample::{resample, Reduction, Resampled, Tabular, TimeSeries};
//!
//! let time: Vec<_> = (0..1097u64)
//!     .map(|i| {
//!         NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_time(NaiveTime::MIN)
//!             + Days::new(i)
//!     })
//!     .collect();
//! let values: Vec<f64> = (0..1097).map(f64::from).collect();
//! let data = TimeSeries::Tabular(Tabular::from_series(time, "data", values).unwrap());
//!
//! let mut calendar = daily_calendar("12-31", "180d", 1, 0, false).unwrap();
//! calendar.map_to_data(data.time()).unwrap();
//!
//! let Resampled::Table(bins) = resample(&calendar, &data, &Reduction::Mean).unwrap()
//! else {
//!     unreachable!("tabular input resamples to a table")
//! };
//! assert_eq!(bins.anchor_year(), &[2020, 2020, 2019, 2019]);
//! assert_eq!(bins.is_target(), &[false, true, false, true]);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `input` | Tabular/gridded input model and shape validation |
//! | `method` | Per-bin reduction methods |
//! | `bins` | Containment masks and coverage checks |
//! | `frequency` | Calendar-vs-data sampling-frequency policy |
//! | `resample` | Entry points and precondition checks |
//! | `output` | Resampled output schemas |
//! | `provenance` | Metadata stamping for persisted output |
//! | `error` | Error types |

mod bins;
mod error;
mod frequency;
mod gridded;
mod input;
mod method;
mod output;
mod provenance;
mod resample;
mod tabular;

pub use error::ResampleError;
pub use input::{Column, GridVar, Gridded, Tabular, TimeSeries, TIME_DIM};
pub use method::Reduction;
pub use output::{Resampled, ResampledGrid, ResampledTable};
pub use provenance::{annotate, Provenance};
pub use resample::{resample, resample_gridded, resample_list, resample_tabular};

pub use demeter_calendar::{Calendar, CoverageMode};
