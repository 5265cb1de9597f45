//! Input data model: tabular and gridded timeseries.
//!
//! The resampler accepts a closed set of input shapes, dispatched once at
//! the entry point. Constructors validate shape up front (time-axis and
//! dimension consistency), so the resampling algorithms can assume
//! well-formed data.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::error::ResampleError;

/// The name of the time dimension a gridded variable is resampled along.
pub const TIME_DIM: &str = "time";

/// A named column of sample values, parallel to its table's time index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Sample values, one per index entry.
    pub values: Vec<f64>,
}

impl Column {
    /// Creates a named column.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Tabular input: a datetime row index plus data columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tabular {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl Tabular {
    /// Creates a table from a datetime index and columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::EmptyTimeAxis`] for an empty index and
    /// [`ResampleError::LengthMismatch`] for any column whose length differs
    /// from the index.
    pub fn new(index: Vec<NaiveDateTime>, columns: Vec<Column>) -> Result<Self, ResampleError> {
        if index.is_empty() {
            return Err(ResampleError::EmptyTimeAxis);
        }
        for column in &columns {
            if column.values.len() != index.len() {
                return Err(ResampleError::LengthMismatch {
                    field: column.name.clone(),
                    expected: index.len(),
                    got: column.values.len(),
                });
            }
        }
        Ok(Self { index, columns })
    }

    /// Creates a single-column table from a named series.
    pub fn from_series(
        index: Vec<NaiveDateTime>,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, ResampleError> {
        Self::new(index, vec![Column::new(name, values)])
    }

    /// Returns the datetime row index.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Returns the data columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// A named n-dimensional variable of a gridded dataset.
///
/// `dims` names the axes of `values` in order. Variables carrying the
/// [`TIME_DIM`] dimension are aggregated per interval; all others pass
/// through resampling unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridVar {
    /// Variable name.
    pub name: String,
    /// Dimension names, one per array axis.
    pub dims: Vec<String>,
    /// The variable's values.
    pub values: ArrayD<f64>,
}

impl GridVar {
    /// Creates a named variable.
    pub fn new(name: impl Into<String>, dims: &[&str], values: ArrayD<f64>) -> Self {
        Self {
            name: name.into(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            values,
        }
    }

    /// Returns the axis position of the time dimension, if any.
    pub fn time_axis(&self) -> Option<usize> {
        self.dims.iter().position(|d| d == TIME_DIM)
    }
}

/// Gridded input: a `time` coordinate plus n-dimensional variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gridded {
    time: Vec<NaiveDateTime>,
    vars: Vec<GridVar>,
    attrs: BTreeMap<String, String>,
}

impl Gridded {
    /// Creates a gridded dataset from a time coordinate and variables.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::EmptyTimeAxis`] for an empty time
    /// coordinate, [`ResampleError::DimMismatch`] when a variable's declared
    /// dimensions don't match its array, and
    /// [`ResampleError::LengthMismatch`] when a variable's time axis length
    /// differs from the time coordinate.
    pub fn new(time: Vec<NaiveDateTime>, vars: Vec<GridVar>) -> Result<Self, ResampleError> {
        if time.is_empty() {
            return Err(ResampleError::EmptyTimeAxis);
        }
        for var in &vars {
            if var.dims.len() != var.values.ndim() {
                return Err(ResampleError::DimMismatch {
                    var: var.name.clone(),
                    declared: var.dims.len(),
                    actual: var.values.ndim(),
                });
            }
            if let Some(axis) = var.time_axis() {
                let len = var.values.shape()[axis];
                if len != time.len() {
                    return Err(ResampleError::LengthMismatch {
                        field: var.name.clone(),
                        expected: time.len(),
                        got: len,
                    });
                }
            }
        }
        Ok(Self {
            time,
            vars,
            attrs: BTreeMap::new(),
        })
    }

    /// Returns the time coordinate.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Returns the dataset's variables.
    pub fn vars(&self) -> &[GridVar] {
        &self.vars
    }

    /// Returns the dataset's attribute store.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Returns a mutable reference to the attribute store.
    pub fn attrs_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.attrs
    }
}

/// The closed set of input shapes the resampler accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TimeSeries {
    /// Tabular data with a datetime row index.
    Tabular(Tabular),
    /// Gridded data with a `time` coordinate.
    Gridded(Gridded),
}

impl TimeSeries {
    /// Returns the input's time axis. Useful for mapping a calendar to the
    /// data before resampling:
    ///
    /// ```
    /// # use chrono::{NaiveDate, NaiveTime};
    /// # use demeter_calendar::daily_calendar;
    /// # use demeter_resample::{Tabular, TimeSeries};
    /// # let time: Vec<_> = (0..1200u64)
    /// #     .map(|i| {
    /// #         NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_time(NaiveTime::MIN)
    /// #             + chrono::Days::new(i)
    /// #     })
    /// #     .collect();
    /// # let values: Vec<f64> = (0..1200).map(f64::from).collect();
    /// let data = TimeSeries::Tabular(Tabular::from_series(time, "data", values).unwrap());
    /// let mut calendar = daily_calendar("12-31", "180d", 1, 0, false).unwrap();
    /// calendar.map_to_data(data.time()).unwrap();
    /// ```
    pub fn time(&self) -> &[NaiveDateTime] {
        match self {
            Self::Tabular(t) => t.time(),
            Self::Gridded(g) => g.time(),
        }
    }
}

impl From<Tabular> for TimeSeries {
    fn from(value: Tabular) -> Self {
        Self::Tabular(value)
    }
}

impl From<Gridded> for TimeSeries {
    fn from(value: Gridded) -> Self {
        Self::Gridded(value)
    }
}
