//! Resampled output schemas.

use std::collections::BTreeMap;

use demeter_calendar::{Bin, DateSpan};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::input::{Column, GridVar};

/// Tabular resampling result: one row per `(anchor_year, i_interval)` bin.
///
/// Rows are ordered anchor years descending, interval indices ascending
/// within each year — the same deterministic ordering the calendar's
/// interval table uses. `is_target` is true exactly where `i_interval > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledTable {
    anchor_year: Vec<i32>,
    i_interval: Vec<i32>,
    interval: Vec<DateSpan>,
    columns: Vec<Column>,
    is_target: Vec<bool>,
}

impl ResampledTable {
    pub(crate) fn new(bins: &[Bin], columns: Vec<Column>) -> Self {
        Self {
            anchor_year: bins.iter().map(|b| b.anchor_year).collect(),
            i_interval: bins.iter().map(|b| b.i_interval).collect(),
            interval: bins.iter().map(|b| b.span).collect(),
            columns,
            is_target: bins.iter().map(|b| b.i_interval > 0).collect(),
        }
    }

    /// Returns the number of rows (bins).
    pub fn n_rows(&self) -> usize {
        self.anchor_year.len()
    }

    /// Returns the anchor year of every row.
    pub fn anchor_year(&self) -> &[i32] {
        &self.anchor_year
    }

    /// Returns the interval index of every row.
    pub fn i_interval(&self) -> &[i32] {
        &self.i_interval
    }

    /// Returns the concrete interval of every row.
    pub fn interval(&self) -> &[DateSpan] {
        &self.interval
    }

    /// Returns the aggregated data columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the aggregated values of a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Returns the target flag of every row.
    pub fn is_target(&self) -> &[bool] {
        &self.is_target
    }
}

/// Gridded resampling result.
///
/// Aggregated variables gain leading `anchor_year` and `i_interval`
/// dimensions in place of `time`; passthrough variables are carried over
/// unchanged. The interval bounds are stored as paired numeric coordinates
/// (`left_bound`/`right_bound`, seconds since the Unix epoch) because
/// interval objects are not serializable to self-describing array formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledGrid {
    anchor_year: Vec<i32>,
    i_interval: Vec<i32>,
    left_bound: Array2<i64>,
    right_bound: Array2<i64>,
    is_target: Vec<bool>,
    vars: Vec<GridVar>,
    attrs: BTreeMap<String, String>,
    coord_attrs: BTreeMap<String, BTreeMap<String, String>>,
}

impl ResampledGrid {
    pub(crate) fn new(
        anchor_year: Vec<i32>,
        i_interval: Vec<i32>,
        left_bound: Array2<i64>,
        right_bound: Array2<i64>,
        vars: Vec<GridVar>,
        attrs: BTreeMap<String, String>,
    ) -> Self {
        let is_target = i_interval.iter().map(|&i| i > 0).collect();
        let mut coord_attrs: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        coord_attrs.insert(
            "left_bound".to_string(),
            BTreeMap::from([
                ("long_name".to_string(), "left bound of the interval".to_string()),
                ("closed".to_string(), "true".to_string()),
                ("units".to_string(), "seconds since 1970-01-01".to_string()),
            ]),
        );
        coord_attrs.insert(
            "right_bound".to_string(),
            BTreeMap::from([
                ("long_name".to_string(), "right bound of the interval".to_string()),
                ("closed".to_string(), "false".to_string()),
                ("units".to_string(), "seconds since 1970-01-01".to_string()),
            ]),
        );
        Self {
            anchor_year,
            i_interval,
            left_bound,
            right_bound,
            is_target,
            vars,
            attrs,
            coord_attrs,
        }
    }

    /// Returns the anchor-year dimension values, descending.
    pub fn anchor_year(&self) -> &[i32] {
        &self.anchor_year
    }

    /// Returns the interval-index dimension values, ascending.
    pub fn i_interval(&self) -> &[i32] {
        &self.i_interval
    }

    /// Returns the left interval bounds (epoch seconds), shaped
    /// `(anchor_year, i_interval)`.
    pub fn left_bound(&self) -> &Array2<i64> {
        &self.left_bound
    }

    /// Returns the right interval bounds (epoch seconds), shaped
    /// `(anchor_year, i_interval)`.
    pub fn right_bound(&self) -> &Array2<i64> {
        &self.right_bound
    }

    /// Returns the target flag per interval index.
    pub fn is_target(&self) -> &[bool] {
        &self.is_target
    }

    /// Returns the output variables.
    pub fn vars(&self) -> &[GridVar] {
        &self.vars
    }

    /// Returns an output variable by name.
    pub fn var(&self, name: &str) -> Option<&GridVar> {
        self.vars.iter().find(|v| v.name == name)
    }

    /// Returns the dataset's attribute store.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Returns a mutable reference to the attribute store.
    pub fn attrs_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.attrs
    }

    /// Returns the per-coordinate attribute stores (`anchor_year`,
    /// `i_interval`, `is_target`, `left_bound`, `right_bound`).
    pub fn coord_attrs(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.coord_attrs
    }

    pub(crate) fn coord_attrs_mut(&mut self) -> &mut BTreeMap<String, BTreeMap<String, String>> {
        &mut self.coord_attrs
    }
}

/// A resampling result, matching the shape of the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resampled {
    /// Result of resampling tabular input.
    Table(ResampledTable),
    /// Result of resampling gridded input.
    Grid(ResampledGrid),
}
