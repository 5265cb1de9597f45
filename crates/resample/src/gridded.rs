//! Resampling of gridded input.

use demeter_calendar::{Bin, Calendar};
use ndarray::{Array2, ArrayD, Axis};
use rayon::prelude::*;

use crate::bins::{containment, coverage, warn_coverage};
use crate::error::ResampleError;
use crate::input::{GridVar, Gridded};
use crate::method::Reduction;
use crate::output::ResampledGrid;

/// Bins a gridded dataset's time axis into the calendar's intervals and
/// reduces every time-dependent variable along it. Variables without a time
/// dimension pass through unchanged. Preconditions are checked by the
/// caller.
///
/// The per-bin reductions are independent and run in parallel; the output
/// ordering is fixed by the interval table (anchor years descending,
/// interval indices ascending), not by execution order.
pub(crate) fn resample_gridded_impl(
    calendar: &Calendar,
    data: &Gridded,
    how: &Reduction,
) -> Result<ResampledGrid, ResampleError> {
    let intervals = calendar.get_intervals()?;
    let bins: Vec<Bin> = intervals.flat().collect();
    let members = containment(&bins, data.time());
    warn_coverage(&coverage(&members));

    let n_years = intervals.n_years();
    let n_intervals = intervals.n_intervals();

    let mut vars = Vec::with_capacity(data.vars().len());
    for var in data.vars() {
        match var.time_axis() {
            Some(axis) => vars.push(reduce_var(var, axis, &members, how, n_years, n_intervals)),
            None => vars.push(var.clone()),
        }
    }

    let mut left_bound = Array2::zeros((n_years, n_intervals));
    let mut right_bound = Array2::zeros((n_years, n_intervals));
    for (k, bin) in bins.iter().enumerate() {
        let (row, col) = (k / n_intervals, k % n_intervals);
        left_bound[[row, col]] = bin.span.left().and_utc().timestamp();
        right_bound[[row, col]] = bin.span.right().and_utc().timestamp();
    }

    Ok(ResampledGrid::new(
        intervals.anchor_years().to_vec(),
        intervals.indices().to_vec(),
        left_bound,
        right_bound,
        vars,
        data.attrs().clone(),
    ))
}

/// Reduces one variable over every bin, replacing its time axis with
/// leading `(anchor_year, i_interval)` dimensions.
fn reduce_var(
    var: &GridVar,
    time_axis: usize,
    members: &[Vec<usize>],
    how: &Reduction,
    n_years: usize,
    n_intervals: usize,
) -> GridVar {
    let reduced: Vec<ArrayD<f64>> = members
        .par_iter()
        .map(|indices| {
            let subset = var.values.select(Axis(time_axis), indices);
            subset.map_axis(Axis(time_axis), |lane| {
                let samples: Vec<f64> = lane.iter().copied().collect();
                how.apply(&samples)
            })
        })
        .collect();

    let views: Vec<_> = reduced.iter().map(ArrayD::view).collect();
    let stacked =
        ndarray::stack(Axis(0), &views).expect("every bin reduces to the same shape");
    let mut shape = vec![n_years, n_intervals];
    shape.extend(&stacked.shape()[1..]);
    let values = stacked
        .into_shape_with_order(shape)
        .expect("bin count equals n_years * n_intervals");

    let mut dims = vec!["anchor_year".to_string(), "i_interval".to_string()];
    dims.extend(var.dims.iter().filter(|d| *d != "time").cloned());
    GridVar {
        name: var.name.clone(),
        dims,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
    use demeter_calendar::Role;
    use ndarray::IxDyn;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn daily_axis(from: NaiveDateTime, n: u64) -> Vec<NaiveDateTime> {
        (0..n).map(|i| from + Days::new(i)).collect()
    }

    fn small_calendar() -> Calendar {
        let mut cal = Calendar::new("12-31").unwrap();
        cal.add_intervals(Role::Target, "20d", 1).unwrap();
        cal.add_intervals(Role::Precursor, "10d", 1).unwrap();
        cal.map_years(2021, 2021).unwrap();
        cal
    }

    #[test]
    fn time_axis_becomes_year_and_interval_dims() {
        let cal = small_calendar();
        let time = daily_axis(ts(2021, 12, 11), 60);
        let values = ArrayD::from_shape_fn(IxDyn(&[60, 3]), |idx| idx[1] as f64);
        let grid = Gridded::new(
            time,
            vec![GridVar::new("t2m", &["time", "lat"], values)],
        )
        .unwrap();

        let result = resample_gridded_impl(&cal, &grid, &Reduction::Mean).unwrap();
        let var = result.var("t2m").unwrap();
        assert_eq!(var.dims, ["anchor_year", "i_interval", "lat"]);
        assert_eq!(var.values.shape(), &[1, 2, 3]);
        // Values are constant along time, so every bin holds its latitude's
        // constant.
        for year in 0..1 {
            for interval in 0..2 {
                for lat in 0..3 {
                    assert_eq!(var.values[[year, interval, lat]], lat as f64);
                }
            }
        }
    }

    #[test]
    fn trailing_time_axis() {
        let cal = small_calendar();
        let time = daily_axis(ts(2021, 12, 11), 60);
        let values = ArrayD::from_shape_fn(IxDyn(&[2, 60]), |idx| idx[0] as f64);
        let grid = Gridded::new(
            time,
            vec![GridVar::new("t2m", &["lat", "time"], values)],
        )
        .unwrap();

        let result = resample_gridded_impl(&cal, &grid, &Reduction::Mean).unwrap();
        let var = result.var("t2m").unwrap();
        assert_eq!(var.dims, ["anchor_year", "i_interval", "lat"]);
        assert_eq!(var.values.shape(), &[1, 2, 2]);
        assert_eq!(var.values[[0, 0, 1]], 1.0);
    }

    #[test]
    fn passthrough_var_untouched() {
        let cal = small_calendar();
        let time = daily_axis(ts(2021, 12, 11), 60);
        let elevation = ArrayD::from_shape_vec(IxDyn(&[2]), vec![120.0, 340.0]).unwrap();
        let grid = Gridded::new(
            time,
            vec![GridVar::new("elevation", &["lat"], elevation.clone())],
        )
        .unwrap();

        let result = resample_gridded_impl(&cal, &grid, &Reduction::Mean).unwrap();
        let var = result.var("elevation").unwrap();
        assert_eq!(var.dims, ["lat"]);
        assert_eq!(var.values, elevation);
    }

    #[test]
    fn bounds_are_epoch_seconds_of_span_edges() {
        let cal = small_calendar();
        let time = daily_axis(ts(2021, 12, 11), 60);
        let grid = Gridded::new(time, vec![]).unwrap();

        let result = resample_gridded_impl(&cal, &grid, &Reduction::Mean).unwrap();
        assert_eq!(
            result.left_bound()[[0, 0]],
            ts(2021, 12, 21).and_utc().timestamp()
        );
        assert_eq!(
            result.right_bound()[[0, 1]],
            ts(2022, 1, 20).and_utc().timestamp()
        );
    }
}
