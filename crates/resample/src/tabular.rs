//! Resampling of tabular input.

use demeter_calendar::{Bin, Calendar};

use crate::bins::{containment, coverage, warn_coverage};
use crate::error::ResampleError;
use crate::input::{Column, Tabular};
use crate::method::Reduction;
use crate::output::ResampledTable;

/// Bins a table's rows into the calendar's intervals and reduces each bin
/// per column. Preconditions are checked by the caller.
pub(crate) fn resample_tabular_impl(
    calendar: &Calendar,
    data: &Tabular,
    how: &Reduction,
) -> Result<ResampledTable, ResampleError> {
    let intervals = calendar.get_intervals()?;
    let bins: Vec<Bin> = intervals.flat().collect();
    let members = containment(&bins, data.time());
    warn_coverage(&coverage(&members));

    let columns = data
        .columns()
        .iter()
        .map(|column| {
            let values = members
                .iter()
                .map(|indices| {
                    let samples: Vec<f64> =
                        indices.iter().map(|&i| column.values[i]).collect();
                    how.apply(&samples)
                })
                .collect();
            Column::new(column.name.clone(), values)
        })
        .collect();

    Ok(ResampledTable::new(&bins, columns))
}
