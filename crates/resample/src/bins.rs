//! Interval bins and timestamp containment.

use chrono::NaiveDateTime;
use demeter_calendar::Bin;
use tracing::warn;

/// For each bin, the indices of the timestamps it contains.
///
/// Containment follows the bins' half-open `[left, right)` semantics: a
/// sample sitting exactly on a shared boundary belongs to the later bin
/// only.
pub(crate) fn containment(bins: &[Bin], time: &[NaiveDateTime]) -> Vec<Vec<usize>> {
    bins.iter()
        .map(|bin| {
            time.iter()
                .enumerate()
                .filter(|(_, &t)| bin.span.contains(t))
                .map(|(i, _)| i)
                .collect()
        })
        .collect()
}

/// Per-bin sample counts that indicate statistically weak aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Coverage {
    /// Bins without any contributing sample (resample to NaN).
    pub n_empty: usize,
    /// Bins with exactly one contributing sample.
    pub n_single: usize,
}

pub(crate) fn coverage(members: &[Vec<usize>]) -> Coverage {
    Coverage {
        n_empty: members.iter().filter(|m| m.is_empty()).count(),
        n_single: members.iter().filter(|m| m.len() == 1).count(),
    }
}

/// Reports data-quality problems without failing: the caller still receives
/// a complete result, with gaps marked by NaN.
pub(crate) fn warn_coverage(cov: &Coverage) {
    if cov.n_single > 0 {
        warn!(
            n_single = cov.n_single,
            "some intervals contain only a single data point; this risks aliasing \
             or incorrect resampling. Make the calendar's intervals larger, or use \
             data of a higher time resolution"
        );
    } else if cov.n_empty > 0 {
        warn!(
            n_empty = cov.n_empty,
            "the input data does not fully cover the calendar's intervals; \
             intervals without available data will contain NaN values"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use demeter_calendar::DateSpan;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn bin(i: i32, from: NaiveDateTime, to: NaiveDateTime) -> Bin {
        Bin {
            anchor_year: 2020,
            i_interval: i,
            span: DateSpan::new(from, to),
        }
    }

    #[test]
    fn containment_half_open() {
        let bins = [
            bin(-1, ts(2020, 1, 1), ts(2020, 1, 11)),
            bin(1, ts(2020, 1, 11), ts(2020, 1, 21)),
        ];
        let time = [ts(2020, 1, 1), ts(2020, 1, 11), ts(2020, 1, 20), ts(2020, 1, 21)];
        let members = containment(&bins, &time);
        // The boundary sample (Jan 11) belongs to the later bin only; the
        // right bound (Jan 21) belongs to neither.
        assert_eq!(members[0], vec![0]);
        assert_eq!(members[1], vec![1, 2]);
    }

    #[test]
    fn containment_empty_bin() {
        let bins = [bin(1, ts(2021, 1, 1), ts(2021, 2, 1))];
        let time = [ts(2020, 1, 1)];
        assert_eq!(containment(&bins, &time), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn coverage_counts() {
        let members = vec![vec![], vec![1], vec![1, 2], vec![]];
        let cov = coverage(&members);
        assert_eq!(cov.n_empty, 2);
        assert_eq!(cov.n_single, 1);
    }

    #[test]
    fn coverage_clean() {
        let members = vec![vec![0, 1], vec![2, 3]];
        let cov = coverage(&members);
        assert_eq!(cov, Coverage { n_empty: 0, n_single: 0 });
    }
}
