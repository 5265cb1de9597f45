//! Statistical reduction primitives for calendar-based resampling.
//!
//! Every function maps a slice of samples to a single value. NaN handling
//! follows the usual array-library conventions: plain reductions propagate
//! NaN, the `nan*` variants ignore NaN samples. `std`/`var` use the
//! population (N) denominator, matching the reductions the resampler is
//! specified against.

/// Arithmetic mean. NaN for empty input; propagates NaN samples.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Minimum. NaN for empty input; propagates NaN samples.
pub fn min(data: &[f64]) -> f64 {
    if data.is_empty() || data.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    data.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Maximum. NaN for empty input; propagates NaN samples.
pub fn max(data: &[f64]) -> f64 {
    if data.is_empty() || data.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Median of unsorted input. NaN for empty input; propagates NaN samples.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() || data.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN filtered above"));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Population variance (N denominator). NaN for empty input.
pub fn var(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation. NaN for empty input.
pub fn std(data: &[f64]) -> f64 {
    var(data).sqrt()
}

/// Peak-to-peak range (max - min). NaN for empty input.
pub fn ptp(data: &[f64]) -> f64 {
    max(data) - min(data)
}

/// Sum. 0.0 for empty input; propagates NaN samples.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Number of samples different from zero (NaN counts as nonzero).
pub fn count_nonzero(data: &[f64]) -> f64 {
    data.iter().filter(|&&v| v != 0.0).count() as f64
}

/// Mean ignoring NaN samples. NaN when no finite samples remain.
pub fn nanmean(data: &[f64]) -> f64 {
    mean(&drop_nan(data))
}

/// Median ignoring NaN samples. NaN when no finite samples remain.
pub fn nanmedian(data: &[f64]) -> f64 {
    median(&drop_nan(data))
}

/// Population variance ignoring NaN samples.
pub fn nanvar(data: &[f64]) -> f64 {
    var(&drop_nan(data))
}

/// Population standard deviation ignoring NaN samples.
pub fn nanstd(data: &[f64]) -> f64 {
    std(&drop_nan(data))
}

/// Sum ignoring NaN samples. 0.0 when no samples remain.
pub fn nansum(data: &[f64]) -> f64 {
    sum(&drop_nan(data))
}

fn drop_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|v| !v.is_nan()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_mean_propagates_nan() {
        assert!(mean(&[1.0, f64::NAN, 3.0]).is_nan());
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, -1.0, 7.0, 2.0];
        assert_eq!(min(&data), -1.0);
        assert_eq!(max(&data), 7.0);
    }

    #[test]
    fn test_min_max_propagate_nan() {
        assert!(min(&[1.0, f64::NAN]).is_nan());
        assert!(max(&[1.0, f64::NAN]).is_nan());
        assert!(min(&[]).is_nan());
        assert!(max(&[]).is_nan());
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_median_nan() {
        assert!(median(&[1.0, f64::NAN, 3.0]).is_nan());
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_var_population() {
        // Population variance of [2,4,4,4,5,5,7,9] is exactly 4.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(var(&data), 4.0, epsilon = 1e-12);
        assert_relative_eq!(std(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_var_single_sample_is_zero() {
        assert_relative_eq!(var(&[5.0]), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ptp() {
        assert_relative_eq!(ptp(&[3.0, -1.0, 7.0]), 8.0, epsilon = 1e-12);
        assert!(ptp(&[]).is_nan());
    }

    #[test]
    fn test_sum() {
        assert_relative_eq!(sum(&[1.0, 2.0, 3.0]), 6.0, epsilon = 1e-12);
        assert_eq!(sum(&[]), 0.0);
        assert!(sum(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_count_nonzero() {
        assert_eq!(count_nonzero(&[0.0, 1.0, -2.0, 0.0, f64::NAN]), 3.0);
        assert_eq!(count_nonzero(&[]), 0.0);
    }

    #[test]
    fn test_nanmean() {
        assert_relative_eq!(nanmean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
        assert!(nanmean(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_nanmedian() {
        assert_relative_eq!(
            nanmedian(&[1.0, f64::NAN, 3.0, 2.0]),
            2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nanvar_nanstd() {
        let data = [2.0, f64::NAN, 4.0];
        assert_relative_eq!(nanvar(&data), 1.0, epsilon = 1e-12);
        assert_relative_eq!(nanstd(&data), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nansum() {
        assert_relative_eq!(nansum(&[1.0, f64::NAN, 3.0]), 4.0, epsilon = 1e-12);
        assert_eq!(nansum(&[f64::NAN]), 0.0);
    }
}
