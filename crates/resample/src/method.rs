//! Per-bin reduction methods.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ResampleError;

/// A reduction applied to the samples falling within each interval.
///
/// The named variants mirror the usual array-library reductions; the `Nan*`
/// variants ignore NaN samples instead of propagating them. `Size` counts
/// the samples per bin and is handy for checking whether the input data is
/// of a high enough resolution for the calendar.
///
/// Arbitrary reductions can be injected with [`Reduction::custom`].
///
/// # Example
///
/// ```
/// use demeter_resample::Reduction;
///
/// let how: Reduction = "nanmean".parse().unwrap();
/// assert_eq!(how.apply(&[1.0, f64::NAN, 3.0]), 2.0);
///
/// let spread = Reduction::custom(|v| v.iter().sum::<f64>() / 2.0);
/// assert_eq!(spread.apply(&[1.0, 3.0]), 2.0);
/// ```
#[derive(Clone)]
pub enum Reduction {
    /// Arithmetic mean.
    Mean,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Median.
    Median,
    /// Population standard deviation.
    Std,
    /// Population variance.
    Var,
    /// Peak-to-peak range (max - min).
    Ptp,
    /// Mean ignoring NaN samples.
    NanMean,
    /// Median ignoring NaN samples.
    NanMedian,
    /// Population standard deviation ignoring NaN samples.
    NanStd,
    /// Population variance ignoring NaN samples.
    NanVar,
    /// Sum.
    Sum,
    /// Sum ignoring NaN samples.
    NanSum,
    /// Number of samples in the bin.
    Size,
    /// Number of nonzero samples in the bin.
    CountNonzero,
    /// An injectable one-argument reduction function.
    Custom(Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>),
}

impl Reduction {
    /// Wraps an arbitrary reduction function.
    pub fn custom(f: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Returns the method name as accepted by [`FromStr`], or `"custom"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Std => "std",
            Self::Var => "var",
            Self::Ptp => "ptp",
            Self::NanMean => "nanmean",
            Self::NanMedian => "nanmedian",
            Self::NanStd => "nanstd",
            Self::NanVar => "nanvar",
            Self::Sum => "sum",
            Self::NanSum => "nansum",
            Self::Size => "size",
            Self::CountNonzero => "count_nonzero",
            Self::Custom(_) => "custom",
        }
    }

    /// Reduces one bin of samples to a single value.
    ///
    /// Empty bins yield the NaN missing-value sentinel for every method:
    /// intervals without data resample to gaps, never to failures.
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Self::Mean => demeter_stats::mean(values),
            Self::Min => demeter_stats::min(values),
            Self::Max => demeter_stats::max(values),
            Self::Median => demeter_stats::median(values),
            Self::Std => demeter_stats::std(values),
            Self::Var => demeter_stats::var(values),
            Self::Ptp => demeter_stats::ptp(values),
            Self::NanMean => demeter_stats::nanmean(values),
            Self::NanMedian => demeter_stats::nanmedian(values),
            Self::NanStd => demeter_stats::nanstd(values),
            Self::NanVar => demeter_stats::nanvar(values),
            Self::Sum => demeter_stats::sum(values),
            Self::NanSum => demeter_stats::nansum(values),
            Self::Size => values.len() as f64,
            Self::CountNonzero => demeter_stats::count_nonzero(values),
            Self::Custom(f) => f(values),
        }
    }
}

impl fmt::Debug for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reduction({})", self.name())
    }
}

impl FromStr for Reduction {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = match s {
            "mean" => Self::Mean,
            "min" => Self::Min,
            "max" => Self::Max,
            "median" => Self::Median,
            "std" => Self::Std,
            "var" => Self::Var,
            "ptp" => Self::Ptp,
            "nanmean" => Self::NanMean,
            "nanmedian" => Self::NanMedian,
            "nanstd" => Self::NanStd,
            "nanvar" => Self::NanVar,
            "sum" => Self::Sum,
            "nansum" => Self::NanSum,
            "size" => Self::Size,
            "count_nonzero" => Self::CountNonzero,
            _ => {
                return Err(ResampleError::UnknownMethod {
                    name: s.to_string(),
                })
            }
        };
        Ok(method)
    }
}
