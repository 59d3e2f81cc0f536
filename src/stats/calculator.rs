//! Statistics Calculator Module
//! Descriptive statistics, histograms, Welch's t-test and correlation.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Summary of one numeric sample, in the shape of pandas `describe()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for Describe {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// One histogram bar covering `[start, end)`; the last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Stateless statistics helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn describe(values: &[f64]) -> Describe {
        let n = values.len();
        if n == 0 {
            return Describe::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = Self::mean(values);
        let std = if n > 1 {
            Self::sample_variance(values, mean).sqrt()
        } else {
            f64::NAN
        };

        Describe {
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn sample_variance(values: &[f64], mean: f64) -> f64 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Split the value range into `bins` equal-width bins.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return vec![HistogramBin {
                start: min,
                end: max,
                count: values.len(),
            }];
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }

    /// Perform Welch's t-test (independent samples, unequal variance).
    ///
    /// Returns `(p_value, is_significant)`; the p-value is NaN when either
    /// sample has fewer than two values.
    pub fn perform_ttest(group_values: &[f64], control_values: &[f64]) -> (f64, bool) {
        let n1 = group_values.len() as f64;
        let n2 = control_values.len() as f64;

        if n1 < 2.0 || n2 < 2.0 {
            return (f64::NAN, false);
        }

        let mean1 = Self::mean(group_values);
        let mean2 = Self::mean(control_values);
        let var1 = Self::sample_variance(group_values, mean1);
        let var2 = Self::sample_variance(control_values, mean2);

        let se = (var1 / n1 + var2 / n2).sqrt();
        if se == 0.0 {
            return (1.0, false); // No variance difference
        }

        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1 + var2 / n2).powi(2);
        let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
        let df = df_num / df_denom;

        // Two-tailed p-value using t-distribution
        if let Ok(dist) = StudentsT::new(0.0, 1.0, df) {
            let p_value = 2.0 * (1.0 - dist.cdf(t.abs()));
            let is_significant = p_value <= SIGNIFICANCE_THRESHOLD;
            (p_value, is_significant)
        } else {
            (f64::NAN, false)
        }
    }

    /// Pearson correlation of paired samples.
    ///
    /// `None` for fewer than two pairs or when either side has no variance.
    pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return None;
        }
        let (xs, ys) = (&xs[..n], &ys[..n]);
        let mean_x = Self::mean(xs);
        let mean_y = Self::mean(ys);

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            cov += (x - mean_x) * (y - mean_y);
            var_x += (x - mean_x).powi(2);
            var_y += (y - mean_y).powi(2);
        }

        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }
        Some(cov / (var_x.sqrt() * var_y.sqrt()))
    }
}
