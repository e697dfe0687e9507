//! Student's independent two-sample t-test.
//!
//! Pooled-variance (equal-variance) form with a two-sided p-value, the
//! conventional default for comparing a column's mean before and after
//! cleaning. Deterministic; no resampling.

use crate::error::{CleaningError, Result};
use crate::types::TTestResult;
use statrs::distribution::{ContinuousCDF, StudentsT};

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Sample variance (ddof = 1). Assumes `xs.len() >= 2`.
fn var_sample(xs: &[f64], mean: f64) -> f64 {
    let n = xs.len();
    let ss: f64 = xs.iter().map(|v| (v - mean) * (v - mean)).sum();
    ss / ((n - 1) as f64)
}

/// Two-sided survival probability under the Student's-t distribution.
fn t_sf_two_sided(stat: f64, df: f64) -> f64 {
    // df >= 2 after the sample-size guard in students_t_test
    let dist = StudentsT::new(0.0, 1.0, df).unwrap();
    (2.0 * (1.0 - dist.cdf(stat.abs()))).clamp(0.0, 1.0)
}

/// Student's independent two-sample t-test of `a` against `b`.
///
/// # Errors
///
/// [`CleaningError::InsufficientData`] when either sample has fewer than two
/// observations, and [`CleaningError::ZeroVariance`] when the pooled variance
/// is zero (the statistic is undefined).
pub fn students_t_test(a: &[f64], b: &[f64]) -> Result<TTestResult> {
    for (values, group) in [(a, "first sample"), (b, "second sample")] {
        if values.len() < 2 {
            return Err(CleaningError::InsufficientData {
                group: group.to_string(),
                needed: 2,
                actual: values.len(),
            });
        }
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a = mean(a);
    let mean_b = mean(b);
    let var_a = var_sample(a, mean_a);
    let var_b = var_sample(b, mean_b);

    let df = n_a + n_b - 2.0;
    let pooled = ((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / df;
    let se = (pooled * (1.0 / n_a + 1.0 / n_b)).sqrt();
    if se == 0.0 {
        return Err(CleaningError::ZeroVariance);
    }

    let statistic = (mean_a - mean_b) / se;
    let p_value = t_sf_two_sided(statistic, df);

    Ok(TTestResult {
        statistic,
        p_value,
        df,
    })
}
