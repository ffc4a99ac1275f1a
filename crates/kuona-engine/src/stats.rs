//! Descriptive statistics over `f64` slices
//!
//! Every helper returns `None` for inputs where the statistic is undefined
//! instead of a sentinel value.

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`)
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Pearson product-moment correlation
///
/// `None` when the series differ in length, have fewer than two points, either
/// series is constant, or the result is not a finite number.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    // the mean of a constant series can round away from its value
    if is_constant(x) || is_constant(y) {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.split_first().is_none_or(|(first, rest)| rest.iter().all(|v| v == first))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0]), Some(2.0));
        assert!((mean(&[1.0, 2.0, 6.0]).unwrap() - 3.0).abs() < EPS);
    }

    #[test]
    fn test_population_std() {
        assert_eq!(population_std(&[]), None);
        assert_eq!(population_std(&[5.0]), Some(0.0));
        // values 2,4,4,4,5,5,7,9 have population std 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std(&values).unwrap() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_correlation_perfect_linear() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [0.01, 0.03, 0.05, 0.07];
        assert!((pearson_correlation(&x, &y).unwrap() - 1.0).abs() < 1e-9);

        let y_neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert!((pearson_correlation(&x, &y_neg).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_symmetric() {
        let a = [0.1, -0.3, 0.25, 0.0, 0.7];
        let b = [0.02, -0.01, 0.015, 0.03, -0.02];
        let ab = pearson_correlation(&a, &b).unwrap();
        let ba = pearson_correlation(&b, &a).unwrap();
        assert!((ab - ba).abs() < EPS);
        assert!((-1.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_correlation_degenerate_inputs() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), None);
        assert_eq!(pearson_correlation(&[], &[]), None);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(pearson_correlation(&[0.5, 0.5, 0.5], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson_correlation(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_correlation_constant_series_with_inexact_mean() {
        let returns = [0.0, 0.01, 0.02, 0.03, 0.05, -0.01, 0.04, 0.02, 0.0, 0.06, 0.01];
        for value in [0.1, 0.2, 0.7, -0.3, 0.15, 1.0 / 3.0] {
            for n in 2..=returns.len() {
                let constant = vec![value; n];
                assert_eq!(pearson_correlation(&constant, &returns[..n]), None, "{value} x {n}");
                assert_eq!(pearson_correlation(&returns[..n], &constant), None, "{value} x {n}");
            }
        }
    }

    #[test]
    fn test_correlation_non_finite_is_none() {
        assert_eq!(pearson_correlation(&[1.0, f64::NAN], &[1.0, 2.0]), None);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[f64::INFINITY, 1.0]), None);
    }
}
