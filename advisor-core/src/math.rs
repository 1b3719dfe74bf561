//! Numeric primitives shared by every indicator.
//!
//! Pure functions over `&[f64]`, no state, no I/O. Degenerate inputs
//! (empty slices, zero variance, mismatched lengths) return defined values
//! instead of NaN — each caller's division-by-zero policy lives here or in
//! the indicator itself, never in IEEE propagation.

/// Trailing mean over a fixed window.
///
/// Output length is `values.len() - window + 1`; the first element covers
/// `values[0..window]`. Empty when the input is shorter than the window
/// (or the window is zero).
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - window + 1);
    for i in (window - 1)..values.len() {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        out.push(sum / window as f64);
    }
    out
}

/// Exponential smoothing with `alpha = 2 / (window + 1)`, seeded with the
/// first value.
///
/// Output length equals input length — there is no warm-up truncation.
/// This asymmetry with [`rolling_mean`] is intentional: the MACD lines are
/// element-wise differences of smoothed series and rely on full-length
/// output for alignment.
pub fn exponential_smoothing(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() || window == 0 {
        return Vec::new();
    }
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);
    for &v in &values[1..] {
        // value*alpha + prev*(1-alpha), in the form that is exact on flat
        // input (a constant series must never drift by an ulp and fake a
        // cross downstream).
        prev += alpha * (v - prev);
        out.push(prev);
    }
    out
}

/// Arithmetic mean. 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N). 0.0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    std_dev_about(values, mean(values))
}

/// Population standard deviation about a precomputed mean.
pub fn std_dev_about(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient.
///
/// Returns 0.0 on length mismatch, empty input, or zero variance in either
/// series. Never fails.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return 0.0;
    }
    cov / (vx.sqrt() * vy.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn rolling_mean_window_3() {
        let out = rolling_mean(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(out.len(), 3);
        assert_approx(out[0], 11.0);
        assert_approx(out[1], 12.0);
        assert_approx(out[2], 13.0);
    }

    #[test]
    fn rolling_mean_window_1_is_identity() {
        let out = rolling_mean(&[5.0, 6.0, 7.0], 1);
        assert_eq!(out, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn rolling_mean_short_input_is_empty() {
        assert!(rolling_mean(&[1.0, 2.0], 3).is_empty());
        assert!(rolling_mean(&[], 3).is_empty());
        assert!(rolling_mean(&[1.0], 0).is_empty());
    }

    #[test]
    fn smoothing_seeds_with_first_value() {
        // alpha = 2/(3+1) = 0.5
        // out[0] = 10, out[1] = 0.5*12 + 0.5*10 = 11, out[2] = 0.5*14 + 0.5*11 = 12.5
        let out = exponential_smoothing(&[10.0, 12.0, 14.0], 3);
        assert_eq!(out.len(), 3);
        assert_approx(out[0], 10.0);
        assert_approx(out[1], 11.0);
        assert_approx(out[2], 12.5);
    }

    #[test]
    fn smoothing_output_length_equals_input_length() {
        // No warm-up truncation, unlike rolling_mean.
        let values: Vec<f64> = (0..7).map(|i| i as f64).collect();
        assert_eq!(exponential_smoothing(&values, 5).len(), 7);
    }

    #[test]
    fn smoothing_flat_series_stays_flat() {
        let out = exponential_smoothing(&[42.0; 20], 5);
        for v in out {
            assert_approx(v, 42.0);
        }
    }

    #[test]
    fn smoothing_empty() {
        assert!(exponential_smoothing(&[], 5).is_empty());
    }

    #[test]
    fn std_dev_is_population() {
        // values 2,4,4,4,5,5,7,9: mean 5, population variance 4, stddev 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_approx(std_dev(&values), 2.0);
    }

    #[test]
    fn std_dev_degenerate() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_approx(std_dev(&[3.0]), 0.0);
        assert_approx(std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn correlation_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert_approx(correlation(&x, &y), 1.0);
    }

    #[test]
    fn correlation_perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert_approx(correlation(&x, &y), -1.0);
    }

    #[test]
    fn correlation_zero_variance_is_zero() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(correlation(&x, &y), 0.0);
        assert_eq!(correlation(&y, &x), 0.0);
    }

    #[test]
    fn correlation_length_mismatch_is_zero() {
        assert_eq!(correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(correlation(&[], &[]), 0.0);
    }
}
