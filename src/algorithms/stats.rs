//! Scalar statistics over displacement and speed samples.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation. `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Removes values more than `n_sigma` standard deviations from the mean.
///
/// Mean and deviation are computed once over the whole input; the trim is a
/// single pass, never iterated to convergence. Both bounds are strict, so a
/// value sitting exactly on `mu ± n_sigma · sd` is removed. A zero deviation
/// means every value equals the mean and none of them is an outlier, so the
/// input passes through unchanged.
///
/// The output is always a subsequence of the input: no reordering, no new
/// values.
pub fn reject_outliers(values: &[f64], n_sigma: f64) -> Vec<f64> {
    let (Some(mu), Some(sd)) = (mean(values), population_std(values)) else {
        return Vec::new();
    };
    if sd == 0.0 {
        return values.to_vec();
    }

    let lower = mu - n_sigma * sd;
    let upper = mu + n_sigma * sd;
    values
        .iter()
        .copied()
        .filter(|x| lower < *x && *x < upper)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std(&[]), None);
    }

    #[test]
    fn rejects_values_beyond_n_sigma() {
        // mu = 22, sd ~ 39; only 100 falls outside mu +- 1 sd
        let kept = reject_outliers(&[1.0, 2.0, 3.0, 4.0, 100.0], 1.0);
        assert_eq!(kept, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn output_is_a_subsequence_within_original_bounds() {
        let input = [3.0, -1.0, 3.5, 40.0, 3.2, -35.0, 2.9];
        let mu = mean(&input).unwrap();
        let sd = population_std(&input).unwrap();

        let kept = reject_outliers(&input, 1.0);
        assert!(!kept.is_empty());
        for x in &kept {
            assert!(mu - sd < *x && *x < mu + sd);
        }

        // order preserved: every kept value appears in the input in sequence
        let mut cursor = input.iter();
        for x in &kept {
            assert!(cursor.any(|v| v == x));
        }
    }

    #[test]
    fn boundary_values_are_removed() {
        // mu = 5, sd = 5: both values land exactly on mu +- 1 sd
        let kept = reject_outliers(&[0.0, 10.0], 1.0);
        assert!(kept.is_empty());
    }

    #[test]
    fn zero_deviation_passes_everything() {
        let kept = reject_outliers(&[7.0, 7.0, 7.0], 2.0);
        assert_eq!(kept, vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(reject_outliers(&[], 2.0).is_empty());
    }
}
