//! Percentile calculations for the statistical tools.
//!
//! Uses linear interpolation between closest ranks: for sorted values
//! `v[0..n-1]` and percentile `p` in `[0,1]`, the index is `k = (n-1)*p` and
//! the result interpolates between `v[floor(k)]` and `v[ceil(k)]`. The p=0.5
//! case reduces to the textbook median (average of the two middle elements
//! for even n).

/// Linear-interpolation percentile over a pre-sorted ascending slice.
///
/// Returns `None` for an empty population. `p` is clamped to `[0,1]`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let k = (sorted.len() - 1) as f64 * p;
    let lo = k.floor() as usize;
    let hi = k.ceil() as usize;
    let frac = k - k.floor();

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Five-number salary summary derived from one sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Computes min/quartiles/max over an unsorted population.
///
/// Returns `None` for an empty population; callers turn that into a
/// structured error value, never a computed zero.
pub fn distribution(values: &[i64]) -> Option<Distribution> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(f64::total_cmp);

    Some(Distribution {
        min: sorted[0],
        q1: percentile_sorted(&sorted, 0.25)?,
        median: percentile_sorted(&sorted, 0.5)?,
        q3: percentile_sorted(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn median_of_odd_population_is_middle_element() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(percentile_sorted(&sorted, 0.5), Some(20.0));
    }

    #[test]
    fn median_of_even_population_averages_middle_pair() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.5), Some(25.0));
    }

    #[test]
    fn endpoints_are_min_and_max() {
        let sorted = [1.0, 5.0, 9.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&sorted, 1.0), Some(9.0));
    }

    #[test]
    fn quartiles_interpolate() {
        // k = 3 * 0.25 = 0.75 -> 10 + (20-10)*0.75 = 17.5
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_sorted(&sorted, 0.25), Some(17.5));
        assert_eq!(percentile_sorted(&sorted, 0.75), Some(32.5));
    }

    #[test]
    fn single_element_population() {
        let sorted = [42.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), Some(42.0));
        assert_eq!(percentile_sorted(&sorted, 0.5), Some(42.0));
        assert_eq!(percentile_sorted(&sorted, 1.0), Some(42.0));
    }

    #[test]
    fn empty_population_yields_none() {
        assert_eq!(percentile_sorted(&[], 0.5), None);
        assert_eq!(distribution(&[]), None);
    }

    #[test]
    fn distribution_of_unsorted_values() {
        let d = distribution(&[30, 10, 40, 20]).unwrap();
        assert_eq!(d.min, 10.0);
        assert_eq!(d.median, 25.0);
        assert_eq!(d.max, 40.0);
    }

    #[test]
    fn out_of_range_p_is_clamped() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(percentile_sorted(&sorted, -0.5), Some(1.0));
        assert_eq!(percentile_sorted(&sorted, 1.5), Some(3.0));
    }

    proptest! {
        // The interpolated median must match the textbook definition for any
        // non-empty integer population.
        #[test]
        fn median_matches_textbook_definition(mut values in prop::collection::vec(-10_000i64..10_000, 1..50)) {
            values.sort_unstable();
            let sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            let n = sorted.len();
            let expected = if n % 2 == 1 {
                sorted[n / 2]
            } else {
                (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
            };
            prop_assert_eq!(percentile_sorted(&sorted, 0.5), Some(expected));
        }

        // Percentiles are monotone in p.
        #[test]
        fn percentile_is_monotone(mut values in prop::collection::vec(-1_000i64..1_000, 1..30),
                                  p1 in 0.0f64..1.0, p2 in 0.0f64..1.0) {
            values.sort_unstable();
            let sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let a = percentile_sorted(&sorted, lo).unwrap();
            let b = percentile_sorted(&sorted, hi).unwrap();
            prop_assert!(a <= b);
        }
    }
}
