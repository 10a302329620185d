use limes_series::{doubling_sums, least_squares_limit, partial_sum};
use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn even_partial_sums_increase_towards_the_limit(beta in 0.05f64..=1.0) {
        let run = doubling_sums(beta, 8, 1e-300);
        prop_assert_eq!(run.sums.len(), 8);
        for pair in run.sums.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
        // An odd number of terms overshoots the limit from above.
        let upper = partial_sum(beta, 257);
        prop_assert!(run.sums.iter().all(|sum| *sum < upper));
    }

    #[test]
    fn exact_tail_models_are_fitted(
        limit in -5.0f64..5.0,
        beta in 0.1f64..=1.0,
        coeffs in vec(-5.0f64..5.0, 1..4),
    ) {
        let points = coeffs.len() + 3;
        let sums: Vec<f64> = (1..=points as i32)
            .map(|k| {
                let h = 0.5_f64.powi(k);
                limit
                    + coeffs
                        .iter()
                        .enumerate()
                        .map(|(j, c)| c * h.powf(beta + j as f64))
                        .sum::<f64>()
            })
            .collect();
        let fitted = least_squares_limit(&sums, beta, coeffs.len() + 1).unwrap();
        prop_assert!((fitted - limit).abs() < 1e-8);
    }
}
