use limes_core::LimesError;
use limes_series::{evaluate_series, evaluate_series_with, CapPolicy, SeriesMethod, SeriesOpts};

#[test]
fn cap_is_reported_by_default() {
    let opts = SeriesOpts {
        max_iters: 8,
        ..SeriesOpts::default()
    };
    let report = evaluate_series_with(1.0, &opts).expect("series");
    assert!(!report.converged);
    assert_eq!(report.iterations, 8);
    assert_eq!(report.terms, 256);
    assert!(report.last_delta.expect("delta") > opts.tolerance);
    assert!(!report.accelerated);
}

#[test]
fn cap_fails_when_requested() {
    let opts = SeriesOpts {
        max_iters: 8,
        on_cap: CapPolicy::Fail,
        ..SeriesOpts::default()
    };
    let err = evaluate_series_with(0.5, &opts).unwrap_err();
    assert!(matches!(err, LimesError::Convergence(_)));
    assert_eq!(err.code(), "iteration-cap");
    assert!(err.info().context.contains_key("last_estimate"));
    assert!(err.info().context.contains_key("last_delta"));
}

#[test]
fn loose_tolerance_converges_naturally() {
    let opts = SeriesOpts {
        max_iters: 25,
        tolerance: 1e-3,
        on_cap: CapPolicy::Fail,
        method: SeriesMethod::Direct,
    };
    let report = evaluate_series_with(1.0, &opts).expect("series");
    assert!(report.converged);
    assert!(report.iterations < 25);
    assert_eq!(report.terms, 1_u64 << report.iterations);
}

#[test]
fn single_partial_sum_is_returned_verbatim() {
    let opts = SeriesOpts {
        max_iters: 1,
        method: SeriesMethod::richardson(),
        ..SeriesOpts::default()
    };
    let report = evaluate_series_with(1.0, &opts).expect("series");
    assert!(!report.accelerated);
    assert_eq!(report.partial_sums.len(), 1);
    assert!((report.value - (1.0 - 1.0 / 3.0)).abs() < 1e-15);
}

#[test]
fn beta_outside_unit_interval_is_rejected() {
    for beta in [0.0, -1.0, 1.0001, f64::INFINITY, f64::NAN] {
        let err = evaluate_series(beta, false).unwrap_err();
        assert!(matches!(err, LimesError::Domain(_)));
        assert_eq!(err.code(), "beta-out-of-range");
    }
}

#[test]
fn invalid_options_are_config_errors() {
    let zero_iters = SeriesOpts {
        max_iters: 0,
        ..SeriesOpts::default()
    };
    assert_eq!(
        evaluate_series_with(1.0, &zero_iters).unwrap_err().code(),
        "invalid-max-iters"
    );

    let negative_tol = SeriesOpts {
        tolerance: -1.0,
        ..SeriesOpts::default()
    };
    assert_eq!(
        evaluate_series_with(1.0, &negative_tol).unwrap_err().code(),
        "invalid-tolerance"
    );

    let tiny_window = SeriesOpts {
        method: SeriesMethod::Richardson {
            orders: Default::default(),
            window: Some(1),
        },
        ..SeriesOpts::default()
    };
    let err = evaluate_series_with(1.0, &tiny_window).unwrap_err();
    assert!(matches!(err, LimesError::Config(_)));
    assert_eq!(err.code(), "invalid-window");
}
