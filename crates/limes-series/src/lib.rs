#![deny(missing_docs)]
#![doc = "Evaluation of the alternating series sum (-1)^k / (2k + 1)^beta by step doubling, optionally accelerated through the Richardson tableau."]

/// Evaluation options.
pub mod config;
/// Series evaluation and reports.
pub mod evaluate;
/// Least-squares limit fitting.
pub mod fit;
/// Partial sums and the doubling loop.
pub mod partial;

pub use config::{AccelOrders, CapPolicy, SeriesMethod, SeriesOpts, MAX_FIT_POINTS, MAX_ITERS_LIMIT};
pub use evaluate::{evaluate_series, evaluate_series_with, SeriesReport};
pub use fit::least_squares_limit;
pub use partial::{doubling_sums, partial_sum, validate_beta, PartialSums};
