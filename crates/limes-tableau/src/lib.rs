#![deny(missing_docs)]
#![doc = "Richardson extrapolation over samples computed at step sizes h = 2^-1, ..., 2^-n."]

/// Named error-order schedules.
pub mod schedule;
/// Hashed extrapolation reports.
pub mod report;
/// Triangular tableau construction.
pub mod tableau;

pub use report::{extrapolate_report, extrapolate_scheduled, ExtrapolationReport};
pub use schedule::OrderSchedule;
pub use tableau::{extrapolate, validate_inputs, RichardsonTableau, STEP_RATIO};
