use limes_core::errors::{ErrorInfo, LimesError};
use serde::{Deserialize, Serialize};

/// Named rule producing the error order eliminated at each tableau column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OrderSchedule {
    /// Orders listed one per column.
    Explicit {
        /// Error orders in column order.
        orders: Vec<f64>,
    },
    /// The same order at every column.
    Uniform {
        /// Order repeated for every column.
        order: f64,
    },
    /// Orders `first, first + step, first + 2 * step, ...`.
    ///
    /// The trapezoid rule, for instance, uses `first = 2, step = 2`.
    Arithmetic {
        /// Order eliminated at the first column.
        first: f64,
        /// Increment between consecutive columns.
        step: f64,
    },
}

impl Default for OrderSchedule {
    fn default() -> Self {
        OrderSchedule::Uniform { order: 1.0 }
    }
}

impl OrderSchedule {
    /// Expands the schedule into `columns` orders, one per extrapolation column.
    pub fn resolve(&self, columns: usize) -> Result<Vec<f64>, LimesError> {
        match self {
            OrderSchedule::Explicit { orders } => {
                if orders.len() < columns {
                    return Err(LimesError::Shape(
                        ErrorInfo::new(
                            "schedule-too-short",
                            "explicit schedule lists fewer orders than tableau columns",
                        )
                        .with_context("columns", columns)
                        .with_context("orders", orders.len()),
                    ));
                }
                Ok(orders[..columns].to_vec())
            }
            OrderSchedule::Uniform { order } => Ok(vec![*order; columns]),
            OrderSchedule::Arithmetic { first, step } => Ok((0..columns)
                .map(|idx| first + idx as f64 * step)
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_schedule_counts_from_first() {
        let schedule = OrderSchedule::Arithmetic {
            first: 2.0,
            step: 2.0,
        };
        assert_eq!(schedule.resolve(3).unwrap(), vec![2.0, 4.0, 6.0]);
        assert!(schedule.resolve(0).unwrap().is_empty());
    }

    #[test]
    fn explicit_schedule_truncates_but_never_pads() {
        let schedule = OrderSchedule::Explicit {
            orders: vec![1.0, 2.0, 3.0],
        };
        assert_eq!(schedule.resolve(2).unwrap(), vec![1.0, 2.0]);
        assert_eq!(schedule.resolve(4).unwrap_err().code(), "schedule-too-short");
    }

    #[test]
    fn schedule_reads_tagged_json() {
        let schedule: OrderSchedule =
            serde_json::from_str(r#"{"type":"uniform","order":1.5}"#).unwrap();
        assert_eq!(schedule.resolve(2).unwrap(), vec![1.5, 1.5]);
    }
}
