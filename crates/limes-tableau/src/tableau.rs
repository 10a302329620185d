use limes_core::errors::{ErrorInfo, LimesError};
use serde::Serialize;

/// Ratio between successive step sizes; samples are taken at `h_k = 2^-k`.
pub const STEP_RATIO: f64 = 2.0;

/// Checks the sample and order slices before any column is built.
pub fn validate_inputs(samples: &[f64], orders: &[f64]) -> Result<(), LimesError> {
    if samples.is_empty() {
        return Err(LimesError::Shape(ErrorInfo::new(
            "empty-samples",
            "extrapolation requires at least one sample",
        )));
    }
    if orders.len() != samples.len() - 1 {
        return Err(LimesError::Shape(
            ErrorInfo::new(
                "order-count-mismatch",
                "expected exactly one error order per extrapolation column",
            )
            .with_context("samples", samples.len())
            .with_context("orders", orders.len())
            .with_hint("supply samples.len() - 1 orders"),
        ));
    }
    if let Some(index) = samples.iter().position(|value| !value.is_finite()) {
        return Err(LimesError::Domain(
            ErrorInfo::new("non-finite-sample", "samples must be finite")
                .with_context("index", index)
                .with_context("value", samples[index]),
        ));
    }
    for (index, &order) in orders.iter().enumerate() {
        if !order.is_finite() {
            return Err(LimesError::Domain(
                ErrorInfo::new("non-finite-order", "error orders must be finite")
                    .with_context("column", index + 1)
                    .with_context("order", order),
            ));
        }
        if order == 0.0 {
            return Err(LimesError::Domain(
                ErrorInfo::new(
                    "zero-order",
                    "an error order of zero makes the elimination factor equal to one",
                )
                .with_context("column", index + 1)
                .with_hint("orders name the power of h removed at each column and must be positive"),
            ));
        }
        if order < 0.0 {
            return Err(LimesError::Domain(
                ErrorInfo::new("non-positive-order", "error orders must be positive")
                    .with_context("column", index + 1)
                    .with_context("order", order),
            ));
        }
    }
    Ok(())
}

/// Triangular Richardson table built from step-halving samples.
///
/// Entries are stored row-major in a flat `n * n` arena; only `(row, col)`
/// pairs with `row + col < n` are populated. Column 0 holds the samples and
/// column `j` has the error orders `orders[0..j]` eliminated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichardsonTableau {
    size: usize,
    cells: Vec<f64>,
    orders: Vec<f64>,
}

impl RichardsonTableau {
    /// Builds the full table for `samples` ordered from the largest step to the smallest.
    pub fn build(samples: &[f64], orders: &[f64]) -> Result<Self, LimesError> {
        validate_inputs(samples, orders)?;
        let size = samples.len();
        let mut cells = vec![0.0; size * size];
        for (row, &value) in samples.iter().enumerate() {
            cells[row * size] = value;
        }
        for col in 1..size {
            let factor = STEP_RATIO.powf(orders[col - 1]);
            let denominator = factor - 1.0;
            if denominator == 0.0 || !denominator.is_finite() {
                // Tiny orders round 2^p to exactly one, huge ones overflow.
                return Err(LimesError::Domain(
                    ErrorInfo::new(
                        "degenerate-factor",
                        "elimination factor 2^order is not usable in double precision",
                    )
                    .with_context("column", col)
                    .with_context("order", orders[col - 1]),
                ));
            }
            for row in 0..size - col {
                let coarse = cells[row * size + col - 1];
                let fine = cells[(row + 1) * size + col - 1];
                let value = (factor * fine - coarse) / denominator;
                if !value.is_finite() {
                    return Err(LimesError::Domain(
                        ErrorInfo::new(
                            "non-finite-entry",
                            "extrapolated entry overflowed double precision",
                        )
                        .with_context("row", row)
                        .with_context("column", col)
                        .with_context("order", orders[col - 1]),
                    ));
                }
                cells[row * size + col] = value;
            }
        }
        Ok(Self {
            size,
            cells,
            orders: orders.to_vec(),
        })
    }

    /// Number of samples the table was built from.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: a built table holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Error orders eliminated column by column.
    pub fn orders(&self) -> &[f64] {
        &self.orders
    }

    /// Returns entry `(row, col)` when it lies inside the triangle.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row + col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Populated entries of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> Vec<f64> {
        if col >= self.size {
            return Vec::new();
        }
        (0..self.size - col)
            .map(|row| self.cells[row * self.size + col])
            .collect()
    }

    /// Top row of the table: estimates with 0, 1, ..., n-1 orders eliminated.
    pub fn diagonal(&self) -> Vec<f64> {
        self.cells[..self.size].to_vec()
    }

    /// The fully extrapolated estimate `T[0][n-1]`.
    pub fn apex(&self) -> f64 {
        self.cells[self.size - 1]
    }

    /// Distance between the two most extrapolated estimates of the top row.
    pub fn error_estimate(&self) -> Option<f64> {
        if self.size < 2 {
            return None;
        }
        Some((self.cells[self.size - 1] - self.cells[self.size - 2]).abs())
    }
}

/// Extrapolates the limit of `samples` taken at `h = 2^-1, ..., 2^-n`.
///
/// `orders[j - 1]` is the power of `h` eliminated at column `j`; the result
/// carries an error of the next, unlisted order. A single sample is returned
/// unchanged.
pub fn extrapolate(samples: &[f64], orders: &[f64]) -> Result<f64, LimesError> {
    RichardsonTableau::build(samples, orders).map(|tableau| tableau.apex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_layout_matches_recurrence() {
        let tableau = RichardsonTableau::build(&[1.0, 2.0, 4.0], &[1.0, 2.0]).unwrap();
        assert_eq!(tableau.column(0), vec![1.0, 2.0, 4.0]);
        assert_eq!(tableau.column(1), vec![3.0, 6.0]);
        assert_eq!(tableau.get(0, 2), Some(7.0));
        assert_eq!(tableau.get(1, 2), None);
        assert!(tableau.column(3).is_empty());
    }

    #[test]
    fn single_sample_has_no_error_estimate() {
        let tableau = RichardsonTableau::build(&[0.25], &[]).unwrap();
        assert_eq!(tableau.apex(), 0.25);
        assert_eq!(tableau.error_estimate(), None);
        assert_eq!(tableau.diagonal(), vec![0.25]);
    }

    #[test]
    fn tiny_order_is_degenerate() {
        let err = RichardsonTableau::build(&[1.0, 2.0], &[1e-300]).unwrap_err();
        assert_eq!(err.code(), "degenerate-factor");
    }
}
