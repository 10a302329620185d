use limes_core::errors::{ErrorInfo, LimesError};
use nalgebra::{DMatrix, DVector};

/// Relative size below which a diagonal entry of `R` marks the design as rank deficient.
const RANK_TOLERANCE: f64 = f64::EPSILON;

fn fit_error(code: &str, message: impl Into<String>) -> LimesError {
    LimesError::Singular(ErrorInfo::new(code, message))
}

/// Fits `S_k = A + sum_{j=1}^{terms-1} c_j h_k^(beta + j - 1)` with `h_k = 2^-(k+1)`
/// to the leading `sums` and returns the limit `A`.
///
/// Columns are scaled to unit norm and the system is solved through a thin
/// Householder QR factorisation. The geometric step sizes make the design
/// badly conditioned as a whole while the limit coefficient stays well
/// determined, so no singular-value truncation is applied.
pub fn least_squares_limit(sums: &[f64], beta: f64, terms: usize) -> Result<f64, LimesError> {
    let rows = sums.len();
    if rows == 0 || terms == 0 || terms > rows {
        return Err(LimesError::Shape(
            ErrorInfo::new(
                "fit-shape",
                "least-squares fit needs at least as many partial sums as model terms",
            )
            .with_context("points", rows)
            .with_context("terms", terms),
        ));
    }

    let mut design = DMatrix::<f64>::zeros(rows, terms);
    for row in 0..rows {
        let h = 0.5_f64.powi(row as i32 + 1);
        design[(row, 0)] = 1.0;
        for col in 1..terms {
            design[(row, col)] = h.powf(beta + col as f64 - 1.0);
        }
    }
    let mut scales: Vec<f64> = Vec::with_capacity(terms);
    for col in 0..terms {
        let norm = design.column(col).norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(LimesError::Singular(
                ErrorInfo::new("fit-degenerate-column", "model column vanished")
                    .with_context("column", col),
            ));
        }
        for value in design.column_mut(col).iter_mut() {
            *value /= norm;
        }
        scales.push(norm);
    }

    let qr = design.qr();
    let r = qr.r();
    let largest = r.diagonal().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if let Some(col) = r
        .diagonal()
        .iter()
        .position(|v| v.abs() <= RANK_TOLERANCE * largest)
    {
        return Err(LimesError::Singular(
            ErrorInfo::new("fit-rank-deficient", "least-squares design is rank deficient")
                .with_context("column", col)
                .with_hint("use fewer model terms"),
        ));
    }
    let rhs = qr.q().transpose() * DVector::from_column_slice(sums);
    let coefficients = r
        .solve_upper_triangular(&rhs)
        .ok_or_else(|| fit_error("fit-solve-failed", "triangular solve failed"))?;
    let limit = coefficients[0] / scales[0];
    if !limit.is_finite() {
        return Err(fit_error("fit-non-finite", "fitted limit is not finite"));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_limit_of_exact_model() {
        let beta = 0.5;
        let sums: Vec<f64> = (1..=6)
            .map(|k| {
                let h = 0.5_f64.powi(k);
                2.0 + 3.0 * h.powf(beta) - h.powf(beta + 1.0)
            })
            .collect();
        let limit = least_squares_limit(&sums, beta, 3).unwrap();
        assert!((limit - 2.0).abs() < 1e-10);
    }

    #[test]
    fn more_terms_than_points_is_rejected() {
        let err = least_squares_limit(&[1.0, 2.0], 1.0, 3).unwrap_err();
        assert_eq!(err.code(), "fit-shape");
    }
}
