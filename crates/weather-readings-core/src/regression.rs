//! Least-squares slope over paired samples.

use snafu::ensure;

use crate::error::{InvalidArgumentSnafu, QueryResult};

/// Slope of the least-squares best-fit line through `(x[i], y[i])`.
///
/// Computes `(n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)`.
///
/// Fails with [`crate::QueryError::InvalidArgument`] when `x` has fewer than
/// two values or `y` differs in length from `x`.
///
/// A constant `x` makes the denominator zero; the result is then NaN or
/// infinite and is returned as-is.
pub fn slope(x: &[i32], y: &[f64]) -> QueryResult<f64> {
    ensure!(
        x.len() >= 2,
        InvalidArgumentSnafu {
            argument: "x",
            reason: format!("need at least 2 values, got {}", x.len()),
        }
    );
    ensure!(
        y.len() == x.len(),
        InvalidArgumentSnafu {
            argument: "y",
            reason: format!("has {} values but x has {}", y.len(), x.len()),
        }
    );

    let n = x.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_x2) = x.iter().zip(y).fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), (&xi, &yi)| {
            let xi = f64::from(xi);
            (sx + xi, sy + yi, sxy + xi * yi, sx2 + xi * xi)
        },
    );

    Ok((n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x))
}
