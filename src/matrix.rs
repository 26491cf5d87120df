//! Cost matrix validation and padding.

use nalgebra::{DMatrix, Dim, RawStorage, SquareMatrix};

use crate::{HypgenError, Result};

/// Sentinel cost marking a forbidden row/column pairing.
///
/// A very large but finite value, so dual-potential arithmetic stays
/// numerically stable. Any entry at or above this threshold is treated
/// as unassignable; callers padding a rectangular problem to square or
/// gating out unlikely pairings should use this constant (or anything
/// larger) as the fill value.
pub const FORBIDDEN: f64 = 1e20;

/// Checks that `costs` is a non-empty square matrix of finite,
/// non-negative entries. Every public solver entry point goes through
/// this before touching the data.
pub(crate) fn validate<D, S>(costs: &SquareMatrix<f64, D, S>) -> Result<()>
where
    D: Dim,
    S: RawStorage<f64, D, D>,
{
    let (rows, cols) = costs.shape();
    if rows == 0 || cols == 0 {
        return Err(HypgenError::EmptyMatrix);
    }
    if rows != cols {
        return Err(HypgenError::NotSquare { rows, cols });
    }
    for row in 0..rows {
        for col in 0..cols {
            let value = costs[(row, col)];
            if !value.is_finite() || value < 0.0 {
                return Err(HypgenError::InvalidCost { row, col, value });
            }
        }
    }
    Ok(())
}

/// Pads a rectangular cost matrix to square with `fill`.
///
/// The original entries keep their (row, column) positions; padded
/// entries get `fill`. Use [`FORBIDDEN`] when the padded slots must
/// never be chosen as real pairings, or a finite miss cost when an
/// unmatched row/column is a meaningful outcome.
pub fn pad_to_square(costs: &DMatrix<f64>, fill: f64) -> DMatrix<f64> {
    let n = costs.nrows().max(costs.ncols());
    DMatrix::from_fn(n, n, |row, col| {
        if row < costs.nrows() && col < costs.ncols() {
            costs[(row, col)]
        } else {
            fill
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_empty() {
        let costs = DMatrix::<f64>::zeros(0, 0);
        assert_eq!(validate(&costs), Err(HypgenError::EmptyMatrix));
    }

    #[test]
    fn rejects_rectangular() {
        let costs = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            validate(&costs),
            Err(HypgenError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut costs = DMatrix::<f64>::zeros(2, 2);
        costs[(1, 0)] = -1.0;
        assert_eq!(
            validate(&costs),
            Err(HypgenError::InvalidCost {
                row: 1,
                col: 0,
                value: -1.0
            })
        );

        costs[(1, 0)] = f64::NAN;
        assert!(matches!(
            validate(&costs),
            Err(HypgenError::InvalidCost { row: 1, col: 0, .. })
        ));

        costs[(1, 0)] = f64::INFINITY;
        assert!(validate(&costs).is_err());
    }

    #[test]
    fn accepts_forbidden_sentinel() {
        let costs = DMatrix::from_element(3, 3, FORBIDDEN);
        assert!(validate(&costs).is_ok());
    }

    #[test]
    fn pads_wide_and_tall() {
        let wide = DMatrix::from_row_slice(2, 3, &[1., 2., 3., 4., 5., 6.]);
        let padded = pad_to_square(&wide, FORBIDDEN);
        assert_eq!(padded.shape(), (3, 3));
        assert_eq!(padded[(1, 2)], 6.0);
        assert_eq!(padded[(2, 0)], FORBIDDEN);

        let tall = wide.transpose();
        let padded = pad_to_square(&tall, 0.5);
        assert_eq!(padded.shape(), (3, 3));
        assert_eq!(padded[(2, 1)], 6.0);
        assert_eq!(padded[(0, 2)], 0.5);
    }
}
