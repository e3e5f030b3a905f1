//! Matrix permanent evaluation.
//!
//! The probability engine only needs "give me the permanent of this square
//! matrix", so that capability is a trait. [`Ryser`] is the exact default;
//! other algorithms plug in by implementing [`Permanent`] or by passing a
//! closure.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::PermanentError;

/// Exact permanent of a square complex matrix.
pub trait Permanent {
    fn permanent(&self, matrix: &Array2<Complex64>) -> Result<Complex64, PermanentError>;
}

impl<F> Permanent for F
where
    F: Fn(&Array2<Complex64>) -> Result<Complex64, PermanentError>,
{
    fn permanent(&self, matrix: &Array2<Complex64>) -> Result<Complex64, PermanentError> {
        self(matrix)
    }
}

/// Ryser's inclusion-exclusion formula, visiting column subsets in Gray-code
/// order so each step updates the row sums with a single column.
///
/// O(2^n · n) time, O(n) extra memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ryser;

impl Ryser {
    /// Largest dimension accepted.
    pub const MAX_DIMENSION: usize = 30;
}

impl Permanent for Ryser {
    fn permanent(&self, matrix: &Array2<Complex64>) -> Result<Complex64, PermanentError> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(PermanentError::NotSquare { rows, cols });
        }
        let n = rows;
        if n == 0 {
            return Ok(Complex64::new(1.0, 0.0));
        }
        if n > Self::MAX_DIMENSION {
            return Err(PermanentError::TooLarge {
                dimension: n,
                limit: Self::MAX_DIMENSION,
            });
        }

        let mut row_sums = vec![Complex64::new(0.0, 0.0); n];
        let mut total = Complex64::new(0.0, 0.0);
        let mut gray: u64 = 0;

        for step in 1..(1u64 << n) {
            let next = step ^ (step >> 1);
            let col = (gray ^ next).trailing_zeros() as usize;
            let added = next & (1u64 << col) != 0;
            for (i, sum) in row_sums.iter_mut().enumerate() {
                if added {
                    *sum += matrix[[i, col]];
                } else {
                    *sum -= matrix[[i, col]];
                }
            }
            gray = next;

            let product: Complex64 = row_sums.iter().product();
            // Sign is (-1)^(n - |S|).
            if (n - next.count_ones() as usize) % 2 == 0 {
                total += product;
            } else {
                total -= product;
            }
        }

        if !total.is_finite() {
            return Err(PermanentError::NonFinite);
        }
        Ok(total)
    }
}
