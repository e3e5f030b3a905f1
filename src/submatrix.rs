//! Submatrix construction.
//!
//! The probability amplitude of an output configuration is the permanent of
//! a reduced matrix: the transform's columns repeated once per input photon,
//! then its rows repeated once per output photon.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{BosonError, Result};
use crate::occupation::OccupationVector;

/// Square complex matrix describing the interferometer.
pub type TransformationMatrix = Array2<Complex64>;

/// Photon-count sized matrix built from a transform for one configuration pair.
pub type Submatrix = Array2<Complex64>;

/// Build the submatrix for `input` photons leaving as `output` through `transform`.
///
/// Column `c` of the transform appears `input[c]` times and row `r` appears
/// `output[r]` times, in increasing mode order. The result is `n x n` with
/// `n` the photon count.
pub fn build(
    input: &OccupationVector,
    output: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<Submatrix> {
    let photons = validate(input, output, transform)?;

    // Columns first: keep every row, repeat the occupied input columns.
    let mut columns: Array2<Complex64> = Array2::zeros((transform.nrows(), photons));
    let mut col_idx = 0;
    for (col, &count) in input.iter().enumerate() {
        for _ in 0..count {
            columns.column_mut(col_idx).assign(&transform.column(col));
            col_idx += 1;
        }
    }

    // Then rows of the intermediate, repeated per output photon.
    let mut sub: Submatrix = Array2::zeros((photons, photons));
    let mut row_idx = 0;
    for (row, &count) in output.iter().enumerate() {
        for _ in 0..count {
            sub.row_mut(row_idx).assign(&columns.row(row));
            row_idx += 1;
        }
    }

    Ok(sub)
}

/// Single-pass variant of [`build`] that indexes the transform directly
/// instead of materializing the column-only intermediate.
pub fn build_lean(
    input: &OccupationVector,
    output: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<Submatrix> {
    let photons = validate(input, output, transform)?;

    let rows = expand(output);
    let cols = expand(input);
    Ok(Array2::from_shape_fn((photons, photons), |(i, j)| {
        transform[[rows[i], cols[j]]]
    }))
}

/// Mode index of every photon, in increasing mode order.
fn expand(occupation: &OccupationVector) -> Vec<usize> {
    occupation
        .iter()
        .enumerate()
        .flat_map(|(mode, &count)| std::iter::repeat(mode).take(count))
        .collect()
}

fn validate(
    input: &OccupationVector,
    output: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<usize> {
    if !input.is_compatible(output) {
        return Err(BosonError::ParticleNumberMismatch {
            input: input.total(),
            output: output.total(),
        });
    }

    let (rows, cols) = transform.dim();
    if rows != cols {
        return Err(BosonError::invalid(format!(
            "transform must be square, got {rows}x{cols}"
        )));
    }
    if input.channels() != cols || output.channels() != rows {
        return Err(BosonError::invalid(format!(
            "occupation vectors of length {} and {} do not match a {rows}-mode transform",
            input.channels(),
            output.channels()
        )));
    }

    Ok(input.total())
}
