//! Output configuration probabilities.

use crate::error::Result;
use crate::occupation::OccupationVector;
use crate::permanent::{Permanent, Ryser};
use crate::submatrix::{build, TransformationMatrix};

/// Computes P(output | input, transform) = |Perm(sub)|² / (Π input! · Π output!).
#[derive(Clone, Copy, Debug, Default)]
pub struct ProbabilityEngine<P = Ryser> {
    permanent: P,
}

impl<P: Permanent> ProbabilityEngine<P> {
    /// Create an engine backed by the given permanent implementation.
    pub fn new(permanent: P) -> Self {
        Self { permanent }
    }

    /// Probability that `input` photons are detected as `output` after `transform`.
    ///
    /// Submatrix and permanent failures are returned unchanged.
    pub fn probability(
        &self,
        input: &OccupationVector,
        output: &OccupationVector,
        transform: &TransformationMatrix,
    ) -> Result<f64> {
        let sub = build(input, output, transform)?;
        let amplitude = self.permanent.permanent(&sub)?;
        let denom = input.factorial_product() * output.factorial_product();
        Ok(amplitude.norm_sqr() / denom)
    }
}

/// [`ProbabilityEngine::probability`] with the default Ryser permanent.
pub fn output_probability(
    input: &OccupationVector,
    output: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<f64> {
    ProbabilityEngine::new(Ryser).probability(input, output, transform)
}
