//! Full output distributions.
//!
//! Streams every output configuration of an input through the probability
//! engine and folds the results into a summary. The first failing
//! configuration aborts the fold and its error is returned.

use rayon::iter::{ParallelBridge, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::enumerate::enumerate;
use crate::error::Result;
use crate::occupation::OccupationVector;
use crate::permanent::Permanent;
use crate::probability::ProbabilityEngine;
use crate::submatrix::TransformationMatrix;

/// One output configuration and its probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbability {
    pub configuration: OccupationVector,
    pub probability: f64,
}

/// Aggregate of a full output distribution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub configurations: u64,
    pub total_probability: f64,
    /// Probability that some mode receives more than one photon.
    pub collision_probability: f64,
    pub most_likely: Option<OutcomeProbability>,
}

impl DistributionSummary {
    pub fn record(&mut self, outcome: OutcomeProbability) {
        self.configurations += 1;
        self.total_probability += outcome.probability;
        if outcome.configuration.has_collision() {
            self.collision_probability += outcome.probability;
        }
        self.most_likely = pick_most_likely(self.most_likely.take(), Some(outcome));
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.configurations += other.configurations;
        self.total_probability += other.total_probability;
        self.collision_probability += other.collision_probability;
        self.most_likely = pick_most_likely(self.most_likely, other.most_likely);
        self
    }

    /// True when the probabilities sum to one within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_probability - 1.0).abs() <= tolerance
    }
}

// Ties go to the lexicographically smaller configuration so the parallel
// fold agrees with the serial one.
fn pick_most_likely(
    a: Option<OutcomeProbability>,
    b: Option<OutcomeProbability>,
) -> Option<OutcomeProbability> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let order = a
                .probability
                .partial_cmp(&b.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.configuration.cmp(&a.configuration));
            if order == Ordering::Less {
                Some(b)
            } else {
                Some(a)
            }
        }
        (a, None) => a,
        (None, b) => b,
    }
}

/// Lazily pair every output configuration of `input` with its probability.
pub fn output_distribution<'a, P: Permanent>(
    engine: &'a ProbabilityEngine<P>,
    input: &'a OccupationVector,
    transform: &'a TransformationMatrix,
) -> Result<impl Iterator<Item = Result<OutcomeProbability>> + 'a> {
    let configurations = enumerate(input.total(), input.channels())?;
    Ok(configurations.map(move |configuration| -> Result<OutcomeProbability> {
        let probability = engine.probability(input, &configuration, transform)?;
        Ok(OutcomeProbability {
            configuration,
            probability,
        })
    }))
}

/// Summarize the full output distribution on the current thread.
pub fn summarize<P: Permanent>(
    engine: &ProbabilityEngine<P>,
    input: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<DistributionSummary> {
    debug!(%input, modes = input.channels(), "summarizing output distribution");
    let mut summary = DistributionSummary::default();
    for outcome in output_distribution(engine, input, transform)? {
        summary.record(outcome?);
    }
    debug!(
        configurations = summary.configurations,
        total = summary.total_probability,
        "distribution summarized"
    );
    Ok(summary)
}

/// Summarize the full output distribution across the rayon thread pool.
///
/// Agrees with [`summarize`] up to floating-point summation order.
pub fn summarize_parallel<P: Permanent + Sync>(
    engine: &ProbabilityEngine<P>,
    input: &OccupationVector,
    transform: &TransformationMatrix,
) -> Result<DistributionSummary> {
    debug!(%input, modes = input.channels(), "summarizing output distribution in parallel");
    let summary = enumerate(input.total(), input.channels())?
        .par_bridge()
        .map(|configuration| -> Result<OutcomeProbability> {
            let probability = engine.probability(input, &configuration, transform)?;
            Ok(OutcomeProbability {
                configuration,
                probability,
            })
        })
        .try_fold(
            DistributionSummary::default,
            |mut summary, outcome| -> Result<DistributionSummary> {
                summary.record(outcome?);
                Ok(summary)
            },
        )
        .try_reduce(DistributionSummary::default, |a, b| Ok(a.merge(b)))?;
    debug!(
        configurations = summary.configurations,
        total = summary.total_probability,
        "distribution summarized"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interferometer::{identity, random_unitary};
    use crate::permanent::Ryser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identity_has_no_collisions() {
        let engine = ProbabilityEngine::new(Ryser);
        let input = OccupationVector::single_photons(5, 2).unwrap();
        let summary = summarize(&engine, &input, &identity(5)).unwrap();

        assert_eq!(summary.configurations, 15);
        assert!(summary.is_normalized(1e-12));
        assert!(summary.collision_probability.abs() < 1e-12);
        let best = summary.most_likely.unwrap();
        assert_eq!(best.configuration, input);
        assert!((best.probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_unitary_normalized() {
        let mut rng = StdRng::seed_from_u64(40);
        let engine = ProbabilityEngine::new(Ryser);
        for input in [
            OccupationVector::from([1, 0, 0, 0]),
            OccupationVector::from([3, 1, 0, 1]),
            OccupationVector::from([0, 3, 2, 2]),
        ] {
            let u = random_unitary(input.channels(), &mut rng);
            let summary = summarize(&engine, &input, &u).unwrap();
            assert!(
                summary.is_normalized(1e-9),
                "{} sums to {}",
                input,
                summary.total_probability
            );
            assert!(summary.collision_probability >= 0.0);
            assert!(summary.collision_probability <= summary.total_probability + 1e-12);
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(77);
        let engine = ProbabilityEngine::new(Ryser);
        let input = OccupationVector::from([2, 1, 1, 0, 0]);
        let u = random_unitary(5, &mut rng);

        let serial = summarize(&engine, &input, &u).unwrap();
        let parallel = summarize_parallel(&engine, &input, &u).unwrap();

        assert_eq!(serial.configurations, parallel.configurations);
        assert!((serial.total_probability - parallel.total_probability).abs() < 1e-12);
        assert!((serial.collision_probability - parallel.collision_probability).abs() < 1e-12);
        assert_eq!(
            serial.most_likely.map(|o| o.configuration),
            parallel.most_likely.map(|o| o.configuration)
        );
    }

    #[test]
    fn test_stream_is_lazy_and_complete() {
        let engine = ProbabilityEngine::new(Ryser);
        let input = OccupationVector::from([1, 1, 0]);
        let u = identity(3);
        let mut stream = output_distribution(&engine, &input, &u).unwrap();
        assert!(stream.next().unwrap().is_ok());
        assert_eq!(stream.count(), 5);
    }

    #[test]
    fn test_tie_break_prefers_smaller_configuration() {
        let a = OutcomeProbability {
            configuration: OccupationVector::from([0, 2]),
            probability: 0.5,
        };
        let b = OutcomeProbability {
            configuration: OccupationVector::from([2, 0]),
            probability: 0.5,
        };
        let picked = pick_most_likely(Some(b.clone()), Some(a.clone())).unwrap();
        assert_eq!(picked, a);
        let picked = pick_most_likely(Some(a.clone()), Some(b)).unwrap();
        assert_eq!(picked, a);
    }
}
