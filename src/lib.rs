//! Boson Sampling
//!
//! Exact output probabilities for indistinguishable photons passing through
//! a linear optical interferometer: output configuration enumeration,
//! submatrix construction, and the permanent-based probability formula.

pub mod error;
pub mod occupation;
pub mod partition;
pub mod multiset;
pub mod enumerate;
pub mod submatrix;
pub mod permanent;
pub mod probability;
pub mod interferometer;
pub mod distribution;
pub mod experiment;

pub use error::{BosonError, ExperimentError, PermanentError, Result};
pub use occupation::OccupationVector;
pub use enumerate::{configuration_count, enumerate, OutputConfigurations};
pub use submatrix::{build, build_lean, Submatrix, TransformationMatrix};
pub use permanent::{Permanent, Ryser};
pub use probability::{output_probability, ProbabilityEngine};
pub use interferometer::{HaarSource, IdentitySource, TransformSource};
pub use distribution::{DistributionSummary, OutcomeProbability};
pub use experiment::{ExperimentConfig, ScalingPoint};
