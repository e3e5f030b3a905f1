//! Collision-scaling experiment.
//!
//! Feeds a fixed number of single photons into the first modes of
//! progressively larger random interferometers and records how likely a
//! collision (two or more photons leaving through one mode) is. Collisions
//! become rarer as the mode count grows.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::distribution::{summarize, summarize_parallel};
use crate::enumerate::configuration_count;
use crate::error::{BosonError, ExperimentError, Result};
use crate::interferometer::TransformSource;
use crate::occupation::OccupationVector;
use crate::permanent::Ryser;
use crate::probability::ProbabilityEngine;

/// Parameters for [`run_scaling`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Single photons injected into the first modes.
    pub photons: usize,
    pub min_modes: usize,
    pub max_modes: usize,
    /// Seed for the Haar-random interferometers.
    pub seed: u64,
    /// Allowed deviation of the total probability from one.
    pub tolerance: f64,
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            photons: 2,
            min_modes: 5,
            max_modes: 20,
            seed: 2021,
            tolerance: 1e-9,
            parallel: true,
        }
    }
}

impl ExperimentConfig {
    /// Largest interferometer a scaling run will generate.
    pub const MAX_MODES: usize = 1024;

    /// Check the parameters describe a runnable experiment.
    pub fn validate(&self) -> Result<()> {
        if self.min_modes == 0 {
            return Err(BosonError::invalid("min_modes must be at least 1"));
        }
        if self.min_modes > self.max_modes {
            return Err(BosonError::invalid(format!(
                "min_modes {} exceeds max_modes {}",
                self.min_modes, self.max_modes
            )));
        }
        if self.max_modes > Self::MAX_MODES {
            return Err(BosonError::invalid(format!(
                "max_modes {} exceeds the limit of {}",
                self.max_modes,
                Self::MAX_MODES
            )));
        }
        if self.photons > self.min_modes {
            return Err(BosonError::invalid(format!(
                "{} single photons do not fit into {} modes",
                self.photons, self.min_modes
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(BosonError::invalid(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Save config to file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExperimentError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Result of one mode count in the scaling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingPoint {
    pub modes: usize,
    pub configurations: u64,
    pub total_probability: f64,
    pub collision_probability: f64,
    pub elapsed_ms: f64,
}

/// Run the collision-scaling experiment, one point per mode count in
/// `min_modes..=max_modes`.
pub fn run_scaling<S: TransformSource + ?Sized>(
    config: &ExperimentConfig,
    source: &mut S,
) -> Result<Vec<ScalingPoint>> {
    config.validate()?;
    let engine = ProbabilityEngine::new(Ryser);
    let mut points = Vec::new();

    for modes in config.min_modes..=config.max_modes {
        let transform = source.generate(modes);
        let input = OccupationVector::single_photons(modes, config.photons)?;

        let start = Instant::now();
        let summary = if config.parallel {
            summarize_parallel(&engine, &input, &transform)?
        } else {
            summarize(&engine, &input, &transform)?
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if !summary.is_normalized(config.tolerance) {
            warn!(
                modes,
                total = summary.total_probability,
                tolerance = config.tolerance,
                "output probabilities do not sum to one"
            );
        }
        info!(
            modes,
            configurations = summary.configurations,
            expected = ?configuration_count(config.photons, modes),
            collision = summary.collision_probability,
            elapsed_ms,
            "scaling point"
        );

        points.push(ScalingPoint {
            modes,
            configurations: summary.configurations,
            total_probability: summary.total_probability,
            collision_probability: summary.collision_probability,
            elapsed_ms,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interferometer::{HaarSource, IdentitySource};

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.json");

        let config = ExperimentConfig {
            photons: 3,
            min_modes: 4,
            max_modes: 6,
            seed: 7,
            tolerance: 1e-8,
            parallel: false,
        };
        config.save(&path).unwrap();
        let loaded = ExperimentConfig::load(&path).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "max_modes": 8 }"#).unwrap();

        let loaded = ExperimentConfig::load(&path).unwrap();
        assert_eq!(loaded.max_modes, 8);
        assert_eq!(loaded.photons, ExperimentConfig::default().photons);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "min_modes": 9, "max_modes": 3 }"#).unwrap();
        assert!(matches!(
            ExperimentConfig::load(&path),
            Err(ExperimentError::Boson(BosonError::InvalidArgument(_)))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(ExperimentConfig::load(&path), Err(ExperimentError::Json(_))));

        assert!(matches!(
            ExperimentConfig::load(dir.path().join("missing.json")),
            Err(ExperimentError::Io(_))
        ));
    }

    #[test]
    fn test_load_rejects_oversized_mode_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        let huge = ExperimentConfig {
            photons: 0,
            min_modes: 1,
            max_modes: usize::MAX,
            ..ExperimentConfig::default()
        };
        fs::write(&path, serde_json::to_string(&huge).unwrap()).unwrap();

        assert!(matches!(
            ExperimentConfig::load(&path),
            Err(ExperimentError::Boson(BosonError::InvalidArgument(_)))
        ));
        assert!(matches!(
            run_scaling(&huge, &mut IdentitySource),
            Err(BosonError::InvalidArgument(_))
        ));

        let at_limit = ExperimentConfig {
            max_modes: ExperimentConfig::MAX_MODES,
            ..ExperimentConfig::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(ExperimentConfig::default().validate().is_ok());

        let too_many = ExperimentConfig {
            photons: 6,
            ..ExperimentConfig::default()
        };
        assert!(too_many.validate().is_err());

        let zero = ExperimentConfig {
            min_modes: 0,
            ..ExperimentConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_scaling_run_is_normalized() {
        let config = ExperimentConfig {
            min_modes: 3,
            max_modes: 7,
            ..ExperimentConfig::default()
        };
        let mut source = HaarSource::seeded(config.seed);
        let points = run_scaling(&config, &mut source).unwrap();

        assert_eq!(points.len(), 5);
        for point in &points {
            assert!((point.total_probability - 1.0).abs() < config.tolerance);
            assert_eq!(
                point.configurations as u128,
                configuration_count(config.photons, point.modes).unwrap()
            );
            assert!((0.0..=1.0 + 1e-9).contains(&point.collision_probability));
        }
    }

    #[test]
    fn test_identity_never_collides() {
        let config = ExperimentConfig {
            min_modes: 2,
            max_modes: 4,
            parallel: false,
            ..ExperimentConfig::default()
        };
        let points = run_scaling(&config, &mut IdentitySource).unwrap();
        assert!(points.iter().all(|p| p.collision_probability.abs() < 1e-12));
    }
}
