//! Output configuration enumeration.
//!
//! Every way of distributing `n` indistinguishable photons over `m` modes,
//! produced lazily: partitions of `n` that fit into `m` modes are padded
//! with empty modes and expanded into their distinct arrangements.

use crate::error::{BosonError, Result};
use crate::multiset::DistinctPermutations;
use crate::occupation::OccupationVector;
use crate::partition::AscendingPartitions;

/// Lazy stream of every output configuration for a photon and mode count.
///
/// Deterministic: the same arguments always yield the same sequence.
#[derive(Clone, Debug)]
pub struct OutputConfigurations {
    channels: usize,
    partitions: AscendingPartitions,
    arrangements: Option<DistinctPermutations>,
}

/// Enumerate all occupation vectors of length `num_channels` summing to
/// `total_particles`, each exactly once.
pub fn enumerate(total_particles: usize, num_channels: usize) -> Result<OutputConfigurations> {
    if num_channels == 0 {
        return Err(BosonError::invalid("channel count must be at least 1"));
    }
    Ok(OutputConfigurations {
        channels: num_channels,
        partitions: AscendingPartitions::new(total_particles),
        arrangements: None,
    })
}

impl Iterator for OutputConfigurations {
    type Item = OccupationVector;

    fn next(&mut self) -> Option<OccupationVector> {
        loop {
            if let Some(arrangement) = self.arrangements.as_mut().and_then(|a| a.next()) {
                return Some(OccupationVector::new(arrangement));
            }
            let channels = self.channels;
            let mut padded = self.partitions.find(|p| p.len() <= channels)?;
            padded.resize(channels, 0);
            self.arrangements = Some(DistinctPermutations::new(padded));
        }
    }
}

/// Number of configurations `enumerate(photons, modes)` yields:
/// C(photons + modes - 1, modes - 1).
///
/// Returns `None` when the count overflows `u128`.
pub fn configuration_count(photons: usize, modes: usize) -> Option<u128> {
    if modes == 0 {
        return Some(0);
    }
    let n = photons as u128 + modes as u128 - 1;
    let k = (modes - 1).min(photons) as u128;
    let mut count: u128 = 1;
    for i in 0..k {
        // Exact at every step: count * (n - i) is divisible by (i + 1).
        count = count.checked_mul(n - i)? / (i + 1);
    }
    Some(count)
}
