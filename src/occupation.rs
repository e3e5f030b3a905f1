//! Photon occupation vectors.
//!
//! An occupation vector counts the photons sitting in each mode of an
//! interferometer. Index is the mode, value is the photon count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BosonError, Result};

/// Per-mode photon counts for an input or output configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupationVector(Vec<usize>);

impl OccupationVector {
    /// Create from per-mode counts.
    pub fn new(counts: Vec<usize>) -> Self {
        Self(counts)
    }

    /// Create from signed counts, rejecting negative entries.
    pub fn from_signed(counts: &[i64]) -> Result<Self> {
        counts
            .iter()
            .enumerate()
            .map(|(mode, &count)| {
                usize::try_from(count).map_err(|_| {
                    BosonError::invalid(format!("mode {mode} has negative occupancy {count}"))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// All modes empty.
    pub fn vacuum(channels: usize) -> Self {
        Self(vec![0; channels])
    }

    /// One photon in each of the first `photons` modes, the rest empty.
    pub fn single_photons(channels: usize, photons: usize) -> Result<Self> {
        if photons > channels {
            return Err(BosonError::invalid(format!(
                "cannot place {photons} single photons into {channels} modes"
            )));
        }
        let mut counts = vec![0; channels];
        counts[..photons].fill(1);
        Ok(Self(counts))
    }

    /// Number of modes.
    #[inline]
    pub fn channels(&self) -> usize {
        self.0.len()
    }

    /// Total photon count.
    #[inline]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn counts(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// True when both vectors carry the same number of photons.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.total() == other.total()
    }

    /// Product of the factorials of every entry.
    pub fn factorial_product(&self) -> f64 {
        self.0.iter().map(|&count| factorial(count)).product()
    }

    /// True when some mode holds more than one photon.
    pub fn has_collision(&self) -> bool {
        self.0.iter().any(|&count| count > 1)
    }

    /// Move the count of mode `i` to mode `perm[i]`.
    ///
    /// `perm` must be a permutation of `0..channels`.
    pub fn relabel(&self, perm: &[usize]) -> Result<Self> {
        check_permutation(perm, self.channels())?;
        let mut counts = vec![0; self.channels()];
        for (mode, &count) in self.0.iter().enumerate() {
            counts[perm[mode]] = count;
        }
        Ok(Self(counts))
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for OccupationVector {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}

impl<const N: usize> From<[usize; N]> for OccupationVector {
    fn from(counts: [usize; N]) -> Self {
        Self(counts.to_vec())
    }
}

impl fmt::Display for OccupationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, count) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, "]")
    }
}

/// n! as a float. 0! = 1.
pub fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

pub(crate) fn check_permutation(perm: &[usize], channels: usize) -> Result<()> {
    if perm.len() != channels {
        return Err(BosonError::invalid(format!(
            "relabeling has {} entries for {channels} modes",
            perm.len()
        )));
    }
    let mut seen = vec![false; channels];
    for &target in perm {
        if target >= channels || seen[target] {
            return Err(BosonError::invalid(format!(
                "relabeling {perm:?} is not a permutation of 0..{channels}"
            )));
        }
        seen[target] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_rejects_negative() {
        let err = OccupationVector::from_signed(&[1, -2, 0]).unwrap_err();
        assert!(matches!(err, BosonError::InvalidArgument(_)));

        let ok = OccupationVector::from_signed(&[3, 1, 0, 1]).unwrap();
        assert_eq!(ok.counts(), &[3, 1, 0, 1]);
        assert_eq!(ok.total(), 5);
    }

    #[test]
    fn test_is_compatible() {
        let a = OccupationVector::from([2, 0, 1]);
        assert!(a.is_compatible(&OccupationVector::from([0, 3, 0])));
        assert!(a.is_compatible(&OccupationVector::from([1, 1, 0, 1])));
        assert!(!a.is_compatible(&OccupationVector::from([1, 1, 0])));
    }

    #[test]
    fn test_single_photons() {
        let v = OccupationVector::single_photons(5, 2).unwrap();
        assert_eq!(v.counts(), &[1, 1, 0, 0, 0]);
        assert!(!v.has_collision());
        assert!(OccupationVector::single_photons(2, 3).is_err());
    }

    #[test]
    fn test_factorial_product() {
        let v = OccupationVector::from([3, 1, 0, 2]);
        assert!((v.factorial_product() - 12.0).abs() < 1e-12);
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(5), 120.0);
    }

    #[test]
    fn test_relabel() {
        let v = OccupationVector::from([2, 0, 1]);
        let moved = v.relabel(&[1, 2, 0]).unwrap();
        assert_eq!(moved.counts(), &[1, 2, 0]);

        assert!(v.relabel(&[0, 0, 1]).is_err());
        assert!(v.relabel(&[0, 1]).is_err());
    }

    #[test]
    fn test_display_and_serde() {
        let v = OccupationVector::from([1, 0, 2]);
        assert_eq!(v.to_string(), "[1, 0, 2]");

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,0,2]");
        let back: OccupationVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
