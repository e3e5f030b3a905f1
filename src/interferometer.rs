//! Interferometer transforms.
//!
//! Producers of the unitary matrices fed to the probability engine: the
//! identity, a two-mode Mach-Zehnder beam splitter, and Haar-random
//! unitaries. The engine itself never checks unitarity; [`is_unitary`] is
//! here for callers and tests.

use ndarray::{array, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::Result;
use crate::occupation::check_permutation;
use crate::submatrix::TransformationMatrix;

/// Something that hands out an N-mode transform on request.
pub trait TransformSource {
    fn generate(&mut self, channels: usize) -> TransformationMatrix;
}

/// Haar-random unitaries from a seeded generator.
#[derive(Clone, Debug)]
pub struct HaarSource {
    rng: StdRng,
}

impl HaarSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TransformSource for HaarSource {
    fn generate(&mut self, channels: usize) -> TransformationMatrix {
        random_unitary(channels, &mut self.rng)
    }
}

/// Always the identity: every photon leaves through the mode it entered.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySource;

impl TransformSource for IdentitySource {
    fn generate(&mut self, channels: usize) -> TransformationMatrix {
        identity(channels)
    }
}

/// N x N identity.
pub fn identity(n: usize) -> TransformationMatrix {
    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
}

/// Mach-Zehnder transfer matrix with phases (theta, phi):
///
/// T(θ, φ) = [[e^(iφ)cos(θ), -sin(θ)],
///            [e^(iφ)sin(θ),  cos(θ)]]
///
/// θ = π/4 is a balanced (50:50) beam splitter.
pub fn beam_splitter(theta: f64, phi: f64) -> TransformationMatrix {
    let cos_t = theta.cos();
    let sin_t = theta.sin();
    let exp_phi = Complex64::from_polar(1.0, phi);

    array![
        [exp_phi * cos_t, Complex64::new(-sin_t, 0.0)],
        [exp_phi * sin_t, Complex64::new(cos_t, 0.0)]
    ]
}

/// Haar-random N x N unitary.
///
/// Gram-Schmidt on a matrix of i.i.d. complex Gaussians, which is the QR
/// decomposition with a positive real diagonal in R and therefore Haar.
pub fn random_unitary<R: Rng + ?Sized>(n: usize, rng: &mut R) -> TransformationMatrix {
    let z = Array2::from_shape_fn((n, n), |_| {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        Complex64::new(re, im) / 2.0_f64.sqrt()
    });

    let mut q: TransformationMatrix = Array2::zeros((n, n));

    for i in 0..n {
        let mut v = z.column(i).to_owned();

        // Subtract projections onto previous columns
        for j in 0..i {
            let proj: Complex64 = q
                .column(j)
                .iter()
                .zip(v.iter())
                .map(|(a, b)| a.conj() * b)
                .sum();
            for k in 0..n {
                v[k] -= proj * q[[k, j]];
            }
        }

        let norm: f64 = v.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt();
        if norm > 1e-12 {
            q.column_mut(i).assign(&v.mapv(|x| x / norm));
        }
    }

    q
}

/// True when U·U† is the identity to within `tolerance` entrywise.
pub fn is_unitary(u: &TransformationMatrix, tolerance: f64) -> bool {
    let (rows, cols) = u.dim();
    if rows != cols {
        return false;
    }
    let u_h = u.t().mapv(|x| x.conj());
    let product = u.dot(&u_h);

    product.indexed_iter().all(|((i, j), value)| {
        let expected = if i == j { 1.0 } else { 0.0 };
        (*value - Complex64::new(expected, 0.0)).norm() <= tolerance
    })
}

/// Rename mode `i` to `perm[i]` on both the input and output side.
pub fn relabel_modes(u: &TransformationMatrix, perm: &[usize]) -> Result<TransformationMatrix> {
    check_permutation(perm, u.nrows())?;
    check_permutation(perm, u.ncols())?;

    let mut relabeled = Array2::zeros(u.dim());
    for ((row, col), &value) in u.indexed_iter() {
        relabeled[[perm[row], perm[col]]] = value;
    }
    Ok(relabeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_beam_splitter_identity_setting() {
        let t = beam_splitter(0.0, 0.0);
        assert!(is_unitary(&t, 1e-12));
        assert_eq!(t, identity(2));
    }

    #[test]
    fn test_beam_splitter_unitary() {
        for &(theta, phi) in &[(PI / 4.0, 0.0), (0.3, 1.2), (PI / 2.0, PI)] {
            assert!(is_unitary(&beam_splitter(theta, phi), 1e-12));
        }
    }

    #[test]
    fn test_random_unitary_is_unitary() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in [1, 2, 4, 8, 16] {
            let u = random_unitary(n, &mut rng);
            assert!(is_unitary(&u, 1e-9), "not unitary for n = {}", n);
        }
    }

    #[test]
    fn test_haar_source_is_reproducible() {
        let a = HaarSource::seeded(9).generate(5);
        let b = HaarSource::seeded(9).generate(5);
        assert_eq!(a, b);
        assert_eq!(IdentitySource.generate(3), identity(3));
    }

    #[test]
    fn test_non_unitary_detected() {
        let mut m = identity(3);
        m[[0, 1]] = Complex64::new(0.5, 0.0);
        assert!(!is_unitary(&m, 1e-6));
        assert!(!is_unitary(&Array2::zeros((2, 3)), 1e-6));
    }

    #[test]
    fn test_relabel_modes() {
        let mut rng = StdRng::seed_from_u64(5);
        let u = random_unitary(3, &mut rng);
        let perm = [2, 0, 1];
        let r = relabel_modes(&u, &perm).unwrap();
        assert!(is_unitary(&r, 1e-9));
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(r[[perm[i], perm[j]]], u[[i, j]]);
            }
        }
        assert!(relabel_modes(&u, &[0, 1]).is_err());
    }
}
