//! Gauss–Jordan elimination over GF(2^d).
//!
//! The interpolation system is laid out column-per-share: for a threshold
//! of T the matrix has shape (T+1) x T, where entry (r, k) for r < T holds
//! x_k^(T-1-r) and row T holds the right-hand side y_k. Elimination is
//! column-oriented to match that layout; the solved unknown is the
//! constant coefficient of the interpolated polynomial, read off the last
//! diagonal entry and its right-hand side.

use crate::bits::BigBits;
use crate::gf2::Field;
use crate::{Error, Result};
use ndarray::Array2;

/// Solves the augmented system in place and returns the constant term.
///
/// `m` must have shape (T+1) x T with T >= 1. The matrix contents are
/// destroyed by elimination; callers owning secret material should zeroize
/// the matrix afterwards. Fails with [`Error::SingularSystem`] when no
/// pivot can be found, which is the case when two columns were built from
/// the same evaluation point.
pub fn solve(field: &Field, m: &mut Array2<BigBits>) -> Result<BigBits> {
    let t = m.ncols();
    assert!(t >= 1 && m.nrows() == t + 1, "matrix must be (T+1) x T");

    for i in 0..t {
        if m[(i, i)].is_zero() {
            let j = ((i + 1)..t)
                .find(|&j| !m[(i, j)].is_zero())
                .ok_or(Error::SingularSystem)?;
            for k in 0..=t {
                m.swap((k, i), (k, j));
            }
        }
        for j in (i + 1)..t {
            if m[(i, j)].is_zero() {
                continue;
            }
            let pivot = m[(i, i)].clone();
            let factor = m[(i, j)].clone();
            // Cancel column j against column i; the right-hand side row
            // participates.
            for k in (i + 1)..=t {
                let scaled = field.mul(&m[(k, j)], &pivot);
                let cancel = field.mul(&m[(k, i)], &factor);
                m[(k, j)] = field.add(&scaled, &cancel);
            }
        }
    }

    let inverse = field.inv(&m[(t - 1, t - 1)])?;
    Ok(field.mul(&m[(t, t - 1)], &inverse))
}

#[cfg(test)]
mod tests {
    use super::solve;
    use crate::bits::BigBits;
    use crate::gf2::{poly::horner, Field};
    use crate::Error;
    use ndarray::Array2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Builds the (T+1) x T system for evaluation points `xs` and values
    /// `ys`.
    fn vandermonde(field: &Field, xs: &[u64], ys: &[BigBits]) -> Array2<BigBits> {
        let t = xs.len();
        let mut m = Array2::from_elem((t + 1, t), BigBits::zero());
        for (k, (&x, y)) in xs.iter().zip(ys).enumerate() {
            let xe = BigBits::from_u64(x);
            m[(t - 1, k)] = BigBits::one();
            for r in (0..t - 1).rev() {
                m[(r, k)] = field.mul(&m[(r + 1, k)], &xe);
            }
            m[(t, k)] = y.clone();
        }
        m
    }

    #[test]
    fn two_point_system() {
        // y = 0xff + 0x01 x in GF(2^8), evaluated at 1 and 2.
        let f = Field::new(8).unwrap();
        let mut m = vandermonde(
            &f,
            &[1, 2],
            &[BigBits::from_u64(0xfe), BigBits::from_u64(0xfd)],
        );
        assert_eq!(solve(&f, &mut m).unwrap(), BigBits::from_u64(0xff));
    }

    #[test]
    fn three_point_system() {
        // y = 0x42 + 0x17 x + 0xa9 x^2 in GF(2^8) at x = 3, 5, 7.
        let f = Field::new(8).unwrap();
        let mut m = vandermonde(
            &f,
            &[3, 5, 7],
            &[
                BigBits::from_u64(0x40),
                BigBits::from_u64(0xde),
                BigBits::from_u64(0x62),
            ],
        );
        assert_eq!(solve(&f, &mut m).unwrap(), BigBits::from_u64(0x42));
    }

    #[test]
    fn duplicate_points_are_singular() {
        let f = Field::new(8).unwrap();
        let mut m = vandermonde(
            &f,
            &[2, 2],
            &[BigBits::from_u64(0x10), BigBits::from_u64(0x20)],
        );
        assert_eq!(solve(&f, &mut m), Err(Error::SingularSystem));
    }

    #[test]
    fn recovers_constant_term_of_random_polynomials() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for degree in [8, 64] {
            let f = Field::new(degree).unwrap();
            for t in 2..=5usize {
                let coeffs: Vec<BigBits> = (0..t)
                    .map(|_| {
                        let mut buf = vec![0u8; degree / 8];
                        rng.fill(buf.as_mut_slice());
                        BigBits::from_bytes_be(&buf)
                    })
                    .collect();
                let xs: Vec<u64> = (1..=t as u64).collect();
                let ys: Vec<BigBits> = xs
                    .iter()
                    .map(|&x| horner(&f, &coeffs, &BigBits::from_u64(x)))
                    .collect();
                let mut m = vandermonde(&f, &xs, &ys);
                assert_eq!(solve(&f, &mut m).unwrap(), coeffs[0]);
            }
        }
    }
}
