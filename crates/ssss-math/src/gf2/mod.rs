//! Arithmetic in GF(2^d).
//!
//! A [`Field`] is an immutable context holding the degree and the
//! reduction polynomial; every operation takes the context explicitly, so
//! no process-wide state exists and elements of different fields cannot be
//! mixed silently. The reduction polynomial for each supported degree is
//! x^d + x^a + x^b + x^c + 1 with the middle exponents taken from a fixed
//! table, which makes products bit-compatible with other implementations
//! sharing that table.

mod tables;
pub mod poly;

use crate::bits::BigBits;
use crate::{Error, Result};
use tables::IRRED_COEFF;

/// Largest supported field degree.
pub const MAX_DEGREE: usize = 1024;

/// True when `degree` names a supported field: a multiple of 8 in
/// `8..=MAX_DEGREE`.
pub fn degree_valid(degree: usize) -> bool {
    (8..=MAX_DEGREE).contains(&degree) && degree % 8 == 0
}

/// Context for arithmetic in GF(2^degree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    degree: usize,
    modulus: BigBits,
}

impl Field {
    /// Creates the field of degree `degree`.
    ///
    /// Returns [`Error::InvalidDegree`] unless `degree` is a multiple of 8
    /// between 8 and [`MAX_DEGREE`].
    pub fn new(degree: usize) -> Result<Self> {
        if !degree_valid(degree) {
            return Err(Error::InvalidDegree(degree));
        }
        let mut modulus = BigBits::zero();
        modulus.set_bit(degree);
        let base = 3 * (degree / 8 - 1);
        for exp in &IRRED_COEFF[base..base + 3] {
            modulus.set_bit(usize::from(*exp));
        }
        modulus.set_bit(0);
        Ok(Self { degree, modulus })
    }

    /// Degree d of this field.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The reduction polynomial, a d+1-bit value.
    pub fn modulus(&self) -> &BigBits {
        &self.modulus
    }

    /// Imports a big-endian byte string as a field element.
    ///
    /// The input may be at most d/8 bytes long.
    pub fn element_from_bytes(&self, bytes: &[u8]) -> Result<BigBits> {
        if bytes.len() * 8 > self.degree {
            return Err(Error::ValueTooWide {
                got: bytes.len() * 8,
                degree: self.degree,
            });
        }
        Ok(BigBits::from_bytes_be(bytes))
    }

    /// Imports a machine word as a field element.
    ///
    /// Used for share indices. The value is taken as-is; when it exceeds
    /// d bits, [`Field::mul`] consults only its low d bits.
    pub fn element_from_u64(&self, v: u64) -> BigBits {
        BigBits::from_u64(v)
    }

    /// Field addition: XOR.
    pub fn add(&self, x: &BigBits, y: &BigBits) -> BigBits {
        x ^ y
    }

    /// Field multiplication by shift-and-XOR with interleaved reduction.
    pub fn mul(&self, x: &BigBits, y: &BigBits) -> BigBits {
        let mut shifted = x.clone();
        let mut product = if y.bit(0) {
            shifted.clone()
        } else {
            BigBits::zero()
        };
        for i in 1..self.degree {
            shifted.shl_assign(1);
            // The accumulator momentarily holds d+1 bits before reduction.
            if shifted.bit(self.degree) {
                shifted ^= &self.modulus;
            }
            if y.bit(i) {
                product ^= &shifted;
            }
        }
        product
    }

    /// Multiplicative inverse by the extended binary GCD.
    ///
    /// Returns [`Error::DivisionByZero`] for x = 0; otherwise
    /// `mul(x, inv(x)) = 1`.
    pub fn inv(&self, x: &BigBits) -> Result<BigBits> {
        if x.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let mut u = x.clone();
        let mut v = self.modulus.clone();
        let mut g = BigBits::zero();
        let mut z = BigBits::one();
        while !u.is_one() {
            let mut shift = u.bit_len() as isize - v.bit_len() as isize;
            if shift < 0 {
                std::mem::swap(&mut u, &mut v);
                std::mem::swap(&mut z, &mut g);
                shift = -shift;
            }
            u ^= &v.shl(shift as usize);
            z ^= &g.shl(shift as usize);
        }
        Ok(z)
    }
}
