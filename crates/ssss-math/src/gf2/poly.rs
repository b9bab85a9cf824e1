//! Polynomial evaluation over GF(2^d).

use crate::bits::BigBits;
use crate::gf2::Field;

/// Evaluates `coeffs[0] + coeffs[1] x + ... + coeffs[n-1] x^(n-1)` by
/// Horner's rule.
///
/// An empty coefficient slice evaluates to zero.
pub fn horner(field: &Field, coeffs: &[BigBits], x: &BigBits) -> BigBits {
    let mut y = match coeffs.last() {
        Some(c) => c.clone(),
        None => return BigBits::zero(),
    };
    for c in coeffs.iter().rev().skip(1) {
        y = field.add(&field.mul(&y, x), c);
    }
    y
}
