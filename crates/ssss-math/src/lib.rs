//! Mathematical building blocks for Shamir secret sharing over binary
//! extension fields.
//!
//! The crate provides the three layers the scheme is built on:
//!
//! - [`bits::BigBits`], a small bit vector over `u64` limbs with the XOR,
//!   shift and bit-level operations that GF(2) polynomial arithmetic needs;
//! - [`gf2::Field`], arithmetic in GF(2^d) for d a multiple of 8 up to
//!   1024, with the reduction polynomial drawn from a fixed table of
//!   irreducible polynomials;
//! - [`solve`], Gauss–Jordan elimination over GF(2^d) used to interpolate
//!   the secret from a quorum of shares.

pub mod bits;
pub mod gf2;
pub mod solve;

pub use bits::BigBits;
pub use gf2::Field;

use thiserror::Error;

/// Errors produced by the arithmetic layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested field degree is not a supported one.
    #[error("invalid field degree {0}: must be a multiple of 8 between 8 and 1024")]
    InvalidDegree(usize),

    /// Zero was passed where an invertible element is required.
    #[error("zero has no multiplicative inverse")]
    DivisionByZero,

    /// The linear system has no pivot; the quorum does not determine a
    /// unique solution.
    #[error("linear system is singular")]
    SingularSystem,

    /// An imported value does not fit in the field.
    #[error("value of {got} bits does not fit in {degree} bits")]
    ValueTooWide { got: usize, degree: usize },
}

/// Convenience wrapper around `std::result::Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;
