//! Shamir's Secret Sharing Scheme over binary extension fields.
//!
//! A secret of up to 1024 bits is split into N shares such that any T of
//! them recover it and any T-1 reveal nothing. Arithmetic happens in
//! GF(2^d) for d a multiple of 8 chosen from the secret length or set
//! explicitly; shares travel as `[token-]index-hex` text lines. Before
//! splitting, the secret is normally passed through an XTEA-based
//! all-or-nothing transform so that partial knowledge of the polynomial
//! coefficients carries no information about low-entropy secrets.
//!
//! The crate is the engine only: callers drive prompting, echo handling
//! and entropy policy. Randomness is injected as `RngCore + CryptoRng`,
//! with [`rand::rngs::OsRng`] the intended production source.
//!
//! ```
//! use rand::rngs::OsRng;
//! use ssss::{Combiner, SecretFormat, Splitter};
//!
//! let shares = Splitter::new(2, 3)
//!     .unwrap()
//!     .with_format(SecretFormat::Hex)
//!     .split("1f2e3d4c5b6a7988", &mut OsRng)
//!     .unwrap();
//! let secret = Combiner::new(2).unwrap().combine(&shares[..2]).unwrap();
//! assert_eq!(secret.render(SecretFormat::Hex), "1f2e3d4c5b6a7988");
//! ```

pub mod combine;
pub mod diffusion;
pub mod secret;
pub mod share;
pub mod split;

pub use combine::Combiner;
pub use secret::{Secret, SecretFormat};
pub use share::Share;
pub use split::Splitter;

use thiserror::Error;

/// Fatal failures of a split or combine operation.
///
/// None of these are recoverable; advisory conditions (implicit hex
/// padding, non-printable bytes, diffusion skipped for small fields) are
/// reported through `tracing::warn!` instead and never alter results.
#[derive(Debug, Error)]
pub enum Error {
    /// Threshold, share count, security level or token out of range.
    #[error("invalid parameters: {0}")]
    InvalidParameter(String),

    /// The secret does not fit in the chosen field.
    #[error("input string too long for a {degree} bit security level")]
    InputTooLong { degree: usize },

    /// A share or hex string could not be parsed.
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Shares of one quorum report different security levels.
    #[error("shares have different security levels")]
    MismatchedShares,

    /// The quorum does not determine a secret, e.g. a share was used
    /// twice.
    #[error("shares inconsistent; perhaps a single share was used twice")]
    InconsistentShares,

    /// The random source could not provide the requested bytes.
    #[error("could not read from the random source")]
    EntropyFailure(#[source] rand::Error),

    /// Reading or writing the share stream failed.
    #[error("i/o error while processing shares")]
    IOFailure(#[from] std::io::Error),
}

impl From<ssss_math::Error> for Error {
    fn from(e: ssss_math::Error) -> Self {
        match e {
            // A singular system (or a zero pivot reaching inversion) means
            // the quorum was bad, not the arithmetic.
            ssss_math::Error::SingularSystem | ssss_math::Error::DivisionByZero => {
                Error::InconsistentShares
            }
            ssss_math::Error::InvalidDegree(_) | ssss_math::Error::ValueTooWide { .. } => {
                Error::InvalidParameter(e.to_string())
            }
        }
    }
}

/// Convenience wrapper around `std::result::Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;
