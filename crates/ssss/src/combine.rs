//! Recovering a secret from a quorum of shares.

use crate::diffusion;
use crate::secret::Secret;
use crate::share::Share;
use crate::{Error, Result};
use ndarray::Array2;
use ssss_math::gf2;
use ssss_math::solve::solve;
use ssss_math::{BigBits, Field};
use tracing::warn;
use zeroize::Zeroize;

/// Configuration for one reconstruction.
#[derive(Debug, Clone)]
pub struct Combiner {
    threshold: usize,
    diffusion: bool,
}

impl Combiner {
    /// Creates a combiner expecting exactly `threshold` shares.
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold < 2 {
            return Err(Error::InvalidParameter("invalid threshold value".into()));
        }
        Ok(Self {
            threshold,
            diffusion: true,
        })
    }

    /// Enables or disables the inverse diffusion step; must match the
    /// setting the shares were generated with.
    pub fn with_diffusion(mut self, diffusion: bool) -> Self {
        self.diffusion = diffusion;
        self
    }

    /// Recovers the secret from `threshold` shares.
    ///
    /// The shares fix the field degree through their hex width: all must
    /// agree and the width must name a supported field. Duplicate share
    /// indices surface as [`Error::InconsistentShares`] from the solver.
    pub fn combine(&self, shares: &[Share]) -> Result<Secret> {
        if shares.len() != self.threshold {
            return Err(Error::InvalidParameter(format!(
                "expected {} shares, got {}",
                self.threshold,
                shares.len()
            )));
        }
        let degree = shares[0].degree();
        if !gf2::degree_valid(degree) {
            return Err(Error::InvalidSyntax("share has illegal length".into()));
        }
        if shares.iter().any(|share| share.degree() != degree) {
            return Err(Error::MismatchedShares);
        }
        let field = Field::new(degree)?;

        // One column per share: powers of the index down to 1, then the
        // share value as the right-hand side.
        let t = self.threshold;
        let mut m = Array2::from_elem((t + 1, t), BigBits::zero());
        for (k, share) in shares.iter().enumerate() {
            let x = field.element_from_u64(u64::from(share.index));
            m[(t - 1, k)] = BigBits::one();
            for r in (0..t - 1).rev() {
                m[(r, k)] = field.mul(&m[(r + 1, k)], &x);
            }
            m[(t, k)] = share.value.clone();
        }

        let solved = solve(&field, &mut m);
        for entry in m.iter_mut() {
            entry.zeroize();
        }
        let mut bits = solved?;

        if self.diffusion {
            if degree >= diffusion::MIN_DEGREE {
                diffusion::decode(&mut bits, degree);
            } else {
                warn!("security level too small for the diffusion layer");
            }
        }
        Ok(Secret::from_bits(bits, degree))
    }
}
