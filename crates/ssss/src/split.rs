//! Splitting a secret into shares.

use crate::diffusion;
use crate::secret::{self, Secret, SecretFormat};
use crate::share::Share;
use crate::{Error, Result};
use itertools::Itertools;
use rand::{CryptoRng, RngCore};
use ssss_math::gf2::{self, poly::horner};
use ssss_math::Field;
use tracing::warn;
use zeroize::Zeroizing;

/// Largest number of shares a secret can be split into.
pub const MAX_SHARES: usize = 255;

/// Longest accepted share token.
pub const MAX_TOKEN_LEN: usize = 128;

/// Configuration for one split operation.
///
/// Built with [`Splitter::new`] and refined with the `with_*` methods;
/// every parameter is validated where it is set, so a constructed
/// splitter can only fail on the secret itself or on the random source.
#[derive(Debug, Clone)]
pub struct Splitter {
    threshold: usize,
    count: usize,
    security: usize,
    format: SecretFormat,
    diffusion: bool,
    token: Option<String>,
}

impl Splitter {
    /// Creates a `(threshold, count)` scheme: `count` shares of which any
    /// `threshold` recover the secret.
    ///
    /// Requires `2 <= threshold <= count <= MAX_SHARES`. Defaults:
    /// dynamic security level, ASCII secrets, diffusion on, no token.
    pub fn new(threshold: usize, count: usize) -> Result<Self> {
        if threshold < 2 {
            return Err(Error::InvalidParameter("invalid threshold value".into()));
        }
        if count < threshold {
            return Err(Error::InvalidParameter(
                "number of shares smaller than threshold".into(),
            ));
        }
        if count > MAX_SHARES {
            return Err(Error::InvalidParameter(format!(
                "number of shares larger than {MAX_SHARES}"
            )));
        }
        Ok(Self {
            threshold,
            count,
            security: 0,
            format: SecretFormat::Ascii,
            diffusion: true,
            token: None,
        })
    }

    /// Sets the security level in bits; 0 derives it from the secret
    /// length at split time.
    pub fn with_security(mut self, security: usize) -> Result<Self> {
        if security != 0 && !gf2::degree_valid(security) {
            return Err(Error::InvalidParameter("invalid security level".into()));
        }
        self.security = security;
        Ok(self)
    }

    /// Sets how the secret string is interpreted.
    pub fn with_format(mut self, format: SecretFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables the all-or-nothing diffusion layer. The
    /// combining side must use the same setting.
    pub fn with_diffusion(mut self, diffusion: bool) -> Self {
        self.diffusion = diffusion;
        self
    }

    /// Sets a token to prefix every share with: at most
    /// [`MAX_TOKEN_LEN`] printable characters, no `-`.
    pub fn with_token(mut self, token: Option<String>) -> Result<Self> {
        if let Some(token) = &token {
            if token.len() > MAX_TOKEN_LEN {
                return Err(Error::InvalidParameter("token too long".into()));
            }
            if token.is_empty() || !token.chars().all(|c| (' '..'\x7f').contains(&c) && c != '-') {
                return Err(Error::InvalidParameter(
                    "token must be printable and must not contain '-'".into(),
                ));
            }
        }
        self.token = token;
        Ok(self)
    }

    /// Splits `secret` into shares, drawing the random coefficients from
    /// `rng`.
    ///
    /// Shares are returned in ascending index order. All coefficient and
    /// entropy buffers are zeroized before this returns.
    pub fn split<R: RngCore + CryptoRng>(&self, secret: &str, rng: &mut R) -> Result<Vec<Share>> {
        let degree = if self.security != 0 {
            self.security
        } else {
            let degree = secret::dynamic_degree(secret, self.format);
            if !gf2::degree_valid(degree) {
                return Err(Error::InvalidParameter(
                    "security level invalid (secret too long?)".into(),
                ));
            }
            degree
        };
        let field = Field::new(degree)?;

        let imported = Secret::parse(secret, self.format, degree)?;
        let mut constant = imported.bits().clone();
        if self.diffusion {
            if degree >= diffusion::MIN_DEGREE {
                diffusion::encode(&mut constant, degree);
            } else {
                warn!("security level too small for the diffusion layer");
            }
        }

        let mut coeffs = Zeroizing::new(Vec::with_capacity(self.threshold));
        coeffs.push(constant);
        let mut buf = Zeroizing::new(vec![0u8; degree / 8]);
        for _ in 1..self.threshold {
            rng.try_fill_bytes(&mut buf).map_err(Error::EntropyFailure)?;
            coeffs.push(field.element_from_bytes(&buf)?);
        }

        let shares = (1..=self.count as u32)
            .map(|index| {
                let x = field.element_from_u64(u64::from(index));
                let y = horner(&field, &coeffs, &x);
                Share::new(self.token.clone(), index, y, degree)
            })
            .collect_vec();
        Ok(shares)
    }
}
