//! Secret import and export in ASCII or hex.

use crate::{Error, Result};
use ssss_math::BigBits;
use std::fmt;
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// How a secret is read and written at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretFormat {
    /// Big-endian bytes of the text, one byte per character.
    #[default]
    Ascii,
    /// Base-16 digits, most significant first.
    Hex,
}

/// A secret bound to the field it lives in.
///
/// The bit pattern is erased on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bits: BigBits,
    degree: usize,
}

/// Security level implied by the input length when none was requested:
/// one byte of field per ASCII character, one nibble per hex digit
/// (rounded up to whole bytes).
pub fn dynamic_degree(input: &str, format: SecretFormat) -> usize {
    match format {
        SecretFormat::Ascii => 8 * input.len(),
        SecretFormat::Hex => 8 * input.len().div_ceil(2),
    }
}

impl Secret {
    /// Wraps an already-imported value.
    pub fn from_bits(bits: BigBits, degree: usize) -> Self {
        Self { bits, degree }
    }

    /// Imports a secret string into a d-bit value.
    ///
    /// ASCII input may hold at most d/8 bytes; bytes outside the printable
    /// range are accepted with a warning. Hex input may hold at most d/4
    /// digits and is padded on the left with a warning when shorter, for
    /// compatibility with shares produced from short inputs.
    pub fn parse(input: &str, format: SecretFormat, degree: usize) -> Result<Self> {
        let bits = match format {
            SecretFormat::Ascii => {
                let bytes = input.as_bytes();
                if bytes.len() > degree / 8 {
                    return Err(Error::InputTooLong { degree });
                }
                if bytes.iter().any(|b| *b < 32 || *b >= 127) {
                    warn!("binary data detected, use hex mode instead");
                }
                BigBits::from_bytes_be(bytes)
            }
            SecretFormat::Hex => {
                let width = degree / 4;
                if input.len() > width {
                    return Err(Error::InputTooLong { degree });
                }
                if !input.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(Error::InvalidSyntax(
                        "secret is not valid hexadecimal".into(),
                    ));
                }
                if input.len() < width {
                    warn!("input string too short, adding null padding on the left");
                }
                let padded = Zeroizing::new(format!("{input:0>width$}"));
                let bytes = Zeroizing::new(
                    hex::decode(padded.as_bytes())
                        .map_err(|e| Error::InvalidSyntax(e.to_string()))?,
                );
                BigBits::from_bytes_be(&bytes)
            }
        };
        Ok(Self { bits, degree })
    }

    /// The imported value.
    pub fn bits(&self) -> &BigBits {
        &self.bits
    }

    /// Field degree this secret was imported for.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Renders the secret for output.
    ///
    /// Hex output always spans the full d/4 digits, leading zeros
    /// included. ASCII output prints the significant bytes, replacing
    /// non-printable ones by `.` with a warning; the replacement never
    /// feeds back into the value.
    pub fn render(&self, format: SecretFormat) -> String {
        let bytes = Zeroizing::new(self.bits.to_bytes_be(self.degree / 8));
        match format {
            SecretFormat::Hex => hex::encode(bytes.as_slice()),
            SecretFormat::Ascii => {
                let start = bytes
                    .iter()
                    .position(|b| *b != 0)
                    .unwrap_or(bytes.len());
                let mut out = String::with_capacity(bytes.len() - start);
                let mut binary = false;
                for &b in &bytes[start..] {
                    if (32..127).contains(&b) {
                        out.push(b as char);
                    } else {
                        binary = true;
                        out.push('.');
                    }
                }
                if binary {
                    warn!("binary data detected, use hex mode instead");
                }
                out
            }
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never leak the value through debug logging.
        f.debug_struct("Secret")
            .field("degree", &self.degree)
            .field("bits", &"<redacted>")
            .finish()
    }
}
