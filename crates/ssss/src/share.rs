//! Share representation and the `[token-]index-hex` wire format.

use crate::{Error, Result};
use ssss_math::BigBits;
use std::fmt;
use std::str::FromStr;

/// One share of a split secret: an evaluation point and the polynomial
/// value there, optionally tagged with a free-form token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Token prefixed to the share line, if any.
    pub token: Option<String>,
    /// Evaluation point; always >= 1.
    pub index: u32,
    /// Polynomial value at `index`.
    pub value: BigBits,
    degree: usize,
}

impl Share {
    /// Assembles a share. The value must be reduced below 2^degree.
    pub fn new(token: Option<String>, index: u32, value: BigBits, degree: usize) -> Self {
        debug_assert!(index >= 1);
        debug_assert!(value.bit_len() <= degree);
        Self {
            token,
            index,
            value,
            degree,
        }
    }

    /// Security level in bits carried by this share, 4 bits per hex digit
    /// of the value field.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Formats the share line, left-padding the index to `index_width`
    /// digits (the width needed for the largest index of the batch).
    ///
    /// The value always spans exactly degree/4 lowercase hex digits.
    pub fn render(&self, index_width: usize) -> String {
        let index = format!("{:0width$}", self.index, width = index_width);
        let value = hex::encode(self.value.to_bytes_be(self.degree / 8));
        match &self.token {
            Some(token) => format!("{token}-{index}-{value}"),
            None => format!("{index}-{value}"),
        }
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(1))
    }
}

impl FromStr for Share {
    type Err = Error;

    /// Parses `index-hex` or `token-index-hex`. The index may carry
    /// leading zeros and any decimal value >= 1 is accepted, whatever
    /// width it was emitted with.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split('-').collect();
        let (token, index, value) = match fields.as_slice() {
            [index, value] => (None, *index, *value),
            [token, index, value] if !token.is_empty() => {
                (Some((*token).to_string()), *index, *value)
            }
            _ => {
                return Err(Error::InvalidSyntax(
                    "expected a share of the form [token-]index-value".into(),
                ))
            }
        };

        let index: u32 = index
            .parse()
            .map_err(|_| Error::InvalidSyntax("share index is not a decimal integer".into()))?;
        if index == 0 {
            return Err(Error::InvalidSyntax("share index must not be zero".into()));
        }

        if value.is_empty() {
            return Err(Error::InvalidSyntax("share value is empty".into()));
        }
        let bytes = hex::decode(value)
            .map_err(|_| Error::InvalidSyntax("share value is not valid hexadecimal".into()))?;

        Ok(Self {
            token,
            index,
            value: BigBits::from_bytes_be(&bytes),
            degree: 4 * value.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Share;
    use crate::Error;
    use ssss_math::BigBits;

    #[test]
    fn parses_index_and_value() {
        let share: Share = "2-deadbeef".parse().unwrap();
        assert_eq!(share.token, None);
        assert_eq!(share.index, 2);
        assert_eq!(share.value, BigBits::from_u64(0xdeadbeef));
        assert_eq!(share.degree(), 32);
    }

    #[test]
    fn parses_token_prefix() {
        let share: Share = "backup2024-17-00ff".parse().unwrap();
        assert_eq!(share.token.as_deref(), Some("backup2024"));
        assert_eq!(share.index, 17);
        assert_eq!(share.degree(), 16);
    }

    #[test]
    fn accepts_padded_index_and_uppercase_hex() {
        let share: Share = "007-DEADBEEF".parse().unwrap();
        assert_eq!(share.index, 7);
        assert_eq!(share.value, BigBits::from_u64(0xdeadbeef));
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "justonefield",
            "a-b-c-d",
            "0-ff",
            "-1-ff",
            "x-ff",
            "1-",
            "1-fff",
            "1-zz",
        ] {
            assert!(
                matches!(line.parse::<Share>(), Err(Error::InvalidSyntax(_))),
                "{line:?} should not parse"
            );
        }
    }

    #[test]
    fn render_pads_index_and_preserves_value_width() {
        let share = Share::new(None, 3, BigBits::from_u64(0x00ab), 16);
        assert_eq!(share.render(2), "03-00ab");
        assert_eq!(share.to_string(), "3-00ab");

        let tagged = Share::new(Some("tag".into()), 12, BigBits::from_u64(0x1), 8);
        assert_eq!(tagged.render(2), "tag-12-01");
    }

    #[test]
    fn render_parse_roundtrip() {
        let share = Share::new(Some("t0k3n".into()), 250, BigBits::from_u64(0x0102_0304), 32);
        let parsed: Share = share.render(3).parse().unwrap();
        assert_eq!(parsed, share);
    }
}
