use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ascii::is_digit;
use crate::checksum::weighted_sum;
use crate::document::DocumentKind;
use crate::error::InvalidDocument;

/// Strictly descending weights over all 15 payload digits.
const WEIGHTS: [u32; 15] = [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// Accepted leading digits. The first digit encodes the card's issuing
/// regime and is constrained independently of the checksum.
const LEADING_DIGITS: [u8; 5] = [1, 2, 7, 8, 9];

/// A validated CNS (national health-card number).
///
/// Stored in its 15-digit compact form; `Display` renders the canonical
/// `XXX XXXX XXXX XXXX` representation. Unlike the other documents, CNS
/// validity is a single modulo-11-equals-zero test over the whole number
/// rather than a trailing check-digit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cns {
    digits: [u8; 15],
}

impl Cns {
    pub const COMPACT_LEN: usize = 15;
    pub const FORMATTED_LEN: usize = 18;

    /// Parse either the compact (`708521331850008`) or the formatted
    /// (`708 5213 3185 0008`) representation.
    pub fn parse(input: &str) -> Result<Self, InvalidDocument> {
        scan(input.as_bytes())
            .map(|digits| Self { digits })
            .ok_or_else(|| InvalidDocument::new(DocumentKind::Cns, input.len()))
    }

    /// Whether `input` holds a well-formed CNS. Agrees with [`Cns::parse`]
    /// on every input.
    pub fn is_valid(input: &str) -> bool {
        scan(input.as_bytes()).is_some()
    }

    /// Draw a valid leading digit plus ten random digits, then close the
    /// number with a tail that brings the weighted sum to a multiple
    /// of 11.
    ///
    /// When the naive check digit would be 10 the tail instead carries a 1
    /// at weight 2 and the digit is recomputed from the adjusted sum; the
    /// accepted value set depends on this exact repair.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut values = [0_u8; 15];
        values[0] = LEADING_DIGITS[rng.random_range(0..LEADING_DIGITS.len())];
        for value in values.iter_mut().take(11).skip(1) {
            *value = rng.random_range(0..=9);
        }

        let sum = weighted_sum(&values[..11], &WEIGHTS[..11]);
        let rest = sum % 11;
        let naive = 11 - rest;
        if naive == 10 {
            values[13] = 1;
            values[14] = (11 - ((sum + 2) % 11)) as u8;
        } else if naive < 11 {
            values[14] = naive as u8;
        }

        let mut digits = [0_u8; 15];
        for (digit, &value) in digits.iter_mut().zip(&values) {
            *digit = b'0' + value;
        }
        Self { digits }
    }

    /// The 15-digit compact form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or("")
    }

    /// The canonical `XXX XXXX XXXX XXXX` form.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        let mut out = [0_u8; Self::FORMATTED_LEN];
        out[..3].copy_from_slice(&d[..3]);
        out[3] = b' ';
        out[4..8].copy_from_slice(&d[3..7]);
        out[8] = b' ';
        out[9..13].copy_from_slice(&d[7..11]);
        out[13] = b' ';
        out[14..].copy_from_slice(&d[11..]);
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn scan(input: &[u8]) -> Option<[u8; 15]> {
    let compact: [u8; 15] = match input.len() {
        15 => input.try_into().ok()?,
        18 => {
            if input[3] != b' ' || input[8] != b' ' || input[13] != b' ' {
                return None;
            }
            let mut out = [0_u8; 15];
            let mut n = 0;
            for (i, &b) in input.iter().enumerate() {
                if i == 3 || i == 8 || i == 13 {
                    continue;
                }
                out[n] = b;
                n += 1;
            }
            out
        }
        _ => return None,
    };

    if !LEADING_DIGITS.contains(&compact[0].wrapping_sub(b'0')) {
        return None;
    }

    let mut values = [0_u8; 15];
    for (value, &b) in values.iter_mut().zip(&compact) {
        if !is_digit(b) {
            return None;
        }
        *value = b - b'0';
    }

    (weighted_sum(&values, &WEIGHTS) % 11 == 0).then_some(compact)
}

impl fmt::Display for Cns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cns {
    type Err = InvalidDocument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
