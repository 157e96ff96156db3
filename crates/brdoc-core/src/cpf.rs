use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ascii::is_digit;
use crate::checksum::check_digit;
use crate::document::DocumentKind;
use crate::error::InvalidDocument;

const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// A validated CPF (individual taxpayer registry number).
///
/// Stored in its 11-digit compact form; `Display` renders the canonical
/// `XXX.XXX.XXX-XX` representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf {
    digits: [u8; 11],
}

impl Cpf {
    pub const COMPACT_LEN: usize = 11;
    pub const FORMATTED_LEN: usize = 14;

    /// Parse either the compact (`45317828791`) or the formatted
    /// (`453.178.287-91`) representation.
    pub fn parse(input: &str) -> Result<Self, InvalidDocument> {
        scan(input.as_bytes())
            .map(|digits| Self { digits })
            .ok_or_else(|| InvalidDocument::new(DocumentKind::Cpf, input.len()))
    }

    /// Whether `input` holds a well-formed CPF. Agrees with [`Cpf::parse`]
    /// on every input.
    pub fn is_valid(input: &str) -> bool {
        scan(input.as_bytes()).is_some()
    }

    /// Draw nine random digits and append both check digits.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut values = [0_u8; 11];
        for value in values.iter_mut().take(9) {
            *value = rng.random_range(0..=9);
        }
        values[9] = check_digit(&values[..9], &FIRST_WEIGHTS);
        let mut head = [0_u8; 10];
        head.copy_from_slice(&values[..10]);
        values[10] = check_digit(&head, &SECOND_WEIGHTS);

        let mut digits = [0_u8; 11];
        for (digit, &value) in digits.iter_mut().zip(&values) {
            *digit = b'0' + value;
        }
        Self { digits }
    }

    /// The 11-digit compact form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or("")
    }

    /// The canonical `XXX.XXX.XXX-XX` form.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        let mut out = [0_u8; Self::FORMATTED_LEN];
        out[..3].copy_from_slice(&d[..3]);
        out[3] = b'.';
        out[4..7].copy_from_slice(&d[3..6]);
        out[7] = b'.';
        out[8..11].copy_from_slice(&d[6..9]);
        out[11] = b'-';
        out[12..].copy_from_slice(&d[9..]);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Validate structure and both check digits, returning the compact bytes.
fn scan(input: &[u8]) -> Option<[u8; 11]> {
    let compact: [u8; 11] = match input.len() {
        11 => input.try_into().ok()?,
        14 => {
            if input[3] != b'.' || input[7] != b'.' || input[11] != b'-' {
                return None;
            }
            let mut out = [0_u8; 11];
            let mut n = 0;
            for (i, &b) in input.iter().enumerate() {
                if i == 3 || i == 7 || i == 11 {
                    continue;
                }
                out[n] = b;
                n += 1;
            }
            out
        }
        _ => return None,
    };

    let mut values = [0_u8; 11];
    for (value, &b) in values.iter_mut().zip(&compact) {
        if !is_digit(b) {
            return None;
        }
        *value = b - b'0';
    }

    let d1 = check_digit(&values[..9], &FIRST_WEIGHTS);
    let mut head = [0_u8; 10];
    head[..9].copy_from_slice(&values[..9]);
    head[9] = d1;
    let d2 = check_digit(&head, &SECOND_WEIGHTS);

    (values[9] == d1 && values[10] == d2).then_some(compact)
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cpf {
    type Err = InvalidDocument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
