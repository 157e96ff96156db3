use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ascii::is_digit;
use crate::checksum::mod11_digit;
use crate::document::DocumentKind;
use crate::error::InvalidDocument;

const FIRST_WEIGHTS: [u32; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];
const SECOND_WEIGHTS: [u32; 9] = [3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Weight of the first check digit in the second checksum pass.
const FIRST_DIGIT_WEIGHT: u32 = 2;

/// A validated CNH (driver's license number).
///
/// An 11-digit sequence with no separator form; the canonical string is
/// the digits themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnh {
    digits: [u8; 11],
}

impl Cnh {
    pub const LEN: usize = 11;

    pub fn parse(input: &str) -> Result<Self, InvalidDocument> {
        scan(input.as_bytes())
            .map(|digits| Self { digits })
            .ok_or_else(|| InvalidDocument::new(DocumentKind::Cnh, input.len()))
    }

    /// Whether `input` holds a well-formed CNH. Agrees with [`Cnh::parse`]
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
        let (d1, d2) = check_digits(&values[..9]);
        values[9] = d1;
        values[10] = d2;

        let mut digits = [0_u8; 11];
        for (digit, &value) in digits.iter_mut().zip(&values) {
            *digit = b'0' + value;
        }
        Self { digits }
    }

    /// The canonical 11-digit form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or("")
    }
}

/// Both check digits over the nine payload values.
///
/// The two weighted sums are accumulated in one scan; the second sum then
/// takes the first check digit as an extra term at weight 2, which is
/// arithmetically identical to a second full pass.
fn check_digits(payload: &[u8]) -> (u8, u8) {
    let mut sum1 = 0_u32;
    let mut sum2 = 0_u32;
    for (i, &value) in payload.iter().enumerate() {
        sum1 += u32::from(value) * FIRST_WEIGHTS[i];
        sum2 += u32::from(value) * SECOND_WEIGHTS[i];
    }
    let d1 = mod11_digit(sum1);
    sum2 += FIRST_DIGIT_WEIGHT * u32::from(d1);
    (d1, mod11_digit(sum2))
}

fn scan(input: &[u8]) -> Option<[u8; 11]> {
    let compact: [u8; 11] = input.try_into().ok()?;

    let mut values = [0_u8; 11];
    for (value, &b) in values.iter_mut().zip(&compact) {
        if !is_digit(b) {
            return None;
        }
        *value = b - b'0';
    }

    let (d1, d2) = check_digits(&values[..9]);
    (values[9] == d1 && values[10] == d2).then_some(compact)
}

impl fmt::Display for Cnh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_compact())
    }
}

impl FromStr for Cnh {
    type Err = InvalidDocument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cnh {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_compact())
    }
}

impl<'de> Deserialize<'de> for Cnh {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
