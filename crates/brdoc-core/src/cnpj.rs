use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ascii::{is_alnum_upper, is_digit, to_upper_ascii};
use crate::checksum::check_digit;
use crate::document::DocumentKind;
use crate::error::InvalidDocument;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Alphabet of the 12 payload positions. The two check digits are always
/// decimal.
const PAYLOAD_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A validated CNPJ (company taxpayer registry number), including the
/// newer alphanumeric form.
///
/// Stored in its uppercase 14-position compact form; `Display` renders
/// the canonical `XX.XXX.XXX/XXXX-XX` representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cnpj {
    positions: [u8; 14],
}

impl Cnpj {
    pub const COMPACT_LEN: usize = 14;
    pub const FORMATTED_LEN: usize = 18;

    /// Parse either the compact (`33000167100246`) or the formatted
    /// (`33.000.167/1002-46`) representation. Payload letters are accepted
    /// in either case and folded to uppercase.
    pub fn parse(input: &str) -> Result<Self, InvalidDocument> {
        scan(input.as_bytes())
            .map(|positions| Self { positions })
            .ok_or_else(|| InvalidDocument::new(DocumentKind::Cnpj, input.len()))
    }

    /// Whether `input` holds a well-formed CNPJ. Agrees with
    /// [`Cnpj::parse`] on every input.
    pub fn is_valid(input: &str) -> bool {
        scan(input.as_bytes()).is_some()
    }

    /// Fill the 12 payload positions with random alphanumeric characters
    /// and append both check digits.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut positions = [0_u8; 14];
        for position in positions.iter_mut().take(12) {
            *position = PAYLOAD_ALPHABET[rng.random_range(0..PAYLOAD_ALPHABET.len())];
        }

        let mut values = [0_u8; 13];
        for (value, &b) in values.iter_mut().zip(&positions[..12]) {
            *value = b - b'0';
        }
        let d1 = check_digit(&values[..12], &FIRST_WEIGHTS);
        values[12] = d1;
        let d2 = check_digit(&values, &SECOND_WEIGHTS);
        positions[12] = b'0' + d1;
        positions[13] = b'0' + d2;
        Self { positions }
    }

    /// The uppercase 14-position compact form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.positions).unwrap_or("")
    }

    /// The canonical `XX.XXX.XXX/XXXX-XX` form.
    pub fn formatted(&self) -> String {
        let p = &self.positions;
        let mut out = [0_u8; Self::FORMATTED_LEN];
        out[..2].copy_from_slice(&p[..2]);
        out[2] = b'.';
        out[3..6].copy_from_slice(&p[2..5]);
        out[6] = b'.';
        out[7..10].copy_from_slice(&p[5..8]);
        out[10] = b'/';
        out[11..15].copy_from_slice(&p[8..12]);
        out[15] = b'-';
        out[16..].copy_from_slice(&p[12..]);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Validate structure and both check digits, returning the uppercase
/// compact bytes.
///
/// A payload letter contributes `byte - b'0'` under ASCII ordering, so
/// `A`..`Z` map to 17..42.
fn scan(input: &[u8]) -> Option<[u8; 14]> {
    let mut compact = [0_u8; 14];
    match input.len() {
        14 => {
            for (slot, &b) in compact.iter_mut().zip(input) {
                *slot = to_upper_ascii(b);
            }
        }
        18 => {
            if input[2] != b'.' || input[6] != b'.' || input[10] != b'/' || input[15] != b'-' {
                return None;
            }
            let mut n = 0;
            for (i, &b) in input.iter().enumerate() {
                if i == 2 || i == 6 || i == 10 || i == 15 {
                    continue;
                }
                compact[n] = to_upper_ascii(b);
                n += 1;
            }
        }
        _ => return None,
    }

    let mut values = [0_u8; 14];
    for (i, (value, &b)) in values.iter_mut().zip(&compact).enumerate() {
        let in_class = if i < 12 { is_alnum_upper(b) } else { is_digit(b) };
        if !in_class {
            return None;
        }
        *value = b - b'0';
    }

    let d1 = check_digit(&values[..12], &FIRST_WEIGHTS);
    let mut head = [0_u8; 13];
    head[..12].copy_from_slice(&values[..12]);
    head[12] = d1;
    let d2 = check_digit(&head, &SECOND_WEIGHTS);

    (values[12] == d1 && values[13] == d2).then_some(compact)
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cnpj {
    type Err = InvalidDocument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cnpj {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cnpj {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
