use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ascii::{is_alnum_upper, is_digit, is_upper_alpha};
use crate::document::DocumentKind;
use crate::error::InvalidDocument;

const SLOT_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A validated vehicle license plate, legacy (`LLL-DDDD`) or Mercosul
/// (`LLL-DADD`, with a letter in the second numeric slot).
///
/// Stored in its 7-character compact form; `Display` renders the
/// canonical hyphenated representation. A `.` separator is accepted on
/// input and renormalized to `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plate {
    slots: [u8; 7],
}

impl Plate {
    pub const COMPACT_LEN: usize = 7;
    pub const FORMATTED_LEN: usize = 8;

    /// Parse `XXXXXXX`, `XXX-XXXX`, or `XXX.XXXX`.
    pub fn parse(input: &str) -> Result<Self, InvalidDocument> {
        scan(input.as_bytes())
            .map(|slots| Self { slots })
            .ok_or_else(|| InvalidDocument::new(DocumentKind::Plate, input.len()))
    }

    /// Whether `input` holds a well-formed plate. Agrees with
    /// [`Plate::parse`] on every input.
    pub fn is_valid(input: &str) -> bool {
        scan(input.as_bytes()).is_some()
    }

    /// Three random letters, a digit, an alphanumeric slot, and two
    /// trailing digits — covering both legacy and Mercosul layouts.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut slots = [0_u8; 7];
        for slot in slots.iter_mut().take(3) {
            *slot = b'A' + rng.random_range(0..26);
        }
        slots[3] = b'0' + rng.random_range(0..10);
        slots[4] = SLOT_ALPHABET[rng.random_range(0..SLOT_ALPHABET.len())];
        slots[5] = b'0' + rng.random_range(0..10);
        slots[6] = b'0' + rng.random_range(0..10);
        Self { slots }
    }

    /// The 7-character compact form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.slots).unwrap_or("")
    }

    /// The canonical `XXX-XXXX` form.
    pub fn formatted(&self) -> String {
        let s = &self.slots;
        let mut out = [0_u8; Self::FORMATTED_LEN];
        out[..3].copy_from_slice(&s[..3]);
        out[3] = b'-';
        out[4..].copy_from_slice(&s[3..]);
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn scan(input: &[u8]) -> Option<[u8; 7]> {
    let compact: [u8; 7] = match input.len() {
        7 => input.try_into().ok()?,
        8 => {
            if input[3] != b'-' && input[3] != b'.' {
                return None;
            }
            let mut out = [0_u8; 7];
            out[..3].copy_from_slice(&input[..3]);
            out[3..].copy_from_slice(&input[4..]);
            out
        }
        _ => return None,
    };

    for (i, &b) in compact.iter().enumerate() {
        let in_class = match i {
            0..=2 => is_upper_alpha(b),
            4 => is_alnum_upper(b),
            _ => is_digit(b),
        };
        if !in_class {
            return None;
        }
    }
    Some(compact)
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Plate {
    type Err = InvalidDocument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Plate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Plate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
