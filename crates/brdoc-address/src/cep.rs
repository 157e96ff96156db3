use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A validated CEP (postal code).
///
/// Stored as its 8-digit compact form; `Display` renders the canonical
/// `XXXXX-XXX` representation. A CEP carries no checksum — validity here
/// means shape only, and says nothing about whether an address is
/// registered for it (that is [`crate::CepResolver`]'s job).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cep {
    digits: [u8; 8],
}

impl Cep {
    pub const COMPACT_LEN: usize = 8;
    pub const FORMATTED_LEN: usize = 9;

    /// Parse either `01310930` or `01310-930`.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        scan(input.as_bytes()).map(|digits| Self { digits }).ok_or(
            AddressError::InvalidCep {
                length: input.len(),
            },
        )
    }

    /// Whether `input` holds a well-formed CEP. Agrees with
    /// [`Cep::parse`] on every input.
    pub fn is_valid(input: &str) -> bool {
        scan(input.as_bytes()).is_some()
    }

    /// The 8-digit compact form.
    pub fn as_compact(&self) -> &str {
        std::str::from_utf8(&self.digits).unwrap_or("")
    }

    /// The canonical `XXXXX-XXX` form.
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        let mut out = [0_u8; Self::FORMATTED_LEN];
        out[..5].copy_from_slice(&d[..5]);
        out[5] = b'-';
        out[6..].copy_from_slice(&d[5..]);
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn scan(input: &[u8]) -> Option<[u8; 8]> {
    let compact: [u8; 8] = match input.len() {
        8 => input.try_into().ok()?,
        9 => {
            if input[5] != b'-' {
                return None;
            }
            let mut out = [0_u8; 8];
            out[..5].copy_from_slice(&input[..5]);
            out[5..].copy_from_slice(&input[6..]);
            out
        }
        _ => return None,
    };
    compact
        .iter()
        .all(|b| b.is_ascii_digit())
        .then_some(compact)
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cep {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
