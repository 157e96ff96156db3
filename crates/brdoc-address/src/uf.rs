use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A Brazilian federative unit (Unidade Federativa), backed by its IBGE
/// numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Uf {
    Ro = 11,
    Ac = 12,
    Am = 13,
    Rr = 14,
    Pa = 15,
    Ap = 16,
    To = 17,
    Ma = 21,
    Pi = 22,
    Ce = 23,
    Rn = 24,
    Pb = 25,
    Pe = 26,
    Al = 27,
    Se = 28,
    Ba = 29,
    Mg = 31,
    Es = 32,
    Rj = 33,
    Sp = 35,
    Pr = 41,
    Sc = 42,
    Rs = 43,
    Ms = 50,
    Mt = 51,
    Go = 52,
    Df = 53,
}

impl Uf {
    pub const ALL: [Uf; 27] = [
        Uf::Ro,
        Uf::Ac,
        Uf::Am,
        Uf::Rr,
        Uf::Pa,
        Uf::Ap,
        Uf::To,
        Uf::Ma,
        Uf::Pi,
        Uf::Ce,
        Uf::Rn,
        Uf::Pb,
        Uf::Pe,
        Uf::Al,
        Uf::Se,
        Uf::Ba,
        Uf::Mg,
        Uf::Es,
        Uf::Rj,
        Uf::Sp,
        Uf::Pr,
        Uf::Sc,
        Uf::Rs,
        Uf::Ms,
        Uf::Mt,
        Uf::Go,
        Uf::Df,
    ];

    /// Look up a UF by its IBGE numeric code (11..=53, non-contiguous).
    pub fn from_code(code: u8) -> Result<Self, AddressError> {
        Uf::ALL
            .into_iter()
            .find(|uf| uf.code() == code)
            .ok_or_else(|| AddressError::InvalidUf(code.to_string()))
    }

    /// The IBGE numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The two-letter abbreviation, such as `RJ` and `SP`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Uf::Ro => "RO",
            Uf::Ac => "AC",
            Uf::Am => "AM",
            Uf::Rr => "RR",
            Uf::Pa => "PA",
            Uf::Ap => "AP",
            Uf::To => "TO",
            Uf::Ma => "MA",
            Uf::Pi => "PI",
            Uf::Ce => "CE",
            Uf::Rn => "RN",
            Uf::Pb => "PB",
            Uf::Pe => "PE",
            Uf::Al => "AL",
            Uf::Se => "SE",
            Uf::Ba => "BA",
            Uf::Mg => "MG",
            Uf::Es => "ES",
            Uf::Rj => "RJ",
            Uf::Sp => "SP",
            Uf::Pr => "PR",
            Uf::Sc => "SC",
            Uf::Rs => "RS",
            Uf::Ms => "MS",
            Uf::Mt => "MT",
            Uf::Go => "GO",
            Uf::Df => "DF",
        }
    }

    /// The full state name, such as `Rio de Janeiro`.
    pub fn name(self) -> &'static str {
        match self {
            Uf::Ro => "Rondônia",
            Uf::Ac => "Acre",
            Uf::Am => "Amazonas",
            Uf::Rr => "Roraima",
            Uf::Pa => "Pará",
            Uf::Ap => "Amapá",
            Uf::To => "Tocantins",
            Uf::Ma => "Maranhão",
            Uf::Pi => "Piauí",
            Uf::Ce => "Ceará",
            Uf::Rn => "Rio Grande do Norte",
            Uf::Pb => "Paraíba",
            Uf::Pe => "Pernambuco",
            Uf::Al => "Alagoas",
            Uf::Se => "Sergipe",
            Uf::Ba => "Bahia",
            Uf::Mg => "Minas Gerais",
            Uf::Es => "Espírito Santo",
            Uf::Rj => "Rio de Janeiro",
            Uf::Sp => "São Paulo",
            Uf::Pr => "Paraná",
            Uf::Sc => "Santa Catarina",
            Uf::Rs => "Rio Grande do Sul",
            Uf::Ms => "Mato Grosso do Sul",
            Uf::Mt => "Mato Grosso",
            Uf::Go => "Goiás",
            Uf::Df => "Distrito Federal",
        }
    }
}

/// Lowercase, strip spaces, and fold the accented vowels (plus cedilla)
/// that occur in state names, so `São Paulo`, `sao paulo`, and
/// `saopaulo` all compare equal.
fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let folded = match ch {
            'á' | 'â' | 'ã' | 'Á' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            ' ' => continue,
            _ => ch.to_ascii_lowercase(),
        };
        out.push(folded);
    }
    out
}

impl FromStr for Uf {
    type Err = AddressError;

    /// Accepts the two-letter abbreviation or the full state name,
    /// case-insensitively, with or without accents and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slug(s);
        Uf::ALL
            .into_iter()
            .find(|uf| slug(uf.abbreviation()) == wanted || slug(uf.name()) == wanted)
            .ok_or_else(|| AddressError::InvalidUf(s.to_string()))
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl Serialize for Uf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbreviation())
    }
}

impl<'de> Deserialize<'de> for Uf {
    /// Accepts the abbreviation, the full name, or the IBGE numeric code.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UfVisitor)
    }
}

struct UfVisitor;

impl Visitor<'_> for UfVisitor {
    type Value = Uf;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a uf abbreviation, state name, or numeric code")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Uf, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Uf, E> {
        let code = u8::try_from(value).map_err(E::custom)?;
        Uf::from_code(code).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Uf, E> {
        let code = u8::try_from(value).map_err(E::custom)?;
        Uf::from_code(code).map_err(E::custom)
    }
}
