use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::InvalidDocument;
use crate::{Cnh, Cnpj, Cns, Cpf, Plate};

/// The document types the engine understands, for callers that dispatch
/// on a runtime keyword (front ends, fixture loaders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
    Cnh,
    Cns,
    Plate,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Cpf,
        DocumentKind::Cnpj,
        DocumentKind::Cnh,
        DocumentKind::Cns,
        DocumentKind::Plate,
    ];

    /// The lowercase keyword used to select this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            DocumentKind::Cpf => "cpf",
            DocumentKind::Cnpj => "cnpj",
            DocumentKind::Cnh => "cnh",
            DocumentKind::Cns => "cns",
            DocumentKind::Plate => "plate",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Validate `input` against this kind's rules.
    pub fn is_valid(self, input: &str) -> bool {
        match self {
            DocumentKind::Cpf => Cpf::is_valid(input),
            DocumentKind::Cnpj => Cnpj::is_valid(input),
            DocumentKind::Cnh => Cnh::is_valid(input),
            DocumentKind::Cns => Cns::is_valid(input),
            DocumentKind::Plate => Plate::is_valid(input),
        }
    }

    /// Parse `input` and render its canonical formatted form.
    pub fn canonicalize(self, input: &str) -> Result<String, InvalidDocument> {
        match self {
            DocumentKind::Cpf => Cpf::parse(input).map(|doc| doc.to_string()),
            DocumentKind::Cnpj => Cnpj::parse(input).map(|doc| doc.to_string()),
            DocumentKind::Cnh => Cnh::parse(input).map(|doc| doc.to_string()),
            DocumentKind::Cns => Cns::parse(input).map(|doc| doc.to_string()),
            DocumentKind::Plate => Plate::parse(input).map(|doc| doc.to_string()),
        }
    }

    /// Generate a fresh valid document and render its canonical form.
    pub fn generate<R: Rng>(self, rng: &mut R) -> String {
        match self {
            DocumentKind::Cpf => Cpf::generate(rng).to_string(),
            DocumentKind::Cnpj => Cnpj::generate(rng).to_string(),
            DocumentKind::Cnh => Cnh::generate(rng).to_string(),
            DocumentKind::Cns => Cns::generate(rng).to_string(),
            DocumentKind::Plate => Plate::generate(rng).to_string(),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let acronym = match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
            DocumentKind::Cnh => "CNH",
            DocumentKind::Cns => "CNS",
            DocumentKind::Plate => "license plate",
        };
        f.write_str(acronym)
    }
}

impl FromStr for DocumentKind {
    type Err = UnknownDocumentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| UnknownDocumentKind(s.to_string()))
    }
}

/// A keyword that names none of the supported document types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document kind: {0}")]
pub struct UnknownDocumentKind(pub String);
