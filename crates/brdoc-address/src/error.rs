use thiserror::Error;

/// Errors produced by CEP parsing, UF lookup, and address resolution.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid cep input of length {length}")]
    InvalidCep { length: usize },
    #[error("invalid uf: {0}")]
    InvalidUf(String),
    #[error("invalid serialized address: {0}")]
    InvalidSerializedAddress(String),
    /// A provider answered definitively that the CEP maps to no address.
    #[error("no address registered for cep {cep}")]
    NotFound { cep: String },
    /// Every provider in the chain failed to answer.
    #[error("cep lookup failed: {0}")]
    Lookup(String),
}
