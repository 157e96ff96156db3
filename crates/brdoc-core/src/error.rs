use thiserror::Error;

use crate::document::DocumentKind;

/// Rejection of a candidate document string.
///
/// Every validator recognizes a single failure class covering wrong length,
/// misplaced separators, out-of-alphabet bytes, and checksum mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {kind} input of length {length}")]
pub struct InvalidDocument {
    kind: DocumentKind,
    length: usize,
}

impl InvalidDocument {
    pub(crate) fn new(kind: DocumentKind, length: usize) -> Self {
        Self { kind, length }
    }

    /// The document type the input was validated against.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Byte length of the rejected input.
    pub fn length(&self) -> usize {
        self.length
    }
}
