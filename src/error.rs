//! Error types for the vector codecs.
//!
//! Text problems surface as [`ParseError`], binary payload problems as
//! [`FormatError`], and scans of unsupported driver values as
//! [`UnsupportedTypeError`]. Sparse vectors that break their index invariants
//! are reported with [`InvalidVectorError`].

use thiserror::Error;

/// Malformed text representation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid input syntax for type {type_name}: \"{input}\"")]
    InvalidSyntax {
        type_name: &'static str,
        input: String,
    },

    #[error("invalid float literal \"{token}\" in {type_name}")]
    InvalidFloat {
        type_name: &'static str,
        token: String,
    },

    #[error("invalid integer literal \"{token}\" in {type_name}")]
    InvalidInteger {
        type_name: &'static str,
        token: String,
    },

    #[error("{type_name} text is not valid UTF-8")]
    NotUtf8 { type_name: &'static str },
}

/// Malformed binary payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected unused to be 0, not {0}")]
    NonZeroReserved(u32),

    #[error("{type_name} payload too short: need {expected} bytes, got {actual}")]
    Truncated {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{type_name} payload has {count} trailing bytes")]
    TrailingBytes { type_name: &'static str, count: usize },

    #[error("{type_name} cannot have more than {max} dimensions, got {actual}")]
    TooManyDimensions {
        type_name: &'static str,
        max: usize,
        actual: usize,
    },
}

/// A scan was handed a driver value that is neither bytes nor text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported data type: {kind}")]
pub struct UnsupportedTypeError {
    pub kind: &'static str,
}

/// Sparse vector index bookkeeping violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidVectorError {
    #[error("sparsevec index {index} out of bounds for {dimension} dimensions")]
    IndexOutOfBounds { index: i64, dimension: u32 },

    #[error("sparsevec indices must be in ascending order")]
    Unordered,

    #[error("sparsevec indices must not contain duplicates (index {0})")]
    Duplicate(u32),

    #[error("sparsevec cannot have more elements ({nnz}) than dimensions ({dimension})")]
    TooManyElements { nnz: u32, dimension: u32 },

    #[error("sparsevec cannot contain zero values (index {0})")]
    ZeroValue(u32),

    #[error("sparsevec indices and values differ in length ({indices} vs {values})")]
    LengthMismatch { indices: usize, values: usize },
}

/// Crate-level error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    #[error(transparent)]
    InvalidVector(#[from] InvalidVectorError),

    #[error("{0} type not found in the database")]
    MissingType(&'static str),

    #[error("no vector codec registered for oid {0}")]
    UnknownOid(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
