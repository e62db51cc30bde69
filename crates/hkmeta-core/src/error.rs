use serde_json::error::Category;
use thiserror::Error;

/// Metadata contract errors exposed by `hkmeta-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("unknown metadata value type '{value}', expected one of string, date, double, int")]
    UnknownDiscriminant { value: String },

    #[error("corrupted field '{field}': invalid ISO8601 date string: '{value}'")]
    CorruptedValue { field: &'static str, value: String },

    #[error("double value must be finite: {value}")]
    NonFiniteDouble { value: String },

    #[error("instant is outside the ISO8601 representable range: {value}")]
    InstantOutOfRange { value: String },

    #[error("unsupported value for key '{key}': {type_name}")]
    UnsupportedValue { key: String, type_name: &'static str },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Well-formed JSON whose shape or content is not valid metadata.
    #[error("invalid metadata document: {0}")]
    Decode(serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Separates metadata contract violations from malformed JSON and I/O.
    pub fn from_decode(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Data => Self::Decode(error),
            Category::Io | Category::Syntax | Category::Eof => Self::Serialization(error),
        }
    }
}
