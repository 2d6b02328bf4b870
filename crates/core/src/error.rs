use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while resolving configuration or decoding seed records.
///
/// Database errors are not represented here; the storage crate propagates
/// those directly.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("seed record is missing an integer `id` field")]
    MissingId,

    #[error("invalid column name in seed record: {0:?}")]
    InvalidColumn(String),

    #[error("unsupported value for column {column}: {value}")]
    UnsupportedValue { column: String, value: String },

    #[error("embedding column {0} is not a numeric array")]
    InvalidEmbedding(String),
}

pub type Result<T> = StdResult<T, SeedError>;
