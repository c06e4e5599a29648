//! Error types for the report crate.

use crate::builder::BuildError;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("unknown report mode `{0}` (expected `rentals-and-films` or `authors`)")]
    UnknownMode(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Crate-wide error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to build statement: {0}")]
    Build(#[from] BuildError),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("failed to map row: {0}")]
    RowMapping(#[source] sqlx::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies an error returned while executing a statement and reading
    /// its rows.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => Error::RowMapping(err),
            _ => Error::Query(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
