use serde::{ser::SerializeMap, Serialize, Serializer};
use thiserror::Error;

use crate::sql::{SyntaxError, ValidationError};

/// Errors surfaced to the query that triggered them. Nothing in this crate retries.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum Error {
    #[error("partition not found: {0:?}")]
    PartitionNotFound(String),
    /// A system view was given a row reader but never attached to a catalog.
    #[error("nil catalog for info schema table {0}")]
    CatalogNotAttached(String),
    #[error("database not found: {0}")]
    DatabaseNotFound(String),
    #[error("table not found: {database}.{table}")]
    TableNotFound { database: String, table: String },
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("invalid trigger `{name}`: {reason}")]
    MalformedTrigger { name: String, reason: String },
    #[error("invalid view `{name}`: {reason}")]
    MalformedView { name: String, reason: String },
    #[error("invalid stored procedure `{name}`: {reason}")]
    MalformedProcedure { name: String, reason: String },
    #[error("no statistics found for table {database}.{table}, run ANALYZE TABLE first")]
    StatisticsNotFound { database: String, table: String },
    #[error("no histogram found for column {database}.{table}.{column}")]
    HistogramNotFound {
        database: String,
        table: String,
        column: String,
    },
    #[error("invalid statistics edit: {0}")]
    InvalidStatisticsEdit(String),
    #[error("table {0} cannot be updated")]
    NotUpdatable(String),
    #[error("database {database} does not support {capability}")]
    UnsupportedCapability { database: String, capability: String },
    #[error("{0} `{1}` already exists")]
    AlreadyExists(&'static str, String),
    #[error("{0} `{1}` does not exist")]
    NotFound(&'static str, String),
    #[error("query was cancelled")]
    Cancelled,
    #[error("no database selected")]
    NoDatabaseSelected,
    /// The executor loop is gone, e.g. during shutdown.
    #[error("executor is not running")]
    ExecutorUnavailable,
    #[error("could not serialize value: {0}")]
    Serialization(String),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn kind(&self) -> &'static str {
        match self {
            Self::PartitionNotFound(_)
            | Self::CatalogNotAttached(_)
            | Self::ExecutorUnavailable
            | Self::Serialization(_) => "internal",
            Self::DatabaseNotFound(_)
            | Self::TableNotFound { .. }
            | Self::ColumnNotFound(_)
            | Self::NotFound(..)
            | Self::NoDatabaseSelected => "not_found",
            Self::MalformedTrigger { .. }
            | Self::MalformedView { .. }
            | Self::MalformedProcedure { .. } => "malformed_definition",
            Self::StatisticsNotFound { .. } | Self::HistogramNotFound { .. } => "statistics",
            Self::InvalidStatisticsEdit(_) | Self::NotUpdatable(_) => "update",
            Self::UnsupportedCapability { .. } => "unsupported",
            Self::AlreadyExists(..) => "conflict",
            Self::Cancelled => "cancelled",
            Self::Syntax(_) => "syntax",
            Self::Validation(_) => "validation",
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Syntax(error) => error.serialize(serializer),
            Self::Validation(error) => error.serialize(serializer),
            _ => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.kind())?;
                map.serialize_entry("message", &self.to_string())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_as_type_and_message() {
        let error = Error::StatisticsNotFound {
            database: "mydb".into(),
            table: "t".into(),
        };
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"type":"statistics","message":"no statistics found for table mydb.t, run ANALYZE TABLE first"}"#
        );
    }

    #[test]
    fn serialization_failures_are_internal() {
        let error = Error::Serialization("key must be a string".into());
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"type":"internal","message":"could not serialize value: key must be a string"}"#
        );
    }

    #[test]
    fn syntax_errors_keep_their_own_shape() {
        let error = Error::from(SyntaxError("Expected an identifier.".into()));
        assert_eq!(
            serde_json::to_string(&error).unwrap(),
            r#"{"type":"syntax","message":"Expected an identifier."}"#
        );
    }
}
