//! Error types for TableStore
//!
//! Store operations fail in exactly two ways: the table is missing, or the
//! record is missing. Inserting over an existing id is not an error.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The named table was never created (or has been dropped)
    #[error("table '{table}' does not exist")]
    TableNotFound { table: String },

    /// The table exists but holds no record under the id
    #[error("record '{id}' does not exist in table '{table}'")]
    RecordNotFound { table: String, id: String },
}

impl StoreError {
    pub(crate) fn table_not_found(table: &str) -> Self {
        StoreError::TableNotFound {
            table: table.to_string(),
        }
    }

    pub(crate) fn record_not_found(table: &str, id: &str) -> Self {
        StoreError::RecordNotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    /// True for `TableNotFound`
    pub fn is_table_not_found(&self) -> bool {
        matches!(self, StoreError::TableNotFound { .. })
    }

    /// True for `RecordNotFound`
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, StoreError::RecordNotFound { .. })
    }
}

/// Error parsing a text command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("invalid field '{0}': expected name=value")]
    InvalidField(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}
