use thiserror::Error;

use crate::cursor::CursorState;
use crate::value::ValueKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by columns, tables, cursors and the temporal codec.
///
/// Every failure is reported synchronously at the call site. Nothing in the
/// crate retries, and mutating operations leave their target untouched when
/// they fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("column '{column}' has {found} rows, table has {expected}")]
    SchemaMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' already exists")]
    DuplicateName { column: String },

    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    #[error("{target} index {index} out of range for length {len}")]
    IndexOutOfRange {
        target: String,
        index: usize,
        len: usize,
    },

    #[error("column '{column}' holds {found}, requested {expected}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("no rows left after {row_count}")]
    NoSuchElement { row_count: usize },

    #[error("cursor is {state}, no current row")]
    IllegalCursorState { state: CursorState },

    #[error("year {year} outside the packable range")]
    DateRangeOverflow { year: i64 },

    #[error("{raw:#x} is not a packed date-time")]
    InvalidPackedValue { raw: i64 },
}

impl Error {
    pub fn schema_mismatch(column: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::SchemaMismatch {
            column: column.into(),
            expected,
            found,
        }
    }

    pub fn duplicate_name(column: impl Into<String>) -> Self {
        Self::DuplicateName {
            column: column.into(),
        }
    }

    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    pub fn index_out_of_range(target: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            target: target.into(),
            index,
            len,
        }
    }

    pub fn type_mismatch(column: impl Into<String>, expected: ValueKind, found: ValueKind) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            found,
        }
    }
}
