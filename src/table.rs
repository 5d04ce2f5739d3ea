use std::collections::HashMap;
use std::fmt::Write as _;

use log::{debug, warn};

use crate::column::Column;
use crate::cursor::RowCursor;
use crate::error::{Error, Result};
use crate::value::Value;

/// Ordered collection of same-length columns.
///
/// Columns are addressable by insertion index or by name. The name→index
/// map is only rebuilt inside [`Table::add_column`], which needs `&mut self`,
/// so readers (including every live [`RowCursor`]) see a frozen snapshot
/// without any synchronisation.
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Creates an empty table with room for `columns` columns.
    pub fn with_capacity(name: impl Into<String>, columns: usize) -> Self {
        let name = name.into();
        debug!("created table '{}'", name);
        Self {
            name,
            columns: Vec::with_capacity(columns),
            index: HashMap::with_capacity(columns),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a column using builder-style chaining.
    pub fn with_column(mut self, column: impl Into<Column>) -> Result<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    /// Appends `column` to the table.
    ///
    /// Fails with [`Error::DuplicateName`] when the name is taken and with
    /// [`Error::SchemaMismatch`] when the column's length differs from the
    /// table's row count. The table is unchanged on failure.
    pub fn add_column(&mut self, column: impl Into<Column>) -> Result<&mut Self> {
        let column = column.into();
        if self.index.contains_key(column.name()) {
            warn!("table '{}' rejected duplicate column '{}'", self.name, column.name());
            return Err(Error::duplicate_name(column.name()));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            warn!(
                "table '{}' rejected column '{}' with {} rows, expected {}",
                self.name,
                column.name(),
                column.len(),
                self.row_count()
            );
            return Err(Error::schema_mismatch(column.name(), self.row_count(), column.len()));
        }
        debug!(
            "table '{}' added column '{}' ({}) at index {}",
            self.name,
            column.name(),
            column.kind(),
            self.columns.len()
        );
        self.index.insert(column.name().to_string(), self.columns.len());
        self.columns.push(column);
        Ok(self)
    }

    /// Appends one value per column, in column order.
    ///
    /// Arity and every value's kind are checked before any column is touched,
    /// so a rejected row leaves all columns at their previous length.
    pub fn append_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::schema_mismatch(
                format!("row {}", self.row_count()),
                self.columns.len(),
                row.len(),
            ));
        }
        for (value, column) in row.iter().zip(&self.columns) {
            if value.kind() != column.kind() {
                return Err(Error::type_mismatch(column.name(), value.kind(), column.kind()));
            }
        }
        for (value, column) in row.into_iter().zip(self.columns.iter_mut()) {
            column.append(value)?;
        }
        Ok(())
    }

    /// Resolves `name` to its insertion index.
    #[inline]
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_column(name))
    }

    /// Returns the number of rows shared by every column.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    #[inline]
    pub fn column_at(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or_else(|| {
            Error::index_out_of_range(
                format!("table '{}' column", self.name),
                index,
                self.columns.len(),
            )
        })
    }

    #[inline]
    pub fn column_by_name(&self, name: &str) -> Result<&Column> {
        let index = self.column_index(name)?;
        self.column_at(index)
    }

    /// Iterates the columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Returns the column names in order of insertion.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Starts a cursor positioned before the first row.
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor::new(self)
    }

    /// Describes the schema, one line per column.
    pub fn structure(&self) -> String {
        let width = self
            .columns
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        let mut output = format!("Structure of {}\n", self.name);
        let _ = writeln!(output, "{:<5} {:<width$} Type", "Index", "Column", width = width);
        for (index, column) in self.columns.iter().enumerate() {
            let _ = writeln!(
                output,
                "{:<5} {:<width$} {}",
                index,
                column.name(),
                column.kind(),
                width = width
            );
        }
        output
    }

    /// Summarises the table's dimensions.
    pub fn shape(&self) -> String {
        format!(
            "{}: {} rows X {} cols",
            self.name,
            self.row_count(),
            self.column_count()
        )
    }
}
