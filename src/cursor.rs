//! Row cursors over a [`Table`].
//!
//! A [`RowCursor`] is a shared borrow of its table plus one position. It never
//! allocates while scanning, and many cursors can walk the same table at
//! once, each with its own position.
//!
//! Every accessor resolves its column again through the table, by name or by
//! index, on each call. Nothing resolved is cached between calls. A scan
//! therefore pays one map or slice lookup plus one storage read per field,
//! which is the per-access cost scan benchmarks built on this crate measure.
//! Caching the resolved column would change that number, so don't.

use std::fmt;

use time::PrimitiveDateTime;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::packed::PackedDateTime;
use crate::table::Table;
use crate::value::Value;

/// Where a cursor stands relative to its table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// No row read yet.
    BeforeStart,
    /// Positioned on a row.
    Iterating,
    /// `next` was called with no rows left. Terminal until [`RowCursor::reset`].
    Exhausted,
}

impl CursorState {
    pub fn as_str(self) -> &'static str {
        match self {
            CursorState::BeforeStart => "before start",
            CursorState::Iterating => "iterating",
            CursorState::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeStart,
    At(usize),
    Exhausted,
}

/// Anything a cursor accessor can use to find a column.
pub trait ColumnRef {
    fn resolve(self, table: &Table) -> Result<&Column>;
}

impl ColumnRef for &str {
    #[inline]
    fn resolve(self, table: &Table) -> Result<&Column> {
        table.column_by_name(self)
    }
}

impl ColumnRef for &String {
    #[inline]
    fn resolve(self, table: &Table) -> Result<&Column> {
        table.column_by_name(self)
    }
}

impl ColumnRef for usize {
    #[inline]
    fn resolve(self, table: &Table) -> Result<&Column> {
        table.column_at(self)
    }
}

/// Sequential, typed access to the rows of a [`Table`].
///
/// ```
/// use rowscan::{Column, Table, Value};
///
/// let mut table = Table::new("prices");
/// table.add_column(Column::number("low"))?;
/// table.append_row(vec![Value::Number(1.5)])?;
///
/// let mut row = table.cursor();
/// while row.has_next() {
///     row.next()?;
///     assert_eq!(row.get_double("low")?, row.get_double(0)?);
/// }
/// # Ok::<(), rowscan::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RowCursor<'t> {
    table: &'t Table,
    position: Position,
}

impl<'t> RowCursor<'t> {
    /// Creates a cursor positioned before the first row of `table`.
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            position: Position::BeforeStart,
        }
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }

    pub fn state(&self) -> CursorState {
        match self.position {
            Position::BeforeStart => CursorState::BeforeStart,
            Position::At(_) => CursorState::Iterating,
            Position::Exhausted => CursorState::Exhausted,
        }
    }

    /// Returns the current row, if the cursor is on one.
    pub fn row_number(&self) -> Option<usize> {
        match self.position {
            Position::At(row) => Some(row),
            _ => None,
        }
    }

    /// Reports whether another call to [`RowCursor::next`] would succeed.
    #[inline]
    pub fn has_next(&self) -> bool {
        let rows = self.table.row_count();
        match self.position {
            Position::BeforeStart => rows > 0,
            Position::At(row) => row + 1 < rows,
            Position::Exhausted => false,
        }
    }

    /// Moves to the next row.
    ///
    /// With no rows left this fails with [`Error::NoSuchElement`] and the
    /// cursor becomes [`CursorState::Exhausted`].
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if !self.has_next() {
            self.position = Position::Exhausted;
            return Err(Error::NoSuchElement {
                row_count: self.table.row_count(),
            });
        }
        self.position = match self.position {
            Position::At(row) => Position::At(row + 1),
            _ => Position::At(0),
        };
        Ok(())
    }

    /// Jumps straight to `row`.
    pub fn at(&mut self, row: usize) -> Result<&mut Self> {
        let rows = self.table.row_count();
        if row >= rows {
            return Err(Error::index_out_of_range(
                format!("table '{}' row", self.table.name()),
                row,
                rows,
            ));
        }
        self.position = Position::At(row);
        Ok(self)
    }

    /// Puts the cursor back before the first row.
    pub fn reset(&mut self) {
        self.position = Position::BeforeStart;
    }

    #[inline]
    pub fn get_double(&self, column: impl ColumnRef) -> Result<f64> {
        let row = self.current_row()?;
        column.resolve(self.table)?.get_double(row)
    }

    /// Reads a number column and truncates toward zero, saturating at the
    /// `i32` bounds. NaN reads as 0.
    #[inline]
    pub fn get_int(&self, column: impl ColumnRef) -> Result<i32> {
        self.get_double(column).map(|value| value as i32)
    }

    #[inline]
    pub fn get_text(&self, column: impl ColumnRef) -> Result<&'t str> {
        let row = self.current_row()?;
        column.resolve(self.table)?.get_text(row)
    }

    #[inline]
    pub fn get_packed_temporal(&self, column: impl ColumnRef) -> Result<PackedDateTime> {
        let row = self.current_row()?;
        column.resolve(self.table)?.get_packed_temporal(row)
    }

    /// Reads a packed column and decodes it.
    pub fn get_date_time(&self, column: impl ColumnRef) -> Result<PrimitiveDateTime> {
        self.get_packed_temporal(column)?.to_date_time()
    }

    /// Reads any column as a [`Value`]. Text is cloned.
    pub fn get_value(&self, column: impl ColumnRef) -> Result<Value> {
        let row = self.current_row()?;
        column.resolve(self.table)?.get(row)
    }

    #[inline]
    fn current_row(&self) -> Result<usize> {
        match self.position {
            Position::At(row) => Ok(row),
            _ => Err(Error::IllegalCursorState {
                state: self.state(),
            }),
        }
    }
}
