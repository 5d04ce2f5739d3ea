use std::fmt;

use time::PrimitiveDateTime;

use crate::error::{Error, Result};
use crate::packed::PackedDateTime;
use crate::value::{Value, ValueKind};

/// Trait implemented by types that can be stored inside [`TableColumn`].
pub trait ColumnType:
    Clone + fmt::Debug + fmt::Display + Into<Value> + TryFrom<Value, Error = Value>
{
    const KIND: ValueKind;

    /// Wraps a typed column into the matching [`Column`] variant.
    fn into_column(column: TableColumn<Self>) -> Column;
}

macro_rules! impl_column_type {
    ($ty:ty, $kind:ident) => {
        impl ColumnType for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_column(column: TableColumn<Self>) -> Column {
                Column::$kind(column)
            }
        }
    };
}

impl_column_type!(String, Text);
impl_column_type!(f64, Number);
impl_column_type!(PackedDateTime, PackedTemporal);

/// Dense, append-only storage for one value type, backed by a `Vec<T>`.
#[derive(Debug, Clone)]
pub struct TableColumn<T: ColumnType> {
    name: String,
    values: Vec<T>,
}

impl<T: ColumnType> TableColumn<T> {
    /// Creates an empty column with the given `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Creates an empty column that can take `capacity` values before growing.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the typed view of the underlying values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Returns a reference to the value at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        self.values.get(index).ok_or_else(|| {
            Error::index_out_of_range(format!("column '{}'", self.name), index, self.values.len())
        })
    }
}

impl<T: ColumnType> Extend<T> for TableColumn<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// A named column holding exactly one [`ValueKind`].
///
/// The variant is the column's logical type. Typed readers check it on every
/// call and fail with [`Error::TypeMismatch`] instead of converting.
#[derive(Debug, Clone)]
pub enum Column {
    Text(TableColumn<String>),
    Number(TableColumn<f64>),
    PackedTemporal(TableColumn<PackedDateTime>),
}

impl Column {
    /// Creates an empty column of the given kind.
    pub fn new(kind: ValueKind, name: impl Into<String>) -> Self {
        Self::with_capacity(kind, name, 0)
    }

    /// Creates an empty column of the given kind with room for `capacity` values.
    pub fn with_capacity(kind: ValueKind, name: impl Into<String>, capacity: usize) -> Self {
        match kind {
            ValueKind::Text => Column::Text(TableColumn::with_capacity(name, capacity)),
            ValueKind::Number => Column::Number(TableColumn::with_capacity(name, capacity)),
            ValueKind::PackedTemporal => {
                Column::PackedTemporal(TableColumn::with_capacity(name, capacity))
            }
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(ValueKind::Text, name)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(ValueKind::Number, name)
    }

    pub fn packed_temporal(name: impl Into<String>) -> Self {
        Self::new(ValueKind::PackedTemporal, name)
    }

    /// Returns the display name of the column.
    pub fn name(&self) -> &str {
        match self {
            Column::Text(c) => c.name(),
            Column::Number(c) => c.name(),
            Column::PackedTemporal(c) => c.name(),
        }
    }

    /// Reports the [`ValueKind`] stored by this column.
    pub fn kind(&self) -> ValueKind {
        match self {
            Column::Text(_) => ValueKind::Text,
            Column::Number(_) => ValueKind::Number,
            Column::PackedTemporal(_) => ValueKind::PackedTemporal,
        }
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        match self {
            Column::Text(c) => c.len(),
            Column::Number(c) => c.len(),
            Column::PackedTemporal(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value`, which must match the column's kind.
    pub fn append(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (Column::Text(c), Value::Text(v)) => c.push(v),
            (Column::Number(c), Value::Number(v)) => c.push(v),
            (Column::PackedTemporal(c), Value::PackedTemporal(v)) => c.push(v),
            (column, value) => {
                return Err(Error::type_mismatch(column.name(), value.kind(), column.kind()))
            }
        }
        Ok(())
    }

    pub fn append_text(&mut self, value: impl Into<String>) -> Result<()> {
        match self {
            Column::Text(c) => {
                c.push(value.into());
                Ok(())
            }
            other => Err(other.mismatch(ValueKind::Text)),
        }
    }

    pub fn append_double(&mut self, value: f64) -> Result<()> {
        match self {
            Column::Number(c) => {
                c.push(value);
                Ok(())
            }
            other => Err(other.mismatch(ValueKind::Number)),
        }
    }

    pub fn append_packed(&mut self, value: PackedDateTime) -> Result<()> {
        match self {
            Column::PackedTemporal(c) => {
                c.push(value);
                Ok(())
            }
            other => Err(other.mismatch(ValueKind::PackedTemporal)),
        }
    }

    /// Packs `value` and appends it. Nothing is appended if packing fails.
    pub fn append_date_time(&mut self, value: PrimitiveDateTime) -> Result<()> {
        if !matches!(self, Column::PackedTemporal(_)) {
            return Err(self.mismatch(ValueKind::PackedTemporal));
        }
        self.append_packed(PackedDateTime::pack(value)?)
    }

    /// Appends an already packed value as-is. Intended for bulk loads of
    /// values that came out of [`crate::packed::pack`].
    pub fn append_raw(&mut self, raw: i64) -> Result<()> {
        self.append_packed(PackedDateTime::from_raw(raw))
    }

    /// Returns the value at `position` as a [`Value`].
    pub fn get(&self, position: usize) -> Result<Value> {
        Ok(match self {
            Column::Text(c) => Value::Text(c.get(position)?.clone()),
            Column::Number(c) => Value::Number(*c.get(position)?),
            Column::PackedTemporal(c) => Value::PackedTemporal(*c.get(position)?),
        })
    }

    #[inline]
    pub fn get_double(&self, position: usize) -> Result<f64> {
        match self {
            Column::Number(c) => c.get(position).copied(),
            other => Err(other.mismatch(ValueKind::Number)),
        }
    }

    #[inline]
    pub fn get_text(&self, position: usize) -> Result<&str> {
        match self {
            Column::Text(c) => c.get(position).map(String::as_str),
            other => Err(other.mismatch(ValueKind::Text)),
        }
    }

    #[inline]
    pub fn get_packed_temporal(&self, position: usize) -> Result<PackedDateTime> {
        match self {
            Column::PackedTemporal(c) => c.get(position).copied(),
            other => Err(other.mismatch(ValueKind::PackedTemporal)),
        }
    }

    #[cold]
    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::type_mismatch(self.name(), expected, self.kind())
    }
}

impl<T: ColumnType> From<TableColumn<T>> for Column {
    fn from(column: TableColumn<T>) -> Self {
        T::into_column(column)
    }
}
