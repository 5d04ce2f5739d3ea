//! Column-oriented in-memory tables with allocation-free row cursors.
//!
//! This crate provides:
//! - [`Table`]: an ordered set of same-length columns addressable by name or index.
//! - [`Column`] and [`TableColumn`]: dense, append-only typed storage for text,
//!   numbers and packed date-times.
//! - [`RowCursor`]: a position over a table with typed accessors for sequential scans.
//! - [`PackedDateTime`] and the [`packed`] codec: minute-precision date-times
//!   stored in a single `i64`.
//!
//! Tables are mutated only through `&mut` methods, so the borrow checker keeps
//! writers and cursors apart. Cursors can be shared across threads as long as
//! the table outlives them.

pub mod column;
pub mod cursor;
pub mod error;
pub mod packed;
pub mod table;
pub mod value;

pub use column::{Column, ColumnType, TableColumn};
pub use cursor::{ColumnRef, CursorState, RowCursor};
pub use error::{Error, Result};
pub use packed::{pack, unpack, PackedDateTime, MAX_YEAR, MIN_YEAR};
pub use table::Table;
pub use value::{Value, ValueKind};
