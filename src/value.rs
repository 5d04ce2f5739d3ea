use std::fmt;

use crate::packed::PackedDateTime;

/// Dynamic value container covering the three column types.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    PackedTemporal(PackedDateTime),
}

/// Logical type stored by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    PackedTemporal,
}

impl Value {
    /// Returns the [`ValueKind`] describing the contained value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::PackedTemporal(_) => ValueKind::PackedTemporal,
        }
    }

    /// Returns a human readable label for the contained value.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }
}

impl ValueKind {
    /// Returns a lower-case name for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::PackedTemporal => "packed_temporal",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::PackedTemporal(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

impl_from!(Number, f64);
impl_from!(Number, f32);
impl_from!(Number, i32);
impl_from!(Text, String);
impl_from!(PackedTemporal, PackedDateTime);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

macro_rules! impl_try_from_value {
    ($ty:ty, $variant:ident) => {
        impl TryFrom<Value> for $ty {
            type Error = Value;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                if let Value::$variant(inner) = value {
                    Ok(inner)
                } else {
                    Err(value)
                }
            }
        }
    };
}

impl_try_from_value!(f64, Number);
impl_try_from_value!(String, Text);
impl_try_from_value!(PackedDateTime, PackedTemporal);
