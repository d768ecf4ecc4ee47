use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::TableDispatchError;

/// A single cell value, either read back from a row or bound as a statement parameter.
///
/// ```rust
/// use table_dispatch::prelude::*;
///
/// let row = vec![
///     RowValues::Null,
///     RowValues::Text("table saw".into()),
///     RowValues::Float(267.49),
///     RowValues::Int(4),
/// ];
/// # let _ = row;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value, stored by the engine as 0/1
    Bool(bool),
    /// NULL value; also the placeholder for auto-generated keys on insert
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Floats come back as floats; integers widen so numeric columns compare uniformly.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Decode one loosely-typed payload element into a bindable value.
    ///
    /// # Errors
    ///
    /// Returns `TableDispatchError::Shape` for arrays and objects, which have no scalar column
    /// representation.
    pub fn from_json(value: &JsonValue) -> Result<Self, TableDispatchError> {
        match value {
            JsonValue::Null => Ok(RowValues::Null),
            JsonValue::Bool(b) => Ok(RowValues::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RowValues::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(RowValues::Float(f))
                } else {
                    Err(TableDispatchError::shape(format!(
                        "Invalid numeric payload: {n}"
                    )))
                }
            }
            JsonValue::String(s) => Ok(RowValues::Text(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => Err(TableDispatchError::shape(
                "Invalid payload - expected a scalar value",
            )),
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_owned())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// The six comparison operators a filter may concatenate into statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    #[default]
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl Comparator {
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::NotEq,
        Comparator::Lt,
        Comparator::Gt,
        Comparator::LtEq,
        Comparator::GtEq,
    ];

    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::NotEq => "!=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::LtEq => "<=",
            Comparator::GtEq => ">=",
        }
    }
}

impl FromStr for Comparator {
    type Err = TableDispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::ALL
            .into_iter()
            .find(|c| c.as_sql() == s)
            .ok_or_else(|| TableDispatchError::shape(format!("Invalid comparison payload: {s:?}")))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Direction of an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}
