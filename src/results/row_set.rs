use std::collections::HashMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::row::{TableRow, index_columns};
use crate::types::RowValues;

/// Rows returned by a read, in the order the engine produced them.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<TableRow>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl RowSet {
    #[must_use]
    pub fn with_columns(column_names: Vec<String>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            rows: Vec::new(),
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    /// Append a row; its values line up with the set's column names.
    pub fn push_values(&mut self, values: Vec<RowValues>) {
        self.rows.push(TableRow::with_index(
            Arc::clone(&self.column_names),
            Arc::clone(&self.column_index),
            values,
        ));
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableRow> {
        self.rows.iter()
    }

    /// Plain value tuples, handy for comparing against expected rows.
    #[must_use]
    pub fn to_values(&self) -> Vec<Vec<RowValues>> {
        self.rows.iter().map(|r| r.values.clone()).collect()
    }
}

impl PartialEq for RowSet {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names && self.rows == other.rows
    }
}

impl Serialize for RowSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a TableRow;
    type IntoIter = std::slice::Iter<'a, TableRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Acknowledgment returned once a write has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WriteAck {
    pub rows_affected: usize,
}
