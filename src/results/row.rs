use std::collections::HashMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::types::RowValues;

/// One row read back from the bound table (or the catalog).
///
/// Column names are shared with every other row of the same [`RowSet`](super::RowSet).
#[derive(Debug, Clone)]
pub struct TableRow {
    pub column_names: Arc<Vec<String>>,
    pub values: Vec<RowValues>,
    column_index: Arc<HashMap<String, usize>>,
}

impl TableRow {
    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self::with_index(column_names, column_index, values)
    }

    /// Value of the named column, if the row has one.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.column_index
            .get(column_name)
            .and_then(|&idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for TableRow {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

/// Serializes as the bare value tuple.
impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
