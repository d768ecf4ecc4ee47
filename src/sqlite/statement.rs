//! Statement text for the table-scoped primitives.
//!
//! Identifiers (table, columns) and the comparator are concatenated; every data value is a `?`
//! placeholder. Nothing here inspects the identifiers it is handed.

use crate::types::{Comparator, SortOrder};

pub const CATALOG: &str = "SELECT * FROM sqlite_master";
pub const TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?";
pub const TABLE_COLUMNS: &str = "SELECT name FROM pragma_table_info(?)";

#[must_use]
pub fn create_table(table: &str, columns_ddl: &str) -> String {
    format!("CREATE TABLE {table}{columns_ddl}")
}

#[must_use]
pub fn insert(table: &str, arity: usize) -> String {
    let placeholders = vec!["?"; arity.max(1)].join(",");
    format!("INSERT INTO {table} VALUES({placeholders})")
}

#[must_use]
pub fn update(table: &str, set_column: &str, match_column: &str) -> String {
    format!("UPDATE {table} SET {set_column} = ? WHERE {match_column} = ?")
}

#[must_use]
pub fn delete(table: &str, match_column: &str) -> String {
    format!("DELETE FROM {table} WHERE {match_column} = ?")
}

/// SQLite has no TRUNCATE; an unqualified DELETE uses the truncate optimization.
#[must_use]
pub fn truncate(table: &str) -> String {
    format!("DELETE FROM {table}")
}

#[must_use]
pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {table}")
}

#[must_use]
pub fn select_column(table: &str, column: &str) -> String {
    format!("SELECT {column} FROM {table}")
}

#[must_use]
pub fn ordered_projection<S: AsRef<str>>(
    table: &str,
    order_by: &str,
    columns: &[S],
    order: SortOrder,
) -> String {
    format!(
        "SELECT {} FROM {table} ORDER BY {order_by} {}",
        column_list(columns),
        order.as_sql()
    )
}

#[must_use]
pub fn filtered_projection<S: AsRef<str>>(
    table: &str,
    where_column: &str,
    columns: &[S],
    comparator: Comparator,
    order: SortOrder,
) -> String {
    format!(
        "SELECT {} FROM {table} WHERE {where_column} {} ? ORDER BY {where_column} {}",
        column_list(columns),
        comparator.as_sql(),
        order.as_sql()
    )
}

#[must_use]
pub fn filtered_rows(table: &str, where_column: &str, comparator: Comparator) -> String {
    format!(
        "SELECT * FROM {table} WHERE {where_column} {} ?",
        comparator.as_sql()
    )
}

fn column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
