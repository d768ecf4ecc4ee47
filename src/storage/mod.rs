//! Storage accessor: table-scoped statement builders and executors.
//!
//! Identifiers handed to this layer are concatenated into statement text as-is; callers are
//! expected to have run them through the dispatcher's guard. Values are always bound.

mod scope;
mod store;

pub use scope::WriteScope;
pub use store::TableStore;

use rusqlite::Connection;

use crate::error::TableDispatchError;
use crate::sqlite::{execute_dml, statement};
use crate::types::RowValues;

fn insert_row(
    conn: &Connection,
    table: &str,
    row: &[RowValues],
) -> Result<usize, TableDispatchError> {
    if row.is_empty() {
        return Err(TableDispatchError::shape(
            "Invalid payload - insert row needs at least 1 value",
        ));
    }
    execute_dml(conn, &statement::insert(table, row.len()), row)
}

fn insert_rows<R: AsRef<[RowValues]>>(
    conn: &Connection,
    table: &str,
    rows: &[R],
) -> Result<usize, TableDispatchError> {
    let mut affected = 0;
    for row in rows {
        affected += insert_row(conn, table, row.as_ref())?;
    }
    Ok(affected)
}

fn update_rows(
    conn: &Connection,
    table: &str,
    set_column: &str,
    new_value: &RowValues,
    match_column: &str,
    match_value: &RowValues,
) -> Result<usize, TableDispatchError> {
    execute_dml(
        conn,
        &statement::update(table, set_column, match_column),
        &[new_value.clone(), match_value.clone()],
    )
}

fn delete_rows(
    conn: &Connection,
    table: &str,
    match_column: &str,
    match_value: &RowValues,
) -> Result<usize, TableDispatchError> {
    execute_dml(
        conn,
        &statement::delete(table, match_column),
        std::slice::from_ref(match_value),
    )
}

fn truncate_rows(conn: &Connection, table: &str) -> Result<usize, TableDispatchError> {
    execute_dml(conn, &statement::truncate(table), &[])
}
