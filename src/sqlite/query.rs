use rusqlite::types::Value;
use rusqlite::{Connection, Statement};

use super::params::Params;
use crate::error::TableDispatchError;
use crate::results::RowSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns the engine error if the column cannot be read.
pub fn sqlite_extract_value(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, TableDispatchError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a prepared SELECT and materialize every row.
///
/// # Errors
/// Returns the engine error if execution or row extraction fails.
pub fn build_row_set(stmt: &mut Statement, params: &Params) -> Result<RowSet, TableDispatchError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let mut row_set = RowSet::with_columns(column_names);

    let refs = params.as_refs();
    let mut rows = stmt.query(&refs[..])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            values.push(sqlite_extract_value(row, i)?);
        }
        row_set.push_values(values);
    }

    Ok(row_set)
}

/// Prepare and run a SELECT with bound parameters.
///
/// # Errors
/// Returns the engine error unchanged if preparing or executing fails.
pub fn execute_select(
    conn: &Connection,
    sql: &str,
    params: &[RowValues],
) -> Result<RowSet, TableDispatchError> {
    let params = Params::convert(params);
    tracing::debug!(sql, bound = params.len(), "select");
    let mut stmt = conn.prepare(sql)?;
    build_row_set(&mut stmt, &params)
}

/// Prepare and run a DML statement with bound parameters; returns rows affected.
///
/// # Errors
/// Returns the engine error unchanged if preparing or executing fails.
pub fn execute_dml(
    conn: &Connection,
    sql: &str,
    params: &[RowValues],
) -> Result<usize, TableDispatchError> {
    let params = Params::convert(params);
    tracing::debug!(sql, bound = params.len(), "execute");
    let mut stmt = conn.prepare_cached(sql)?;
    let refs = params.as_refs();
    Ok(stmt.execute(&refs[..])?)
}
