// SQLite adapter - everything that touches rusqlite types directly
//
// - params: conversion from `RowValues` to bound rusqlite values
// - query: row extraction into `RowSet`
// - statement: statement text for each table-scoped primitive

pub mod params;
pub mod query;
pub mod statement;

pub use params::Params;
pub use query::{build_row_set, execute_dml, execute_select};
