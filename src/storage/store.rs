use std::fmt;

use rusqlite::Connection;

use super::scope::WriteScope;
use crate::error::TableDispatchError;
use crate::results::RowSet;
use crate::sqlite::{execute_select, statement};
use crate::types::{Comparator, RowValues, SortOrder};

/// A connection bound to one table.
///
/// Writes issued directly on the store are staged in an implicit transaction that stays open
/// until [`commit_change`](Self::commit_change) or [`rollback_change`](Self::rollback_change).
/// [`write_scope`](Self::write_scope) is the scoped alternative.
pub struct TableStore {
    conn: Connection,
    table: String,
}

impl TableStore {
    /// Bind an open connection to `table`. The name is not checked against the catalog here.
    #[must_use]
    pub fn new(conn: Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    /// Open or create the database at `db_path`.
    ///
    /// # Errors
    /// Returns the engine error if the file cannot be opened.
    pub fn open(db_path: &str, table: &str) -> Result<Self, TableDispatchError> {
        crate::config::TableOptions::new(db_path, table).open_store()
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// True while direct writes are staged and not yet committed or rolled back.
    #[must_use]
    pub fn has_staged_writes(&self) -> bool {
        !self.conn.is_autocommit()
    }

    fn stage(&self) -> Result<(), TableDispatchError> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    /// `CREATE TABLE <table><columns_ddl>`, e.g. `"(id INTEGER PRIMARY KEY, name TEXT)"`.
    ///
    /// # Errors
    /// Returns the engine error if the DDL is rejected.
    pub fn create_table(&self, columns_ddl: &str) -> Result<(), TableDispatchError> {
        let sql = statement::create_table(&self.table, columns_ddl);
        tracing::debug!(sql = %sql, "create table");
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    /// Catalog rows describing every object in the database.
    ///
    /// # Errors
    /// Returns the engine error if the catalog cannot be read.
    pub fn get_table_info(&self) -> Result<RowSet, TableDispatchError> {
        execute_select(&self.conn, statement::CATALOG, &[])
    }

    /// Whether the bound table (or a view of that name) exists in the catalog.
    ///
    /// # Errors
    /// Returns the engine error if the catalog cannot be read.
    pub fn table_exists(&self) -> Result<bool, TableDispatchError> {
        let count: i64 =
            self.conn
                .query_row(statement::TABLE_EXISTS, [self.table.as_str()], |row| {
                    row.get(0)
                })?;
        Ok(count > 0)
    }

    /// Column names of the bound table, in declaration order.
    ///
    /// # Errors
    /// Returns the engine error if the catalog cannot be read.
    pub fn column_names(&self) -> Result<Vec<String>, TableDispatchError> {
        let mut stmt = self.conn.prepare(statement::TABLE_COLUMNS)?;
        let names = stmt
            .query_map([self.table.as_str()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// # Errors
    /// Returns the engine error if the commit fails.
    pub fn commit_change(&self) -> Result<(), TableDispatchError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
            tracing::debug!(table = %self.table, "committed staged writes");
        }
        Ok(())
    }

    /// # Errors
    /// Returns the engine error if the rollback fails.
    pub fn rollback_change(&self) -> Result<(), TableDispatchError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
            tracing::debug!(table = %self.table, "rolled back staged writes");
        }
        Ok(())
    }

    /// Stage one row. Use `RowValues::Null` for auto-generated keys.
    ///
    /// # Errors
    /// Returns the engine error if the insert is rejected.
    pub fn insert_one(&self, row: &[RowValues]) -> Result<usize, TableDispatchError> {
        self.stage()?;
        super::insert_row(&self.conn, &self.table, row)
    }

    /// Stage each row in order. A failure part way leaves earlier rows staged; the caller
    /// decides between `commit_change` and `rollback_change`.
    ///
    /// # Errors
    /// Returns the first engine error encountered.
    pub fn insert_many<R: AsRef<[RowValues]>>(
        &self,
        rows: &[R],
    ) -> Result<usize, TableDispatchError> {
        self.stage()?;
        super::insert_rows(&self.conn, &self.table, rows)
    }

    /// `UPDATE <table> SET <set_column> = ? WHERE <match_column> = ?`
    ///
    /// # Errors
    /// Returns the engine error if the update is rejected.
    pub fn update_item(
        &self,
        set_column: &str,
        new_value: &RowValues,
        match_column: &str,
        match_value: &RowValues,
    ) -> Result<usize, TableDispatchError> {
        self.stage()?;
        super::update_rows(
            &self.conn,
            &self.table,
            set_column,
            new_value,
            match_column,
            match_value,
        )
    }

    /// # Errors
    /// Returns the engine error if the delete is rejected.
    pub fn delete_item(
        &self,
        match_column: &str,
        match_value: &RowValues,
    ) -> Result<usize, TableDispatchError> {
        self.stage()?;
        super::delete_rows(&self.conn, &self.table, match_column, match_value)
    }

    /// Stage removal of every row.
    ///
    /// # Errors
    /// Returns the engine error if the delete is rejected.
    pub fn truncate_table(&self) -> Result<usize, TableDispatchError> {
        self.stage()?;
        super::truncate_rows(&self.conn, &self.table)
    }

    /// # Errors
    /// Returns the engine error if the scan fails.
    pub fn query_whole_table(&self) -> Result<RowSet, TableDispatchError> {
        execute_select(&self.conn, &statement::select_all(&self.table), &[])
    }

    /// # Errors
    /// Returns the engine error if the scan fails.
    pub fn query_col_in_table(&self, column: &str) -> Result<RowSet, TableDispatchError> {
        execute_select(
            &self.conn,
            &statement::select_column(&self.table, column),
            &[],
        )
    }

    /// Every row projected to `columns`, ordered by `order_by`.
    ///
    /// # Errors
    /// Returns the engine error if the query fails.
    pub fn col_filter_query<S: AsRef<str>>(
        &self,
        order_by: &str,
        columns: &[S],
        order: SortOrder,
    ) -> Result<RowSet, TableDispatchError> {
        let sql = statement::ordered_projection(&self.table, order_by, columns, order);
        execute_select(&self.conn, &sql, &[])
    }

    /// Rows where `where_column <comparator> target`, projected to `columns` and ordered by
    /// `where_column`.
    ///
    /// # Errors
    /// Returns the engine error if the query fails.
    pub fn filter_fine_query<S: AsRef<str>>(
        &self,
        where_column: &str,
        target: &RowValues,
        columns: &[S],
        comparator: Comparator,
        ascending: bool,
    ) -> Result<RowSet, TableDispatchError> {
        let sql = statement::filtered_projection(
            &self.table,
            where_column,
            columns,
            comparator,
            SortOrder::from_ascending(ascending),
        );
        execute_select(&self.conn, &sql, std::slice::from_ref(target))
    }

    /// Whole rows where `where_column <comparator> target`, in the engine's natural order.
    ///
    /// # Errors
    /// Returns the engine error if the query fails.
    pub fn filter_where_query(
        &self,
        where_column: &str,
        target: &RowValues,
        comparator: Comparator,
    ) -> Result<RowSet, TableDispatchError> {
        let sql = statement::filtered_rows(&self.table, where_column, comparator);
        execute_select(&self.conn, &sql, std::slice::from_ref(target))
    }

    /// Open a scoped transaction. It must be committed explicitly; dropping it rolls back.
    ///
    /// # Errors
    /// Returns `TableDispatchError::Transaction` while direct writes are still staged, or the
    /// engine error if `BEGIN` fails.
    pub fn write_scope(&mut self) -> Result<WriteScope<'_>, TableDispatchError> {
        if !self.conn.is_autocommit() {
            return Err(TableDispatchError::Transaction(
                "staged writes pending; commit_change or rollback_change first".into(),
            ));
        }
        let tx = self.conn.transaction()?;
        Ok(WriteScope::new(tx, &self.table))
    }

    /// Close the connection, discarding anything still staged.
    ///
    /// # Errors
    /// Returns the engine error if the connection refuses to close.
    pub fn close(self) -> Result<(), TableDispatchError> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}

impl fmt::Debug for TableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStore")
            .field("table", &self.table)
            .field("staged", &self.has_staged_writes())
            .finish_non_exhaustive()
    }
}
