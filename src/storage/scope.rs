use rusqlite::{Connection, Transaction};

use crate::error::TableDispatchError;
use crate::types::RowValues;

/// Write handle that owns an open transaction on the store's connection until completion.
///
/// Every write staged through the scope lands atomically on [`commit`](Self::commit) or not at
/// all. Dropping an uncompleted scope rolls it back.
pub struct WriteScope<'conn> {
    tx: Option<Transaction<'conn>>,
    table: &'conn str,
    rows_affected: usize,
}

impl<'conn> WriteScope<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>, table: &'conn str) -> Self {
        Self {
            tx: Some(tx),
            table,
            rows_affected: 0,
        }
    }

    fn conn(&self) -> Result<&Connection, TableDispatchError> {
        self.tx
            .as_deref()
            .ok_or_else(|| TableDispatchError::Transaction("write scope already completed".into()))
    }

    fn record(&mut self, affected: usize) -> usize {
        self.rows_affected += affected;
        affected
    }

    /// Rows affected by every statement staged so far.
    #[must_use]
    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }

    /// # Errors
    /// Returns the engine error if the insert is rejected.
    pub fn insert_one(&mut self, row: &[RowValues]) -> Result<usize, TableDispatchError> {
        let affected = super::insert_row(self.conn()?, self.table, row)?;
        Ok(self.record(affected))
    }

    /// # Errors
    /// Returns the first engine error; nothing from the batch survives unless the scope is
    /// committed afterwards.
    pub fn insert_many<R: AsRef<[RowValues]>>(
        &mut self,
        rows: &[R],
    ) -> Result<usize, TableDispatchError> {
        let affected = super::insert_rows(self.conn()?, self.table, rows)?;
        Ok(self.record(affected))
    }

    /// # Errors
    /// Returns the engine error if the update is rejected.
    pub fn update_item(
        &mut self,
        set_column: &str,
        new_value: &RowValues,
        match_column: &str,
        match_value: &RowValues,
    ) -> Result<usize, TableDispatchError> {
        let affected = super::update_rows(
            self.conn()?,
            self.table,
            set_column,
            new_value,
            match_column,
            match_value,
        )?;
        Ok(self.record(affected))
    }

    /// # Errors
    /// Returns the engine error if the delete is rejected.
    pub fn delete_item(
        &mut self,
        match_column: &str,
        match_value: &RowValues,
    ) -> Result<usize, TableDispatchError> {
        let affected = super::delete_rows(self.conn()?, self.table, match_column, match_value)?;
        Ok(self.record(affected))
    }

    /// # Errors
    /// Returns the engine error if the delete is rejected.
    pub fn truncate_table(&mut self) -> Result<usize, TableDispatchError> {
        let affected = super::truncate_rows(self.conn()?, self.table)?;
        Ok(self.record(affected))
    }

    /// Commit everything staged in this scope; returns the total rows affected.
    ///
    /// # Errors
    /// Returns the engine error if the commit fails.
    pub fn commit(mut self) -> Result<usize, TableDispatchError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| TableDispatchError::Transaction("write scope already completed".into()))?;
        tx.commit()?;
        tracing::debug!(table = self.table, rows = self.rows_affected, "write scope committed");
        Ok(self.rows_affected)
    }

    /// # Errors
    /// Returns the engine error if the rollback fails.
    pub fn rollback(mut self) -> Result<(), TableDispatchError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| TableDispatchError::Transaction("write scope already completed".into()))?;
        tx.rollback()?;
        tracing::debug!(table = self.table, "write scope rolled back");
        Ok(())
    }
}

impl Drop for WriteScope<'_> {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(err) = tx.rollback() {
                tracing::warn!(table = self.table, error = %err, "rollback on drop failed");
            } else {
                tracing::debug!(table = self.table, "uncommitted write scope rolled back");
            }
        }
    }
}
