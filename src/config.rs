use std::time::Duration;

use rusqlite::Connection;

use crate::dispatch::Dispatcher;
use crate::error::TableDispatchError;
use crate::storage::TableStore;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory database path understood by [`TableOptions`].
pub const MEMORY_PATH: &str = ":memory:";

/// Options for opening a table store or dispatcher.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub db_path: String,
    pub table: String,
    /// Check concatenated identifiers against the table catalog, not just the denylist.
    pub strict_identifiers: bool,
    pub busy_timeout: Duration,
    pub wal: bool,
}

impl TableOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            table: table.into(),
            strict_identifiers: true,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            wal: false,
        }
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>, table: impl Into<String>) -> TableOptionsBuilder {
        TableOptionsBuilder::new(db_path, table)
    }

    fn validate(&self) -> Result<(), TableDispatchError> {
        if self.db_path.trim().is_empty() {
            return Err(TableDispatchError::Config("database path is empty".into()));
        }
        if self.table.trim().is_empty() {
            return Err(TableDispatchError::Config("table name is empty".into()));
        }
        Ok(())
    }

    /// Open (or create) the database file and apply connection pragmas.
    ///
    /// # Errors
    /// Returns `TableDispatchError::Config` for empty options, or the engine error if the file
    /// cannot be opened.
    pub fn connect(&self) -> Result<Connection, TableDispatchError> {
        self.validate()?;
        let conn = if self.db_path == MEMORY_PATH {
            Connection::open_in_memory()?
        } else {
            Connection::open(&self.db_path)?
        };
        conn.busy_timeout(self.busy_timeout)?;
        if self.wal {
            // journal_mode returns the resulting mode as a row
            conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
        }
        tracing::debug!(path = %self.db_path, table = %self.table, "opened sqlite connection");
        Ok(conn)
    }

    /// # Errors
    /// Returns `TableDispatchError` if the connection cannot be opened.
    pub fn open_store(&self) -> Result<TableStore, TableDispatchError> {
        Ok(TableStore::new(self.connect()?, self.table.clone()))
    }

    /// # Errors
    /// Returns `TableDispatchError` if the connection cannot be opened or, in strict mode, the
    /// table is missing from the catalog.
    pub fn open_dispatcher(&self) -> Result<Dispatcher, TableDispatchError> {
        Dispatcher::with_store(self.open_store()?, self.strict_identifiers)
    }
}

/// Fluent builder for [`TableOptions`].
#[derive(Debug, Clone)]
pub struct TableOptionsBuilder {
    opts: TableOptions,
}

impl TableOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            opts: TableOptions::new(db_path, table),
        }
    }

    #[must_use]
    pub fn strict_identifiers(mut self, strict: bool) -> Self {
        self.opts.strict_identifiers = strict;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = timeout;
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn finish(self) -> TableOptions {
        self.opts
    }

    /// # Errors
    /// See [`TableOptions::open_dispatcher`].
    pub fn build(self) -> Result<Dispatcher, TableDispatchError> {
        self.opts.open_dispatcher()
    }
}
