//! Request dispatcher: route + payload in, exactly one storage call out.
//!
//! Reads go straight to the [`TableStore`]. Writes run inside a [`WriteScope`] that is
//! committed before the call returns, so a failing batch leaves nothing behind.
//!
//! [`WriteScope`]: crate::storage::WriteScope

pub mod guard;
pub mod request;
pub mod route;

use std::fmt;

use serde_json::Value as JsonValue;

pub use guard::Guard;
pub use request::{Request, UpdateRequest, WhereRequest};
pub use route::Route;

use crate::config::TableOptions;
use crate::error::TableDispatchError;
use crate::results::{RowSet, WriteAck};
use crate::storage::TableStore;

/// What a dispatched request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Rows(RowSet),
    Committed(WriteAck),
}

/// REST-like front end over one table.
pub struct Dispatcher {
    store: TableStore,
    guard: Guard,
}

impl Dispatcher {
    /// Open `db_path` with default options (strict identifiers).
    ///
    /// # Errors
    /// Returns `TableDispatchError` if the database cannot be opened or the table is unknown.
    pub fn open(db_path: &str, table: &str) -> Result<Self, TableDispatchError> {
        TableOptions::new(db_path, table).open_dispatcher()
    }

    /// Wrap an existing store. In strict mode the table must already exist; its columns become
    /// the identifier allow-list.
    ///
    /// # Errors
    /// Returns `TableDispatchError::Config` for an empty table name, or
    /// `TableDispatchError::UnknownIdentifier` if strict and the table is missing.
    pub fn with_store(store: TableStore, strict: bool) -> Result<Self, TableDispatchError> {
        if store.table().trim().is_empty() {
            return Err(TableDispatchError::Config("table name is empty".into()));
        }
        let guard = load_guard(&store, strict)?;
        Ok(Self { store, guard })
    }

    #[must_use]
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TableStore {
        &mut self.store
    }

    #[must_use]
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Reload the column allow-list, e.g. after the table was altered.
    ///
    /// # Errors
    /// Returns the engine error if the catalog cannot be read.
    pub fn refresh_catalog(&mut self) -> Result<(), TableDispatchError> {
        self.guard = load_guard(&self.store, self.guard.is_strict())?;
        Ok(())
    }

    /// Read call. `route` of `None` scans the whole table.
    ///
    /// # Errors
    /// Any rejection from decoding or guarding, or the engine error from the query.
    pub fn get(
        &mut self,
        route: Option<&str>,
        payload: Option<&[JsonValue]>,
    ) -> Result<RowSet, TableDispatchError> {
        let request = Request::from_get(route, payload, &self.guard)
            .inspect_err(|err| log_rejection(route, err))?;
        match self.run(&request)? {
            Response::Rows(rows) => Ok(rows),
            Response::Committed(_) => Err(TableDispatchError::UndefinedRoute(format!(
                "{route:?} is not a read route"
            ))),
        }
    }

    /// Write call; the change is committed before this returns.
    ///
    /// # Errors
    /// Any rejection from decoding or guarding, or the engine error from the write.
    pub fn post(
        &mut self,
        route: Option<&str>,
        payload: Option<&[JsonValue]>,
    ) -> Result<WriteAck, TableDispatchError> {
        let request = Request::from_post(route, payload, &self.guard)
            .inspect_err(|err| log_rejection(route, err))?;
        match self.run(&request)? {
            Response::Committed(ack) => Ok(ack),
            Response::Rows(_) => Err(TableDispatchError::UndefinedRoute(format!(
                "{route:?} is not a write route"
            ))),
        }
    }

    /// Guard and run a request built directly rather than from a route.
    ///
    /// # Errors
    /// `InjectionSuspected`/`UnknownIdentifier` from the guard, or the engine error.
    pub fn execute(&mut self, request: &Request) -> Result<Response, TableDispatchError> {
        request
            .validate(&self.guard)
            .inspect_err(|err| log_rejection(Some("execute"), err))?;
        self.run(request)
    }

    fn run(&mut self, request: &Request) -> Result<Response, TableDispatchError> {
        let store = &mut self.store;
        let rows = match request {
            Request::Scan => store.query_whole_table()?,
            Request::Describe => store.get_table_info()?,
            Request::Column(column) => store.query_col_in_table(column)?,
            Request::Order {
                order_by,
                columns,
                order,
            } => store.col_filter_query(order_by, columns, *order)?,
            Request::Where(req) => match &req.projection {
                Some(columns) => store.filter_fine_query(
                    &req.column,
                    &req.target,
                    columns,
                    req.comparator,
                    req.ascending,
                )?,
                None => store.filter_where_query(&req.column, &req.target, req.comparator)?,
            },
            write => return write_committed(store, write).map(Response::Committed),
        };
        Ok(Response::Rows(rows))
    }

    /// Hand the store back to the caller.
    #[must_use]
    pub fn into_store(self) -> TableStore {
        self.store
    }

    /// # Errors
    /// Returns the engine error if the connection refuses to close.
    pub fn close(self) -> Result<(), TableDispatchError> {
        self.store.close()
    }
}

fn write_committed(store: &mut TableStore, request: &Request) -> Result<WriteAck, TableDispatchError> {
    let mut scope = store.write_scope()?;
    match request {
        Request::InsertOne(row) => scope.insert_one(row)?,
        Request::InsertMany(rows) => scope.insert_many(rows)?,
        Request::Update(req) => scope.update_item(
            &req.set_column,
            &req.new_value,
            &req.match_column,
            &req.match_value,
        )?,
        Request::Delete { column, value } => scope.delete_item(column, value)?,
        other => {
            return Err(TableDispatchError::UndefinedRoute(format!(
                "{other:?} is not a write"
            )));
        }
    };
    let rows_affected = scope.commit()?;
    Ok(WriteAck { rows_affected })
}

fn load_guard(store: &TableStore, strict: bool) -> Result<Guard, TableDispatchError> {
    if !strict {
        return Ok(Guard::denylist(store.table()));
    }
    if !store.table_exists()? {
        return Err(TableDispatchError::UnknownIdentifier(format!(
            "table {} does not exist",
            store.table()
        )));
    }
    Ok(Guard::with_catalog(store.table(), store.column_names()?))
}

fn log_rejection(route: Option<&str>, err: &TableDispatchError) {
    tracing::warn!(route = route.unwrap_or("<none>"), error = %err, "request rejected");
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("store", &self.store)
            .field("strict", &self.guard.is_strict())
            .finish()
    }
}
