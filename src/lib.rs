//! Route-and-payload dispatch over a single SQLite table.
//!
//! ```rust,no_run
//! use serde_json::json;
//! use table_dispatch::prelude::*;
//!
//! # fn demo() -> Result<(), TableDispatchError> {
//! let mut api = Dispatcher::open("inventory.db", "tools")?;
//! let pricey = api.get(Some("/where"), Some(&[json!("price"), json!(200.0), json!(">=")]))?;
//! api.post(Some("/update"), Some(&[json!("count"), json!(3), json!("id"), json!(1)]))?;
//! # let _ = pricey;
//! # Ok(())
//! # }
//! ```
//!
//! Column names, the table name and comparators are concatenated into statement text and are
//! guarded by [`dispatch::Guard`]; every data value is a bound parameter.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod results;
pub mod sqlite;
pub mod storage;
pub mod types;

pub use config::{TableOptions, TableOptionsBuilder};
pub use dispatch::{Dispatcher, Request, Response};
pub use error::TableDispatchError;
pub use results::{RowSet, TableRow, WriteAck};
pub use storage::{TableStore, WriteScope};
pub use types::{Comparator, RowValues, SortOrder};

pub mod prelude {
    pub use crate::config::{MEMORY_PATH, TableOptions, TableOptionsBuilder};
    pub use crate::dispatch::{
        Dispatcher, Guard, Request, Response, Route, UpdateRequest, WhereRequest,
    };
    pub use crate::error::TableDispatchError;
    pub use crate::results::{RowSet, TableRow, WriteAck};
    pub use crate::storage::{TableStore, WriteScope};
    pub use crate::types::{Comparator, RowValues, SortOrder};
}
