mod row;
mod row_set;

pub use row::TableRow;
pub use row_set::{RowSet, WriteAck};
