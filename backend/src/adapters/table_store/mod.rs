//! Row-oriented access to spreadsheet-like stores.
//!
//! The data source reads serial/date rows through it and the log writer appends
//! access log rows through it. Cells always travel as text.

mod credentials;
#[cfg(test)]
mod memory;
mod sheets;

pub use credentials::Credentials;
#[cfg(test)]
pub use memory::MemoryTable;
pub use sheets::SheetsTable;

use crate::error::AppError;
use futures_util::future::BoxFuture;

pub type Row = Vec<String>;

pub trait TableStore: Send + Sync {
    /// Every row of `range`, top to bottom. An empty range yields no rows.
    fn read_rows<'a>(&'a self, range: &'a str) -> BoxFuture<'a, Result<Vec<Row>, AppError>>;

    /// Appends `row` after the last non-empty row of `range`.
    fn append_row<'a>(&'a self, range: &'a str, row: Row) -> BoxFuture<'a, Result<(), AppError>>;
}
