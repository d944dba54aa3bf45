//! Serial → date lookups against the configured spreadsheet.
//!
//! Two backends answer the same question:
//! - `csv`: downloads the sheet published as CSV and builds a map for every call.
//! - `sheet`: reads rows through a `TableStore` and scans them in order.
//!
//! Neither caches; every lookup sees the sheet as it is at that moment. Transport
//! and decoding faults are returned to the caller as `AppError`.

mod csv;
mod sheet;

pub use self::csv::CsvDateSource;
pub use self::sheet::SheetDateSource;

use crate::error::AppError;
use futures_util::future::BoxFuture;

pub trait DateSource: Send + Sync {
    /// The date recorded for `serial`, or `None` when no row carries it.
    fn find_date<'a>(&'a self, serial: &'a str) -> BoxFuture<'a, Result<Option<String>, AppError>>;
}
