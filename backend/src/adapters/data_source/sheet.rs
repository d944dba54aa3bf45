use super::DateSource;
use crate::adapters::table_store::{Row, TableStore};
use crate::error::AppError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::sync::Arc;

/// Reads `[serial, date]` rows from a range of a tabular store.
pub struct SheetDateSource {
    store: Arc<dyn TableStore>,
    range: String,
}

impl SheetDateSource {
    pub fn new(store: Arc<dyn TableStore>, range: impl Into<String>) -> Self {
        Self {
            store,
            range: range.into(),
        }
    }
}

impl DateSource for SheetDateSource {
    fn find_date<'a>(&'a self, serial: &'a str) -> BoxFuture<'a, Result<Option<String>, AppError>> {
        async move {
            let rows = self.store.read_rows(&self.range).await?;
            Ok(find_in_rows(&rows, serial))
        }
        .boxed()
    }
}

/// First row whose trimmed serial equals `serial` and whose date is not blank.
pub fn find_in_rows(rows: &[Row], serial: &str) -> Option<String> {
    let serial = serial.trim();
    rows.iter().find_map(|row| {
        let key = row.first()?.trim();
        let date = row.get(1)?.trim();
        (key == serial && !key.is_empty() && !date.is_empty()).then(|| date.to_string())
    })
}
