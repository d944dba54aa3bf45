use super::{Row, TableStore};
use crate::error::AppError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process table keyed by range name.
#[derive(Default)]
pub struct MemoryTable {
    ranges: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryTable {
    pub fn with_rows(range: &str, rows: Vec<Row>) -> Self {
        Self {
            ranges: RwLock::new(HashMap::from([(range.to_string(), rows)])),
        }
    }
}

impl TableStore for MemoryTable {
    fn read_rows<'a>(&'a self, range: &'a str) -> BoxFuture<'a, Result<Vec<Row>, AppError>> {
        async move { Ok(self.ranges.read().await.get(range).cloned().unwrap_or_default()) }.boxed()
    }

    fn append_row<'a>(&'a self, range: &'a str, row: Row) -> BoxFuture<'a, Result<(), AppError>> {
        async move {
            self.ranges
                .write()
                .await
                .entry(range.to_string())
                .or_default()
                .push(row);
            Ok(())
        }
        .boxed()
    }
}
