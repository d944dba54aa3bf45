use crate::adapters::table_store::TableStore;
use crate::error::AppError;
use common::model::log_entry::LogEntry;
use std::sync::Arc;

/// Appends access log rows to one range of a tabular store.
#[derive(Clone)]
pub struct LogWriter {
    store: Arc<dyn TableStore>,
    range: String,
}

impl LogWriter {
    pub fn new(store: Arc<dyn TableStore>, range: impl Into<String>) -> Self {
        Self {
            store,
            range: range.into(),
        }
    }

    pub async fn append(&self, entry: &LogEntry) -> Result<(), AppError> {
        self.store.append_row(&self.range, entry.to_row()).await
    }
}
