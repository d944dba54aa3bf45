use super::DateSource;
use crate::error::AppError;
use csv::{ReaderBuilder, Trim};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::debug;
use std::collections::HashMap;

/// Serial → date map built from a spreadsheet published as CSV.
pub type SerialMapping = HashMap<String, String>;

pub struct CsvDateSource {
    client: reqwest::Client,
    url: String,
}

impl CsvDateSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Downloads the export and builds a fresh mapping.
    pub async fn fetch_mapping(&self) -> Result<SerialMapping, AppError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parse_mapping(&body))
    }
}

impl DateSource for CsvDateSource {
    fn find_date<'a>(&'a self, serial: &'a str) -> BoxFuture<'a, Result<Option<String>, AppError>> {
        async move {
            let mut mapping = self.fetch_mapping().await?;
            Ok(mapping.remove(serial.trim()))
        }
        .boxed()
    }
}

/// Column 0 is the serial, column 1 the date; both trimmed.
///
/// There is no header row. Rows missing either value, or that the CSV reader
/// rejects, are skipped. A serial listed twice keeps its last date.
pub fn parse_mapping(body: &str) -> SerialMapping {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut mapping = SerialMapping::new();
    for (idx, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable CSV line {}: {}", idx + 1, e);
                continue;
            }
        };

        match (record.get(0), record.get(1)) {
            (Some(serial), Some(date)) if !serial.is_empty() && !date.is_empty() => {
                mapping.insert(serial.to_string(), date.to_string());
            }
            _ => debug!("Skipping incomplete CSV line {}", idx + 1),
        }
    }

    mapping
}
