use super::{Credentials, Row, TableStore};
use crate::error::AppError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::debug;
use reqwest::{Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};

/// One spreadsheet document reached through the Google Sheets v4 values API.
pub struct SheetsTable {
    client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    credentials: Credentials,
}

#[derive(Deserialize, Debug)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsTable {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        }
    }

    /// `{base}/v4/spreadsheets/{id}/values/{last}` with `last` escaped as one segment.
    fn values_url(&self, last: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| AppError::Config(format!("invalid spreadsheet API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("spreadsheet API base cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", last]);
        Ok(url)
    }

    async fn read(&self, range: &str) -> Result<Vec<Row>, AppError> {
        let url = self.values_url(range)?;
        debug!("Reading {range} from spreadsheet {}", self.spreadsheet_id);

        let request = self.credentials.authorize(self.client.get(url)).await?;
        let body: ValueRange = ensure_success(request.send().await?).await?.json().await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append(&self, range: &str, row: Row) -> Result<(), AppError> {
        let url = self.values_url(&format!("{range}:append"))?;
        debug!("Appending to {range} in spreadsheet {}", self.spreadsheet_id);

        let request = self
            .client
            .post(url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [row] }));
        let request = self.credentials.authorize(request).await?;
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

impl TableStore for SheetsTable {
    fn read_rows<'a>(&'a self, range: &'a str) -> BoxFuture<'a, Result<Vec<Row>, AppError>> {
        self.read(range).boxed()
    }

    fn append_row<'a>(&'a self, range: &'a str, row: Row) -> BoxFuture<'a, Result<(), AppError>> {
        self.append(range, row).boxed()
    }
}

async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let detail = response.text().await.unwrap_or_default();
    debug!("Spreadsheet API error body: {detail}");
    Err(AppError::UpstreamStatus {
        url,
        status: status.as_u16(),
    })
}

/// Text of a cell as the API returned it. Non-string cells keep their JSON spelling.
fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
