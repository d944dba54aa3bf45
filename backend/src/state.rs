use crate::adapters::data_source::{CsvDateSource, DateSource, SheetDateSource};
use crate::adapters::geo::{GeoResolver, IpApiResolver};
use crate::adapters::identifier::IdentifierDecoder;
use crate::adapters::log_writer::LogWriter;
use crate::adapters::table_store::SheetsTable;
use crate::config::{Config, DataSourceConfig};
use crate::error::AppError;
use crate::log_controller::state::{start_log_writer, LogState, LogUpdate};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Everything the lookup handler needs, shared by all workers.
///
/// Adapters are trait objects so tests can swap in fakes.
#[derive(Clone)]
pub struct LookupState {
    pub source: Arc<dyn DateSource>,
    pub geo: Arc<dyn GeoResolver>,
    pub decoder: Arc<dyn IdentifierDecoder>,
    /// `None` when the access log is disabled.
    pub log: Option<LogState>,
    /// Whether the client address comes from forwarding headers or the socket peer.
    pub trust_forwarded: bool,
}

/// The receiving half of the access log, ready to be spawned.
pub struct LogPipeline {
    writer: LogWriter,
    rx: mpsc::Receiver<LogUpdate>,
}

impl LogPipeline {
    pub async fn run(self) {
        start_log_writer(self.writer, self.rx).await;
    }
}

impl LookupState {
    /// Builds every adapter from `config`, sharing one HTTP client between them.
    ///
    /// # Arguments
    /// * `config` - The process configuration loaded at startup.
    ///
    /// # Returns
    /// - `Ok((state, Some(pipeline)))` when the access log is configured. The pipeline
    ///   must be spawned for queued rows to reach the spreadsheet.
    /// - `Ok((state, None))` when the access log is disabled.
    /// - `Err(AppError)` if the HTTP client or the identifier decoder cannot be built.
    pub fn build(config: &Config) -> Result<(Self, Option<LogPipeline>), AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .connect_timeout(config.http_timeout.min(Duration::from_secs(5)))
            .build()?;

        let source: Arc<dyn DateSource> = match &config.data_source {
            DataSourceConfig::Csv { url } => {
                info!("Reading serials from published CSV export");
                Arc::new(CsvDateSource::new(client.clone(), url.clone()))
            }
            DataSourceConfig::Sheet(target) => {
                info!(
                    "Reading serials from spreadsheet {} range {}",
                    target.spreadsheet_id, target.range
                );
                let store = SheetsTable::new(
                    client.clone(),
                    config.sheets_api_base.clone(),
                    target.spreadsheet_id.clone(),
                    config.credentials.clone(),
                );
                Arc::new(SheetDateSource::new(Arc::new(store), target.range.clone()))
            }
        };

        let (log, pipeline) = match &config.log_sheet {
            Some(target) => {
                info!(
                    "Access log goes to spreadsheet {} range {}",
                    target.spreadsheet_id, target.range
                );
                let store = SheetsTable::new(
                    client.clone(),
                    config.sheets_api_base.clone(),
                    target.spreadsheet_id.clone(),
                    config.credentials.clone(),
                );
                let writer = LogWriter::new(Arc::new(store), target.range.clone());
                let (state, rx) = LogState::channel(config.log_queue_capacity);
                (Some(state), Some(LogPipeline { writer, rx }))
            }
            None => (None, None),
        };

        info!("Identifier decoding policy: {}", config.identifier_policy);

        let state = Self {
            source,
            geo: Arc::new(IpApiResolver::new(client, config.geo_api_url.clone())),
            decoder: config.identifier_policy.decoder()?,
            log,
            trust_forwarded: config.trust_forwarded,
        };
        Ok((state, pipeline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned()).unwrap()
    }

    #[test]
    fn log_pipeline_only_exists_when_configured() {
        let (state, pipeline) =
            LookupState::build(&config(&[("SHEET_CSV_URL", "http://127.0.0.1:1/x.csv")])).unwrap();
        assert!(state.log.is_none());
        assert!(pipeline.is_none());

        let (state, pipeline) = LookupState::build(&config(&[
            ("DATA_SOURCE", "sheet"),
            ("DATA_SPREADSHEET_ID", "data-doc"),
            ("LOG_SPREADSHEET_ID", "log-doc"),
        ]))
        .unwrap();
        assert!(state.log.is_some());
        assert!(pipeline.is_some());
    }

    #[test]
    fn configured_policy_drives_the_decoder() {
        let (state, _) = LookupState::build(&config(&[
            ("SHEET_CSV_URL", "http://127.0.0.1:1/x.csv"),
            ("IDENTIFIER_POLICY", "position"),
        ]))
        .unwrap();
        assert_eq!(state.decoder.decode("a-Copy-b-User-c-Machine").user, "Copy");
        assert!(state.trust_forwarded);
    }
}
