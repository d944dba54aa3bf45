//! Process configuration, read once from the environment at startup.
//!
//! A `.env` file in the working directory is honoured when present. Optional
//! values fall back to a default with an `info` line; a value that is present but
//! does not parse, or a required value that is missing, is a startup error.

use crate::adapters::identifier::IdentifierPolicy;
use crate::adapters::table_store::Credentials;
use crate::error::AppError;
use log::info;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_GEO_API_URL: &str = "http://ip-api.com/json";
const DEFAULT_DATA_RANGE: &str = "A:B";
const DEFAULT_LOG_RANGE: &str = "A:M";

/// A range inside one spreadsheet document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub range: String,
}

/// Where serial → date records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// A spreadsheet published to the web as CSV.
    Csv { url: String },
    /// A range read through the spreadsheet values API.
    Sheet(SheetTarget),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_source: DataSourceConfig,
    /// `None` disables the access log.
    pub log_sheet: Option<SheetTarget>,
    pub sheets_api_base: String,
    pub credentials: Credentials,
    pub geo_api_url: String,
    pub identifier_policy: IdentifierPolicy,
    /// Take the client address from `Forwarded` / `X-Forwarded-For` instead of the
    /// socket peer. Only safe behind a proxy that overwrites those headers.
    pub trust_forwarded: bool,
    pub http_timeout: Duration,
    pub log_queue_capacity: usize,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment overrides from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_source = match var("DATA_SOURCE").as_deref().unwrap_or("csv") {
            "csv" => DataSourceConfig::Csv {
                url: required(&var, "SHEET_CSV_URL")?,
            },
            "sheet" => DataSourceConfig::Sheet(SheetTarget {
                spreadsheet_id: required(&var, "DATA_SPREADSHEET_ID")?,
                range: var("DATA_RANGE").unwrap_or_else(|| DEFAULT_DATA_RANGE.to_string()),
            }),
            other => {
                return Err(AppError::Config(format!(
                    "DATA_SOURCE must be 'csv' or 'sheet', got '{other}'"
                )));
            }
        };

        let log_sheet = match var("LOG_SPREADSHEET_ID") {
            Some(spreadsheet_id) => Some(SheetTarget {
                spreadsheet_id,
                range: var("LOG_RANGE").unwrap_or_else(|| DEFAULT_LOG_RANGE.to_string()),
            }),
            None => {
                info!("LOG_SPREADSHEET_ID not set, access log disabled");
                None
            }
        };

        let credentials = if let Some(path) = var("SHEETS_TOKEN_FILE") {
            Credentials::TokenFile(PathBuf::from(path))
        } else if let Some(token) = var("SHEETS_ACCESS_TOKEN") {
            Credentials::Bearer(token)
        } else if let Some(key) = var("SHEETS_API_KEY") {
            Credentials::ApiKey(key)
        } else {
            Credentials::None
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "PORT", 3000)?,
            data_source,
            log_sheet,
            sheets_api_base: var("SHEETS_API_BASE")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_BASE.to_string()),
            credentials,
            geo_api_url: var("GEO_API_URL").unwrap_or_else(|| DEFAULT_GEO_API_URL.to_string()),
            identifier_policy: parse_or(&var, "IDENTIFIER_POLICY", IdentifierPolicy::Anchor)?,
            trust_forwarded: parse_or(&var, "TRUST_FORWARDED", true)?,
            http_timeout: Duration::from_secs(parse_or(&var, "HTTP_TIMEOUT_SECS", 10)?),
            log_queue_capacity: parse_or(&var, "LOG_QUEUE_CAPACITY", 100)?,
        })
    }
}

fn required<F>(var: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    var(key).ok_or_else(|| AppError::Config(format!("{key} must be set")))
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {key} value '{raw}': {e}"))),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
