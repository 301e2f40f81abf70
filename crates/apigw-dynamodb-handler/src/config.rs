//! Application configuration

use std::env;

use anyhow::{bail, Context, Result};
use apigw_dynamodb_sdk::storage::StorageType;

const DEFAULT_LOG_FILTER: &str = "info,apigw_dynamodb_handler=debug";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for CloudWatch
    Json,
    Text,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Table every record is written to
    pub table_name: String,

    /// Which backend serves the table
    pub storage: StorageType,

    /// `EnvFilter` directives
    pub log_filter: String,

    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup("TABLE_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("TABLE_NAME must be set to the target DynamoDB table")?;

        let storage: StorageType = match lookup("APIGW_DYNAMODB_STORE") {
            Some(value) => value
                .parse()
                .map_err(|e| anyhow::anyhow!("APIGW_DYNAMODB_STORE: {}", e))?,
            None => StorageType::DynamoDb,
        };

        let log_format = match lookup("APIGW_DYNAMODB_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("json") => LogFormat::Json,
            Some("text") => LogFormat::Text,
            Some(other) => bail!("APIGW_DYNAMODB_LOG_FORMAT: unknown format {:?}, expected \"json\" or \"text\"", other),
        };

        Ok(Self {
            table_name,
            storage,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("TABLE_NAME", "movies")]).unwrap();
        assert_eq!(config.table_name, "movies");
        assert_eq!(config.storage, StorageType::DynamoDb);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TABLE_NAME", " movies "),
            ("APIGW_DYNAMODB_STORE", "memory"),
            ("APIGW_DYNAMODB_LOG_FORMAT", "text"),
            ("RUST_LOG", "warn"),
        ])
        .unwrap();
        assert_eq!(config.table_name, "movies");
        assert_eq!(config.storage, StorageType::Memory);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_table_name_is_required() {
        assert!(load(&[]).is_err());
        assert!(load(&[("TABLE_NAME", "  ")]).is_err());
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(load(&[("TABLE_NAME", "movies"), ("APIGW_DYNAMODB_STORE", "redis")]).is_err());
        assert!(load(&[("TABLE_NAME", "movies"), ("APIGW_DYNAMODB_LOG_FORMAT", "xml")]).is_err());
    }
}
