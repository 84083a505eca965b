//! Configuration file support for prodsec-query.
//!
//! Provides YAML-based configuration through `prodsec-query.config.yml`
//! files, environment overrides and the merge with command-line flags.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::outbound::network::SessionSettings;
use crate::application::dto::OutputFormat;
use crate::query_engine::services::PaginatedFetcher;
use crate::shared::error::QueryError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "prodsec-query.config.yml";

pub const ENV_REGISTRY_URL: &str = "PRODSEC_REGISTRY_URL";
pub const ENV_INCIDENT_DB_URL: &str = "PRODSEC_INCIDENT_DB_URL";
pub const ENV_ACCESS_TOKEN: &str = "PRODSEC_ACCESS_TOKEN";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub registry_url: Option<String>,
    pub incident_db_url: Option<String>,
    pub access_token: Option<String>,
    pub format: Option<String>,
    pub page_size: Option<usize>,
    pub max_result_count: Option<usize>,
    pub max_concurrent_requests: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        log::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

/// Values taken from `PRODSEC_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub registry_url: Option<String>,
    pub incident_db_url: Option<String>,
    pub access_token: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            registry_url: read(ENV_REGISTRY_URL),
            incident_db_url: read(ENV_INCIDENT_DB_URL),
            access_token: read(ENV_ACCESS_TOKEN),
        }
    }
}

/// Values given as command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub registry_url: Option<String>,
    pub incident_db_url: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Effective settings after merging flags, environment, file and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub registry_url: Option<String>,
    pub incident_db_url: Option<String>,
    pub access_token: Option<String>,
    pub format: OutputFormat,
    pub page_size: usize,
    pub max_result_count: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
}

impl Settings {
    /// Merges the sources; earlier sources win: CLI > environment > file > default
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidParameterValue`] for malformed URLs,
    /// unknown formats and zero-valued limits
    pub fn resolve(file: Option<ConfigFile>, env: EnvOverrides, cli: CliOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let format = match (cli.format, file.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(raw)) => OutputFormat::from_str(raw).map_err(|reason| {
                QueryError::InvalidParameterValue {
                    parameter: "format".to_string(),
                    reason,
                }
            })?,
            (None, None) => OutputFormat::default(),
        };

        let settings = Self {
            registry_url: normalize_url(
                "registry_url",
                cli.registry_url.or(env.registry_url).or(file.registry_url),
            )?,
            incident_db_url: normalize_url(
                "incident_db_url",
                cli.incident_db_url
                    .or(env.incident_db_url)
                    .or(file.incident_db_url),
            )?,
            access_token: env
                .access_token
                .or(file.access_token)
                .filter(|token| !token.trim().is_empty()),
            format,
            page_size: positive(
                "page_size",
                file.page_size.unwrap_or(PaginatedFetcher::DEFAULT_PAGE_SIZE),
            )?,
            max_result_count: positive(
                "max_result_count",
                file.max_result_count
                    .unwrap_or(PaginatedFetcher::DEFAULT_MAX_RESULT_COUNT),
            )?,
            max_concurrent_requests: positive(
                "max_concurrent_requests",
                file.max_concurrent_requests
                    .unwrap_or(PaginatedFetcher::DEFAULT_MAX_CONCURRENT_REQUESTS),
            )?,
            request_timeout: Duration::from_secs(positive(
                "request_timeout_secs",
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            )?),
        };
        Ok(settings)
    }

    pub fn fetcher(&self) -> Result<PaginatedFetcher> {
        PaginatedFetcher::new(
            self.page_size,
            self.max_result_count,
            self.max_concurrent_requests,
        )
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            access_token: self.access_token.clone(),
            timeout: self.request_timeout,
        }
    }
}

fn invalid(parameter: &str, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidParameterValue {
        parameter: parameter.to_string(),
        reason: reason.into(),
    }
}

fn normalize_url(parameter: &str, url: Option<String>) -> Result<Option<String>> {
    let Some(url) = url else {
        return Ok(None);
    };
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(invalid(parameter, "URL must not be empty").into());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            parameter,
            format!("'{}' must start with http:// or https://", url),
        )
        .into());
    }
    Ok(Some(url.to_string()))
}

fn positive<T: PartialOrd + Default>(parameter: &str, value: T) -> Result<T> {
    if value <= T::default() {
        return Err(invalid(parameter, "must be greater than zero").into());
    }
    Ok(value)
}
