//! Configuration file support for spdx-to-osv.
//!
//! Provides YAML-based configuration through `spdx-to-osv.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line arguments (CLI flag > config file > built-in default).

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::OsvClient;
use crate::application::dto::ConversionRequest;
use crate::cli::Args;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "spdx-to-osv.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub all_packages: Option<bool>,
    pub maven_group_names: Option<bool>,
    pub max_concurrent_queries: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub osv_api_url: Option<String>,
    pub resolve_swh_releases: Option<bool>,
    pub fail_on_vulnerabilities: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Settings after merging CLI arguments over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub all_packages: bool,
    pub maven_group_names: bool,
    pub max_concurrent_queries: usize,
    pub timeout: Duration,
    pub osv_api_url: String,
    pub resolve_swh_releases: bool,
    pub fail_on_vulnerabilities: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            all_packages: false,
            maven_group_names: false,
            max_concurrent_queries: ConversionRequest::DEFAULT_MAX_CONCURRENT_QUERIES,
            timeout: Duration::from_secs(OsvClient::DEFAULT_TIMEOUT_SECONDS),
            osv_api_url: OsvClient::DEFAULT_API_URL.to_string(),
            resolve_swh_releases: false,
            fail_on_vulnerabilities: false,
        }
    }
}

impl Settings {
    /// Merges the CLI arguments over the optional config file.
    ///
    /// Boolean flags can only switch a setting on; a flag left off keeps
    /// the config file's value.
    pub fn merge(args: &Args, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        let defaults = Self::default();

        Self {
            all_packages: args.all || config.all_packages.unwrap_or(defaults.all_packages),
            maven_group_names: args.maven_group_names
                || config.maven_group_names.unwrap_or(defaults.maven_group_names),
            max_concurrent_queries: args
                .max_concurrent
                .or(config.max_concurrent_queries)
                .unwrap_or(defaults.max_concurrent_queries),
            timeout: config
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            osv_api_url: config.osv_api_url.unwrap_or(defaults.osv_api_url),
            resolve_swh_releases: args.resolve_swh_releases
                || config
                    .resolve_swh_releases
                    .unwrap_or(defaults.resolve_swh_releases),
            fail_on_vulnerabilities: args.fail_on_vulnerabilities
                || config
                    .fail_on_vulnerabilities
                    .unwrap_or(defaults.fail_on_vulnerabilities),
        }
    }
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

    validate_config(&config)?;
    warn_unknown_fields(&config);

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

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(max) = config.max_concurrent_queries {
        if !(1..=ConversionRequest::MAX_CONCURRENT_QUERIES_LIMIT).contains(&max) {
            bail!(
                "Invalid config: max_concurrent_queries must be between 1 and {}, got {}.\n\n\
                 💡 Hint: Values around 10 keep the OSV service responsive.",
                ConversionRequest::MAX_CONCURRENT_QUERIES_LIMIT,
                max
            );
        }
    }

    if config.timeout_seconds == Some(0) {
        bail!(
            "Invalid config: timeout_seconds must be greater than 0.\n\n\
             💡 Hint: Remove the key to use the default of {} seconds.",
            OsvClient::DEFAULT_TIMEOUT_SECONDS
        );
    }

    if let Some(url) = &config.osv_api_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!(
                "Invalid config: osv_api_url must be an http(s) URL, got '{}'.\n\n\
                 💡 Hint: The public endpoint is {}",
                url,
                OsvClient::DEFAULT_API_URL
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
