// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use protable_app::datasets::DatasetKind;
use protable_app::{
    DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE_OPTIONS, TableConfig, sanitize_page_size,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "protable";
pub const CONFIG_PATH_ENV: &str = "PROTABLE_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            table: Table::default(),
            data: Data::default(),
            log: Log::default(),
        }
    }
}

/// Raw `[table]` values. Page sizes stay signed so a bad value can be
/// replaced with a warning instead of failing the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    pub page_size: Option<i64>,
    pub page_size_options: Option<Vec<i64>>,
    pub searchable: Option<bool>,
    pub selectable: Option<bool>,
    pub pagination: Option<bool>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub dataset: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [table], [data], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(dataset) = &self.data.dataset
            && DatasetKind::parse(dataset).is_none()
        {
            bail!(
                "data.dataset in {} must be one of {}, got {:?}",
                path.display(),
                dataset_names(),
                dataset
            );
        }

        if let Some(data_path) = &self.data.path
            && data_path.trim().is_empty()
        {
            bail!("data.path in {} must not be empty", path.display());
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        Ok(())
    }

    pub fn dataset(&self) -> DatasetKind {
        self.data
            .dataset
            .as_deref()
            .and_then(DatasetKind::parse)
            .unwrap_or(DatasetKind::Employees)
    }

    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.path.as_ref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    /// Builds the engine config. `fallback_page_size` applies when the file
    /// sets no page size.
    pub fn table_config(&self, fallback_page_size: usize) -> TableConfig {
        let defaults = TableConfig::default();
        let page_size = self
            .table
            .page_size
            .map(sanitize_page_size)
            .unwrap_or(fallback_page_size);
        let page_size_options = match &self.table.page_size_options {
            Some(options) => options
                .iter()
                .filter_map(|size| usize::try_from(*size).ok())
                .collect(),
            None => DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        };
        TableConfig {
            page_size,
            page_size_options,
            searchable: self.table.searchable.unwrap_or(defaults.searchable),
            selectable: self.table.selectable.unwrap_or(defaults.selectable),
            pagination: self.table.pagination.unwrap_or(defaults.pagination),
            empty_message: self
                .table
                .empty_message
                .clone()
                .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_owned()),
            loading: defaults.loading,
        }
        .normalized()
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# protable config\n# Place this file at: {}\n\nversion = 1\n\n[table]\npage_size = 10\npage_size_options = [5, 10, 20, 50]\nsearchable = true\nselectable = true\npagination = true\nempty_message = \"{}\"\n\n[data]\n# One of: {}\ndataset = \"employees\"\n# Optional. A JSON array of objects, each with a unique `id`.\n# path = \"/absolute/path/to/records.json\"\n\n[log]\n# Overridden by RUST_LOG when set.\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_EMPTY_MESSAGE,
            dataset_names(),
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn dataset_names() -> String {
    DatasetKind::ALL
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
