use crate::filter::Filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub paging: PagingRules,
    pub defaults: DefaultRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingRules {
    /// Overrides the `rows` of the default filter when set
    pub rows_per_page: Option<i64>,
}

impl Default for PagingRules {
    fn default() -> Self {
        Self {
            rows_per_page: Some(10),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultRules {
    /// Paging and sorting restored onto filters that omit them
    pub filter: String,
}

impl Default for DefaultRules {
    fn default() -> Self {
        Self {
            filter: "sort=name first=1 rows=10".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn default_filter(&self) -> Filter {
        let mut filter = Filter::from_string(&self.defaults.filter);
        if let Some(rows) = self.paging.rows_per_page {
            filter.set("rows", rows);
        }
        filter
    }

    /// Fill in the paging and sorting terms `filter` leaves out
    pub fn apply_defaults(&self, filter: &Filter) -> Filter {
        filter.merge_extra_keywords(&self.default_filter())
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ConsoleConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<ConsoleConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static ConsoleConfig {
    static DEFAULT_CONFIG: LazyLock<ConsoleConfig> = LazyLock::new(ConsoleConfig::default);
    &DEFAULT_CONFIG
}
