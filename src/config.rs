use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::RaggedRows;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
    pub code: CodeConfig,
    pub blocks: BlocksConfig,
    pub table: TableConfig,
    pub list: ListConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Open links in a new browsing context
    pub new_tab: bool,
    pub rel: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            new_tab: true,
            rel: "noopener noreferrer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Show the fence language as a label above the block
    pub show_language: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            show_language: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    pub render_spacers: bool,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            render_spacers: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct TableConfig {
    pub ragged_rows: RaggedRows,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Left margin per indent character of a list item
    pub indent_rem: f32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { indent_rem: 0.75 }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // build.rs checks every section and key of the bundled file against this schema
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(Error::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Self::compiled_default()
            }
            Err(err) => {
                tracing::warn!(%err, "falling back to default config");
                Self::compiled_default()
            }
        }
    }
}
