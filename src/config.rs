//! Project configuration (gas-dts.toml) parsing and types.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::convert::{ConvertOptions, DEFAULT_ROOT_NAMESPACE};
use crate::registry::{Definition, Registry};
use crate::render::RenderOptions;

/// File looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "gas-dts.toml";

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Root configuration structure for gas-dts.toml.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GasDtsConfig {
    /// Top-level namespace name (default: GoogleAppsScript).
    pub root_namespace: Option<String>,
    /// Comment wrap width (default: 80).
    pub comment_width: Option<usize>,
    /// Extra advanced services; an entry with a built-in id replaces it.
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Irregular vendor types and their replacement (usually `any` or `void`).
    #[serde(default)]
    pub irregular: IndexMap<String, String>,
}

impl GasDtsConfig {
    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicit configuration file, or gas-dts.toml from the current
    /// directory when it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load_from_path(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The built-in registry with this configuration's additions applied.
    pub fn registry(&self) -> Registry {
        let mut registry = Registry::builtin();
        for definition in &self.definitions {
            registry.add_definition(definition.clone());
        }
        registry.extend_irregular(self.irregular.clone());
        registry
    }

    pub fn convert_options(&self) -> ConvertOptions {
        let mut render = RenderOptions::default();
        if let Some(width) = self.comment_width {
            render = render.with_comment_width(width);
        }
        ConvertOptions {
            root_namespace: self
                .root_namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_NAMESPACE.to_string()),
            render,
        }
    }
}
