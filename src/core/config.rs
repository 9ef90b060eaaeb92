//! Resolver configuration loaded from `ark-resolver.toml`.
//!
//! ```toml
//! naan = "77298"
//! data_dir = "data"
//!
//! [[mapper]]
//! kind = "json-file"
//! shoulder = "example0"
//! ```
//!
//! `[[mapper]]` order is routing priority.

use crate::core::error::ResolverError;
use crate::core::mapper::Mapper;
use crate::core::registry::{MapperFactory, Registry};
use crate::plugins::json_file::JsonFileMapper;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ark-resolver.toml";
pub const DEFAULT_NAAN: &str = "77298";
pub const DEFAULT_SHOULDER: &str = "example0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapperKind {
    JsonFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    pub kind: MapperKind,
    pub shoulder: String,
    /// Overrides the top-level `naan`.
    #[serde(default)]
    pub naan: Option<String>,
    /// Overrides the top-level `data_dir`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    #[serde(default = "default_naan")]
    pub naan: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default, rename = "mapper")]
    pub mappers: Vec<MapperConfig>,
}

fn default_naan() -> String {
    DEFAULT_NAAN.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            naan: default_naan(),
            data_dir: default_data_dir(),
            mappers: vec![MapperConfig {
                kind: MapperKind::JsonFile,
                shoulder: DEFAULT_SHOULDER.to_string(),
                naan: None,
                dir: None,
            }],
        }
    }
}

impl ResolverConfig {
    /// Mapper factories in configuration order.
    pub fn factories(&self) -> Vec<MapperFactory> {
        self.mappers
            .iter()
            .map(|m| {
                let naan = m.naan.clone().unwrap_or_else(|| self.naan.clone());
                let dir = m.dir.clone().unwrap_or_else(|| self.data_dir.clone());
                let shoulder = m.shoulder.clone();
                match m.kind {
                    MapperKind::JsonFile => Box::new(move || {
                        JsonFileMapper::new(&dir, &naan, &shoulder)
                            .map(|mapper| Box::new(mapper) as Box<dyn Mapper>)
                    }) as MapperFactory,
                }
            })
            .collect()
    }

    /// Build a registry from every configured mapper that is available.
    pub fn build_registry(&self) -> Result<Registry, ResolverError> {
        let mut registry = Registry::new();
        let loaded = registry.load(self.factories())?;
        tracing::debug!(loaded, configured = self.mappers.len(), "registry ready");
        Ok(registry)
    }

    fn rebase(&mut self, base: &Path) {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        for m in &mut self.mappers {
            if let Some(dir) = m.dir.as_mut().filter(|d| d.is_relative()) {
                *dir = base.join(&*dir);
            }
        }
    }
}

/// Load configuration from `path`.
///
/// A missing file yields [`ResolverConfig::default`]. Relative directories
/// are resolved against the directory holding the file.
pub fn load_config(path: &Path) -> Result<ResolverConfig, ResolverError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ResolverConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let mut config: ResolverConfig = toml::from_str(&content)
        .map_err(|e| ResolverError::ConfigError(format!("{}: {}", path.display(), e)))?;
    if let Some(base) = path.parent() {
        config.rebase(base);
    }
    Ok(config)
}
