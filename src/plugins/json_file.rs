//! Flat JSON file backend.
//!
//! One file per shoulder, `<dir>/<shoulder>.json`, mapping local ids to
//! `{"url": ..., "meta": {...}}`. The file is read again on every lookup.

use crate::core::ark::{ArkIdentifier, normalize_id};
use crate::core::error::ResolverError;
use crate::core::mapper::{Mapper, MetadataFormat, Scope};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct BackingRecord {
    url: String,
    meta: Map<String, Value>,
}

type BackingTable = HashMap<String, BackingRecord>;

#[derive(Debug)]
pub struct JsonFileMapper {
    scope: Scope,
    file_path: PathBuf,
}

impl JsonFileMapper {
    /// Build a mapper for `(naan, shoulder)` backed by `<dir>/<shoulder>.json`.
    ///
    /// Fails with `MapperUnavailable` when that file is missing, not a regular
    /// file, or cannot be opened for reading.
    pub fn new(dir: impl AsRef<Path>, naan: &str, shoulder: &str) -> Result<Self, ResolverError> {
        let scope = Scope::new(normalize_id(naan), normalize_id(shoulder));
        let file_path = backing_file_path(dir.as_ref(), &scope.shoulder);

        if !file_path.is_file() {
            return Err(ResolverError::MapperUnavailable(format!(
                "Non accessible JSON file {}",
                file_path.display()
            )));
        }
        File::open(&file_path).map_err(|e| {
            ResolverError::MapperUnavailable(format!(
                "Non accessible JSON file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        Ok(Self { scope, file_path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_map(&self) -> Result<BackingTable, ResolverError> {
        tracing::debug!(path = %self.file_path.display(), "loading backing file");
        let content = fs::read(&self.file_path)?;
        serde_json::from_slice(&content).map_err(|e| ResolverError::BackingStoreCorrupt {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })
    }

    fn lookup(&self, id: &ArkIdentifier) -> Result<BackingRecord, ResolverError> {
        self.scope.check_authority(id)?;
        self.find_record(id)
    }

    /// Table lookup for an identifier whose authority is already checked.
    fn find_record(&self, id: &ArkIdentifier) -> Result<BackingRecord, ResolverError> {
        let mut table = self.load_map()?;
        table
            .remove(id.local_id())
            .ok_or_else(|| ResolverError::UnknownIdentifier(id.to_string()))
    }
}

impl Mapper for JsonFileMapper {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn resolve_url(&self, id: &ArkIdentifier) -> Result<String, ResolverError> {
        self.lookup(id).map(|record| record.url)
    }

    fn resolve_metadata(
        &self,
        id: &ArkIdentifier,
        format: MetadataFormat,
    ) -> Result<Value, ResolverError> {
        self.scope.check_authority(id)?;
        if format != MetadataFormat::RdfJson {
            return Err(ResolverError::UnsupportedFormat(format.to_string()));
        }
        let mut meta = self.find_record(id)?.meta;
        meta.insert("@id".to_string(), Value::String(id.to_string()));
        Ok(Value::Object(meta))
    }
}

pub fn backing_file_path(dir: &Path, shoulder: &str) -> PathBuf {
    dir.join(format!("{}.json", shoulder))
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "json-file",
        "version": "0.1.0",
        "description":
            "Per-shoulder JSON table of local id -> {url, meta}, re-read on every lookup",
        "commands": [
            { "name": "resolve", "parameters": ["path", "metadata", "format"] }
        ],
        "formats": [MetadataFormat::RdfJson.as_str()],
        "storage": ["<dir>/<shoulder>.json"]
    })
}
