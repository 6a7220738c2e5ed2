//! The global config store: load, merge, read, write.
//!
//! # Loading precedence
//! 1. Defaults (from [`LoadOptions`], empty unless given)
//! 2. Legacy file at `<legacy root>/config.json`
//! 3. Current file at `<current root>/config.json`
//!
//! Later layers replace earlier ones key by key at the top level. Missing or
//! unparsable files count as empty. Writes only ever go to the current file,
//! always as a full snapshot.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::paths::HomePathResolver;
use crate::record::{self, ConfigRecord};

/// Extra inputs to [`load_global_config_with`].
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Lowest-precedence layer, beneath the legacy record.
    pub defaults: ConfigRecord,
}

impl LoadOptions {
    pub fn with_defaults(defaults: ConfigRecord) -> Self {
        Self { defaults }
    }
}

/// Load and merge the legacy and current config files.
pub async fn load_global_config<R>(resolver: &R) -> Result<ConfigStore>
where
    R: HomePathResolver + ?Sized,
{
    load_global_config_with(resolver, LoadOptions::default()).await
}

/// Like [`load_global_config`], with a defaults layer beneath both files.
pub async fn load_global_config_with<R>(resolver: &R, options: LoadOptions) -> Result<ConfigStore>
where
    R: HomePathResolver + ?Sized,
{
    let legacy_path = resolver.legacy_config_path()?;
    let current_path = resolver.current_config_path()?;

    let legacy = read_legacy_record(&legacy_path).await;
    let current = read_record(&current_path).await?;
    debug!(
        legacy = %legacy_path.display(),
        current = %current_path.display(),
        legacy_keys = legacy.len(),
        current_keys = current.len(),
        "loaded global config"
    );

    let merged = record::shallow_merge(record::shallow_merge(options.defaults, legacy), current);

    Ok(ConfigStore {
        record: merged,
        path: current_path,
        legacy_path,
    })
}

/// Read a config file. Absent or malformed content is an empty record.
async fn read_record(path: &Path) -> Result<ConfigRecord> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(record::parse_or_default(&bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRecord::new()),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// The legacy file only supplies fallbacks, so any failure to read it
/// (permissions included) yields an empty record.
async fn read_legacy_record(path: &Path) -> ConfigRecord {
    match tokio::fs::read(path).await {
        Ok(bytes) => record::parse_or_default(&bytes),
        Err(_) => ConfigRecord::new(),
    }
}

// ─────────────────────────────────────────────
// ConfigStore
// ─────────────────────────────────────────────

/// Live handle to the merged global config.
///
/// Reads are served from memory. Every successful mutation rewrites the
/// current config file with the whole record, so [`ConfigStore::all`] and
/// the file agree after each call returns. A failed write rolls the
/// in-memory record back to its previous state.
#[derive(Debug)]
pub struct ConfigStore {
    record: ConfigRecord,
    /// Where writes go (`<current root>/config.json`).
    path: PathBuf,
    /// Read once at load, never written.
    legacy_path: PathBuf,
}

impl ConfigStore {
    /// Value at `key` (dot path), or `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        record::get_path(&self.record, key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The whole merged record.
    pub fn all(&self) -> &ConfigRecord {
        &self.record
    }

    /// Number of top-level keys.
    pub fn size(&self) -> usize {
        self.record.len()
    }

    /// Path of the current config file, where writes go.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn legacy_path(&self) -> &Path {
        &self.legacy_path
    }

    /// Set `key` (dot path) to `value` and persist.
    pub async fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let previous = self.record.clone();
        record::set_path(&mut self.record, key, value.into())?;
        self.commit(previous).await
    }

    /// Assign every top-level entry of `entries`, then persist once.
    pub async fn set_all(&mut self, entries: ConfigRecord) -> Result<()> {
        let previous = self.record.clone();
        self.record = record::shallow_merge(std::mem::take(&mut self.record), entries);
        self.commit(previous).await
    }

    /// Remove `key`. Persists only when something was removed.
    pub async fn delete(&mut self, key: &str) -> Result<bool> {
        let previous = self.record.clone();
        if !record::delete_path(&mut self.record, key)? {
            return Ok(false);
        }
        self.commit(previous).await?;
        Ok(true)
    }

    /// Drop every key and persist an empty object.
    pub async fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.record);
        self.commit(previous).await
    }

    async fn commit(&mut self, previous: ConfigRecord) -> Result<()> {
        if let Err(e) = self.persist().await {
            self.record = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Write the full record to a temp sibling, then rename it into place.
    async fn persist(&self) -> Result<()> {
        let contents = render(&self.record)?;
        let persist_err = |source| StoreError::Persist {
            path: self.path.clone(),
            source,
        };

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        create_config_dir(dir).await.map_err(persist_err)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("config.json");
        let tmp_path = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        if let Err(e) = write_private_file(&tmp_path, &contents).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(persist_err(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(persist_err(e));
        }

        debug!(path = %self.path.display(), keys = self.record.len(), "saved global config");
        Ok(())
    }
}

/// Tab-indented JSON with a trailing newline.
fn render(record: &ConfigRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

async fn create_config_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(dir).await
}

async fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
