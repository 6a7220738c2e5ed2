//! Home-directory resolution for the legacy and current config roots.
//!
//! The store never computes locations itself; it asks a [`HomePathResolver`].
//! [`DefaultHomePaths`] maps an application name onto the OS layout,
//! [`FixedHomePaths`] pins both roots to explicit directories.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// File name of the config document under either root.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Supplies the two candidate roots searched for `config.json`.
///
/// Current takes precedence over legacy when both define a key.
pub trait HomePathResolver {
    /// Root of the pre-migration layout (e.g. `~/.myapp/`).
    fn legacy_root(&self) -> Result<PathBuf>;

    /// Root of the current layout (e.g. `~/.config/myapp/`).
    fn current_root(&self) -> Result<PathBuf>;

    /// `<legacy root>/config.json`
    fn legacy_config_path(&self) -> Result<PathBuf> {
        Ok(self.legacy_root()?.join(CONFIG_FILE_NAME))
    }

    /// `<current root>/config.json`
    fn current_config_path(&self) -> Result<PathBuf> {
        Ok(self.current_root()?.join(CONFIG_FILE_NAME))
    }
}

/// OS-derived roots for an application name.
///
/// - legacy: `$HOME/.<app>`
/// - current: `<config dir>/<app>` (`$XDG_CONFIG_HOME` or `~/.config` on
///   Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on Windows)
#[derive(Clone, Debug)]
pub struct DefaultHomePaths {
    app: String,
}

impl DefaultHomePaths {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }
}

impl HomePathResolver for DefaultHomePaths {
    fn legacy_root(&self) -> Result<PathBuf> {
        let home = dirs_next::home_dir().ok_or(StoreError::HomeNotFound { what: "home" })?;
        Ok(home.join(format!(".{}", self.app)))
    }

    fn current_root(&self) -> Result<PathBuf> {
        let config = dirs_next::config_dir().ok_or(StoreError::HomeNotFound { what: "config" })?;
        Ok(config.join(&self.app))
    }
}

/// Both roots given explicitly. Used by tests and by `--legacy-root` /
/// `--current-root` overrides.
#[derive(Clone, Debug)]
pub struct FixedHomePaths {
    legacy: PathBuf,
    current: PathBuf,
}

impl FixedHomePaths {
    pub fn new(legacy: impl Into<PathBuf>, current: impl Into<PathBuf>) -> Self {
        Self {
            legacy: legacy.into(),
            current: current.into(),
        }
    }
}

impl HomePathResolver for FixedHomePaths {
    fn legacy_root(&self) -> Result<PathBuf> {
        Ok(self.legacy.clone())
    }

    fn current_root(&self) -> Result<PathBuf> {
        Ok(self.current.clone())
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a tilde are returned unchanged; a tilde with no resolvable
/// home is an error rather than a literal `~` directory.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs_next::home_dir().ok_or(StoreError::HomeNotFound { what: "home" });
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs_next::home_dir().ok_or(StoreError::HomeNotFound { what: "home" })?;
        return Ok(home.join(rest));
    }
    Ok(Path::new(path).to_path_buf())
}
