//! Global config store for command-line tools.
//!
//! Resolves one JSON config object from a legacy and a current location,
//! merges them (current wins, key by key at the top level), and writes every
//! change back to the current location as a full snapshot.
//!
//! # Usage
//! ```no_run
//! use homestore_core::{load_global_config, DefaultHomePaths};
//!
//! # async fn run() -> homestore_core::Result<()> {
//! let paths = DefaultHomePaths::new("mytool");
//! let mut config = load_global_config(&paths).await?;
//! if config.get("telemetryDisabled").is_none() {
//!     config.set("telemetryDisabled", false).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod defaults;
pub mod error;
pub mod paths;
pub mod record;
pub mod store;

pub use error::{Result, StoreError};
pub use paths::{DefaultHomePaths, FixedHomePaths, HomePathResolver};
pub use record::{parse_or_default, shallow_merge, ConfigRecord};
pub use store::{load_global_config, load_global_config_with, ConfigStore, LoadOptions};
