//! Seed values layered beneath the legacy and current records.

use serde_json::Value;
use uuid::Uuid;

use crate::record::ConfigRecord;

/// Key holding the telemetry opt-out flag.
pub const TELEMETRY_DISABLED_KEY: &str = "telemetryDisabled";

/// Key holding the per-install anonymous identifier.
pub const CLI_ID_KEY: &str = "cliId";

/// Defaults a CLI tool starts from before any file has been written.
///
/// Telemetry is enabled and a fresh v4 UUID identifies the install. The
/// UUID is only persisted once something writes the store.
pub fn cli_defaults() -> ConfigRecord {
    let mut defaults = ConfigRecord::new();
    defaults.insert(TELEMETRY_DISABLED_KEY.to_string(), Value::Bool(false));
    defaults.insert(
        CLI_ID_KEY.to_string(),
        Value::String(Uuid::new_v4().to_string()),
    );
    defaults
}
