//! `homestore init`: seed the current config with tool defaults.
//!
//! Only keys missing from the merged config are written, so existing
//! values (including ones adopted from the legacy file) are kept.

use anyhow::{Context, Result};
use colored::Colorize;

use homestore_core::defaults::cli_defaults;
use homestore_core::{ConfigRecord, ConfigStore};

/// Run the init command.
pub async fn run(store: &mut ConfigStore) -> Result<()> {
    let missing = missing_defaults(store);

    if missing.is_empty() {
        println!(
            "  {} config already initialized at {}",
            "✓".green(),
            store.path().display()
        );
        return Ok(());
    }

    let keys: Vec<String> = missing.keys().cloned().collect();
    store
        .set_all(missing)
        .await
        .context("failed to write default config")?;

    for key in keys {
        println!("  {} set default {}", "✓".green(), key.bold());
    }
    println!("  {} config at {}", "✓".green(), store.path().display());
    Ok(())
}

/// Defaults for top-level keys the store does not have yet.
fn missing_defaults(store: &ConfigStore) -> ConfigRecord {
    cli_defaults()
        .into_iter()
        .filter(|(key, _)| !store.all().contains_key(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestore_core::defaults::{CLI_ID_KEY, TELEMETRY_DISABLED_KEY};
    use homestore_core::{load_global_config, FixedHomePaths};
    use serde_json::json;

    #[tokio::test]
    async fn init_keeps_existing_values() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("legacy");
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("config.json"), r#"{"telemetryDisabled":true}"#).unwrap();

        let paths = FixedHomePaths::new(&legacy, dir.path().join("current"));
        let mut store = load_global_config(&paths).await.unwrap();
        run(&mut store).await.unwrap();

        assert_eq!(store.get(TELEMETRY_DISABLED_KEY), Some(&json!(true)));
        assert!(store.get(CLI_ID_KEY).and_then(|v| v.as_str()).is_some());

        let on_disk: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(store.path()).unwrap(),
        )
        .unwrap();
        assert_eq!(on_disk, serde_json::Value::Object(store.all().clone()));
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = FixedHomePaths::new(dir.path().join("legacy"), dir.path().join("current"));

        let mut store = load_global_config(&paths).await.unwrap();
        run(&mut store).await.unwrap();
        let first_id = store.get(CLI_ID_KEY).cloned();

        let mut reloaded = load_global_config(&paths).await.unwrap();
        assert!(missing_defaults(&reloaded).is_empty());
        run(&mut reloaded).await.unwrap();
        assert_eq!(reloaded.get(CLI_ID_KEY).cloned(), first_id);
    }
}
