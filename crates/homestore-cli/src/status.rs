//! `homestore status`: show where config is read from and written to.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use homestore_core::ConfigStore;

/// Run the status command.
pub fn run(store: &ConfigStore) -> Result<()> {
    println!();
    println!("{}", "homestore status".cyan().bold());
    println!();

    print_location("Current:", store.path());
    print_location("Legacy:", store.legacy_path());

    println!(
        "  {:<12} {}",
        "Keys:".bold(),
        format!("{} top-level", store.size()).dimmed()
    );
    println!();
    Ok(())
}

fn print_location(label: &str, path: &Path) {
    println!(
        "  {:<12} {} {}",
        label.bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestore_core::{load_global_config, FixedHomePaths};

    #[tokio::test]
    async fn status_reports_present_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = FixedHomePaths::new(dir.path().join("legacy"), dir.path().join("current"));
        let mut store = load_global_config(&paths).await.unwrap();
        store.set("shown", true).await.unwrap();

        assert!(store.path().exists());
        assert!(!store.legacy_path().exists());
        run(&store).unwrap();
        print_location("Missing:", &dir.path().join("nowhere.json"));
    }
}
