//! homestore CLI: entry point.
//!
//! # Commands
//!
//! - `homestore get <KEY>`: print one value
//! - `homestore set <KEY> <VALUE>`: set a value (JSON, or a plain string)
//! - `homestore unset <KEY>`: remove a value
//! - `homestore list`: print the whole merged config
//! - `homestore clear`: remove every value
//! - `homestore status`: show where config is read from and written to
//! - `homestore init`: write tool defaults for keys not yet set

mod helpers;
mod init;
mod status;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use homestore_core::paths::expand_tilde;
use homestore_core::{
    load_global_config, ConfigStore, DefaultHomePaths, FixedHomePaths, HomePathResolver,
};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Inspect and edit a CLI tool's global JSON config.
#[derive(Parser)]
#[command(name = "homestore", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    roots: RootArgs,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the legacy and current roots live.
#[derive(Args)]
struct RootArgs {
    /// Application name used to derive `~/.<app>` and `<config dir>/<app>`
    #[arg(long, global = true, default_value = "homestore")]
    app: String,

    /// Override the legacy root directory (requires --current-root)
    #[arg(long, global = true)]
    legacy_root: Option<String>,

    /// Override the current root directory (requires --legacy-root)
    #[arg(long, global = true)]
    current_root: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored at KEY (dot path)
    Get { key: String },

    /// Store VALUE at KEY; VALUE is parsed as JSON, falling back to a string
    Set { key: String, value: String },

    /// Remove the value stored at KEY
    Unset { key: String },

    /// Print the whole merged config as JSON
    List,

    /// Remove every value
    Clear,

    /// Show config locations and what was found there
    Status,

    /// Write tool defaults for any key not yet set
    Init,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let resolver = resolver_from_args(&cli.roots)?;
    let mut store = load_global_config(resolver.as_ref())
        .await
        .context("failed to load global config")?;
    debug!(path = %store.path().display(), keys = store.size(), "config ready");

    match cli.command {
        Commands::Get { key } => run_get(&store, &key),
        Commands::Set { key, value } => run_set(&mut store, &key, &value).await,
        Commands::Unset { key } => run_unset(&mut store, &key).await,
        Commands::List => helpers::print_json(&serde_json::Value::Object(store.all().clone())),
        Commands::Clear => {
            store.clear().await.context("failed to clear config")?;
            println!("  {} cleared {}", "✓".green(), store.path().display());
            Ok(())
        }
        Commands::Status => status::run(&store),
        Commands::Init => init::run(&mut store).await,
    }
}

/// Pick the path resolver from `--app` or the explicit root overrides.
fn resolver_from_args(args: &RootArgs) -> Result<Box<dyn HomePathResolver>> {
    match (&args.legacy_root, &args.current_root) {
        (Some(legacy), Some(current)) => {
            let legacy: PathBuf = expand_tilde(legacy)?;
            let current: PathBuf = expand_tilde(current)?;
            Ok(Box::new(FixedHomePaths::new(legacy, current)))
        }
        (None, None) => Ok(Box::new(DefaultHomePaths::new(args.app.clone()))),
        _ => bail!("--legacy-root and --current-root must be given together"),
    }
}

// ─────────────────────────────────────────────
// Key commands
// ─────────────────────────────────────────────

fn run_get(store: &ConfigStore, key: &str) -> Result<()> {
    match store.get(key) {
        Some(value) => {
            helpers::print_value(value);
            Ok(())
        }
        None => bail!("{key} is not set"),
    }
}

async fn run_set(store: &mut ConfigStore, key: &str, raw: &str) -> Result<()> {
    let value = helpers::parse_value(raw);
    store
        .set(key, value)
        .await
        .with_context(|| format!("failed to set {key}"))?;
    println!("  {} {} saved to {}", "✓".green(), key.bold(), store.path().display());
    Ok(())
}

async fn run_unset(store: &mut ConfigStore, key: &str) -> Result<()> {
    let removed = store
        .delete(key)
        .await
        .with_context(|| format!("failed to unset {key}"))?;
    if removed {
        println!("  {} {} removed", "✓".green(), key.bold());
    } else {
        println!("  {} {} was not set", "·".dimmed(), key);
    }
    Ok(())
}

/// Initialize tracing/logging on stderr so stdout stays parseable.
///
/// `HOMESTORE_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("HOMESTORE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Filter used when `HOMESTORE_LOG` is unset.
///
/// `homestore` matches the binary's own target and `homestore_core` by prefix.
fn default_log_directives(verbose: bool) -> &'static str {
    if verbose {
        "homestore=debug,info"
    } else {
        "warn"
    }
}
