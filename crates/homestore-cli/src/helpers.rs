//! Shared CLI helpers: value parsing and printing.

use anyhow::Result;
use serde_json::Value;

/// Parse a command-line value as JSON, falling back to a plain string.
///
/// `true`, `3`, `{"a":1}` keep their JSON types; `hello` becomes `"hello"`.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Print a single value: strings bare, everything else as JSON.
pub fn print_value(value: &Value) {
    match value {
        Value::String(s) => println!("{s}"),
        other => println!("{other}"),
    }
}

/// Pretty-print a JSON document to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
