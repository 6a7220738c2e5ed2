//! Config records: parsing, shallow merge, and dot-path addressing.
//!
//! A record is always a JSON object at the top level. Keys are dot paths
//! (`"telemetry.disabled"`); a literal dot inside a segment is `\.`.

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// One config document: a JSON object.
pub type ConfigRecord = Map<String, Value>;

/// Parse file content into a record, falling back to an empty one.
///
/// Invalid UTF-8, invalid JSON, and valid JSON that is not an object all
/// yield `{}`. Never fails.
pub fn parse_or_default(bytes: &[u8]) -> ConfigRecord {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        _ => ConfigRecord::new(),
    }
}

/// Top-level merge: every key of `overlay` replaces the same key in `base`.
///
/// Nested objects are replaced wholesale, not merged recursively.
pub fn shallow_merge(base: ConfigRecord, overlay: ConfigRecord) -> ConfigRecord {
    let mut merged = base;
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    merged
}

/// Split a dot-path key into its segments.
pub fn key_segments(key: &str) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(segments)
}

/// Look up `key`; non-object intermediates and invalid keys yield `None`.
pub fn get_path<'a>(record: &'a ConfigRecord, key: &str) -> Option<&'a Value> {
    let segments = key_segments(key).ok()?;
    let (last, parents) = segments.split_last()?;

    let mut current = record;
    for segment in parents {
        current = current.get(segment)?.as_object()?;
    }
    current.get(last)
}

/// Assign `value` at `key`, creating missing intermediate objects.
///
/// An existing intermediate that is not an object is left alone and
/// reported as [`StoreError::NotAnObject`].
pub fn set_path(record: &mut ConfigRecord, key: &str, value: Value) -> Result<()> {
    let segments = key_segments(key)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(StoreError::InvalidKey(key.to_string()));
    };

    let mut current = record;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            _ => {
                return Err(StoreError::NotAnObject {
                    key: key.to_string(),
                    parent: parents[..=depth].join("."),
                })
            }
        };
    }
    current.insert(last.clone(), value);
    Ok(())
}

/// Remove the value at `key`. Returns whether anything was removed.
pub fn delete_path(record: &mut ConfigRecord, key: &str) -> Result<bool> {
    let segments = key_segments(key)?;
    let Some((last, parents)) = segments.split_last() else {
        return Err(StoreError::InvalidKey(key.to_string()));
    };

    let mut current = record;
    for segment in parents {
        match current.get_mut(segment) {
            Some(Value::Object(map)) => current = map,
            _ => return Ok(false),
        }
    }
    Ok(current.remove(last).is_some())
}
