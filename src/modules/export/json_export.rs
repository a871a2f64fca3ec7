//! JSON Export
//!
//! Writes batch decode results to a JSON file.

use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One output element: the decoded function name (or an error sentinel)
/// and the normalized arguments (null when decoding produced none).
#[derive(Debug, Clone, Serialize)]
pub struct DecodeRecord {
    pub function: String,
    pub args: Value,
}

/// Write records as a pretty-printed JSON array (2-space indentation).
/// Returns the record count.
pub fn write_records(path: &Path, records: &[DecodeRecord]) -> std::io::Result<usize> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(records.len())
}
