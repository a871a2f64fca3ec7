//! ABI file loading
//!
//! An ABI source is either a bare JSON array of ABI entries or an object
//! wrapping that array under an `"abi"` key (the deployments-JSON shape).
//! Any third shape is rejected.

use std::fs;
use std::path::Path;

use crate::domain::abi::AbiError;

/// Read an ABI file and return the entry array as canonical JSON text.
///
/// The returned text is what keys the contract cache, so two files carrying
/// the same ABI in different wrappings resolve to the same handle.
pub fn read_abi(path: &Path) -> Result<String, AbiError> {
    let content = fs::read_to_string(path)
        .map_err(|err| AbiError::AbiLoad(format!("{}: {err}", path.display())))?;
    abi_text(&content).map_err(|reason| AbiError::AbiLoad(format!("{}: {reason}", path.display())))
}

/// Extract the ABI entry array from raw file text as canonical JSON.
fn abi_text(content: &str) -> Result<String, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|err| err.to_string())?;

    let entries = if value.is_array() {
        value
    } else if let Some(abi) = value.get("abi") {
        if !abi.is_array() {
            return Err("`abi` key does not hold an array".to_string());
        }
        abi.clone()
    } else {
        return Err("expected a JSON array or an object with an `abi` key".to_string());
    };

    serde_json::to_string(&entries).map_err(|err| err.to_string())
}
