//! Batch decoding
//!
//! Drives the record-by-record decode of a datalist against one contract's
//! ABI. Each record decodes independently: schema misses, bad selectors,
//! and malformed input collapse into per-record sentinel results and the
//! batch keeps going. Failures reading the datalist or ABI file, or
//! writing the output, abort the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::abi::{normalize_call_args, schema, AbiError};
use crate::infrastructure::abi::{decoder, loader};
use crate::modules::export::{json_export, DecodeRecord};
use crate::store::ContractCache;

/// Sentinel function name for records that fail to decode.
pub const DECODE_ERROR: &str = "decode error";
/// Sentinel function name for records with no ABI to decode against.
pub const NO_MATCHING_ABI: &str = "no matching abi";

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Target contract address the datalist was captured against.
    pub address: String,
    /// Newline-separated raw input-data list.
    pub datalist_path: PathBuf,
    /// ABI array or deployments JSON.
    pub abi_path: PathBuf,
    /// Output JSON array path.
    pub output_path: PathBuf,
}

/// Result of one record's decode attempt: the function name (or a
/// sentinel), the normalized arguments (diagnostic text for the error
/// sentinel), and a snapshot of the matched function's input descriptors.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    pub function: String,
    pub args: Option<Value>,
    pub schema: Option<Value>,
}

/// Decode one record at the per-record error boundary.
///
/// Never fails: any decode error collapses into the `"decode error"`
/// sentinel carrying the error text, and a missing ABI yields the
/// `"no matching abi"` sentinel.
pub fn decode_tx(
    cache: &ContractCache,
    address: &str,
    input_data: &str,
    abi: Option<&str>,
) -> DecodeOutcome {
    let Some(abi) = abi else {
        return DecodeOutcome {
            function: NO_MATCHING_ABI.to_string(),
            args: None,
            schema: None,
        };
    };

    match try_decode(cache, address, input_data, abi) {
        Ok(outcome) => outcome,
        Err(err) => DecodeOutcome {
            function: DECODE_ERROR.to_string(),
            args: Some(Value::String(err.to_string())),
            schema: None,
        },
    }
}

fn try_decode(
    cache: &ContractCache,
    address: &str,
    input_data: &str,
    abi: &str,
) -> Result<DecodeOutcome, AbiError> {
    let handle = cache.resolve(address, abi)?;
    let data = decoder::parse_input_hex(input_data)?;
    let (function, args) = decoder::decode_function_input(&handle.abi, &data)?;

    let inputs = schema::function_inputs(&handle.abi, &function)?;
    let normalized = normalize_call_args(&args, inputs)?;
    let snapshot = serde_json::to_value(inputs)
        .map_err(|err| AbiError::SchemaLookup(format!("schema snapshot: {err}")))?;

    Ok(DecodeOutcome {
        function,
        args: Some(Value::Object(normalized)),
        schema: Some(snapshot),
    })
}

/// Read the datalist: one raw input-data hex string per line.
///
/// Carriage returns are stripped. Blank entries are kept; they fail
/// per-record downstream instead of being filtered here.
pub fn read_datalist(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read datalist {}", path.display()))?;
    Ok(content
        .replace('\r', "")
        .split('\n')
        .map(str::to_string)
        .collect())
}

/// Decode one record and convert it to an output element.
fn decode_one(cache: &ContractCache, address: &str, data: &str, abi: Option<&str>) -> DecodeRecord {
    let outcome = decode_tx(cache, address, data, abi);
    debug!(function = %outcome.function, "decoded record");

    DecodeRecord {
        function: outcome.function,
        args: outcome.args.unwrap_or(Value::Null),
    }
}

/// Run a whole batch: datalist in, JSON array out, strictly in input order.
pub fn run(settings: &BatchSettings) -> Result<()> {
    let datalist = read_datalist(&settings.datalist_path)?;
    info!(records = datalist.len(), "decoding batch");

    let abi = loader::read_abi(&settings.abi_path)
        .with_context(|| format!("load ABI {}", settings.abi_path.display()))?;

    let cache = ContractCache::new();
    let records: Vec<DecodeRecord> = datalist
        .iter()
        .map(|data| decode_one(&cache, &settings.address, data, Some(&abi)))
        .collect();

    let written = json_export::write_records(&settings.output_path, &records)
        .with_context(|| format!("write output {}", settings.output_path.display()))?;
    info!(records = written, output = %settings.output_path.display(), "batch complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ABI: &str = r#"[
        {
            "type": "function",
            "name": "transfer",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": []
        }
    ]"#;

    const ADDRESS: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

    #[test]
    fn test_missing_abi_sentinel() {
        let cache = ContractCache::new();
        let outcome = decode_tx(&cache, ADDRESS, "0xa9059cbb", None);
        assert_eq!(outcome.function, NO_MATCHING_ABI);
        assert!(outcome.args.is_none());
        assert!(outcome.schema.is_none());
    }

    #[test]
    fn test_unknown_selector_sentinel_keeps_batch_alive() {
        let cache = ContractCache::new();

        let bad = decode_tx(&cache, ADDRESS, "0xdeadbeef", Some(ABI));
        assert_eq!(bad.function, DECODE_ERROR);
        let diagnostic = bad.args.unwrap();
        assert!(diagnostic.as_str().unwrap().contains("selector"));

        // A later record against the same cache still decodes.
        let calldata = format!(
            "0xa9059cbb{:0>64}{:0>64}",
            &ADDRESS[2..],
            "64" // amount = 100
        );
        let good = decode_tx(&cache, ADDRESS, &calldata, Some(ABI));
        assert_eq!(good.function, "transfer");
        assert_eq!(good.args.unwrap()["amount"], 100);
    }

    #[test]
    fn test_blank_record_is_a_decode_error() {
        let cache = ContractCache::new();
        let outcome = decode_tx(&cache, ADDRESS, "", Some(ABI));
        assert_eq!(outcome.function, DECODE_ERROR);
    }

    #[test]
    fn test_schema_snapshot_carried_on_success() {
        let cache = ContractCache::new();
        let calldata = format!("0xa9059cbb{:0>64}{:0>64}", &ADDRESS[2..], "1");
        let outcome = decode_tx(&cache, ADDRESS, &calldata, Some(ABI));

        let snapshot = outcome.schema.unwrap();
        let fields = snapshot.as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], "to");
        assert_eq!(fields[1]["type"], "uint256");
    }

    fn temp_datalist(name: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("txpeek_batch_test_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_datalist_keeps_blank_lines() {
        let path = temp_datalist("blanks.txt", "0xaa\r\n0xbb\n\n");
        let datalist = read_datalist(&path).unwrap();
        assert_eq!(datalist, vec!["0xaa", "0xbb", "", ""]);
        std::fs::remove_file(path).ok();
    }
}
