//! Contract decoding-handle cache
//!
//! Handle construction (address validation plus ABI parsing) is paid once
//! per distinct (address, ABI text) pair and reused for every record in a
//! batch. The cache never evicts: deployments are assumed to touch
//! thousands of distinct contracts, not millions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;

use crate::domain::abi::AbiError;

/// A contract interface ready for decoding.
#[derive(Debug)]
pub struct DecodingHandle {
    /// Target address in canonical checksummed form.
    pub address: Address,
    /// Parsed ABI shared by every decode against this contract.
    pub abi: JsonAbi,
}

/// In-memory handle cache keyed by the exact (address, ABI text) pair.
///
/// Keys compare by value, so the same ABI text always hits the same entry
/// regardless of which string instance the caller holds. The interior lock
/// keeps first-use insertion safe if records are ever decoded in parallel.
#[derive(Debug, Default)]
pub struct ContractCache {
    entries: Mutex<HashMap<(String, String), Arc<DecodingHandle>>>,
}

impl ContractCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for (address, ABI text), constructing and storing
    /// it on first use.
    pub fn resolve(&self, address: &str, abi_json: &str) -> Result<Arc<DecodingHandle>, AbiError> {
        let key = (address.to_string(), abi_json.to_string());

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = entries.get(&key) {
            return Ok(Arc::clone(handle));
        }

        let parsed: Address = address
            .trim()
            .parse()
            .map_err(|_| AbiError::AddressFormat(format!("`{address}` is not an account address")))?;
        let abi: JsonAbi = serde_json::from_str(abi_json)
            .map_err(|err| AbiError::AbiLoad(format!("ABI does not parse: {err}")))?;

        let handle = Arc::new(DecodingHandle { address: parsed, abi });
        entries.insert(key, Arc::clone(&handle));
        Ok(handle)
    }

    /// Number of distinct (address, ABI text) pairs resolved so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Check whether any handle has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
