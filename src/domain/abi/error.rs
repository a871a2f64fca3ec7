//! Error taxonomy for the decode pipeline

use thiserror::Error;

/// Failures a single decode attempt can surface.
///
/// Every fallible step of the pipeline (handle resolution, calldata
/// decoding, schema lookup, normalization) maps onto exactly one of these
/// variants. The batch boundary converts them into per-record sentinel
/// results; they never abort a run on their own.
#[derive(Debug, Error)]
pub enum AbiError {
    /// A function name or field name required by the decode was not found
    /// in the schema, or a field was not tuple-shaped where one was needed.
    #[error("schema lookup failed: {0}")]
    SchemaLookup(String),

    /// The target address text is not a syntactically valid account address.
    #[error("invalid contract address: {0}")]
    AddressFormat(String),

    /// The input data is not valid hex, is shorter than a selector, matches
    /// no function in the ABI, or fails ABI decoding.
    #[error("function decode failed: {0}")]
    FunctionDecode(String),

    /// The ABI source is missing, unparsable, or not one of the two
    /// accepted shapes.
    #[error("ABI load failed: {0}")]
    AbiLoad(String),
}
