//! Decoded-argument normalization
//!
//! Rewrites a decoded function-call argument tree into a JSON-serializable
//! structure, using the ABI input descriptors as the traversal guide:
//! byte values become lowercase `0x`-prefixed hex text, tuples become
//! objects keyed by their component names, `tuple[]` arrays distribute the
//! tuple rewrite over their elements, and everything else passes through.

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Param;
use serde_json::{Map, Value};

use super::error::AbiError;
use super::schema;

/// Normalize all decoded call arguments against their input descriptors.
///
/// Output keys follow the argument order, which matches the descriptor
/// order of the decoded function. Parameter names are kept verbatim (blank
/// names included) so the descriptor lookups stay consistent with the ABI
/// source.
pub fn normalize_call_args(
    args: &[(String, DynSolValue)],
    fields: &[Param],
) -> Result<Map<String, Value>, AbiError> {
    let mut output = Map::new();
    for (name, value) in args {
        output.insert(name.clone(), normalize_arg(name, value, fields)?);
    }
    Ok(output)
}

/// Apply the rewrite rules to one named argument.
fn normalize_arg(name: &str, value: &DynSolValue, fields: &[Param]) -> Result<Value, AbiError> {
    match value {
        DynSolValue::Bytes(bytes) => Ok(hex_text(bytes)),
        DynSolValue::FixedBytes(word, size) => Ok(hex_text(&word.as_slice()[..(*size).min(32)])),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) if !items.is_empty() => {
            let field = schema::field_by_name(fields, name)?;
            if field.ty == "tuple[]" {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    let DynSolValue::Tuple(values) = item else {
                        return Err(AbiError::SchemaLookup(format!(
                            "field `{name}` is declared tuple[] but holds a non-tuple element"
                        )));
                    };
                    elements.push(Value::Object(normalize_tuple(values, &field.components)?));
                }
                Ok(Value::Array(elements))
            } else {
                Ok(Value::Array(items.iter().map(normalize_element).collect()))
            }
        }
        // Empty sequences pass through without a descriptor lookup.
        DynSolValue::Array(_) | DynSolValue::FixedArray(_) => Ok(Value::Array(Vec::new())),
        DynSolValue::Tuple(values) => {
            let components = schema::components_for(fields, name)?;
            normalize_tuple(values, components).map(Value::Object)
        }
        other => Ok(plain_value(other)),
    }
}

/// Rewrite one tuple into an object keyed by component names.
///
/// Values pair positionally with the components; keys are inserted in
/// component order. Nested tuples recurse with their own components, byte
/// values become hex text, and anything else (arrays included) passes
/// through JSON-safe without re-entering the array rules.
fn normalize_tuple(values: &[DynSolValue], fields: &[Param]) -> Result<Map<String, Value>, AbiError> {
    let mut output = Map::new();
    for (index, value) in values.iter().enumerate() {
        let field = fields.get(index).ok_or_else(|| {
            AbiError::SchemaLookup(format!(
                "tuple value at position {index} has no matching component ({} declared)",
                fields.len()
            ))
        })?;
        let normalized = match value {
            DynSolValue::Bytes(bytes) => hex_text(bytes),
            DynSolValue::FixedBytes(word, size) => hex_text(&word.as_slice()[..(*size).min(32)]),
            DynSolValue::Tuple(inner) => Value::Object(normalize_tuple(inner, &field.components)?),
            other => plain_value(other),
        };
        output.insert(field.name.clone(), normalized);
    }
    Ok(output)
}

/// Rewrite one element of an array of primitives.
fn normalize_element(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bytes(bytes) => hex_text(bytes),
        DynSolValue::FixedBytes(word, size) => hex_text(&word.as_slice()[..(*size).min(32)]),
        other => plain_value(other),
    }
}

/// JSON-safe passthrough for values that need no schema-guided rewrite.
///
/// Integers wider than 64 bits render as decimal strings; JSON numbers
/// cannot carry them.
fn plain_value(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => match i.to_string().parse::<i64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(i.to_string()),
        },
        DynSolValue::Uint(u, _) => match u.to_string().parse::<u64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(u.to_string()),
        },
        DynSolValue::FixedBytes(word, size) => hex_text(&word.as_slice()[..(*size).min(32)]),
        DynSolValue::Address(addr) => Value::String(addr.to_checksum(None)),
        DynSolValue::Function(func) => hex_text(func.as_slice()),
        DynSolValue::Bytes(bytes) => hex_text(bytes),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            Value::Array(items.iter().map(plain_value).collect())
        }
        DynSolValue::Tuple(values) => Value::Array(values.iter().map(plain_value).collect()),
    }
}

/// Lowercase `0x`-prefixed hex text; empty input yields exactly `"0x"`.
fn hex_text(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}
