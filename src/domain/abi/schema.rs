//! ABI schema lookups
//!
//! Pure, read-only lookups over parsed ABI data: a function's input
//! descriptors by function name, and a tuple field's components by field
//! name within a descriptor list. First match wins in both cases, which is
//! also how overloaded entries in ABI JSON behave here.

use alloy_json_abi::{JsonAbi, Param};

use super::error::AbiError;

/// Input descriptors of the first function entry named `name`.
pub fn function_inputs<'a>(abi: &'a JsonAbi, name: &str) -> Result<&'a [Param], AbiError> {
    abi.function(name)
        .and_then(|overloads| overloads.first())
        .map(|function| function.inputs.as_slice())
        .ok_or_else(|| AbiError::SchemaLookup(format!("function `{name}` not found in ABI")))
}

/// First descriptor in `fields` whose name equals `name`.
pub fn field_by_name<'a>(fields: &'a [Param], name: &str) -> Result<&'a Param, AbiError> {
    fields
        .iter()
        .find(|field| field.name == name)
        .ok_or_else(|| AbiError::SchemaLookup(format!("field `{name}` not found in schema")))
}

/// Components of the named field, which must be tuple-shaped.
pub fn components_for<'a>(fields: &'a [Param], name: &str) -> Result<&'a [Param], AbiError> {
    let field = field_by_name(fields, name)?;
    if field.components.is_empty() {
        return Err(AbiError::SchemaLookup(format!(
            "field `{name}` has no components"
        )));
    }
    Ok(&field.components)
}

#[cfg(test)]
mod tests {
    use super::*;

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
        },
        {
            "type": "function",
            "name": "transfer",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "to", "type": "address"}
            ],
            "outputs": []
        }
    ]"#;

    #[test]
    fn test_function_inputs_first_match() {
        let abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let inputs = function_inputs(&abi, "transfer").unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].name, "to");
        assert_eq!(inputs[1].name, "amount");
    }

    #[test]
    fn test_function_inputs_missing() {
        let abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let err = function_inputs(&abi, "approve").unwrap_err();
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_field_by_name() {
        let abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let inputs = function_inputs(&abi, "transfer").unwrap();
        assert_eq!(field_by_name(inputs, "amount").unwrap().ty, "uint256");
        assert!(field_by_name(inputs, "missing").is_err());
    }

    #[test]
    fn test_components_for_non_tuple_field() {
        let abi: JsonAbi = serde_json::from_str(ABI).unwrap();
        let inputs = function_inputs(&abi, "transfer").unwrap();
        let err = components_for(inputs, "to").unwrap_err();
        assert!(err.to_string().contains("components"));
    }
}
