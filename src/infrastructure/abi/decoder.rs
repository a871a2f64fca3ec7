//! Function-call decoding using alloy-dyn-abi
//!
//! The boundary to the actual byte-level ABI decoder: selector lookup over
//! the parsed ABI, then input decoding into typed values. Everything
//! downstream works on the value tree returned here.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;

use crate::domain::abi::AbiError;

/// Parse a raw input-data hex string into bytes.
pub fn parse_input_hex(input: &str) -> Result<Vec<u8>, AbiError> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(stripped).map_err(|err| AbiError::FunctionDecode(format!("invalid input hex: {err}")))
}

/// Decode function-call input data against the ABI.
///
/// Returns the matched function's name and its decoded arguments paired
/// with the declared parameter names, in input order. Parameter names are
/// kept verbatim so downstream schema lookups match the ABI source.
pub fn decode_function_input(
    abi: &JsonAbi,
    data: &[u8],
) -> Result<(String, Vec<(String, DynSolValue)>), AbiError> {
    if data.len() < 4 {
        return Err(AbiError::FunctionDecode(format!(
            "input data too short for a selector ({} bytes)",
            data.len()
        )));
    }

    let selector = &data[..4];
    let function = abi
        .functions()
        .find(|function| function.selector().as_slice() == selector)
        .ok_or_else(|| {
            AbiError::FunctionDecode(format!(
                "no function matches selector 0x{}",
                hex::encode(selector)
            ))
        })?;

    let values = function
        .abi_decode_input(&data[4..])
        .map_err(|err| AbiError::FunctionDecode(format!("{}: {err}", function.name)))?;

    let args = function
        .inputs
        .iter()
        .zip(values)
        .map(|(param, value)| (param.name.clone(), value))
        .collect();

    Ok((function.name.clone(), args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    const ERC20_ABI: &str = r#"[
        {
            "type": "function",
            "name": "transfer",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}]
        }
    ]"#;

    fn erc20() -> JsonAbi {
        serde_json::from_str(ERC20_ABI).unwrap()
    }

    fn transfer_calldata(abi: &JsonAbi) -> Vec<u8> {
        let function = &abi.function("transfer").unwrap()[0];
        function
            .abi_encode_input(&[
                DynSolValue::Address(Address::from([0x42u8; 20])),
                DynSolValue::Uint(U256::from(1_000_000u64), 256),
            ])
            .unwrap()
    }

    #[test]
    fn test_decode_transfer() {
        let abi = erc20();
        let data = transfer_calldata(&abi);

        let (name, args) = decode_function_input(&abi, &data).unwrap();
        assert_eq!(name, "transfer");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].0, "to");
        assert!(matches!(args[0].1, DynSolValue::Address(_)));
        assert_eq!(args[1].0, "amount");
        assert_eq!(args[1].1, DynSolValue::Uint(U256::from(1_000_000u64), 256));
    }

    #[test]
    fn test_unknown_selector() {
        let abi = erc20();
        let err = decode_function_input(&abi, &[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, AbiError::FunctionDecode(_)));
        assert!(err.to_string().contains("0xdeadbeef"));
    }

    #[test]
    fn test_short_input() {
        let abi = erc20();
        let err = decode_function_input(&abi, &[0xa9]).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_truncated_arguments() {
        let abi = erc20();
        let mut data = transfer_calldata(&abi);
        data.truncate(20);
        assert!(decode_function_input(&abi, &data).is_err());
    }

    #[test]
    fn test_parse_input_hex() {
        assert_eq!(parse_input_hex("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(parse_input_hex("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(parse_input_hex("  0xDEADBEEF\n").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(parse_input_hex("0xzz").is_err());
        assert!(parse_input_hex("0xabc").is_err());
        assert!(parse_input_hex("").unwrap().is_empty());
    }
}
