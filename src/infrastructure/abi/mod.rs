//! ABI infrastructure: file loading and calldata decoding with alloy

pub mod decoder;
pub mod loader;
