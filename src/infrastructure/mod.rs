//! Infrastructure layer - file formats and the external ABI decoder

pub mod abi;
