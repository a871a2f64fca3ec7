//! In-memory stores shared across a batch run

mod contract_cache;

pub use contract_cache::{ContractCache, DecodingHandle};
