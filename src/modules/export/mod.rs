//! Export Module
//!
//! Writes the batch's results to disk. Output is a JSON array with one
//! element per input record, in input order.

pub mod json_export;

pub use json_export::DecodeRecord;
