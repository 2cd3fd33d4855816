//! Letter composition domain primitives.
//!
//! This crate owns the deterministic parts of the letter service: fragment and
//! object key derivation, letter formatting, request/response contracts and
//! the outcome-to-response mapping. It intentionally excludes AWS SDK and
//! Lambda runtime concerns.

pub mod contract;
pub mod fragment;
pub mod letter;
pub mod outcome;
pub mod storage_keys;
