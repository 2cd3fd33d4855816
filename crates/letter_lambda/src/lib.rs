//! AWS-oriented adapters and handlers for the letter composition service.
//!
//! This crate owns runtime integration details (Lambda handler, store
//! adapters, configuration and logging) and exposes a single runtime module
//! boundary for the contract, key and letter primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
