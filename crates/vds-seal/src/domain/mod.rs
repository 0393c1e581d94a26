//! # Domain Layer
//!
//! Headers, seal variants and the pure encode/parse steps.

pub mod assembly;
pub mod config;
pub mod errors;
pub mod header;
pub mod idb_header;
pub mod seal;
