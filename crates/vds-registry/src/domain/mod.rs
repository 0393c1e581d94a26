//! # Domain Layer
//!
//! Registry data model and resolution rules. No I/O, no locking.

pub mod coding;
pub mod defaults;
pub mod definition;
pub mod errors;
pub mod scope;
pub mod tables;
pub mod value;
