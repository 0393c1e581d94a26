//! # Adapters Module
//!
//! Implementations of the outbound ports.

pub mod key_signer;
