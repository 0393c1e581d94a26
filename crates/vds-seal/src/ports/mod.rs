//! # Ports Layer
//!
//! - **Inbound (Driving)**: the seal codec API
//! - **Outbound (Driven)**: the signer the codec calls while building seals

pub mod inbound;
pub mod outbound;
