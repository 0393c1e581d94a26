//! # Ports Layer
//!
//! - **Inbound (Driving)**: registry API used by the seal codec and loaders

pub mod inbound;
