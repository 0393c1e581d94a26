//! # Integration Flows
//!
//! Every test drives [`vds_seal::SealService`] through its public API, the
//! way an issuing or reading application would.

pub mod fixtures;

mod barcode;
mod registry_updates;
mod roundtrip;
mod verification;
