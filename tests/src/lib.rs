//! # VDS Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (build, parse, verify)
//! └── src/
//!     └── integration/  # Cross-crate flows through the public APIs
//!         ├── fixtures.rs
//!         ├── roundtrip.rs
//!         ├── registry_updates.rs
//!         ├── barcode.rs
//!         └── verification.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p vds-tests
//!
//! # By flow
//! cargo test -p vds-tests integration::roundtrip::
//!
//! # Benchmarks
//! cargo bench -p vds-tests
//! ```

pub mod integration;
