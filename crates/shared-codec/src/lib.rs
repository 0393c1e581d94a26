//! # Shared Codec - Seal Byte Primitives
//!
//! Leaf codecs used by every seal format.
//!
//! ## Components
//!
//! | Module | Format | Use Case |
//! |--------|--------|----------|
//! | `der_tlv` | DER tag-length-value | Message zones, signatures |
//! | `c40` | DataMatrix C40 | Header text, MRZ and short text messages |
//! | `date` | `MMDDYYYY` packed integers | Issuing/signing dates, date messages |
//! | `transport` | Base-256, Base32 | Barcode content strings |
//!
//! All functions are pure and allocation-bounded by their input.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod c40;
pub mod date;
pub mod der_tlv;
pub mod errors;
pub mod reader;
pub mod transport;

// Re-exports
pub use der_tlv::{DerTlv, SIGNATURE_TAG};
pub use errors::{CodecError, CodecResult};
pub use reader::ByteReader;
