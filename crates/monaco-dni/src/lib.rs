//! Codec for the PDF417 barcode printed on the Argentine national ID (DNI).
//!
//! The barcode decodes to nine `@`-separated fields. Only the surnames, given
//! names, document number and birth date are read; the rest are kept
//! verbatim in [`IdentityRecord::raw_payload`]. Pure synchronous; no HTTP or
//! device dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use monaco_dni::parse;
//!
//! let record = parse("X@Doe@Jane@X@12345678@X@15/03/2000@X@X").unwrap();
//! println!("{} ({})", record.full_name(), record.national_id);
//! ```

pub mod error;
mod parse;

pub use error::{Error, Result};
use monaco_core::IdentityRecord;

/// Number of `@`-separated fields in a well-formed payload.
pub const FIELD_COUNT: usize = parse::FIELD_COUNT;

/// Parse a decoded barcode payload into an [`IdentityRecord`].
pub fn parse(raw: &str) -> Result<IdentityRecord> { parse::parse_record(raw) }
