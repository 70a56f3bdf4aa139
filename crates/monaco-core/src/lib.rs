//! Core types and trait definitions for the Monaco guest-list scanner.
//!
//! This crate is deliberately free of HTTP and device dependencies. The
//! payload codec, the HTTP client and the scan shell all depend on it.

pub mod age;
pub mod outcome;
pub mod record;
pub mod scanner;
pub mod transport;

pub use outcome::SubmissionOutcome;
pub use record::IdentityRecord;
