//! Scan shell for the Monaco guest list.
//!
//! Wires a [`Scanner`](monaco_core::scanner::Scanner) and a
//! [`SubmissionTransport`](monaco_core::transport::SubmissionTransport)
//! together:
//!
//! ```text
//! scanner ─ session::run ─▶ ScanCoordinator ─▶ SubmissionService ─▶ transport
//!                                │
//!                                └─▶ ModalContext (presentation)
//! ```

pub mod config;
pub mod coordinator;
pub mod modal;
pub mod service;
pub mod session;
pub mod wedge;

pub use config::AppConfig;
pub use coordinator::{Phase, ScanCoordinator, ScanReport};
pub use modal::{ModalContext, Presentation};
pub use service::SubmissionService;

#[cfg(test)]
mod testing;
