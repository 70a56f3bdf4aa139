//! The `SubmissionTransport` trait and the typed remote error it reports.
//!
//! Implemented by `monaco-client` over HTTP. The submission pipeline depends
//! on this abstraction only, so tests can count calls with an in-memory spy.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::IdentityRecord;

// ─── Error codes ─────────────────────────────────────────────────────────────

/// Error code reported by the guest-list backend.
///
/// Decoded once at the transport boundary; everything downstream matches on
/// the variant, never on the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteErrorCode {
  /// The national id is already on the list.
  UniqueError,
  UnderAge,
  DateLimitReached,
  ListLimitReached,
  Other(String),
}

impl RemoteErrorCode {
  pub fn as_str(&self) -> &str {
    match self {
      Self::UniqueError => "UniqueError",
      Self::UnderAge => "UnderAge",
      Self::DateLimitReached => "DateLimitReached",
      Self::ListLimitReached => "ListLimitReached",
      Self::Other(code) => code,
    }
  }
}

impl From<String> for RemoteErrorCode {
  fn from(code: String) -> Self {
    match code.as_str() {
      "UniqueError" => Self::UniqueError,
      "UnderAge" => Self::UnderAge,
      "DateLimitReached" => Self::DateLimitReached,
      "ListLimitReached" => Self::ListLimitReached,
      _ => Self::Other(code),
    }
  }
}

impl From<&str> for RemoteErrorCode {
  fn from(code: &str) -> Self { Self::from(code.to_string()) }
}

impl From<RemoteErrorCode> for String {
  fn from(code: RemoteErrorCode) -> Self { code.as_str().to_string() }
}

impl fmt::Display for RemoteErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RemoteError {
  /// The backend answered and refused the record.
  #[error("rejected by backend ({code}){}", suffix(.message))]
  Rejected {
    code:    RemoteErrorCode,
    message: Option<String>,
  },

  /// The request never produced a usable answer.
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn suffix(message: &Option<String>) -> String {
  message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl RemoteError {
  pub fn rejected(code: impl Into<RemoteErrorCode>) -> Self {
    Self::Rejected {
      code:    code.into(),
      message: None,
    }
  }

  pub fn code(&self) -> Option<&RemoteErrorCode> {
    match self {
      Self::Rejected { code, .. } => Some(code),
      Self::Transport(_) => None,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Sends an identity record to the guest-list backend.
///
/// One call is one attempt; implementations must not retry on their own.
pub trait SubmissionTransport: Send + Sync {
  /// Submit `record` and return the record as stored by the backend.
  fn submit<'a>(
    &'a self,
    record: &'a IdentityRecord,
  ) -> impl Future<Output = Result<IdentityRecord, RemoteError>> + Send + 'a;
}
