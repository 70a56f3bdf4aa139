//! Error type for `monaco-client`.

use monaco_core::transport::{RemoteError, RemoteErrorCode};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("request failed: {0}")]
  Request(#[source] reqwest::Error),

  /// The backend refused the record with an error code.
  #[error("backend rejected person ({status}, {code})")]
  Rejected {
    status:  StatusCode,
    code:    RemoteErrorCode,
    message: Option<String>,
  },

  /// Error status without a recognisable error body.
  #[error("backend answered {0}")]
  Status(StatusCode),

  #[error("unexpected response body: {0}")]
  UnexpectedBody(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for RemoteError {
  fn from(err: Error) -> Self {
    match err {
      Error::Rejected { code, message, .. } => {
        RemoteError::Rejected { code, message }
      }
      other => RemoteError::Transport(Box::new(other)),
    }
  }
}
