//! JSON shapes exchanged with the gateway.

use monaco_core::{IdentityRecord, transport::RemoteErrorCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a> {
  pub endpoint: &'a str,
  pub data:     PersonData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PersonData<'a> {
  pub person: &'a IdentityRecord,
}

impl<'a> Envelope<'a> {
  pub fn add_person(endpoint: &'a str, person: &'a IdentityRecord) -> Self {
    Self {
      endpoint,
      data: PersonData { person },
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonReply {
  pub person: IdentityRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
  pub code:    RemoteErrorCode,
  #[serde(default)]
  pub message: Option<String>,
}

/// `{ "code": ... }` or `{ "error": { "code": ... } }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorReply {
  Nested { error: ErrorBody },
  Flat(ErrorBody),
}

impl ErrorReply {
  pub fn into_body(self) -> ErrorBody {
    match self {
      Self::Nested { error } => error,
      Self::Flat(body) => body,
    }
  }
}
