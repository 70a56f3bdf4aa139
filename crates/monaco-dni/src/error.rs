//! Error types for the DNI payload codec.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("barcode payload is empty")]
  EmptyPayload,

  #[error("malformed payload: expected 9 '@'-separated fields, found {fields}")]
  MalformedPayload { fields: usize },

  #[error("invalid national id: {0:?}")]
  InvalidNationalId(String),

  #[error("payload field {index} ({name}) is empty")]
  EmptyField { index: usize, name: &'static str },

  #[error("malformed birth date: {0:?}")]
  MalformedDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
