//! The closed set of terminal results of one submission attempt.

use serde::{Deserialize, Serialize};

use crate::record::IdentityRecord;

/// How an outcome is presented to the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
  Positive,
  Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
  /// The guest was added. Carries the record as returned by the backend.
  Success(IdentityRecord),
  /// The guest was already on the list.
  DuplicateIdentity,
  /// Younger than the minimum age; decided locally before any request.
  UnderAge { age: i32 },
  /// Registration for the event date is closed.
  DateLimitReached,
  /// The list is full.
  ListLimitReached,
  GenericFailure { detail: Option<String> },
}

impl SubmissionOutcome {
  /// A duplicate still means the guest is on the list, so it reads as good
  /// news.
  pub fn tone(&self) -> Tone {
    match self {
      Self::Success(_) | Self::DuplicateIdentity => Tone::Positive,
      Self::UnderAge { .. }
      | Self::DateLimitReached
      | Self::ListLimitReached
      | Self::GenericFailure { .. } => Tone::Negative,
    }
  }

  /// Short stable tag, used in logs.
  pub fn tag(&self) -> &'static str {
    match self {
      Self::Success(_) => "success",
      Self::DuplicateIdentity => "duplicate_identity",
      Self::UnderAge { .. } => "under_age",
      Self::DateLimitReached => "date_limit_reached",
      Self::ListLimitReached => "list_limit_reached",
      Self::GenericFailure { .. } => "generic_failure",
    }
  }

  pub fn generic(detail: impl Into<String>) -> Self {
    Self::GenericFailure {
      detail: Some(detail.into()),
    }
  }
}
