//! The presentation boundary: what the guest is shown after a scan.
//!
//! A [`ModalContext`] holds at most one [`Presentation`]. Each `show`
//! replaces the previous content; `hide` clears it. Renderers either read
//! [`ModalContext::current`] or follow changes through
//! [`ModalContext::subscribe`].

use std::fmt;

use monaco_core::{
  IdentityRecord, SubmissionOutcome,
  outcome::Tone,
  scanner::AcquisitionError,
};
use tokio::sync::watch;

// ─── Presentation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
  /// Added to the list.
  Verified(IdentityRecord),
  AlreadyRegistered,
  UnderAge { age: i32 },
  DateLimitReached,
  ListLimitReached,
  /// Unreadable, rejected or timed-out scan, or an unexpected backend error.
  ScanFailed { detail: Option<String> },
  /// Camera access was refused.
  CameraUnavailable,
  CameraNotFound,
}

impl Presentation {
  pub fn tone(&self) -> Tone {
    match self {
      Self::Verified(_) | Self::AlreadyRegistered => Tone::Positive,
      _ => Tone::Negative,
    }
  }

  pub fn title(&self) -> &'static str {
    match self.tone() {
      Tone::Positive => "ID verified!",
      Tone::Negative => "Could not add you to the list",
    }
  }

  pub fn message(&self) -> String {
    match self {
      Self::Verified(record) => format!(
        "Name: {}\nDNI: {}\nDate of birth: {}",
        record.full_name(),
        record.national_id,
        record.birth_date.format("%d/%m/%Y"),
      ),
      Self::AlreadyRegistered => "This DNI is already on the list.".into(),
      Self::UnderAge { age } => {
        format!("You must be of age to join the list (age on the ID: {age}).")
      }
      Self::DateLimitReached => {
        "Registration for this date is closed.".into()
      }
      Self::ListLimitReached => "The guest list is full.".into(),
      Self::ScanFailed { .. } => {
        "Could not read the DNI. Make sure the barcode is clearly visible."
          .into()
      }
      Self::CameraUnavailable => "Cannot access the camera. Allow camera \
                                  access in your device settings to continue."
        .into(),
      Self::CameraNotFound => "Camera not found.".into(),
    }
  }
}

impl From<&SubmissionOutcome> for Presentation {
  fn from(outcome: &SubmissionOutcome) -> Self {
    match outcome {
      SubmissionOutcome::Success(record) => Self::Verified(record.clone()),
      SubmissionOutcome::DuplicateIdentity => Self::AlreadyRegistered,
      SubmissionOutcome::UnderAge { age } => Self::UnderAge { age: *age },
      SubmissionOutcome::DateLimitReached => Self::DateLimitReached,
      SubmissionOutcome::ListLimitReached => Self::ListLimitReached,
      SubmissionOutcome::GenericFailure { detail } => Self::ScanFailed {
        detail: detail.clone(),
      },
    }
  }
}

impl From<&AcquisitionError> for Presentation {
  fn from(err: &AcquisitionError) -> Self {
    match err {
      AcquisitionError::PermissionDenied => Self::CameraUnavailable,
      AcquisitionError::CameraNotFound => Self::CameraNotFound,
      AcquisitionError::Timeout(_)
      | AcquisitionError::InvalidFormat(_)
      | AcquisitionError::Device(_)
      | AcquisitionError::Cancelled => Self::ScanFailed {
        detail: Some(err.to_string()),
      },
    }
  }
}

impl fmt::Display for Presentation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.title())?;
    write!(f, "{}", self.message())
  }
}

// ─── Context ─────────────────────────────────────────────────────────────────

/// Application-wide modal slot.
#[derive(Debug)]
pub struct ModalContext {
  content: watch::Sender<Option<Presentation>>,
}

impl Default for ModalContext {
  fn default() -> Self { Self::new() }
}

impl ModalContext {
  pub fn new() -> Self {
    let (content, _) = watch::channel(None);
    Self { content }
  }

  pub fn show(&self, presentation: Presentation) {
    self.content.send_replace(Some(presentation));
  }

  pub fn hide(&self) { self.content.send_replace(None); }

  pub fn current(&self) -> Option<Presentation> {
    self.content.borrow().clone()
  }

  pub fn is_shown(&self) -> bool { self.content.borrow().is_some() }

  pub fn subscribe(&self) -> watch::Receiver<Option<Presentation>> {
    self.content.subscribe()
  }
}
