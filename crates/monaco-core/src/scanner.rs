//! The `Scanner` trait: the barcode-decoding collaborator.
//!
//! Pixel-level decoding happens inside the implementation. The core only
//! sees decoded text tagged with the symbology it was read from, and a small
//! set of acquisition failures.

use std::{fmt, future::Future, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Symbology ───────────────────────────────────────────────────────────────

/// Barcode encoding a decode was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
  /// Stacked linear code printed on the back of the national ID.
  Pdf417,
  QrCode,
  Code128,
  DataMatrix,
  Aztec,
  Unknown,
}

impl Symbology {
  /// Resolve an AIM symbology identifier (`]L0`, `]Q1`, ...) as emitted by
  /// hardware scanners in front of the decoded data.
  pub fn from_aim(identifier: &str) -> Self {
    match identifier.strip_prefix(']').and_then(|s| s.chars().next()) {
      Some('L') => Self::Pdf417,
      Some('Q') => Self::QrCode,
      Some('C') => Self::Code128,
      Some('d') => Self::DataMatrix,
      Some('z') => Self::Aztec,
      _ => Self::Unknown,
    }
  }
}

impl fmt::Display for Symbology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Pdf417 => "PDF417",
      Self::QrCode => "QR code",
      Self::Code128 => "Code 128",
      Self::DataMatrix => "Data Matrix",
      Self::Aztec => "Aztec",
      Self::Unknown => "unknown symbology",
    })
  }
}

/// One successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
  pub text:      String,
  pub symbology: Symbology,
}

impl Decoded {
  /// Accept the decode only if it was read from one of `accepted`.
  pub fn require(
    self,
    accepted: &[Symbology],
  ) -> Result<String, AcquisitionError> {
    if accepted.contains(&self.symbology) {
      Ok(self.text)
    } else {
      Err(AcquisitionError::InvalidFormat(self.symbology))
    }
  }
}

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
  /// Back camera; the one pointed at a document.
  #[default]
  Environment,
  User,
}

/// Region of the frame the decoder looks at, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanBox {
  pub width:  u32,
  pub height: u32,
}

/// Configuration handed to [`Scanner::start`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
  pub fps:          u32,
  pub scan_box:     ScanBox,
  pub aspect_ratio: f64,
  pub zoom:         f64,
  pub facing:       Facing,
}

impl Default for ScanOptions {
  fn default() -> Self {
    Self {
      fps:          10,
      // The ID barcode is wide and short.
      scan_box:     ScanBox {
        width:  250,
        height: 100,
      },
      aspect_ratio: 9.0 / 16.0,
      zoom:         3.0,
      facing:       Facing::Environment,
    }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failures that end a scan session before any submission happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
  #[error("camera permission denied")]
  PermissionDenied,

  #[error("camera not found")]
  CameraNotFound,

  #[error("no barcode detected within {} seconds", .0.as_secs())]
  Timeout(Duration),

  #[error("unsupported barcode format: {0}")]
  InvalidFormat(Symbology),

  #[error("scanner error: {0}")]
  Device(String),

  /// The session was torn down by its owner before anything was decoded.
  #[error("scan cancelled")]
  Cancelled,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A barcode scanner backed by a camera (or camera-like device) plus a
/// one-shot file decoder.
///
/// A camera session is `start` → at most one `next_decode` → `stop`. The
/// handle owns the device while it exists. `stop` is the orderly release and
/// is called at most once per successful `start`; a handle dropped without
/// `stop` (its session future was abandoned) must still free the device in
/// its `Drop`.
pub trait Scanner: Send + Sync {
  /// Live camera session. Releases the device when dropped.
  type Handle: Send;

  /// Acquire the camera and begin decoding.
  fn start<'a>(
    &'a self,
    options: &'a ScanOptions,
  ) -> impl Future<Output = Result<Self::Handle, AcquisitionError>> + Send + 'a;

  /// Wait for the next successful decode. May never resolve; callers bound
  /// it with a timeout.
  fn next_decode<'a>(
    &'a self,
    handle: &'a mut Self::Handle,
  ) -> impl Future<Output = Result<Decoded, AcquisitionError>> + Send + 'a;

  /// Release the camera, waiting for the device to shut down.
  fn stop(&self, handle: Self::Handle) -> impl Future<Output = ()> + Send + '_;

  /// Decode a single captured image (or capture file).
  fn scan_file<'a>(
    &'a self,
    path: &'a Path,
  ) -> impl Future<Output = Result<Decoded, AcquisitionError>> + Send + 'a;
}
