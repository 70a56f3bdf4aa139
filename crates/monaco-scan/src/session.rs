//! One camera scan session: acquire, wait for a decode, release.
//!
//! The camera handle is owned by [`run`] from `start` until `stop`, and
//! `stop` is awaited on every path out of the wait: a decode, a decoder
//! error, the timeout, or a teardown signal from the owner. The symbology
//! check happens after release. If the `run` future itself is dropped
//! mid-session, the handle is dropped with it and releases the device in
//! its `Drop`.

use std::time::Duration;

use monaco_core::scanner::{AcquisitionError, ScanOptions, Scanner, Symbology};
use tokio::sync::Notify;
use tracing::debug;

/// Seconds a session waits for a barcode before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct SessionConfig {
  pub options:  ScanOptions,
  pub timeout:  Duration,
  /// Decodes of any other symbology are rejected as invalid format.
  pub accepted: Vec<Symbology>,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      options:  ScanOptions::default(),
      timeout:  DEFAULT_TIMEOUT,
      accepted: vec![Symbology::Pdf417],
    }
  }
}

/// Run a single session on `scanner` and return the accepted decoded text.
///
/// A notification on `teardown` ends the session early with
/// [`AcquisitionError::Cancelled`]. A permit stored by `notify_one` before
/// the session starts cancels it as soon as it is polled.
pub async fn run<S: Scanner>(
  scanner: &S,
  config: &SessionConfig,
  teardown: &Notify,
) -> Result<String, AcquisitionError> {
  // Register interest before the first await so a teardown issued while the
  // camera is starting is not missed.
  let torn_down = teardown.notified();
  tokio::pin!(torn_down);
  torn_down.as_mut().enable();

  let mut handle = tokio::select! {
    started = scanner.start(&config.options) => started?,
    _ = &mut torn_down => return Err(AcquisitionError::Cancelled),
  };
  debug!("camera acquired");

  let decoded = tokio::select! {
    decoded = scanner.next_decode(&mut handle) => decoded,
    _ = tokio::time::sleep(config.timeout) => {
      Err(AcquisitionError::Timeout(config.timeout))
    }
    _ = &mut torn_down => Err(AcquisitionError::Cancelled),
  };

  scanner.stop(handle).await;
  debug!("camera released");

  decoded?.require(&config.accepted)
}
