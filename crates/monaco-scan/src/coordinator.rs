//! Drives the scanner, feeds decodes to the submission service, and shows
//! the result on the modal.
//!
//! A coordinator runs at most one thing at a time: either a scan session
//! (`Scanning`) or a submission (`Loading`). Anything arriving while it is
//! busy is dropped.

use std::{
  path::Path,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use monaco_core::{
  SubmissionOutcome,
  age::Clock,
  scanner::{AcquisitionError, Scanner},
  transport::SubmissionTransport,
};
use tokio::sync::Notify;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
  modal::{ModalContext, Presentation},
  service::SubmissionService,
  session::{self, SessionConfig},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  /// A camera session or file decode is active.
  Scanning,
  /// A submission is awaiting the backend.
  Loading,
}

/// What became of a scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport {
  /// Another scan or submission was in progress; nothing was done.
  Busy,
  Submitted(SubmissionOutcome),
  /// The scan never produced an acceptable decode.
  Failed(AcquisitionError),
}

// ─── Phase guard ─────────────────────────────────────────────────────────────

struct State {
  phase:    Phase,
  /// Teardown signal of the camera session in progress. Registered under the
  /// same lock that leaves `Idle`, so a shutdown can never fall between the
  /// two.
  teardown: Option<Arc<Notify>>,
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
  state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the coordinator to `Idle` when dropped.
struct PhaseGuard<'a> {
  state: &'a Mutex<State>,
}

impl<'a> PhaseGuard<'a> {
  fn enter(state: &'a Mutex<State>, to: Phase) -> Option<Self> {
    let mut current = lock(state);
    if current.phase != Phase::Idle {
      return None;
    }
    current.phase = to;
    Some(Self { state })
  }

  /// Enter `Scanning` for a camera session with a fresh teardown signal.
  fn enter_session(state: &'a Mutex<State>) -> Option<(Self, Arc<Notify>)> {
    let mut current = lock(state);
    if current.phase != Phase::Idle {
      return None;
    }
    let teardown = Arc::new(Notify::new());
    current.phase = Phase::Scanning;
    current.teardown = Some(teardown.clone());
    Some((Self { state }, teardown))
  }

  fn set(&self, to: Phase) {
    let mut current = lock(self.state);
    current.phase = to;
    if to != Phase::Scanning {
      current.teardown = None;
    }
  }
}

impl Drop for PhaseGuard<'_> {
  fn drop(&mut self) { self.set(Phase::Idle); }
}

// ─── Coordinator ─────────────────────────────────────────────────────────────

pub struct ScanCoordinator<S, T, C> {
  scanner:  S,
  service:  SubmissionService<T, C>,
  session:  SessionConfig,
  modal:    Arc<ModalContext>,
  state:    Mutex<State>,
}

impl<S, T, C> ScanCoordinator<S, T, C>
where
  S: Scanner,
  T: SubmissionTransport,
  C: Clock,
{
  pub fn new(
    scanner: S,
    service: SubmissionService<T, C>,
    session: SessionConfig,
    modal: Arc<ModalContext>,
  ) -> Self {
    Self {
      scanner,
      service,
      session,
      modal,
      state: Mutex::new(State {
        phase:    Phase::Idle,
        teardown: None,
      }),
    }
  }

  pub fn phase(&self) -> Phase { lock(&self.state).phase }

  pub fn scanner(&self) -> &S { &self.scanner }

  pub fn service(&self) -> &SubmissionService<T, C> { &self.service }

  pub fn modal(&self) -> &ModalContext { &self.modal }

  /// Submit text decoded outside of a coordinator-run session.
  ///
  /// Returns `None`, without contacting the backend, while another scan or
  /// submission is in progress.
  pub async fn on_decoded(&self, text: &str) -> Option<SubmissionOutcome> {
    let Some(guard) = PhaseGuard::enter(&self.state, Phase::Loading) else {
      debug!("ignoring decode while busy");
      return None;
    };
    Some(self.submit(&guard, text).await)
  }

  /// Run one camera session and submit what it reads.
  pub async fn scan_camera(&self) -> ScanReport {
    let Some((guard, teardown)) = PhaseGuard::enter_session(&self.state) else {
      return ScanReport::Busy;
    };

    let span = info_span!("scan", session_id = %Uuid::new_v4());
    let decoded = session::run(&self.scanner, &self.session, &teardown)
      .instrument(span)
      .await;

    match decoded {
      Ok(text) => ScanReport::Submitted(self.submit(&guard, &text).await),
      Err(err) => {
        self.present_failure(&err);
        ScanReport::Failed(err)
      }
    }
  }

  /// Decode a captured image and submit it.
  pub async fn scan_file(&self, path: &Path) -> ScanReport {
    let Some(guard) = PhaseGuard::enter(&self.state, Phase::Scanning) else {
      return ScanReport::Busy;
    };

    let decoded = self
      .scanner
      .scan_file(path)
      .await
      .and_then(|decoded| decoded.require(&self.session.accepted));

    match decoded {
      Ok(text) => ScanReport::Submitted(self.submit(&guard, &text).await),
      Err(err) => {
        self.present_failure(&err);
        ScanReport::Failed(err)
      }
    }
  }

  /// End the active camera session, if any. The camera is released and the
  /// session reports [`AcquisitionError::Cancelled`]. Does nothing while idle,
  /// during a file decode, or once the session has moved on to submitting.
  pub fn shutdown(&self) {
    if let Some(teardown) = &lock(&self.state).teardown {
      teardown.notify_one();
    }
  }

  async fn submit(
    &self,
    guard: &PhaseGuard<'_>,
    text: &str,
  ) -> SubmissionOutcome {
    guard.set(Phase::Loading);
    let outcome = self.service.submit(text).await;
    self.modal.show(Presentation::from(&outcome));
    outcome
  }

  fn present_failure(&self, err: &AcquisitionError) {
    if *err == AcquisitionError::Cancelled {
      debug!("scan cancelled");
      return;
    }
    match err {
      AcquisitionError::Timeout(_) => info!(error = %err, "scan timed out"),
      _ => warn!(error = %err, "scan failed"),
    }
    self.modal.show(Presentation::from(err));
  }
}
