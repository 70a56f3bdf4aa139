//! Test doubles shared by the unit tests of this crate.

use std::{
  path::Path,
  sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use chrono::NaiveDate;
use monaco_core::{
  IdentityRecord,
  age::FixedClock,
  scanner::{AcquisitionError, Decoded, ScanOptions, Scanner},
  transport::{RemoteError, SubmissionTransport},
};
use tokio::sync::Notify;

pub(crate) const JANE: &str = "X@Doe@Jane@X@12345678@X@15/03/2000@X@X";

pub(crate) fn jane() -> IdentityRecord {
  IdentityRecord {
    national_id: 12345678,
    first_name:  "Jane".into(),
    last_name:   "Doe".into(),
    birth_date:  NaiveDate::from_ymd_opt(2000, 3, 15).unwrap(),
    raw_payload: JANE.into(),
  }
}

pub(crate) fn june_2024() -> FixedClock {
  FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

// ─── Transport spy ───────────────────────────────────────────────────────────

enum Reply {
  Echo,
  Return(IdentityRecord),
  Fail(Box<dyn Fn() -> RemoteError + Send + Sync>),
}

/// Holds a submission open until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
  pub entered: Notify,
  pub release: Notify,
}

pub(crate) struct SpyTransport {
  reply:     Reply,
  gate:      Option<Arc<Gate>>,
  calls:     AtomicUsize,
  submitted: Mutex<Vec<IdentityRecord>>,
}

impl SpyTransport {
  fn with_reply(reply: Reply) -> Self {
    Self {
      reply,
      gate: None,
      calls: AtomicUsize::new(0),
      submitted: Mutex::new(Vec::new()),
    }
  }

  /// Stores whatever it is sent.
  pub fn accepting() -> Self { Self::with_reply(Reply::Echo) }

  pub fn returning(record: IdentityRecord) -> Self {
    Self::with_reply(Reply::Return(record))
  }

  pub fn rejecting(code: &str) -> Self {
    let code = code.to_string();
    Self::failing_with(move || RemoteError::rejected(code.as_str()))
  }

  pub fn failing_with(
    make: impl Fn() -> RemoteError + Send + Sync + 'static,
  ) -> Self {
    Self::with_reply(Reply::Fail(Box::new(make)))
  }

  /// Accepting, but every call waits on the returned gate.
  pub fn gated() -> (Self, Arc<Gate>) {
    let gate = Arc::new(Gate::default());
    let mut spy = Self::accepting();
    spy.gate = Some(gate.clone());
    (spy, gate)
  }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

  pub fn submitted(&self) -> Vec<IdentityRecord> {
    self.submitted.lock().unwrap().clone()
  }
}

impl SubmissionTransport for SpyTransport {
  async fn submit(
    &self,
    record: &IdentityRecord,
  ) -> Result<IdentityRecord, RemoteError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.submitted.lock().unwrap().push(record.clone());

    if let Some(gate) = &self.gate {
      gate.entered.notify_one();
      gate.release.notified().await;
    }

    match &self.reply {
      Reply::Echo => Ok(record.clone()),
      Reply::Return(stored) => Ok(stored.clone()),
      Reply::Fail(make) => Err(make()),
    }
  }
}

// ─── Scanner fake ────────────────────────────────────────────────────────────

enum Script {
  Decode(Decoded),
  Fail(AcquisitionError),
  Silent,
}

pub(crate) struct FakeScanner {
  refuse:   Option<AcquisitionError>,
  script:   Script,
  file:     Result<Decoded, AcquisitionError>,
  starts:   AtomicUsize,
  stops:    AtomicUsize,
  releases: Arc<AtomicUsize>,
}

/// Counts itself as released when dropped, whether or not `stop` ran.
pub(crate) struct FakeHandle {
  releases: Arc<AtomicUsize>,
}

impl Drop for FakeHandle {
  fn drop(&mut self) { self.releases.fetch_add(1, Ordering::SeqCst); }
}

impl FakeScanner {
  fn with_script(script: Script) -> Self {
    Self {
      refuse: None,
      script,
      file: Err(AcquisitionError::Device("no file configured".into())),
      starts: AtomicUsize::new(0),
      stops: AtomicUsize::new(0),
      releases: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn decoding(decoded: Decoded) -> Self {
    Self::with_script(Script::Decode(decoded))
  }

  /// Never sees a barcode.
  pub fn silent() -> Self { Self::with_script(Script::Silent) }

  pub fn failing_decode(err: AcquisitionError) -> Self {
    Self::with_script(Script::Fail(err))
  }

  /// Camera cannot be acquired at all.
  pub fn refusing(err: AcquisitionError) -> Self {
    let mut scanner = Self::silent();
    scanner.refuse = Some(err);
    scanner
  }

  pub fn with_file(mut self, file: Result<Decoded, AcquisitionError>) -> Self {
    self.file = file;
    self
  }

  pub fn starts(&self) -> usize { self.starts.load(Ordering::SeqCst) }

  pub fn stops(&self) -> usize { self.stops.load(Ordering::SeqCst) }

  /// Handles dropped, through `stop` or otherwise.
  pub fn releases(&self) -> usize { self.releases.load(Ordering::SeqCst) }
}

impl Scanner for FakeScanner {
  type Handle = FakeHandle;

  async fn start(
    &self,
    _options: &ScanOptions,
  ) -> Result<FakeHandle, AcquisitionError> {
    self.starts.fetch_add(1, Ordering::SeqCst);
    match &self.refuse {
      Some(err) => Err(err.clone()),
      None => Ok(FakeHandle {
        releases: self.releases.clone(),
      }),
    }
  }

  async fn next_decode(
    &self,
    _handle: &mut FakeHandle,
  ) -> Result<Decoded, AcquisitionError> {
    match &self.script {
      Script::Decode(decoded) => Ok(decoded.clone()),
      Script::Fail(err) => Err(err.clone()),
      Script::Silent => std::future::pending().await,
    }
  }

  async fn stop(&self, _handle: FakeHandle) {
    self.stops.fetch_add(1, Ordering::SeqCst);
  }

  async fn scan_file(&self, _path: &Path) -> Result<Decoded, AcquisitionError> {
    self.file.clone()
  }
}
