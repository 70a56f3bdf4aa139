//! Keyboard-wedge scanner: a handheld reader that types each decode as one
//! line of input.
//!
//! Readers configured to transmit AIM symbology identifiers prefix every
//! line with `]` + code character + modifier (`]L0` for PDF417). Lines
//! without a prefix are attributed to a configured symbology.
//!
//! Input is read on a plain OS thread and handed over through a channel.
//! A read in progress never keeps the async runtime alive, so the process
//! exits as soon as `main` returns, even while the reader is idle.

use std::{
  io::{self, BufRead, BufReader},
  path::Path,
  sync::Arc,
  thread,
};

use monaco_core::scanner::{
  AcquisitionError, Decoded, ScanOptions, Scanner, Symbology,
};
use tokio::sync::{Mutex, OwnedMutexGuard, mpsc};

type Line = io::Result<String>;

/// Lines typed ahead of a session are held here until one starts.
const INPUT_BUFFER: usize = 16;

pub struct WedgeScanner {
  input:    Arc<Mutex<mpsc::Receiver<Line>>>,
  untagged: Symbology,
}

/// Exclusive hold on the input stream for one session. Dropping it frees the
/// input for the next session.
pub struct WedgeHandle {
  lines: OwnedMutexGuard<mpsc::Receiver<Line>>,
}

impl WedgeScanner {
  pub fn stdin(untagged: Symbology) -> Self {
    Self::new(BufReader::new(io::stdin()), untagged)
  }

  pub fn new<R>(reader: R, untagged: Symbology) -> Self
  where
    R: BufRead + Send + 'static,
  {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    thread::spawn(move || {
      for line in reader.lines() {
        if tx.blocking_send(line).is_err() {
          break;
        }
      }
    });
    Self {
      input: Arc::new(Mutex::new(rx)),
      untagged,
    }
  }
}

/// Split an optional AIM identifier off `line`.
fn decode_line(line: &str, untagged: Symbology) -> Decoded {
  if line.starts_with(']')
    && let Some(identifier) = line.get(..3)
  {
    return Decoded {
      text:      line[3..].to_string(),
      symbology: Symbology::from_aim(identifier),
    };
  }
  Decoded {
    text:      line.to_string(),
    symbology: untagged,
  }
}

async fn next_line(
  lines: &mut mpsc::Receiver<Line>,
) -> Result<String, AcquisitionError> {
  loop {
    match lines.recv().await {
      Some(Ok(line)) => {
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
          return Ok(line.to_string());
        }
      }
      Some(Err(e)) => return Err(AcquisitionError::Device(e.to_string())),
      None => {
        return Err(AcquisitionError::Device("scanner input closed".into()));
      }
    }
  }
}

impl Scanner for WedgeScanner {
  type Handle = WedgeHandle;

  async fn start(
    &self,
    _options: &ScanOptions,
  ) -> Result<WedgeHandle, AcquisitionError> {
    let lines = self
      .input
      .clone()
      .try_lock_owned()
      .map_err(|_| AcquisitionError::Device("scanner already in use".into()))?;
    Ok(WedgeHandle { lines })
  }

  async fn next_decode(
    &self,
    handle: &mut WedgeHandle,
  ) -> Result<Decoded, AcquisitionError> {
    let line = next_line(&mut handle.lines).await?;
    Ok(decode_line(&line, self.untagged))
  }

  async fn stop(&self, handle: WedgeHandle) { drop(handle); }

  /// A capture file holds the reader output; its first non-blank line is the
  /// decode.
  async fn scan_file(&self, path: &Path) -> Result<Decoded, AcquisitionError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
      AcquisitionError::Device(format!("{}: {e}", path.display()))
    })?;
    let line = contents
      .lines()
      .map(|l| l.trim_end_matches('\r'))
      .find(|l| !l.trim().is_empty())
      .ok_or_else(|| {
        AcquisitionError::Device(format!("{}: no barcode data", path.display()))
      })?;
    Ok(decode_line(line, self.untagged))
  }
}
