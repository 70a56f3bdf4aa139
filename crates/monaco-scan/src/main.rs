//! `monaco` — scan DNI barcodes into the guest list.
//!
//! Reads decodes from a keyboard-wedge barcode reader on stdin. The process
//! exits when the command finishes, even if the reader is still waiting for
//! a line.
//!
//! ```text
//! monaco scan                 # one scan, 15 s to present the ID
//! monaco watch                # keep scanning until input closes or Ctrl-C
//! monaco file capture.txt     # decode a saved reader capture
//! monaco submit '<payload>'   # skip the reader entirely
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use monaco_client::HttpTransport;
use monaco_core::{age::SystemClock, scanner::AcquisitionError};
use monaco_scan::{
  AppConfig, ModalContext, ScanCoordinator, ScanReport, SubmissionService,
  wedge::WedgeScanner,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Scan DNI barcodes into the Monaco guest list"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "monaco.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run a single scan session.
  Scan,
  /// Run scan sessions back to back until input closes.
  Watch,
  /// Decode a saved reader capture.
  File { path: PathBuf },
  /// Submit a raw barcode payload.
  Submit { payload: String },
}

type Coordinator = ScanCoordinator<WedgeScanner, HttpTransport, SystemClock>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let cfg = AppConfig::load(&cli.config).context("failed to read config file")?;
  let transport = HttpTransport::new(cfg.client_config())
    .context("failed to build HTTP client")?;

  let modal = Arc::new(ModalContext::new());
  let coordinator: Arc<Coordinator> = Arc::new(ScanCoordinator::new(
    WedgeScanner::stdin(cfg.untagged_symbology),
    SubmissionService::new(transport, SystemClock, cfg.minimum_age),
    cfg.session_config(),
    modal.clone(),
  ));

  tracing::info!(base_url = %cfg.base_url, "ready");

  match cli.command {
    Command::Scan => {
      println!("Scan the barcode on the back of your DNI.");
      coordinator.scan_camera().await;
      render(&modal);
    }
    Command::Watch => watch(coordinator, &modal).await,
    Command::File { path } => {
      coordinator.scan_file(&path).await;
      render(&modal);
    }
    Command::Submit { payload } => {
      coordinator.on_decoded(&payload).await;
      render(&modal);
    }
  }

  Ok(())
}

async fn watch(coordinator: Arc<Coordinator>, modal: &ModalContext) {
  let ctrl_c = tokio::spawn({
    let coordinator = coordinator.clone();
    async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        coordinator.shutdown();
      }
    }
  });

  while !ctrl_c.is_finished() {
    println!("Scan the barcode on the back of your DNI.");
    match coordinator.scan_camera().await {
      ScanReport::Failed(
        AcquisitionError::Cancelled | AcquisitionError::Device(_),
      ) => {
        render(modal);
        break;
      }
      // Nobody stepped up; re-arm quietly.
      ScanReport::Failed(AcquisitionError::Timeout(_)) => modal.hide(),
      _ => render(modal),
    }
  }

  ctrl_c.abort();
}

/// Print the modal content, then close it.
fn render(modal: &ModalContext) {
  if let Some(presentation) = modal.current() {
    println!("\n{presentation}\n");
  }
  modal.hide();
}
