//! Runtime configuration, deserialised from `monaco.toml` and `MONACO_*`
//! environment variables.

use std::{path::Path, time::Duration};

use monaco_client::{ADD_PERSON_ENDPOINT, ClientConfig};
use monaco_core::{
  age::DEFAULT_MINIMUM_AGE,
  scanner::{ScanOptions, Symbology},
};
use serde::Deserialize;

use crate::session::SessionConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Gateway every request is POSTed to.
  pub base_url:             String,
  pub endpoint:             String,
  pub minimum_age:          i32,
  pub scan_timeout_secs:    u64,
  pub request_timeout_secs: u64,
  pub accepted_symbologies: Vec<Symbology>,
  /// Symbology assumed for keyboard-wedge lines without an AIM identifier.
  pub untagged_symbology:   Symbology,
  pub scanner:              ScanOptions,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      base_url:             "http://localhost:3000/".to_string(),
      endpoint:             ADD_PERSON_ENDPOINT.to_string(),
      minimum_age:          DEFAULT_MINIMUM_AGE,
      scan_timeout_secs:    15,
      request_timeout_secs: 30,
      accepted_symbologies: vec![Symbology::Pdf417],
      untagged_symbology:   Symbology::Pdf417,
      scanner:              ScanOptions::default(),
    }
  }
}

impl AppConfig {
  /// Layer `path` (optional) under `MONACO_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MONACO"))
      .build()?
      .try_deserialize()
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url: self.base_url.clone(),
      endpoint: self.endpoint.clone(),
      timeout:  Duration::from_secs(self.request_timeout_secs),
    }
  }

  pub fn session_config(&self) -> SessionConfig {
    SessionConfig {
      options:  self.scanner.clone(),
      timeout:  Duration::from_secs(self.scan_timeout_secs),
      accepted: self.accepted_symbologies.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn scratch_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("monaco-{}.toml", Uuid::new_v4()))
  }

  #[test]
  fn missing_file_yields_defaults() {
    let path = scratch_path();
    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.endpoint, "/qrPerson/add");
    assert_eq!(cfg.minimum_age, 18);
    assert_eq!(cfg.accepted_symbologies, vec![Symbology::Pdf417]);

    let session = cfg.session_config();
    assert_eq!(session.timeout, Duration::from_secs(15));
    assert_eq!(session.options, ScanOptions::default());
  }

  #[test]
  fn file_overrides_defaults() {
    let path = scratch_path();
    std::fs::write(
      &path,
      r#"
base_url = "https://guests.example.com/api"
minimum_age = 21
scan_timeout_secs = 30
accepted_symbologies = ["pdf417", "qr_code"]

[scanner]
fps = 15
zoom = 2.0
"#,
    )
    .unwrap();

    let cfg = AppConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.minimum_age, 21);
    assert_eq!(
      cfg.accepted_symbologies,
      vec![Symbology::Pdf417, Symbology::QrCode]
    );
    assert_eq!(cfg.scanner.fps, 15);
    assert_eq!(cfg.scanner.zoom, 2.0);
    assert_eq!(cfg.scanner.scan_box, ScanOptions::default().scan_box);

    let client = cfg.client_config();
    assert_eq!(client.base_url, "https://guests.example.com/api");
    assert_eq!(client.endpoint, "/qrPerson/add");
    assert_eq!(client.timeout, Duration::from_secs(30));
    assert_eq!(cfg.session_config().timeout, Duration::from_secs(30));
  }
}
