//! Async HTTP client for the guest-list backend.
//!
//! The backend sits behind a gateway that takes every call as a POST to one
//! base URL, with the real route carried in the body:
//!
//! ```json
//! { "endpoint": "/qrPerson/add", "data": { "person": { "dni": 12345678, ... } } }
//! ```

pub mod error;
mod wire;

use std::time::Duration;

pub use error::{Error, Result};
use monaco_core::{
  IdentityRecord,
  transport::{RemoteError, SubmissionTransport},
};
use reqwest::Client;

/// Route the guest list is added through.
pub const ADD_PERSON_ENDPOINT: &str = "/qrPerson/add";

/// Connection settings for the gateway.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  pub endpoint: String,
  pub timeout:  Duration,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      endpoint: ADD_PERSON_ENDPOINT.to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// reqwest implementation of [`SubmissionTransport`].
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpTransport {
  client: Client,
  config: ClientConfig,
}

impl HttpTransport {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Build)?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &ClientConfig { &self.config }

  /// `POST <base_url>` with the add-person envelope.
  pub async fn add_person(
    &self,
    person: &IdentityRecord,
  ) -> Result<IdentityRecord> {
    let envelope = wire::Envelope::add_person(&self.config.endpoint, person);

    tracing::debug!(
      endpoint = %self.config.endpoint,
      national_id = person.national_id,
      "posting person"
    );

    let resp = self
      .client
      .post(&self.config.base_url)
      .json(&envelope)
      .send()
      .await
      .map_err(Error::Request)?;

    let status = resp.status();
    let body = resp.bytes().await.map_err(Error::Request)?;

    if status.is_success()
      && let Ok(reply) = serde_json::from_slice::<wire::PersonReply>(&body)
    {
      return Ok(reply.person);
    }

    // Gateways report refusals either with an error status or inside a 200.
    if let Ok(reply) = serde_json::from_slice::<wire::ErrorReply>(&body) {
      let body = reply.into_body();
      return Err(Error::Rejected {
        status,
        code: body.code,
        message: body.message,
      });
    }

    if status.is_success() {
      Err(Error::UnexpectedBody(String::from_utf8_lossy(&body).into_owned()))
    } else {
      Err(Error::Status(status))
    }
  }
}

impl SubmissionTransport for HttpTransport {
  async fn submit(
    &self,
    record: &IdentityRecord,
  ) -> Result<IdentityRecord, RemoteError> {
    self.add_person(record).await.map_err(RemoteError::from)
  }
}
