//! The identity record decoded from a national ID barcode.
//!
//! A record lives for exactly one scan: it is built by the payload parser,
//! checked against the age policy, submitted, and dropped once the outcome
//! has been presented. Nothing here is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Personal data extracted from the `@`-delimited barcode payload.
///
/// Field names on the wire follow the guest-list backend (`dni`, `name`,
/// `lastname`, `birthdate`, `rawData`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
  /// Document number (DNI), payload field 4.
  #[serde(rename = "dni")]
  pub national_id: u64,
  /// Given names, payload field 2.
  #[serde(rename = "name")]
  pub first_name:  String,
  /// Surnames, payload field 1.
  #[serde(rename = "lastname")]
  pub last_name:   String,
  /// Payload field 6.
  #[serde(rename = "birthdate", with = "birthdate")]
  pub birth_date:  NaiveDate,
  /// The payload exactly as decoded, including the fields this system ignores.
  #[serde(rename = "rawData")]
  pub raw_payload: String,
}

impl IdentityRecord {
  /// `"First Last"`, as shown to the guest.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Birth dates are written as `YYYY-MM-DD`. The backend may echo them back
/// as a full RFC 3339 timestamp; only the calendar date is kept.
mod birthdate {
  use chrono::{DateTime, NaiveDate};
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  const FORMAT: &str = "%Y-%m-%d";

  pub fn serialize<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
      return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| dt.date_naive())
      .map_err(|_| D::Error::custom(format!("invalid birthdate: {raw:?}")))
  }
}
