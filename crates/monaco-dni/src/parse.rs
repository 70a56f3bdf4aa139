//! Parser for the `@`-delimited payload of the national ID barcode.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_fields()       → [&str; 9]
//!          └─ national_id() / name() / birth_date()
//!               └─ IdentityRecord

use chrono::NaiveDate;
use monaco_core::IdentityRecord;

use crate::error::{Error, Result};

// ─── Layout ──────────────────────────────────────────────────────────────────

pub(crate) const FIELD_COUNT: usize = 9;

const LAST_NAME: usize = 1;
const FIRST_NAME: usize = 2;
const NATIONAL_ID: usize = 4;
const BIRTH_DATE: usize = 6;

// ─── Field helpers ───────────────────────────────────────────────────────────

fn split_fields(raw: &str) -> Result<[&str; FIELD_COUNT]> {
  let fields: Vec<&str> = raw.split('@').collect();
  fields
    .try_into()
    .map_err(|fields: Vec<&str>| Error::MalformedPayload {
      fields: fields.len(),
    })
}

fn national_id(value: &str) -> Result<u64> {
  let value = value.trim();
  // `u64::from_str` accepts a leading '+'; a document number never has one.
  if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InvalidNationalId(value.to_string()));
  }
  value
    .parse()
    .map_err(|_| Error::InvalidNationalId(value.to_string()))
}

fn name(fields: &[&str], index: usize, label: &'static str) -> Result<String> {
  let value = fields[index].trim();
  if value.is_empty() {
    return Err(Error::EmptyField { index, name: label });
  }
  Ok(value.to_string())
}

/// `DD/MM/YYYY`, each part numeric, forming a real calendar date.
fn birth_date(value: &str) -> Result<NaiveDate> {
  let malformed = || Error::MalformedDate(value.to_string());

  let parts: Vec<&str> = value.trim().split('/').collect();
  let [day, month, year] = parts.as_slice() else {
    return Err(malformed());
  };

  let day: u32 = day.trim().parse().map_err(|_| malformed())?;
  let month: u32 = month.trim().parse().map_err(|_| malformed())?;
  let year: i32 = year.trim().parse().map_err(|_| malformed())?;

  NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

// ─── Core parser ─────────────────────────────────────────────────────────────

pub fn parse_record(raw: &str) -> Result<IdentityRecord> {
  if raw.trim().is_empty() {
    return Err(Error::EmptyPayload);
  }

  let fields = split_fields(raw)?;

  Ok(IdentityRecord {
    national_id: national_id(fields[NATIONAL_ID])?,
    first_name:  name(&fields, FIRST_NAME, "first name")?,
    last_name:   name(&fields, LAST_NAME, "last name")?,
    birth_date:  birth_date(fields[BIRTH_DATE])?,
    raw_payload: raw.to_string(),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
