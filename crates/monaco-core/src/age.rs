//! Age computation and the minimum-age policy.

use chrono::{Datelike, Local, NaiveDate};

/// Guests younger than this are turned away unless configured otherwise.
pub const DEFAULT_MINIMUM_AGE: i32 = 18;

/// Whole years between `birth` and `today`.
///
/// The year difference is reduced by one when `today` falls before this
/// year's birthday, so a guest born on 2000-03-15 is 23 on 2024-03-14 and 24
/// from 2024-03-15 on.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
  let mut age = today.year() - birth.year();
  if (today.month(), today.day()) < (birth.month(), birth.day()) {
    age -= 1;
  }
  age
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
  Eligible,
  UnderAge(i32),
}

impl Eligibility {
  pub fn is_eligible(&self) -> bool { matches!(self, Self::Eligible) }
}

pub fn classify(age: i32, minimum_age: i32) -> Eligibility {
  if age < minimum_age {
    Eligibility::UnderAge(age)
  } else {
    Eligibility::Eligible
  }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of the current calendar date used for age checks.
pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine running the scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
