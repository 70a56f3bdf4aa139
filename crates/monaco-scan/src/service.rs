//! Parse → age check → submit, folded into a [`SubmissionOutcome`].

use monaco_core::{
  SubmissionOutcome,
  age::{Clock, Eligibility, age_in_years, classify},
  transport::{RemoteError, RemoteErrorCode, SubmissionTransport},
};
use tracing::{info, warn};

pub struct SubmissionService<T, C> {
  transport:   T,
  clock:       C,
  minimum_age: i32,
}

impl<T, C> SubmissionService<T, C>
where
  T: SubmissionTransport,
  C: Clock,
{
  pub fn new(transport: T, clock: C, minimum_age: i32) -> Self {
    Self {
      transport,
      clock,
      minimum_age,
    }
  }

  pub fn transport(&self) -> &T { &self.transport }

  /// Run one submission attempt for a decoded payload.
  ///
  /// Parse and age failures are decided locally; only an eligible record
  /// reaches the transport, and it is sent exactly once. A birth date after
  /// today is treated as malformed.
  pub async fn submit(&self, raw: &str) -> SubmissionOutcome {
    let record = match monaco_dni::parse(raw) {
      Ok(record) => record,
      Err(e) => {
        warn!(error = %e, "rejecting unreadable payload");
        return SubmissionOutcome::generic(e.to_string());
      }
    };

    let today = self.clock.today();
    if record.birth_date > today {
      let err = monaco_dni::Error::MalformedDate(
        record.birth_date.format("%d/%m/%Y").to_string(),
      );
      warn!(
        national_id = record.national_id,
        error = %err,
        "birth date is in the future"
      );
      return SubmissionOutcome::generic(err.to_string());
    }

    let age = age_in_years(record.birth_date, today);
    if let Eligibility::UnderAge(age) = classify(age, self.minimum_age) {
      info!(national_id = record.national_id, age, "guest is under age");
      return SubmissionOutcome::UnderAge { age };
    }

    let outcome = match self.transport.submit(&record).await {
      Ok(stored) => SubmissionOutcome::Success(stored),
      Err(e) => outcome_for_error(e, age),
    };

    info!(
      national_id = record.national_id,
      outcome = outcome.tag(),
      "submission finished"
    );
    outcome
  }
}

fn outcome_for_error(err: RemoteError, age: i32) -> SubmissionOutcome {
  match err {
    RemoteError::Rejected { code, message } => match code {
      RemoteErrorCode::UniqueError => SubmissionOutcome::DuplicateIdentity,
      RemoteErrorCode::DateLimitReached => SubmissionOutcome::DateLimitReached,
      RemoteErrorCode::ListLimitReached => SubmissionOutcome::ListLimitReached,
      // Backend age rules may be stricter than ours.
      RemoteErrorCode::UnderAge => SubmissionOutcome::UnderAge { age },
      RemoteErrorCode::Other(code) => {
        warn!(%code, ?message, "backend rejected person");
        SubmissionOutcome::GenericFailure {
          detail: Some(message.unwrap_or(code)),
        }
      }
    },
    RemoteError::Transport(e) => {
      warn!(error = %e, "submission failed");
      SubmissionOutcome::generic(e.to_string())
    }
  }
}

#[cfg(test)]
mod tests {
  use monaco_core::{age::FixedClock, transport::RemoteError};

  use super::*;
  use crate::testing::{JANE, SpyTransport, jane, june_2024};

  fn service(
    transport: SpyTransport,
  ) -> SubmissionService<SpyTransport, FixedClock> {
    SubmissionService::new(transport, june_2024(), 18)
  }

  #[tokio::test]
  async fn eligible_guest_is_submitted_once() {
    let svc = service(SpyTransport::accepting());
    let outcome = svc.submit(JANE).await;

    let SubmissionOutcome::Success(record) = outcome else {
      panic!("expected Success")
    };
    assert_eq!(record.national_id, 12345678);
    assert_eq!(record.first_name, "Jane");
    assert_eq!(record.last_name, "Doe");
    assert_eq!(svc.transport().calls(), 1);
    assert_eq!(svc.transport().submitted(), vec![jane()]);
  }

  #[tokio::test]
  async fn success_returns_record_as_stored_by_backend() {
    let mut stored = jane();
    stored.first_name = "JANE".into();
    let svc = service(SpyTransport::returning(stored.clone()));
    assert_eq!(svc.submit(JANE).await, SubmissionOutcome::Success(stored));
  }

  #[tokio::test]
  async fn minor_is_stopped_before_the_backend() {
    let svc = service(SpyTransport::accepting());
    let outcome = svc.submit("X@Doe@Jane@X@12345678@X@15/03/2010@X@X").await;
    assert_eq!(outcome, SubmissionOutcome::UnderAge { age: 14 });
    assert_eq!(svc.transport().calls(), 0);
  }

  #[tokio::test]
  async fn minimum_age_is_configurable() {
    let svc =
      SubmissionService::new(SpyTransport::accepting(), june_2024(), 25);
    assert_eq!(svc.submit(JANE).await, SubmissionOutcome::UnderAge { age: 24 });
    assert_eq!(svc.transport().calls(), 0);
  }

  #[tokio::test]
  async fn future_birth_date_is_malformed_not_under_age() {
    let svc = service(SpyTransport::accepting());
    let outcome = svc.submit("X@Doe@Jane@X@12345678@X@15/03/2100@X@X").await;
    assert_eq!(
      outcome,
      SubmissionOutcome::generic(
        monaco_dni::Error::MalformedDate("15/03/2100".into()).to_string()
      )
    );
    assert_eq!(svc.transport().calls(), 0);
  }

  #[tokio::test]
  async fn born_today_is_under_age_zero() {
    let svc = service(SpyTransport::accepting());
    let outcome = svc.submit("X@Doe@Jane@X@12345678@X@01/06/2024@X@X").await;
    assert_eq!(outcome, SubmissionOutcome::UnderAge { age: 0 });
    assert_eq!(svc.transport().calls(), 0);
  }

  #[tokio::test]
  async fn unreadable_payload_is_generic_failure_without_request() {
    let svc = service(SpyTransport::accepting());
    for raw in ["", "only@three@fields", "X@Doe@Jane@X@ABC@X@15/03/2000@X@X"] {
      let outcome = svc.submit(raw).await;
      assert!(
        matches!(
          outcome,
          SubmissionOutcome::GenericFailure { detail: Some(_) }
        ),
        "{raw:?} gave {outcome:?}"
      );
    }
    assert_eq!(svc.transport().calls(), 0);
  }

  #[tokio::test]
  async fn backend_codes_map_to_outcomes() {
    let cases = [
      ("UniqueError", SubmissionOutcome::DuplicateIdentity),
      ("DateLimitReached", SubmissionOutcome::DateLimitReached),
      ("ListLimitReached", SubmissionOutcome::ListLimitReached),
      ("UnderAge", SubmissionOutcome::UnderAge { age: 24 }),
      ("Teapot", SubmissionOutcome::generic("Teapot")),
    ];
    for (code, expected) in cases {
      let svc = service(SpyTransport::rejecting(code));
      assert_eq!(svc.submit(JANE).await, expected, "{code}");
      assert_eq!(svc.transport().calls(), 1);
    }
  }

  #[tokio::test]
  async fn backend_message_is_preferred_as_detail() {
    let svc = service(SpyTransport::failing_with(|| RemoteError::Rejected {
      code:    RemoteErrorCode::Other("Validation".into()),
      message: Some("name too long".into()),
    }));
    assert_eq!(
      svc.submit(JANE).await,
      SubmissionOutcome::generic("name too long")
    );
  }

  #[tokio::test]
  async fn transport_fault_is_generic_failure() {
    let svc = service(SpyTransport::failing_with(|| {
      RemoteError::Transport("connection reset".into())
    }));
    assert_eq!(
      svc.submit(JANE).await,
      SubmissionOutcome::generic("connection reset")
    );
    assert_eq!(svc.transport().calls(), 1);
  }
}
