use chrono::{Duration, Utc};

use skillstream_backend::domain::types::OtpPolicy;
use skillstream_backend::error::{AuthFailure, BackendError};
use skillstream_backend::usecase::token::validate_session_token;
use skillstream_backend::usecase::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};

use crate::helpers::{MockOtpRepo, MockUserRepo, live_record, test_user};

const EMAIL: &str = "alice@example.com";
const SECRET: &str = "verify-test-secret";

fn usecase(otps: MockOtpRepo, users: MockUserRepo) -> VerifyOtpUseCase<MockOtpRepo, MockUserRepo> {
    VerifyOtpUseCase {
        otps,
        users,
        policy: OtpPolicy::default(),
        jwt_secret: SECRET.to_owned(),
        token_lifetime_secs: 864_000,
    }
}

fn input(code: &str) -> VerifyOtpInput {
    VerifyOtpInput {
        email: EMAIL.to_owned(),
        code: code.to_owned(),
    }
}

fn assert_auth_failure(result: Result<impl std::fmt::Debug, BackendError>, expected: AuthFailure) {
    match result {
        Err(BackendError::AuthenticationFailed(failure)) => assert_eq!(failure, expected),
        other => panic!("expected AuthenticationFailed({expected:?}), got {other:?}"),
    }
}

#[tokio::test]
async fn should_login_existing_user_with_correct_code() {
    let user = test_user();
    let record = live_record(EMAIL, "042513");
    let otps = MockOtpRepo::new(vec![record.clone()]);
    let records = otps.records_handle();
    let uc = usecase(otps, MockUserRepo::new(vec![user.clone()]));

    let out = uc.execute(input("042513")).await.unwrap();

    assert_eq!(out.user.id, user.id);
    let claims = validate_session_token(&out.token, SECRET).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, EMAIL);

    let records = records.lock().unwrap();
    assert!(records[0].verified, "successful code must be spent");
}

#[tokio::test]
async fn should_create_user_lazily_on_first_login() {
    let otps = MockOtpRepo::new(vec![live_record(EMAIL, "042513")]);
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let uc = usecase(otps, users);

    let out = uc.execute(input("042513")).await.unwrap();

    assert_eq!(out.user.email, EMAIL);
    assert!(!out.user.onboarding_completed);
    let created = users_handle.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, out.user.id);
}

#[tokio::test]
async fn should_fail_when_no_code_was_issued() {
    let uc = usecase(MockOtpRepo::empty(), MockUserRepo::empty());
    assert_auth_failure(uc.execute(input("042513")).await, AuthFailure::NoRecord);
}

#[tokio::test]
async fn should_fail_when_code_expired() {
    let mut record = live_record(EMAIL, "042513");
    record.expires_at = Utc::now() - Duration::minutes(1);
    let uc = usecase(MockOtpRepo::new(vec![record]), MockUserRepo::empty());
    // Even the correct code fails once expired.
    assert_auth_failure(uc.execute(input("042513")).await, AuthFailure::Expired);
}

#[tokio::test]
async fn should_increment_attempts_on_mismatch() {
    let record = live_record(EMAIL, "042513");
    let otps = MockOtpRepo::new(vec![record]);
    let records = otps.records_handle();
    let uc = usecase(otps, MockUserRepo::empty());

    assert_auth_failure(uc.execute(input("000000")).await, AuthFailure::Mismatch);
    assert_eq!(records.lock().unwrap()[0].attempts, 1);
}

#[tokio::test]
async fn should_report_mismatch_on_capping_attempt_then_locked() {
    let mut record = live_record(EMAIL, "042513");
    record.attempts = 4;
    let otps = MockOtpRepo::new(vec![record]);
    let records = otps.records_handle();
    let uc = usecase(otps, MockUserRepo::empty());

    // Fifth failure reaches the cap but still reads as a mismatch.
    assert_auth_failure(uc.execute(input("000000")).await, AuthFailure::Mismatch);
    assert_eq!(records.lock().unwrap()[0].attempts, 5);

    // From now on the record is locked, even for the correct code.
    assert_auth_failure(uc.execute(input("042513")).await, AuthFailure::Locked);
    assert_eq!(
        records.lock().unwrap()[0].attempts,
        5,
        "locked check must not touch attempts"
    );
}

#[tokio::test]
async fn should_burn_attempt_when_replaying_spent_code() {
    let mut record = live_record(EMAIL, "042513");
    record.verified = true;
    let otps = MockOtpRepo::new(vec![record]);
    let records = otps.records_handle();
    let uc = usecase(otps, MockUserRepo::empty());

    assert_auth_failure(
        uc.execute(input("042513")).await,
        AuthFailure::AlreadyVerified,
    );
    assert_eq!(records.lock().unwrap()[0].attempts, 1);
}

#[tokio::test]
async fn should_not_mint_when_store_reports_code_already_spent() {
    // Two calls with the correct code race: both read an unverified
    // snapshot, but the store's conditional spend only succeeds once.
    // This repo serves the stale snapshot while reporting the row as
    // already taken, standing in for the loser of that race.
    use std::sync::Mutex;
    use uuid::Uuid;

    use skillstream_backend::domain::repository::OtpRepository;
    use skillstream_backend::domain::types::OtpRecord;

    struct RacedOtpRepo {
        snapshot: OtpRecord,
        increments: Mutex<u32>,
    }

    impl OtpRepository for RacedOtpRepo {
        async fn create(&self, _record: &OtpRecord) -> Result<(), BackendError> {
            Ok(())
        }
        async fn latest_for(&self, _email: &str) -> Result<Option<OtpRecord>, BackendError> {
            Ok(Some(self.snapshot.clone()))
        }
        async fn all_unverified_for(&self, _email: &str) -> Result<Vec<OtpRecord>, BackendError> {
            Ok(vec![])
        }
        async fn created_after(
            &self,
            _email: &str,
            _since: chrono::DateTime<Utc>,
        ) -> Result<Vec<OtpRecord>, BackendError> {
            Ok(vec![])
        }
        async fn mark_verified(&self, _id: Uuid) -> Result<bool, BackendError> {
            Ok(false)
        }
        async fn increment_attempts(&self, _id: Uuid) -> Result<(), BackendError> {
            *self.increments.lock().unwrap() += 1;
            Ok(())
        }
    }

    let otps = RacedOtpRepo {
        snapshot: live_record(EMAIL, "042513"),
        increments: Mutex::new(0),
    };
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();
    let uc = VerifyOtpUseCase {
        otps,
        users,
        policy: OtpPolicy::default(),
        jwt_secret: SECRET.to_owned(),
        token_lifetime_secs: 864_000,
    };

    let result = uc.execute(input("042513")).await;

    assert_auth_failure(result, AuthFailure::AlreadyVerified);
    assert_eq!(*uc.otps.increments.lock().unwrap(), 1);
    assert!(
        users_handle.lock().unwrap().is_empty(),
        "losing the spend race must not create a user"
    );
}

#[tokio::test]
async fn should_check_only_the_newest_record() {
    let old = live_record(EMAIL, "111111");
    let mut new = live_record(EMAIL, "222222");
    new.created_at = old.created_at + Duration::seconds(30);
    let uc = usecase(MockOtpRepo::new(vec![old, new]), MockUserRepo::empty());

    // The superseded code no longer works...
    assert_auth_failure(uc.execute(input("111111")).await, AuthFailure::Mismatch);
    // ...while the newest one does.
    uc.execute(input("222222")).await.unwrap();
}

#[tokio::test]
async fn should_succeed_within_attempt_budget_after_failures() {
    let mut record = live_record(EMAIL, "042513");
    record.attempts = 3;
    let otps = MockOtpRepo::new(vec![record]);
    let uc = usecase(otps, MockUserRepo::empty());

    let out = uc.execute(input("042513")).await.unwrap();
    assert_eq!(out.user.email, EMAIL);
}
