use chrono::{Duration, Utc};

use skillstream_backend::domain::types::OtpPolicy;
use skillstream_backend::error::BackendError;
use skillstream_backend::usecase::code::digest_code;
use skillstream_backend::usecase::issue_otp::{IssueOtpInput, IssueOtpUseCase};

use crate::helpers::{FixedCodeGenerator, MockEmailGateway, MockOtpRepo, live_record};

const EMAIL: &str = "alice@example.com";

fn usecase(
    otps: MockOtpRepo,
) -> IssueOtpUseCase<MockOtpRepo, MockEmailGateway, FixedCodeGenerator> {
    IssueOtpUseCase {
        otps,
        email_gateway: MockEmailGateway::default(),
        code_gen: FixedCodeGenerator("042513"),
        policy: OtpPolicy::default(),
    }
}

#[tokio::test]
async fn should_store_digest_and_email_plaintext() {
    let otps = MockOtpRepo::empty();
    let records = otps.records_handle();
    let uc = usecase(otps);
    let sent = uc.email_gateway.sent_handle();

    uc.execute(IssueOtpInput {
        email: EMAIL.to_owned(),
    })
    .await
    .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.email, EMAIL);
    assert_eq!(record.code_digest, digest_code("042513"));
    assert_ne!(record.code_digest, "042513", "plaintext must not be stored");
    assert_eq!(record.attempts, 0);
    assert!(!record.verified);
    assert!(record.expires_at > Utc::now());

    let sent = sent.lock().unwrap();
    assert_eq!(sent.as_slice(), &[(EMAIL.to_owned(), "042513".to_owned())]);
}

#[tokio::test]
async fn should_reject_malformed_email_before_any_side_effect() {
    let otps = MockOtpRepo::empty();
    let records = otps.records_handle();
    let uc = usecase(otps);
    let sent = uc.email_gateway.sent_handle();

    let result = uc
        .execute(IssueOtpInput {
            email: "not-an-email".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(BackendError::InvalidEmail)));
    assert!(records.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_invalidate_earlier_live_codes() {
    let old_a = live_record(EMAIL, "111111");
    let old_b = live_record(EMAIL, "222222");
    let otps = MockOtpRepo::new(vec![old_a.clone(), old_b.clone()]);
    let records = otps.records_handle();
    let uc = usecase(otps);

    uc.execute(IssueOtpInput {
        email: EMAIL.to_owned(),
    })
    .await
    .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 3);
    for old in [&old_a, &old_b] {
        let stored = records.iter().find(|r| r.id == old.id).unwrap();
        assert!(stored.verified, "earlier live code must be spent");
        // Invalidation must not shift the rate-limit window.
        assert_eq!(stored.created_at, old.created_at);
    }
    let fresh = records.iter().find(|r| !r.verified).unwrap();
    assert_eq!(fresh.code_digest, digest_code("042513"));
}

#[tokio::test]
async fn should_not_touch_other_emails_codes() {
    let other = live_record("bob@example.com", "999999");
    let otps = MockOtpRepo::new(vec![other.clone()]);
    let records = otps.records_handle();
    let uc = usecase(otps);

    uc.execute(IssueOtpInput {
        email: EMAIL.to_owned(),
    })
    .await
    .unwrap();

    let records = records.lock().unwrap();
    let stored = records.iter().find(|r| r.id == other.id).unwrap();
    assert!(!stored.verified);
}

#[tokio::test]
async fn should_deny_fourth_request_within_window() {
    let now = Utc::now();
    let burst: Vec<_> = (1..=3)
        .map(|ago| {
            let mut r = live_record(EMAIL, "123456");
            r.created_at = now - Duration::seconds(ago);
            r
        })
        .collect();
    let otps = MockOtpRepo::new(burst);
    let records = otps.records_handle();
    let uc = usecase(otps);
    let sent = uc.email_gateway.sent_handle();

    let result = uc
        .execute(IssueOtpInput {
            email: EMAIL.to_owned(),
        })
        .await;

    match result {
        Err(BackendError::RateLimited { retry_after_secs }) => {
            // oldest + 90s window + 2min cooldown, minus the ~3s elapsed.
            assert!(
                (205..=208).contains(&retry_after_secs),
                "retry_after_secs = {retry_after_secs}"
            );
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
    assert_eq!(records.lock().unwrap().len(), 3, "no new record on denial");
    assert!(sent.lock().unwrap().is_empty(), "no email on denial");
}

#[tokio::test]
async fn should_admit_after_burst_leaves_window() {
    let now = Utc::now();
    let burst: Vec<_> = (0..3)
        .map(|i| {
            let mut r = live_record(EMAIL, "123456");
            r.created_at = now - Duration::seconds(300 + i);
            r
        })
        .collect();
    let otps = MockOtpRepo::new(burst);
    let records = otps.records_handle();
    let uc = usecase(otps);

    uc.execute(IssueOtpInput {
        email: EMAIL.to_owned(),
    })
    .await
    .unwrap();

    assert_eq!(records.lock().unwrap().len(), 4);
}
