use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use skillstream_backend::domain::repository::{
    CodeGenerator, EmailGateway, OtpRepository, UserRepository,
};
use skillstream_backend::domain::types::{OtpRecord, User};
use skillstream_backend::error::BackendError;
use skillstream_backend::usecase::code::digest_code;

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub records: Arc<Mutex<Vec<OtpRecord>>>,
}

impl MockOtpRepo {
    pub fn new(records: Vec<OtpRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the record list for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<OtpRecord>>> {
        Arc::clone(&self.records)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn create(&self, record: &OtpRecord) -> Result<(), BackendError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn latest_for(&self, email: &str) -> Result<Option<OtpRecord>, BackendError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.email == email)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn all_unverified_for(&self, email: &str) -> Result<Vec<OtpRecord>, BackendError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.email == email && !r.verified)
            .cloned()
            .collect())
    }

    async fn created_after(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<OtpRecord>, BackendError> {
        let mut matching: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.email == email && r.created_at > since)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.created_at);
        Ok(matching)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, BackendError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id && !r.verified) {
            Some(stored) => {
                stored.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<(), BackendError> {
        let mut records = self.records.lock().unwrap();
        if let Some(stored) = records.iter_mut().find(|r| r.id == id) {
            stored.attempts += 1;
        }
        Ok(())
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BackendError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BackendError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), BackendError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn mark_onboarded(&self, id: Uuid) -> Result<(), BackendError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.onboarding_completed = true;
        }
        Ok(())
    }
}

// ── MockEmailGateway ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockEmailGateway {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockEmailGateway {
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl EmailGateway for MockEmailGateway {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), BackendError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── FixedCodeGenerator ───────────────────────────────────────────────────────

pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn six_digit_code(&self) -> String {
        self.0.to_owned()
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "alice@example.com".to_owned(),
        onboarding_completed: false,
        created_at: Utc::now(),
    }
}

/// A live (unexpired, unverified) record for `email` holding `code`.
pub fn live_record(email: &str, code: &str) -> OtpRecord {
    let now = Utc::now();
    OtpRecord {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        code_digest: digest_code(code),
        created_at: now,
        expires_at: now + Duration::minutes(5),
        attempts: 0,
        verified: false,
    }
}
