use sea_orm::DatabaseConnection;

use crate::domain::types::OtpPolicy;
use crate::infra::db::{
    DbContentRepository, DbOtpRepository, DbUserInterestRepository, DbUserRepository,
    DbWatchHistoryRepository,
};
use crate::infra::email::LogEmailGateway;
use crate::usecase::code::SecureCodeGenerator;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_lifetime_secs: u64,
    pub otp_policy: OtpPolicy,
}

impl AppState {
    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn content_repo(&self) -> DbContentRepository {
        DbContentRepository {
            db: self.db.clone(),
        }
    }

    pub fn interest_repo(&self) -> DbUserInterestRepository {
        DbUserInterestRepository {
            db: self.db.clone(),
        }
    }

    pub fn history_repo(&self) -> DbWatchHistoryRepository {
        DbWatchHistoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn email_gateway(&self) -> LogEmailGateway {
        LogEmailGateway
    }

    pub fn code_gen(&self) -> SecureCodeGenerator {
        SecureCodeGenerator
    }
}
