use sea_orm::entity::prelude::*;

/// One-time passcode issued for a login attempt.
///
/// Keyed by email rather than user id — the user row does not exist until
/// the first successful verification. Only the SHA-256 digest of the code
/// is stored; `attempts` and `verified` are the only columns updated after
/// creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_verifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub code_digest: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub attempts: i32,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
