use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use skillstream_schema::{contents, otp_verifications, user_interests, users, watch_history};
use skillstream_domain::feedback::Feedback;
use skillstream_domain::interest::Interest;

use crate::domain::repository::{
    ContentRepository, OtpRepository, UserInterestRepository, UserRepository,
    WatchHistoryRepository,
};
use crate::domain::types::{Content, OtpRecord, User, WatchProgress};
use crate::error::BackendError;

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create(&self, record: &OtpRecord) -> Result<(), BackendError> {
        otp_verifications::ActiveModel {
            id: Set(record.id),
            email: Set(record.email.clone()),
            code_digest: Set(record.code_digest.clone()),
            created_at: Set(record.created_at),
            expires_at: Set(record.expires_at),
            attempts: Set(record.attempts),
            verified: Set(record.verified),
        }
        .insert(&self.db)
        .await
        .context("create otp record")?;
        Ok(())
    }

    async fn latest_for(&self, email: &str) -> Result<Option<OtpRecord>, BackendError> {
        let model = otp_verifications::Entity::find()
            .filter(otp_verifications::Column::Email.eq(email))
            .order_by_desc(otp_verifications::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest otp record")?;
        Ok(model.map(otp_from_model))
    }

    async fn all_unverified_for(&self, email: &str) -> Result<Vec<OtpRecord>, BackendError> {
        let models = otp_verifications::Entity::find()
            .filter(otp_verifications::Column::Email.eq(email))
            .filter(otp_verifications::Column::Verified.eq(false))
            .all(&self.db)
            .await
            .context("list unverified otp records")?;
        Ok(models.into_iter().map(otp_from_model).collect())
    }

    async fn created_after(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<OtpRecord>, BackendError> {
        let models = otp_verifications::Entity::find()
            .filter(otp_verifications::Column::Email.eq(email))
            .filter(otp_verifications::Column::CreatedAt.gt(since))
            .order_by_asc(otp_verifications::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list otp records in window")?;
        Ok(models.into_iter().map(otp_from_model).collect())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, BackendError> {
        // Conditional single UPDATE: the `verified = false` filter makes
        // the false→true transition happen at most once per record even
        // under concurrent verifications. Zero rows affected means someone
        // else spent it first.
        let result = otp_verifications::Entity::update_many()
            .col_expr(otp_verifications::Column::Verified, Expr::value(true))
            .filter(otp_verifications::Column::Id.eq(id))
            .filter(otp_verifications::Column::Verified.eq(false))
            .exec(&self.db)
            .await
            .context("mark otp verified")?;
        Ok(result.rows_affected > 0)
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<(), BackendError> {
        // Single UPDATE ... SET attempts = attempts + 1, no read involved.
        otp_verifications::Entity::update_many()
            .col_expr(
                otp_verifications::Column::Attempts,
                Expr::col(otp_verifications::Column::Attempts).add(1),
            )
            .filter(otp_verifications::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("increment otp attempts")?;
        Ok(())
    }
}

fn otp_from_model(model: otp_verifications::Model) -> OtpRecord {
    OtpRecord {
        id: model.id,
        email: model.email,
        code_digest: model.code_digest,
        created_at: model.created_at,
        expires_at: model.expires_at,
        attempts: model.attempts,
        verified: model.verified,
    }
}

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BackendError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BackendError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), BackendError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            onboarding_completed: Set(user.onboarding_completed),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn mark_onboarded(&self, id: Uuid) -> Result<(), BackendError> {
        users::ActiveModel {
            id: Set(id),
            onboarding_completed: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark user onboarded")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        onboarding_completed: model.onboarding_completed,
        created_at: model.created_at,
    }
}

// ── Content repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContentRepository {
    pub db: DatabaseConnection,
}

impl ContentRepository for DbContentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, BackendError> {
        let model = contents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find content by id")?;
        Ok(model.map(content_from_model))
    }

    async fn next_episode(
        &self,
        category: &str,
        after_episode: i32,
    ) -> Result<Option<Content>, BackendError> {
        let model = contents::Entity::find()
            .filter(contents::Column::Category.eq(category))
            .filter(contents::Column::EpisodeNumber.gt(after_episode))
            .order_by_asc(contents::Column::EpisodeNumber)
            .one(&self.db)
            .await
            .context("find next episode")?;
        Ok(model.map(content_from_model))
    }

    async fn find_by_categories(
        &self,
        categories: &[String],
        limit: u64,
    ) -> Result<Vec<Content>, BackendError> {
        let models = contents::Entity::find()
            .filter(contents::Column::Category.is_in(categories.iter().cloned()))
            .order_by_desc(contents::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("find contents by categories")?;
        Ok(models.into_iter().map(content_from_model).collect())
    }

    async fn find_excluding_categories(
        &self,
        categories: &[String],
        limit: u64,
    ) -> Result<Vec<Content>, BackendError> {
        let models = contents::Entity::find()
            .filter(contents::Column::Category.is_not_in(categories.iter().cloned()))
            .order_by_desc(contents::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("find contents excluding categories")?;
        Ok(models.into_iter().map(content_from_model).collect())
    }

    async fn find_any(&self, limit: u64) -> Result<Vec<Content>, BackendError> {
        let models = contents::Entity::find()
            .order_by_desc(contents::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("find any contents")?;
        Ok(models.into_iter().map(content_from_model).collect())
    }
}

fn content_from_model(model: contents::Model) -> Content {
    Content {
        id: model.id,
        title: model.title,
        description: model.description,
        thumbnail_url: model.thumbnail_url,
        video_url: model.video_url,
        category: model.category,
        episode_number: model.episode_number,
        duration_seconds: model.duration_seconds,
        created_at: model.created_at,
    }
}

// ── User interest repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserInterestRepository {
    pub db: DatabaseConnection,
}

impl UserInterestRepository for DbUserInterestRepository {
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        interests: &[Interest],
    ) -> Result<(), BackendError> {
        let interests = interests.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    delete_interests(txn, user_id).await?;
                    insert_interests(txn, user_id, &interests).await?;
                    Ok(())
                })
            })
            .await
            .context("replace user interests")?;
        Ok(())
    }

    async fn names_for_user(&self, user_id: Uuid) -> Result<Vec<String>, BackendError> {
        let models = user_interests::Entity::find()
            .filter(user_interests::Column::UserId.eq(user_id))
            .order_by_asc(user_interests::Column::InterestName)
            .all(&self.db)
            .await
            .context("list user interests")?;
        Ok(models.into_iter().map(|m| m.interest_name).collect())
    }
}

async fn delete_interests(txn: &DatabaseTransaction, user_id: Uuid) -> Result<(), sea_orm::DbErr> {
    user_interests::Entity::delete_many()
        .filter(user_interests::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_interests(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    interests: &[Interest],
) -> Result<(), sea_orm::DbErr> {
    if interests.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = interests.iter().map(|interest| user_interests::ActiveModel {
        user_id: Set(user_id),
        interest_name: Set(interest.name().to_owned()),
        created_at: Set(now),
    });
    user_interests::Entity::insert_many(rows).exec(txn).await?;
    Ok(())
}

// ── Watch history repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbWatchHistoryRepository {
    pub db: DatabaseConnection,
}

impl WatchHistoryRepository for DbWatchHistoryRepository {
    async fn upsert(&self, progress: &WatchProgress) -> Result<(), BackendError> {
        // Feedback is deliberately left out of the conflict update so a
        // progress save never clears an earlier rating.
        let row = watch_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(progress.user_id),
            content_id: Set(progress.content_id),
            progress_percent: Set(progress.progress_percent),
            last_watched_position: Set(progress.last_watched_position),
            feedback: Set(progress.feedback.map(|f| f.name().to_owned())),
            last_watched_at: Set(progress.last_watched_at),
        };
        watch_history::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    watch_history::Column::UserId,
                    watch_history::Column::ContentId,
                ])
                .update_columns([
                    watch_history::Column::ProgressPercent,
                    watch_history::Column::LastWatchedPosition,
                    watch_history::Column::LastWatchedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("upsert watch progress")?;
        Ok(())
    }

    async fn find(
        &self,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<Option<WatchProgress>, BackendError> {
        let model = watch_history::Entity::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .filter(watch_history::Column::ContentId.eq(content_id))
            .one(&self.db)
            .await
            .context("find watch progress")?;
        Ok(model.map(progress_from_model))
    }

    async fn set_feedback(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        feedback: Feedback,
    ) -> Result<bool, BackendError> {
        let result = watch_history::Entity::update_many()
            .col_expr(
                watch_history::Column::Feedback,
                Expr::value(feedback.name()),
            )
            .filter(watch_history::Column::UserId.eq(user_id))
            .filter(watch_history::Column::ContentId.eq(content_id))
            .exec(&self.db)
            .await
            .context("set watch feedback")?;
        Ok(result.rows_affected > 0)
    }

    async fn latest_in_progress(
        &self,
        user_id: Uuid,
        below_percent: i32,
    ) -> Result<Option<(WatchProgress, Content)>, BackendError> {
        let found = watch_history::Entity::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .filter(watch_history::Column::ProgressPercent.lt(below_percent))
            .order_by_desc(watch_history::Column::LastWatchedAt)
            .find_also_related(contents::Entity)
            .one(&self.db)
            .await
            .context("find latest unfinished watch")?;
        Ok(found.and_then(|(history, content)| {
            content.map(|c| (progress_from_model(history), content_from_model(c)))
        }))
    }
}

fn progress_from_model(model: watch_history::Model) -> WatchProgress {
    WatchProgress {
        user_id: model.user_id,
        content_id: model.content_id,
        progress_percent: model.progress_percent,
        last_watched_position: model.last_watched_position,
        feedback: model.feedback.as_deref().and_then(Feedback::parse),
        last_watched_at: model.last_watched_at,
    }
}
