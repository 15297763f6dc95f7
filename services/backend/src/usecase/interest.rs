use uuid::Uuid;

use skillstream_domain::interest::Interest;

use crate::domain::repository::{UserInterestRepository, UserRepository};
use crate::error::BackendError;

/// The full catalog of selectable interests. Pure; no storage involved.
pub fn list_interests() -> &'static [Interest] {
    &Interest::ALL
}

/// Replace a user's interest selections and complete onboarding on the
/// first save.
pub struct SaveInterestsUseCase<I, U>
where
    I: UserInterestRepository,
    U: UserRepository,
{
    pub interests: I,
    pub users: U,
}

impl<I, U> SaveInterestsUseCase<I, U>
where
    I: UserInterestRepository,
    U: UserRepository,
{
    pub async fn execute(&self, user_id: Uuid, names: &[String]) -> Result<(), BackendError> {
        if names.is_empty() {
            return Err(BackendError::MissingData);
        }

        let mut selected = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();
        for name in names {
            match Interest::parse(name) {
                Some(interest) => selected.push(interest),
                None => unknown.push(name.as_str()),
            }
        }
        if !unknown.is_empty() {
            return Err(BackendError::InvalidInterests(unknown.join(", ")));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(BackendError::UserNotFound)?;

        self.interests.replace_for_user(user_id, &selected).await?;

        if !user.onboarding_completed {
            self.users.mark_onboarded(user_id).await?;
        }
        Ok(())
    }
}

pub struct ListUserInterestsUseCase<I: UserInterestRepository> {
    pub interests: I,
}

impl<I: UserInterestRepository> ListUserInterestsUseCase<I> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<String>, BackendError> {
        self.interests.names_for_user(user_id).await
    }
}
