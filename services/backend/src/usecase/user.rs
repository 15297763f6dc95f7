use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::BackendError;

pub struct GetUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, BackendError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(BackendError::UserNotFound)
    }
}
