use uuid::Uuid;

use crate::domain::repository::{ContentRepository, UserInterestRepository, WatchHistoryRepository};
use crate::domain::types::HomepageSections;
use crate::error::BackendError;

const RAIL_SIZE: u64 = 5;
const FINISHED_PERCENT: i32 = 100;

/// Assemble the three homepage sections for a user.
///
/// "Continue watching" is the newest history row still short of 100%.
/// "Recommended" draws from the user's interest categories and is empty
/// until interests exist. "Exploration" draws from everything else, or from
/// the whole catalog when no interests are set.
pub struct GetHomepageUseCase<H, I, C>
where
    H: WatchHistoryRepository,
    I: UserInterestRepository,
    C: ContentRepository,
{
    pub history: H,
    pub interests: I,
    pub contents: C,
}

impl<H, I, C> GetHomepageUseCase<H, I, C>
where
    H: WatchHistoryRepository,
    I: UserInterestRepository,
    C: ContentRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<HomepageSections, BackendError> {
        let continue_watching = self
            .history
            .latest_in_progress(user_id, FINISHED_PERCENT)
            .await?;

        let categories = self.interests.names_for_user(user_id).await?;

        let (recommended, exploration) = if categories.is_empty() {
            (vec![], self.contents.find_any(RAIL_SIZE).await?)
        } else {
            (
                self.contents.find_by_categories(&categories, RAIL_SIZE).await?,
                self.contents
                    .find_excluding_categories(&categories, RAIL_SIZE)
                    .await?,
            )
        };

        Ok(HomepageSections {
            continue_watching,
            recommended,
            exploration,
        })
    }
}
