use uuid::Uuid;

use delight_core::tracing::audit;
use delight_domain::catalog::{EntityKind, EntityRef};

use crate::domain::repository::{CropRepository, LikeRepository, MealRepository, UserRepository};
use crate::error::WikiServiceError;

// ── ToggleLike ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLikeOutput {
    pub is_liked: bool,
    pub likes_count: u64,
}

pub struct ToggleLikeUseCase<U, C, M, L>
where
    U: UserRepository,
    C: CropRepository,
    M: MealRepository,
    L: LikeRepository,
{
    pub users: U,
    pub crops: C,
    pub meals: M,
    pub likes: L,
}

impl<U, C, M, L> ToggleLikeUseCase<U, C, M, L>
where
    U: UserRepository,
    C: CropRepository,
    M: MealRepository,
    L: LikeRepository,
{
    /// Flip the viewer's like on `target` and return the new state with the
    /// live like count.
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        target: EntityRef,
    ) -> Result<ToggleLikeOutput, WikiServiceError> {
        let user_id = viewer.ok_or(WikiServiceError::Unauthenticated)?;

        let name = match target.kind {
            EntityKind::Crop => {
                self.crops
                    .find_by_id(target.id)
                    .await?
                    .ok_or(WikiServiceError::CropNotFound)?
                    .name
            }
            EntityKind::Meal => {
                self.meals
                    .find_by_id(target.id)
                    .await?
                    .ok_or(WikiServiceError::MealNotFound)?
                    .name
            }
        };

        // The token may outlive the account.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(WikiServiceError::Unauthenticated)?;

        let is_liked = self.likes.toggle(user.id, target).await?;
        let likes_count = self.likes.count(target).await?;

        let action = if is_liked { "liked" } else { "unliked" };
        audit(format_args!(
            "User {} {action} {} {name}",
            user.username, target.kind
        ));

        Ok(ToggleLikeOutput {
            is_liked,
            likes_count,
        })
    }
}
