use uuid::Uuid;

use delight_core::tracing::audit;

use crate::domain::repository::{LikeRepository, UserRepository};
use crate::domain::types::{Crop, Meal, User, UserChanges};
use crate::domain::validate::{validate_email, validate_username};
use crate::error::WikiServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct Profile {
    pub user: User,
    pub liked_crops: Vec<Crop>,
    pub liked_meals: Vec<Meal>,
}

pub struct GetProfileUseCase<U: UserRepository, L: LikeRepository> {
    pub users: U,
    pub likes: L,
}

impl<U: UserRepository, L: LikeRepository> GetProfileUseCase<U, L> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, WikiServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(WikiServiceError::Unauthenticated)?;
        Ok(Profile {
            liked_crops: self.likes.liked_crops(user.id).await?,
            liked_meals: self.likes.liked_meals(user.id).await?,
            user,
        })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, WikiServiceError> {
        let username = input.username.map(|v| v.trim().to_owned());
        let email = input.email.map(|v| v.trim().to_owned());
        if username.is_none() && email.is_none() {
            return Err(WikiServiceError::MissingData);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(WikiServiceError::Unauthenticated)?;

        if let Some(ref username) = username {
            validate_username(username)?;
            if self.users.username_taken(username, Some(user.id)).await? {
                return Err(WikiServiceError::UsernameTaken);
            }
        }
        if let Some(ref email) = email {
            validate_email(email)?;
            if self.users.email_taken(email, Some(user.id)).await? {
                return Err(WikiServiceError::EmailTaken);
            }
        }

        let changes = UserChanges {
            username,
            email,
            ..UserChanges::default()
        };
        self.users.update(user.id, &changes).await?;

        let updated = User {
            username: changes.username.unwrap_or(user.username),
            email: changes.email.unwrap_or(user.email),
            ..user
        };
        audit(format_args!("User {} updated profile", updated.username));
        Ok(updated)
    }
}
