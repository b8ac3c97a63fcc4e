use std::collections::HashSet;

use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use delight_auth_types::password::hash_password;
use delight_core::tracing::audit;
use delight_domain::pagination::{Page, PageRequest};
use delight_domain::user::UserRole;

use crate::domain::repository::{CropRepository, MealRepository, UserRepository};
use crate::domain::types::{Crop, CropDraft, IngredientDraft, Meal, MealDraft, User, UserChanges};
use crate::domain::validate::{
    normalize_optional, validate_email, validate_hunger, validate_image_url, validate_item_name,
    validate_password, validate_saturation, validate_username,
};
use crate::error::WikiServiceError;

// ── RequireAdmin ─────────────────────────────────────────────────────────────

pub struct RequireAdminUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RequireAdminUseCase<U> {
    /// Resolve the session's user and check the role against the stored row,
    /// so a demoted admin loses access before their token expires.
    pub async fn execute(&self, user_id: Uuid) -> Result<User, WikiServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(WikiServiceError::Unauthenticated)?;
        if !user.role.is_admin() {
            return Err(WikiServiceError::Forbidden);
        }
        Ok(user)
    }
}

fn check_crop_draft(draft: &CropDraft) -> Result<(), WikiServiceError> {
    validate_item_name(&draft.name)?;
    validate_image_url(draft.image_url.as_deref())?;
    validate_hunger(draft.hunger_points)
}

fn check_meal_draft(draft: &MealDraft) -> Result<(), WikiServiceError> {
    validate_item_name(&draft.name)?;
    validate_image_url(draft.image_url.as_deref())?;
    validate_hunger(draft.hunger_restored)?;
    validate_saturation(draft.saturation)
}

/// Each crop at most once, positive quantity, crop must exist.
async fn check_ingredients<C: CropRepository>(
    crops: &C,
    ingredients: &[IngredientDraft],
) -> Result<(), WikiServiceError> {
    let mut seen = HashSet::with_capacity(ingredients.len());
    for ingredient in ingredients {
        if ingredient.quantity < 1 || !seen.insert(ingredient.crop_id) {
            return Err(WikiServiceError::InvalidValue("ingredient"));
        }
        if crops.find_by_id(ingredient.crop_id).await?.is_none() {
            return Err(WikiServiceError::InvalidValue("ingredient"));
        }
    }
    Ok(())
}

// ── CreateCrop ───────────────────────────────────────────────────────────────

pub struct CreateCropInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: i32,
}

pub struct CreateCropUseCase<C: CropRepository> {
    pub crops: C,
}

impl<C: CropRepository> CreateCropUseCase<C> {
    pub async fn execute(
        &self,
        actor: &User,
        input: CreateCropInput,
    ) -> Result<Crop, WikiServiceError> {
        let draft = CropDraft {
            name: input.name.trim().to_owned(),
            description: normalize_optional(input.description),
            image_url: normalize_optional(input.image_url),
            hunger_points: input.hunger_points,
        };
        check_crop_draft(&draft)?;
        if self.crops.find_by_name(&draft.name).await?.is_some() {
            return Err(WikiServiceError::NameTaken);
        }

        let crop = self.crops.create(&draft).await?;
        audit(format_args!(
            "Admin {} created crop {}",
            actor.username, crop.name
        ));
        Ok(crop)
    }
}

// ── UpdateCrop ───────────────────────────────────────────────────────────────

/// Absent fields keep their current value; a blank `description` or
/// `image_url` clears it.
#[derive(Default)]
pub struct UpdateCropInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: Option<i32>,
}

pub struct UpdateCropUseCase<C: CropRepository> {
    pub crops: C,
}

impl<C: CropRepository> UpdateCropUseCase<C> {
    pub async fn execute(
        &self,
        actor: &User,
        id: i32,
        input: UpdateCropInput,
    ) -> Result<Crop, WikiServiceError> {
        let current = self
            .crops
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::CropNotFound)?;

        let draft = CropDraft {
            name: input
                .name
                .map(|v| v.trim().to_owned())
                .unwrap_or(current.name),
            description: match input.description {
                Some(v) => normalize_optional(Some(v)),
                None => current.description,
            },
            image_url: match input.image_url {
                Some(v) => normalize_optional(Some(v)),
                None => current.image_url,
            },
            hunger_points: input.hunger_points.unwrap_or(current.hunger_points),
        };
        check_crop_draft(&draft)?;
        if let Some(other) = self.crops.find_by_name(&draft.name).await? {
            if other.id != id {
                return Err(WikiServiceError::NameTaken);
            }
        }

        let crop = self.crops.update(id, &draft).await?;
        audit(format_args!(
            "Admin {} updated crop {}",
            actor.username, crop.name
        ));
        Ok(crop)
    }
}

// ── DeleteCrop ───────────────────────────────────────────────────────────────

pub struct DeleteCropUseCase<C: CropRepository> {
    pub crops: C,
}

impl<C: CropRepository> DeleteCropUseCase<C> {
    pub async fn execute(&self, actor: &User, id: i32) -> Result<(), WikiServiceError> {
        let crop = self
            .crops
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::CropNotFound)?;
        if !self.crops.delete(id).await? {
            return Err(WikiServiceError::CropNotFound);
        }
        audit(format_args!(
            "Admin {} deleted crop {}",
            actor.username, crop.name
        ));
        Ok(())
    }
}

// ── CreateMeal ───────────────────────────────────────────────────────────────

pub struct CreateMealInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: i32,
    pub saturation: f64,
    pub ingredients: Vec<IngredientDraft>,
}

pub struct CreateMealUseCase<M: MealRepository, C: CropRepository> {
    pub meals: M,
    pub crops: C,
}

impl<M: MealRepository, C: CropRepository> CreateMealUseCase<M, C> {
    pub async fn execute(
        &self,
        actor: &User,
        input: CreateMealInput,
    ) -> Result<Meal, WikiServiceError> {
        let draft = MealDraft {
            name: input.name.trim().to_owned(),
            description: normalize_optional(input.description),
            image_url: normalize_optional(input.image_url),
            hunger_restored: input.hunger_restored,
            saturation: input.saturation,
            ingredients: Some(input.ingredients),
        };
        check_meal_draft(&draft)?;
        check_ingredients(&self.crops, draft.ingredients.as_deref().unwrap_or_default()).await?;
        if self.meals.find_by_name(&draft.name).await?.is_some() {
            return Err(WikiServiceError::NameTaken);
        }

        let meal = self.meals.create(&draft).await?;
        audit(format_args!(
            "Admin {} created meal {}",
            actor.username, meal.name
        ));
        Ok(meal)
    }
}

// ── UpdateMeal ───────────────────────────────────────────────────────────────

/// Absent fields keep their current value. `ingredients`, when present,
/// replaces the whole ingredient set.
#[derive(Default)]
pub struct UpdateMealInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: Option<i32>,
    pub saturation: Option<f64>,
    pub ingredients: Option<Vec<IngredientDraft>>,
}

pub struct UpdateMealUseCase<M: MealRepository, C: CropRepository> {
    pub meals: M,
    pub crops: C,
}

impl<M: MealRepository, C: CropRepository> UpdateMealUseCase<M, C> {
    pub async fn execute(
        &self,
        actor: &User,
        id: i32,
        input: UpdateMealInput,
    ) -> Result<Meal, WikiServiceError> {
        let current = self
            .meals
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::MealNotFound)?;

        let draft = MealDraft {
            name: input
                .name
                .map(|v| v.trim().to_owned())
                .unwrap_or(current.name),
            description: match input.description {
                Some(v) => normalize_optional(Some(v)),
                None => current.description,
            },
            image_url: match input.image_url {
                Some(v) => normalize_optional(Some(v)),
                None => current.image_url,
            },
            hunger_restored: input.hunger_restored.unwrap_or(current.hunger_restored),
            saturation: input.saturation.unwrap_or(current.saturation),
            ingredients: input.ingredients,
        };
        check_meal_draft(&draft)?;
        if let Some(ref ingredients) = draft.ingredients {
            check_ingredients(&self.crops, ingredients).await?;
        }
        if let Some(other) = self.meals.find_by_name(&draft.name).await? {
            if other.id != id {
                return Err(WikiServiceError::NameTaken);
            }
        }

        let meal = self.meals.update(id, &draft).await?;
        audit(format_args!(
            "Admin {} updated meal {}",
            actor.username, meal.name
        ));
        Ok(meal)
    }
}

// ── DeleteMeal ───────────────────────────────────────────────────────────────

pub struct DeleteMealUseCase<M: MealRepository> {
    pub meals: M,
}

impl<M: MealRepository> DeleteMealUseCase<M> {
    pub async fn execute(&self, actor: &User, id: i32) -> Result<(), WikiServiceError> {
        let meal = self
            .meals
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::MealNotFound)?;
        if !self.meals.delete(id).await? {
            return Err(WikiServiceError::MealNotFound);
        }
        audit(format_args!(
            "Admin {} deleted meal {}",
            actor.username, meal.name
        ));
        Ok(())
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        query: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, WikiServiceError> {
        let query = normalize_optional(query);
        self.users.list(query.as_deref(), page).await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(
        &self,
        actor: &User,
        input: CreateUserInput,
    ) -> Result<User, WikiServiceError> {
        let username = input.username.trim().to_owned();
        let email = input.email.trim().to_owned();
        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&input.password)?;

        if self.users.username_taken(&username, None).await? {
            return Err(WikiServiceError::UsernameTaken);
        }
        if self.users.email_taken(&email, None).await? {
            return Err(WikiServiceError::EmailTaken);
        }

        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash: hash_password(&input.password).context("hash password")?,
            role: input.role,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        audit(format_args!(
            "Admin {} created user {}",
            actor.username, user.username
        ));
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

/// An absent or blank `password` keeps the current hash.
#[derive(Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(
        &self,
        actor: &User,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, WikiServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::UserNotFound)?;

        let username = input.username.map(|v| v.trim().to_owned());
        let email = input.email.map(|v| v.trim().to_owned());
        let password = input.password.filter(|v| !v.is_empty());

        if let Some(ref username) = username {
            validate_username(username)?;
            if self.users.username_taken(username, Some(id)).await? {
                return Err(WikiServiceError::UsernameTaken);
            }
        }
        if let Some(ref email) = email {
            validate_email(email)?;
            if self.users.email_taken(email, Some(id)).await? {
                return Err(WikiServiceError::EmailTaken);
            }
        }
        let password_hash = match password {
            Some(password) => {
                validate_password(&password)?;
                Some(hash_password(&password).context("hash password")?)
            }
            None => None,
        };

        let changes = UserChanges {
            username,
            email,
            password_hash,
            role: input.role,
        };
        self.users.update(id, &changes).await?;

        let updated = User {
            username: changes.username.unwrap_or(user.username),
            email: changes.email.unwrap_or(user.email),
            password_hash: changes.password_hash.unwrap_or(user.password_hash),
            role: changes.role.unwrap_or(user.role),
            ..user
        };
        audit(format_args!(
            "Admin {} updated user {}",
            actor.username, updated.username
        ));
        Ok(updated)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, actor: &User, id: Uuid) -> Result<(), WikiServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::UserNotFound)?;
        if !self.users.delete(id).await? {
            return Err(WikiServiceError::UserNotFound);
        }
        audit(format_args!(
            "Admin {} deleted user {}",
            actor.username, user.username
        ));
        Ok(())
    }
}
