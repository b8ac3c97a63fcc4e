#![allow(async_fn_in_trait)]

use uuid::Uuid;

use delight_domain::catalog::{EntityKind, EntityRef, SearchSortBy};
use delight_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    Crop, CropDraft, Ingredient, Meal, MealDraft, Ranked, User, UserChanges,
};
use crate::error::WikiServiceError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WikiServiceError>;

    /// Look up a user whose username or email equals `login`.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, WikiServiceError>;

    /// Whether another user (not `except`) holds `username`.
    async fn username_taken(
        &self,
        username: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError>;

    /// Whether another user (not `except`) holds `email`.
    async fn email_taken(&self, email: &str, except: Option<Uuid>)
    -> Result<bool, WikiServiceError>;

    async fn create(&self, user: &User) -> Result<(), WikiServiceError>;

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<(), WikiServiceError>;

    /// Delete a user and, through the store's cascades, their likes.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, WikiServiceError>;

    /// Users ordered by username, optionally filtered by a substring of
    /// username or email.
    async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, WikiServiceError>;
}

/// Repository for crops.
pub trait CropRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, WikiServiceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, WikiServiceError>;

    /// Crops by name ascending.
    async fn list(&self, page: PageRequest) -> Result<Page<Crop>, WikiServiceError>;

    /// Crops whose name or description contains `keyword`, ordered by `sort`
    /// with id ascending on ties.
    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Crop>, WikiServiceError>;

    /// Most liked crops, zero-like crops included, id ascending on ties.
    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Crop>>, WikiServiceError>;

    /// Meals that use the crop as an ingredient.
    async fn meals_using(&self, crop_id: i32) -> Result<Vec<Meal>, WikiServiceError>;

    async fn create(&self, draft: &CropDraft) -> Result<Crop, WikiServiceError>;

    async fn update(&self, id: i32, draft: &CropDraft) -> Result<Crop, WikiServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError>;
}

/// Repository for meals and their ingredients.
pub trait MealRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, WikiServiceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Meal>, WikiServiceError>;

    /// Meals by name ascending.
    async fn list(&self, page: PageRequest) -> Result<Page<Meal>, WikiServiceError>;

    /// Meals whose name or description contains `keyword`, ordered by `sort`
    /// with id ascending on ties.
    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Meal>, WikiServiceError>;

    /// Most liked meals, zero-like meals included, id ascending on ties.
    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Meal>>, WikiServiceError>;

    /// Newest meals first, id descending on ties.
    async fn recent(&self, limit: u64) -> Result<Vec<Meal>, WikiServiceError>;

    async fn ingredients(&self, meal_id: i32) -> Result<Vec<Ingredient>, WikiServiceError>;

    /// Insert the meal and its ingredient rows atomically.
    async fn create(&self, draft: &MealDraft) -> Result<Meal, WikiServiceError>;

    /// Replace the meal's columns, and its ingredient set when
    /// `draft.ingredients` is `Some`, atomically.
    async fn update(&self, id: i32, draft: &MealDraft) -> Result<Meal, WikiServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError>;
}

/// Repository for the user-likes-crop and user-likes-meal relations.
pub trait LikeRepository: Send + Sync {
    /// Flip the like state of the (user, target) pair in one transaction.
    /// Returns `true` if the pair is liked afterwards.
    async fn toggle(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError>;

    async fn count(&self, target: EntityRef) -> Result<u64, WikiServiceError>;

    async fn is_liked(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError>;

    /// Whether any like row of this kind exists.
    async fn any(&self, kind: EntityKind) -> Result<bool, WikiServiceError>;

    /// Crops the user likes, most recently liked first.
    async fn liked_crops(&self, user_id: Uuid) -> Result<Vec<Crop>, WikiServiceError>;

    /// Meals the user likes, most recently liked first.
    async fn liked_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, WikiServiceError>;
}
