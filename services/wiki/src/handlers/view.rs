//! JSON views shared by several handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use delight_domain::user::UserRole;

use crate::domain::types::{CatalogItem, Crop, Ingredient, Meal, Ranked, User};

#[derive(Serialize)]
pub struct CropView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: i32,
    #[serde(serialize_with = "delight_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Crop> for CropView {
    fn from(crop: Crop) -> Self {
        Self {
            id: crop.id,
            name: crop.name,
            description: crop.description,
            image_url: crop.image_url,
            hunger_points: crop.hunger_points,
            created_at: crop.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct MealView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: i32,
    pub saturation: f64,
    #[serde(serialize_with = "delight_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Meal> for MealView {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            description: meal.description,
            image_url: meal.image_url,
            hunger_restored: meal.hunger_restored,
            saturation: meal.saturation,
            created_at: meal.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct IngredientView {
    pub crop: CropView,
    pub quantity: i32,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            crop: ingredient.crop.into(),
            quantity: ingredient.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct RankedView<T> {
    #[serde(flatten)]
    pub item: T,
    pub likes_count: u64,
}

impl<T, V: From<T>> From<Ranked<T>> for RankedView<V> {
    fn from(ranked: Ranked<T>) -> Self {
        Self {
            item: ranked.item.into(),
            likes_count: ranked.likes_count,
        }
    }
}

/// Search hit, tagged with its entity kind.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogItemView {
    Crop(CropView),
    Meal(MealView),
}

impl From<CatalogItem> for CatalogItemView {
    fn from(item: CatalogItem) -> Self {
        match item {
            CatalogItem::Crop(crop) => Self::Crop(crop.into()),
            CatalogItem::Meal(meal) => Self::Meal(meal.into()),
        }
    }
}

#[derive(Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(serialize_with = "delight_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
