use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use delight_domain::catalog::{EntityKind, EntityRef, SearchSortBy};
use delight_domain::user::UserRole;

/// Wiki account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a user row. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: i32,
    pub saturation: f64,
    pub created_at: DateTime<Utc>,
}

/// Crop used by a meal.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub crop: Crop,
    pub quantity: i32,
}

/// Column values for creating or replacing a crop.
#[derive(Debug, Clone)]
pub struct CropDraft {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientDraft {
    pub crop_id: i32,
    pub quantity: i32,
}

/// Column values for creating or replacing a meal. `ingredients: None`
/// keeps the current ingredient set on update.
#[derive(Debug, Clone)]
pub struct MealDraft {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: i32,
    pub saturation: f64,
    pub ingredients: Option<Vec<IngredientDraft>>,
}

/// An entity paired with its like count.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub item: T,
    pub likes_count: u64,
}

/// Crop or meal, as merged into cross-type search results.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Crop(Crop),
    Meal(Meal),
}

impl CatalogItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Crop(_) => EntityKind::Crop,
            Self::Meal(_) => EntityKind::Meal,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Self::Crop(c) => c.id,
            Self::Meal(m) => m.id,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: self.kind(),
            id: self.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Crop(c) => &c.name,
            Self::Meal(m) => &m.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Crop(c) => c.description.as_deref(),
            Self::Meal(m) => m.description.as_deref(),
        }
    }

    /// `hunger_points` for crops, `hunger_restored` for meals.
    pub fn hunger_value(&self) -> i32 {
        match self {
            Self::Crop(c) => c.hunger_points,
            Self::Meal(m) => m.hunger_restored,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Crop(c) => c.created_at,
            Self::Meal(m) => m.created_at,
        }
    }

    fn tie_break(&self, other: &Self) -> Ordering {
        (self.kind(), self.id()).cmp(&(other.kind(), other.id()))
    }
}

/// Order merged search results by `sort`, then crops before meals, then id.
///
/// `likes` is consulted only for [`SearchSortBy::Likes`]; missing entries
/// count as zero.
pub fn sort_catalog_items(
    items: &mut [CatalogItem],
    sort: SearchSortBy,
    likes: &HashMap<EntityRef, u64>,
) {
    let likes_of = |item: &CatalogItem| likes.get(&item.entity_ref()).copied().unwrap_or(0);
    items.sort_by(|a, b| {
        let primary = match sort {
            SearchSortBy::Name => a.name().cmp(b.name()),
            SearchSortBy::Hunger => b.hunger_value().cmp(&a.hunger_value()),
            SearchSortBy::Likes => likes_of(b).cmp(&likes_of(a)),
        };
        primary.then_with(|| a.tie_break(b))
    });
}
