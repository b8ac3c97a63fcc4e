use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use delight_auth_types::password::hash_password;
use delight_domain::catalog::{EntityKind, EntityRef, SearchSortBy};
use delight_domain::pagination::{Page, PageRequest};
use delight_domain::user::UserRole;

use delight_wiki::domain::repository::{
    CropRepository, LikeRepository, MealRepository, UserRepository,
};
use delight_wiki::domain::types::{
    Crop, CropDraft, Ingredient, Meal, MealDraft, Ranked, User, UserChanges,
};
use delight_wiki::error::WikiServiceError;

pub const TEST_PASSWORD: &str = "harvest123";

// ── MockStore ────────────────────────────────────────────────────────────────

/// Shared in-memory tables behind the mock repositories.
#[derive(Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub crops: Vec<Crop>,
    pub meals: Vec<Meal>,
    /// (meal_id, crop_id, quantity)
    pub ingredients: Vec<(i32, i32, i32)>,
    /// (user_id, target), in like order.
    pub likes: Vec<(Uuid, EntityRef)>,
}

#[derive(Clone, Default)]
pub struct MockStore {
    pub data: Arc<Mutex<StoreData>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo {
            store: self.clone(),
        }
    }

    pub fn crops(&self) -> MockCropRepo {
        MockCropRepo {
            store: self.clone(),
        }
    }

    pub fn meals(&self) -> MockMealRepo {
        MockMealRepo {
            store: self.clone(),
        }
    }

    pub fn likes(&self) -> MockLikeRepo {
        MockLikeRepo {
            store: self.clone(),
        }
    }

    pub fn add_user(&self, username: &str, role: UserRole) -> User {
        let user = User {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
            created_at: Utc::now(),
        };
        self.data.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_crop(&self, name: &str, hunger_points: i32) -> Crop {
        let mut data = self.data.lock().unwrap();
        let crop = Crop {
            id: data.crops.len() as i32 + 1,
            name: name.to_owned(),
            description: Some(format!("{name} grows on farmland.")),
            image_url: None,
            hunger_points,
            created_at: Utc::now(),
        };
        data.crops.push(crop.clone());
        crop
    }

    /// Meals are created one minute apart so recency order is deterministic.
    pub fn add_meal(&self, name: &str, hunger_restored: i32) -> Meal {
        let mut data = self.data.lock().unwrap();
        let id = data.meals.len() as i32 + 1;
        let meal = Meal {
            id,
            name: name.to_owned(),
            description: Some(format!("A hearty plate of {name}.")),
            image_url: None,
            hunger_restored,
            saturation: 1.0,
            created_at: Utc::now() + Duration::minutes(i64::from(id)),
        };
        data.meals.push(meal.clone());
        meal
    }

    pub fn add_ingredient(&self, meal_id: i32, crop_id: i32, quantity: i32) {
        self.data
            .lock()
            .unwrap()
            .ingredients
            .push((meal_id, crop_id, quantity));
    }

    pub fn add_like(&self, user_id: Uuid, target: EntityRef) {
        self.data.lock().unwrap().likes.push((user_id, target));
    }

    pub fn like_count(&self, target: EntityRef) -> u64 {
        self.data
            .lock()
            .unwrap()
            .likes
            .iter()
            .filter(|(_, t)| *t == target)
            .count() as u64
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.data
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

fn matches_keyword(name: &str, description: Option<&str>, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    name.to_lowercase().contains(&keyword)
        || description.is_some_and(|d| d.to_lowercase().contains(&keyword))
}

fn paginate<T: Clone>(rows: &[T], page: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, page, rows.len() as u64)
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub store: MockStore,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WikiServiceError> {
        Ok(self.store.user(id))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn username_taken(
        &self,
        username: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id) != except))
    }

    async fn email_taken(
        &self,
        email: &str,
        except: Option<Uuid>,
    ) -> Result<bool, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except))
    }

    async fn create(&self, user: &User) -> Result<(), WikiServiceError> {
        self.store.data.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<(), WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(WikiServiceError::UserNotFound)?;
        if let Some(ref username) = changes.username {
            user.username = username.clone();
        }
        if let Some(ref email) = changes.email {
            user.email = email.clone();
        }
        if let Some(ref hash) = changes.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        data.likes.retain(|(user_id, _)| *user_id != id);
        Ok(data.users.len() != before)
    }

    async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        let mut rows: Vec<User> = data
            .users
            .iter()
            .filter(|u| query.is_none_or(|q| u.username.contains(q) || u.email.contains(q)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&rows, page))
    }
}

// ── MockCropRepo ─────────────────────────────────────────────────────────────

pub struct MockCropRepo {
    pub store: MockStore,
}

impl CropRepository for MockCropRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Crop>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.crops.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Crop>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.crops.iter().find(|c| c.name == name).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Crop>, WikiServiceError> {
        let mut rows = self.store.data.lock().unwrap().crops.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(&rows, page))
    }

    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Crop>, WikiServiceError> {
        let mut rows: Vec<Crop> = {
            let data = self.store.data.lock().unwrap();
            data.crops
                .iter()
                .filter(|c| matches_keyword(&c.name, c.description.as_deref(), keyword))
                .cloned()
                .collect()
        };
        match sort {
            SearchSortBy::Name => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
            SearchSortBy::Hunger => rows.sort_by(|a, b| {
                b.hunger_points
                    .cmp(&a.hunger_points)
                    .then(a.id.cmp(&b.id))
            }),
            SearchSortBy::Likes => {
                let store = &self.store;
                rows.sort_by(|a, b| {
                    store
                        .like_count(EntityRef::crop(b.id))
                        .cmp(&store.like_count(EntityRef::crop(a.id)))
                        .then(a.id.cmp(&b.id))
                })
            }
        }
        Ok(rows)
    }

    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Crop>>, WikiServiceError> {
        let crops = self.store.data.lock().unwrap().crops.clone();
        let mut ranked: Vec<Ranked<Crop>> = crops
            .into_iter()
            .map(|item| Ranked {
                likes_count: self.store.like_count(EntityRef::crop(item.id)),
                item,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.likes_count
                .cmp(&a.likes_count)
                .then(a.item.id.cmp(&b.item.id))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }

    async fn meals_using(&self, crop_id: i32) -> Result<Vec<Meal>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        let mut meals: Vec<Meal> = data
            .meals
            .iter()
            .filter(|m| {
                data.ingredients
                    .iter()
                    .any(|(meal_id, c, _)| *meal_id == m.id && *c == crop_id)
            })
            .cloned()
            .collect();
        meals.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(meals)
    }

    async fn create(&self, draft: &CropDraft) -> Result<Crop, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let crop = Crop {
            id: data.crops.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            hunger_points: draft.hunger_points,
            created_at: Utc::now(),
        };
        data.crops.push(crop.clone());
        Ok(crop)
    }

    async fn update(&self, id: i32, draft: &CropDraft) -> Result<Crop, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let crop = data
            .crops
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(WikiServiceError::CropNotFound)?;
        crop.name = draft.name.clone();
        crop.description = draft.description.clone();
        crop.image_url = draft.image_url.clone();
        crop.hunger_points = draft.hunger_points;
        Ok(crop.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let before = data.crops.len();
        data.crops.retain(|c| c.id != id);
        data.ingredients.retain(|(_, crop_id, _)| *crop_id != id);
        data.likes.retain(|(_, t)| *t != EntityRef::crop(id));
        Ok(data.crops.len() != before)
    }
}

// ── MockMealRepo ─────────────────────────────────────────────────────────────

pub struct MockMealRepo {
    pub store: MockStore,
}

impl MealRepository for MockMealRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.meals.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Meal>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.meals.iter().find(|m| m.name == name).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Meal>, WikiServiceError> {
        let mut rows = self.store.data.lock().unwrap().meals.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(&rows, page))
    }

    async fn search(
        &self,
        keyword: &str,
        sort: SearchSortBy,
    ) -> Result<Vec<Meal>, WikiServiceError> {
        let mut rows: Vec<Meal> = {
            let data = self.store.data.lock().unwrap();
            data.meals
                .iter()
                .filter(|m| matches_keyword(&m.name, m.description.as_deref(), keyword))
                .cloned()
                .collect()
        };
        match sort {
            SearchSortBy::Name => rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
            SearchSortBy::Hunger => rows.sort_by(|a, b| {
                b.hunger_restored
                    .cmp(&a.hunger_restored)
                    .then(a.id.cmp(&b.id))
            }),
            SearchSortBy::Likes => {
                let store = &self.store;
                rows.sort_by(|a, b| {
                    store
                        .like_count(EntityRef::meal(b.id))
                        .cmp(&store.like_count(EntityRef::meal(a.id)))
                        .then(a.id.cmp(&b.id))
                })
            }
        }
        Ok(rows)
    }

    async fn top_liked(&self, limit: u64) -> Result<Vec<Ranked<Meal>>, WikiServiceError> {
        let meals = self.store.data.lock().unwrap().meals.clone();
        let mut ranked: Vec<Ranked<Meal>> = meals
            .into_iter()
            .map(|item| Ranked {
                likes_count: self.store.like_count(EntityRef::meal(item.id)),
                item,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.likes_count
                .cmp(&a.likes_count)
                .then(a.item.id.cmp(&b.item.id))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Meal>, WikiServiceError> {
        let mut meals = self.store.data.lock().unwrap().meals.clone();
        meals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        meals.truncate(limit as usize);
        Ok(meals)
    }

    async fn ingredients(&self, meal_id: i32) -> Result<Vec<Ingredient>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        let mut ingredients: Vec<Ingredient> = data
            .ingredients
            .iter()
            .filter(|(m, _, _)| *m == meal_id)
            .filter_map(|(_, crop_id, quantity)| {
                data.crops
                    .iter()
                    .find(|c| c.id == *crop_id)
                    .map(|crop| Ingredient {
                        crop: crop.clone(),
                        quantity: *quantity,
                    })
            })
            .collect();
        ingredients.sort_by(|a, b| a.crop.name.cmp(&b.crop.name));
        Ok(ingredients)
    }

    async fn create(&self, draft: &MealDraft) -> Result<Meal, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let meal = Meal {
            id: data.meals.iter().map(|m| m.id).max().unwrap_or(0) + 1,
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            hunger_restored: draft.hunger_restored,
            saturation: draft.saturation,
            created_at: Utc::now(),
        };
        data.meals.push(meal.clone());
        for ingredient in draft.ingredients.iter().flatten() {
            data.ingredients
                .push((meal.id, ingredient.crop_id, ingredient.quantity));
        }
        Ok(meal)
    }

    async fn update(&self, id: i32, draft: &MealDraft) -> Result<Meal, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let meal = data
            .meals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(WikiServiceError::MealNotFound)?;
        meal.name = draft.name.clone();
        meal.description = draft.description.clone();
        meal.image_url = draft.image_url.clone();
        meal.hunger_restored = draft.hunger_restored;
        meal.saturation = draft.saturation;
        let updated = meal.clone();
        if let Some(ref ingredients) = draft.ingredients {
            data.ingredients.retain(|(meal_id, _, _)| *meal_id != id);
            for ingredient in ingredients {
                data.ingredients
                    .push((id, ingredient.crop_id, ingredient.quantity));
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let before = data.meals.len();
        data.meals.retain(|m| m.id != id);
        data.ingredients.retain(|(meal_id, _, _)| *meal_id != id);
        data.likes.retain(|(_, t)| *t != EntityRef::meal(id));
        Ok(data.meals.len() != before)
    }
}

// ── MockLikeRepo ─────────────────────────────────────────────────────────────

pub struct MockLikeRepo {
    pub store: MockStore,
}

impl LikeRepository for MockLikeRepo {
    async fn toggle(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError> {
        let mut data = self.store.data.lock().unwrap();
        let before = data.likes.len();
        data.likes.retain(|like| *like != (user_id, target));
        if data.likes.len() != before {
            return Ok(false);
        }
        data.likes.push((user_id, target));
        Ok(true)
    }

    async fn count(&self, target: EntityRef) -> Result<u64, WikiServiceError> {
        Ok(self.store.like_count(target))
    }

    async fn is_liked(&self, user_id: Uuid, target: EntityRef) -> Result<bool, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.likes.contains(&(user_id, target)))
    }

    async fn any(&self, kind: EntityKind) -> Result<bool, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        Ok(data.likes.iter().any(|(_, t)| t.kind == kind))
    }

    async fn liked_crops(&self, user_id: Uuid) -> Result<Vec<Crop>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        let crops: HashMap<i32, &Crop> = data.crops.iter().map(|c| (c.id, c)).collect();
        Ok(data
            .likes
            .iter()
            .rev()
            .filter(|(u, t)| *u == user_id && t.kind == EntityKind::Crop)
            .filter_map(|(_, t)| crops.get(&t.id).map(|c| (*c).clone()))
            .collect())
    }

    async fn liked_meals(&self, user_id: Uuid) -> Result<Vec<Meal>, WikiServiceError> {
        let data = self.store.data.lock().unwrap();
        let meals: HashMap<i32, &Meal> = data.meals.iter().map(|m| (m.id, m)).collect();
        Ok(data
            .likes
            .iter()
            .rev()
            .filter(|(u, t)| *u == user_id && t.kind == EntityKind::Meal)
            .filter_map(|(_, t)| meals.get(&t.id).map(|m| (*m).clone()))
            .collect())
    }
}
