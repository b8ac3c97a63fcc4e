use uuid::Uuid;

use delight_domain::catalog::EntityRef;
use delight_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{CropRepository, LikeRepository, MealRepository};
use crate::domain::types::{Crop, Ingredient, Meal};
use crate::error::WikiServiceError;

// ── ListCrops ────────────────────────────────────────────────────────────────

pub struct ListCropsUseCase<C: CropRepository> {
    pub repo: C,
}

impl<C: CropRepository> ListCropsUseCase<C> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<Crop>, WikiServiceError> {
        self.repo.list(page).await
    }
}

// ── ListMeals ────────────────────────────────────────────────────────────────

pub struct ListMealsUseCase<M: MealRepository> {
    pub repo: M,
}

impl<M: MealRepository> ListMealsUseCase<M> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<Meal>, WikiServiceError> {
        self.repo.list(page).await
    }
}

// ── GetCropDetail ────────────────────────────────────────────────────────────

pub struct CropDetail {
    pub crop: Crop,
    pub likes_count: u64,
    pub is_liked: bool,
    pub meals: Vec<Meal>,
}

pub struct GetCropDetailUseCase<C: CropRepository, L: LikeRepository> {
    pub crops: C,
    pub likes: L,
}

impl<C: CropRepository, L: LikeRepository> GetCropDetailUseCase<C, L> {
    pub async fn execute(
        &self,
        id: i32,
        viewer: Option<Uuid>,
    ) -> Result<CropDetail, WikiServiceError> {
        let crop = self
            .crops
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::CropNotFound)?;
        let target = EntityRef::crop(crop.id);
        let is_liked = match viewer {
            Some(user_id) => self.likes.is_liked(user_id, target).await?,
            None => false,
        };
        Ok(CropDetail {
            likes_count: self.likes.count(target).await?,
            is_liked,
            meals: self.crops.meals_using(crop.id).await?,
            crop,
        })
    }
}

// ── GetMealDetail ────────────────────────────────────────────────────────────

pub struct MealDetail {
    pub meal: Meal,
    pub likes_count: u64,
    pub is_liked: bool,
    pub ingredients: Vec<Ingredient>,
}

pub struct GetMealDetailUseCase<M: MealRepository, L: LikeRepository> {
    pub meals: M,
    pub likes: L,
}

impl<M: MealRepository, L: LikeRepository> GetMealDetailUseCase<M, L> {
    pub async fn execute(
        &self,
        id: i32,
        viewer: Option<Uuid>,
    ) -> Result<MealDetail, WikiServiceError> {
        let meal = self
            .meals
            .find_by_id(id)
            .await?
            .ok_or(WikiServiceError::MealNotFound)?;
        let target = EntityRef::meal(meal.id);
        let is_liked = match viewer {
            Some(user_id) => self.likes.is_liked(user_id, target).await?,
            None => false,
        };
        Ok(MealDetail {
            likes_count: self.likes.count(target).await?,
            is_liked,
            ingredients: self.meals.ingredients(meal.id).await?,
            meal,
        })
    }
}
