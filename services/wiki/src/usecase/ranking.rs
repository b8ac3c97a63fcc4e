use delight_domain::catalog::EntityKind;

use crate::domain::repository::{CropRepository, LikeRepository, MealRepository};
use crate::domain::types::{Crop, Meal, Ranked};
use crate::error::WikiServiceError;

/// Entries per list on the rankings page.
pub const RANKING_LIMIT: u64 = 10;

/// Meals shown on the home panel.
pub const HOME_PANEL_LIMIT: u64 = 3;

// ── Rankings ─────────────────────────────────────────────────────────────────

pub struct Rankings {
    pub crops: Vec<Ranked<Crop>>,
    pub meals: Vec<Ranked<Meal>>,
}

pub struct GetRankingsUseCase<C: CropRepository, M: MealRepository> {
    pub crops: C,
    pub meals: M,
}

impl<C: CropRepository, M: MealRepository> GetRankingsUseCase<C, M> {
    pub async fn execute(&self) -> Result<Rankings, WikiServiceError> {
        Ok(Rankings {
            crops: self.crops.top_liked(RANKING_LIMIT).await?,
            meals: self.meals.top_liked(RANKING_LIMIT).await?,
        })
    }
}

// ── HomePanel ────────────────────────────────────────────────────────────────

pub struct GetHomePanelUseCase<M: MealRepository, L: LikeRepository> {
    pub meals: M,
    pub likes: L,
}

impl<M: MealRepository, L: LikeRepository> GetHomePanelUseCase<M, L> {
    /// Most liked meals; the newest meals when nobody has liked a meal yet.
    pub async fn execute(&self) -> Result<Vec<Ranked<Meal>>, WikiServiceError> {
        if self.likes.any(EntityKind::Meal).await? {
            return self.meals.top_liked(HOME_PANEL_LIMIT).await;
        }
        let recent = self.meals.recent(HOME_PANEL_LIMIT).await?;
        Ok(recent
            .into_iter()
            .map(|item| Ranked {
                item,
                likes_count: 0,
            })
            .collect())
    }
}
