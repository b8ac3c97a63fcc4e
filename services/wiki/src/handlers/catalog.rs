use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::{Deserialize, Serialize};

use delight_auth_types::identity::Session;
use delight_domain::pagination::{Page, PageRequest};

use crate::error::WikiServiceError;
use crate::handlers::parse_query;
use crate::handlers::view::{CropView, IngredientView, MealView, RankedView};
use crate::state::AppState;
use crate::usecase::catalog::{
    GetCropDetailUseCase, GetMealDetailUseCase, ListCropsUseCase, ListMealsUseCase,
};
use crate::usecase::ranking::{GetHomePanelUseCase, GetRankingsUseCase};

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl CatalogListQuery {
    fn page_request(&self, default_per_page: u32) -> PageRequest {
        PageRequest {
            per_page: self.per_page.unwrap_or(default_per_page),
            page: self.page.unwrap_or(1),
        }
    }
}

/// Catalog ids are integers; anything else names no entity.
fn parse_id(raw: &str, not_found: WikiServiceError) -> Result<i32, WikiServiceError> {
    raw.parse().map_err(|_| not_found)
}

// ── GET / ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HomeResponse {
    pub top_meals: Vec<RankedView<MealView>>,
}

pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, WikiServiceError> {
    let usecase = GetHomePanelUseCase {
        meals: state.meal_repo(),
        likes: state.like_repo(),
    };
    let top_meals = usecase.execute().await?;
    Ok(Json(HomeResponse {
        top_meals: top_meals.into_iter().map(RankedView::from).collect(),
    }))
}

// ── GET /crops ───────────────────────────────────────────────────────────────

pub async fn list_crops(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<CropView>>, WikiServiceError> {
    let query: CatalogListQuery = parse_query(raw_query)?;
    let usecase = ListCropsUseCase {
        repo: state.crop_repo(),
    };
    let page = usecase
        .execute(query.page_request(state.items_per_page))
        .await?;
    Ok(Json(page.map(CropView::from)))
}

// ── GET /meals ───────────────────────────────────────────────────────────────

pub async fn list_meals(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<MealView>>, WikiServiceError> {
    let query: CatalogListQuery = parse_query(raw_query)?;
    let usecase = ListMealsUseCase {
        repo: state.meal_repo(),
    };
    let page = usecase
        .execute(query.page_request(state.items_per_page))
        .await?;
    Ok(Json(page.map(MealView::from)))
}

// ── GET /crops/{id} ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CropDetailResponse {
    pub crop: CropView,
    pub likes_count: u64,
    pub is_liked: bool,
    pub meals: Vec<MealView>,
}

pub async fn get_crop(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CropDetailResponse>, WikiServiceError> {
    let id = parse_id(&id, WikiServiceError::CropNotFound)?;
    let usecase = GetCropDetailUseCase {
        crops: state.crop_repo(),
        likes: state.like_repo(),
    };
    let detail = usecase.execute(id, session.map(|s| s.user_id)).await?;
    Ok(Json(CropDetailResponse {
        crop: detail.crop.into(),
        likes_count: detail.likes_count,
        is_liked: detail.is_liked,
        meals: detail.meals.into_iter().map(MealView::from).collect(),
    }))
}

// ── GET /meals/{id} ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MealDetailResponse {
    pub meal: MealView,
    pub likes_count: u64,
    pub is_liked: bool,
    pub ingredients: Vec<IngredientView>,
}

pub async fn get_meal(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealDetailResponse>, WikiServiceError> {
    let id = parse_id(&id, WikiServiceError::MealNotFound)?;
    let usecase = GetMealDetailUseCase {
        meals: state.meal_repo(),
        likes: state.like_repo(),
    };
    let detail = usecase.execute(id, session.map(|s| s.user_id)).await?;
    Ok(Json(MealDetailResponse {
        meal: detail.meal.into(),
        likes_count: detail.likes_count,
        is_liked: detail.is_liked,
        ingredients: detail
            .ingredients
            .into_iter()
            .map(IngredientView::from)
            .collect(),
    }))
}

// ── GET /rankings ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RankingsResponse {
    pub crops: Vec<RankedView<CropView>>,
    pub meals: Vec<RankedView<MealView>>,
}

pub async fn rankings(
    State(state): State<AppState>,
) -> Result<Json<RankingsResponse>, WikiServiceError> {
    let usecase = GetRankingsUseCase {
        crops: state.crop_repo(),
        meals: state.meal_repo(),
    };
    let rankings = usecase.execute().await?;
    Ok(Json(RankingsResponse {
        crops: rankings.crops.into_iter().map(RankedView::from).collect(),
        meals: rankings.meals.into_iter().map(RankedView::from).collect(),
    }))
}
