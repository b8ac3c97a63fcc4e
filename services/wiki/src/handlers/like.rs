use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use delight_auth_types::identity::Session;
use delight_domain::catalog::{EntityKind, EntityRef};

use crate::error::WikiServiceError;
use crate::state::AppState;
use crate::usecase::like::ToggleLikeUseCase;

#[derive(Serialize)]
pub struct ToggleLikeResponse {
    pub success: bool,
    pub likes_count: u64,
    pub is_liked: bool,
}

// ── POST /api/like/{kind}/{id} ───────────────────────────────────────────────

pub async fn toggle_like(
    session: Option<Session>,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ToggleLikeResponse>, WikiServiceError> {
    let kind: EntityKind = kind.parse().map_err(|_| WikiServiceError::MissingData)?;
    let not_found = match kind {
        EntityKind::Crop => WikiServiceError::CropNotFound,
        EntityKind::Meal => WikiServiceError::MealNotFound,
    };
    let id: i32 = id.parse().map_err(|_| not_found)?;

    let usecase = ToggleLikeUseCase {
        users: state.user_repo(),
        crops: state.crop_repo(),
        meals: state.meal_repo(),
        likes: state.like_repo(),
    };
    let out = usecase
        .execute(session.map(|s| s.user_id), EntityRef { kind, id })
        .await?;

    Ok(Json(ToggleLikeResponse {
        success: true,
        likes_count: out.likes_count,
        is_liked: out.is_liked,
    }))
}
