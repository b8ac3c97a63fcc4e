use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use delight_auth_types::identity::Session;

use crate::error::WikiServiceError;
use crate::handlers::require_session;
use crate::handlers::view::{CropView, MealView, UserView};
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};

// ── GET /users/@me ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserView,
    pub liked_crops: Vec<CropView>,
    pub liked_meals: Vec<MealView>,
}

pub async fn get_me(
    session: Option<Session>,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, WikiServiceError> {
    let session = require_session(session)?;
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
        likes: state.like_repo(),
    };
    let profile = usecase.execute(session.user_id).await?;
    Ok(Json(ProfileResponse {
        user: profile.user.into(),
        liked_crops: profile.liked_crops.into_iter().map(CropView::from).collect(),
        liked_meals: profile.liked_meals.into_iter().map(MealView::from).collect(),
    }))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub async fn update_me(
    session: Option<Session>,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserView>, WikiServiceError> {
    let session = require_session(session)?;
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            session.user_id,
            UpdateProfileInput {
                username: body.username,
                email: body.email,
            },
        )
        .await?;
    Ok(Json(user.into()))
}
