use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use delight_auth_types::identity::Session;
use delight_domain::pagination::{Page, PageRequest};
use delight_domain::user::UserRole;

use crate::domain::types::{IngredientDraft, User};
use crate::error::WikiServiceError;
use crate::handlers::view::{CropView, MealView, UserView};
use crate::handlers::{parse_query, require_session};
use crate::state::AppState;
use crate::usecase::admin::{
    CreateCropInput, CreateCropUseCase, CreateMealInput, CreateMealUseCase, CreateUserInput,
    CreateUserUseCase, DeleteCropUseCase, DeleteMealUseCase, DeleteUserUseCase, ListUsersUseCase,
    RequireAdminUseCase, UpdateCropInput, UpdateCropUseCase, UpdateMealInput, UpdateMealUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

async fn admin(state: &AppState, session: Option<Session>) -> Result<User, WikiServiceError> {
    let session = require_session(session)?;
    RequireAdminUseCase {
        users: state.user_repo(),
    }
    .execute(session.user_id)
    .await
}

fn parse_catalog_id(raw: &str, not_found: WikiServiceError) -> Result<i32, WikiServiceError> {
    raw.parse().map_err(|_| not_found)
}

#[derive(Deserialize)]
pub struct IngredientRequest {
    pub crop_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl From<IngredientRequest> for IngredientDraft {
    fn from(req: IngredientRequest) -> Self {
        Self {
            crop_id: req.crop_id,
            quantity: req.quantity,
        }
    }
}

// ── POST /admin/crops ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCropRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub hunger_points: i32,
}

pub async fn create_crop(
    session: Option<Session>,
    State(state): State<AppState>,
    Json(body): Json<CreateCropRequest>,
) -> Result<(StatusCode, Json<CropView>), WikiServiceError> {
    let actor = admin(&state, session).await?;
    let usecase = CreateCropUseCase {
        crops: state.crop_repo(),
    };
    let crop = usecase
        .execute(
            &actor,
            CreateCropInput {
                name: body.name,
                description: body.description,
                image_url: body.image_url,
                hunger_points: body.hunger_points,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(crop.into())))
}

// ── PATCH /admin/crops/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCropRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_points: Option<i32>,
}

pub async fn update_crop(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCropRequest>,
) -> Result<Json<CropView>, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id = parse_catalog_id(&id, WikiServiceError::CropNotFound)?;
    let usecase = UpdateCropUseCase {
        crops: state.crop_repo(),
    };
    let crop = usecase
        .execute(
            &actor,
            id,
            UpdateCropInput {
                name: body.name,
                description: body.description,
                image_url: body.image_url,
                hunger_points: body.hunger_points,
            },
        )
        .await?;
    Ok(Json(crop.into()))
}

// ── DELETE /admin/crops/{id} ─────────────────────────────────────────────────

pub async fn delete_crop(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id = parse_catalog_id(&id, WikiServiceError::CropNotFound)?;
    let usecase = DeleteCropUseCase {
        crops: state.crop_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/meals ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub hunger_restored: i32,
    #[serde(default)]
    pub saturation: f64,
    #[serde(default)]
    pub ingredients: Vec<IngredientRequest>,
}

pub async fn create_meal(
    session: Option<Session>,
    State(state): State<AppState>,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealView>), WikiServiceError> {
    let actor = admin(&state, session).await?;
    let usecase = CreateMealUseCase {
        meals: state.meal_repo(),
        crops: state.crop_repo(),
    };
    let meal = usecase
        .execute(
            &actor,
            CreateMealInput {
                name: body.name,
                description: body.description,
                image_url: body.image_url,
                hunger_restored: body.hunger_restored,
                saturation: body.saturation,
                ingredients: body.ingredients.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(meal.into())))
}

// ── PATCH /admin/meals/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hunger_restored: Option<i32>,
    pub saturation: Option<f64>,
    pub ingredients: Option<Vec<IngredientRequest>>,
}

pub async fn update_meal(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateMealRequest>,
) -> Result<Json<MealView>, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id = parse_catalog_id(&id, WikiServiceError::MealNotFound)?;
    let usecase = UpdateMealUseCase {
        meals: state.meal_repo(),
        crops: state.crop_repo(),
    };
    let meal = usecase
        .execute(
            &actor,
            id,
            UpdateMealInput {
                name: body.name,
                description: body.description,
                image_url: body.image_url,
                hunger_restored: body.hunger_restored,
                saturation: body.saturation,
                ingredients: body
                    .ingredients
                    .map(|list| list.into_iter().map(Into::into).collect()),
            },
        )
        .await?;
    Ok(Json(meal.into()))
}

// ── DELETE /admin/meals/{id} ─────────────────────────────────────────────────

pub async fn delete_meal(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id = parse_catalog_id(&id, WikiServiceError::MealNotFound)?;
    let usecase = DeleteMealUseCase {
        meals: state.meal_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub q: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    session: Option<Session>,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Page<UserView>>, WikiServiceError> {
    admin(&state, session).await?;
    let query: UserListQuery = parse_query(raw_query)?;
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(state.items_per_page),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(query.q, page).await?;
    Ok(Json(users.map(UserView::from)))
}

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

pub async fn create_user(
    session: Option<Session>,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), WikiServiceError> {
    let actor = admin(&state, session).await?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            &actor,
            CreateUserInput {
                username: body.username,
                email: body.email,
                password: body.password,
                role: body.role,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PATCH /admin/users/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

pub async fn update_user(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id: Uuid = id.parse().map_err(|_| WikiServiceError::UserNotFound)?;
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            &actor,
            id,
            UpdateUserInput {
                username: body.username,
                email: body.email,
                password: body.password,
                role: body.role,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn delete_user(
    session: Option<Session>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WikiServiceError> {
    let actor = admin(&state, session).await?;
    let id: Uuid = id.parse().map_err(|_| WikiServiceError::UserNotFound)?;
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
