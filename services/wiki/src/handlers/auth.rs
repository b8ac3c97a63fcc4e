use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use delight_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use delight_auth_types::identity::Session;

use crate::error::WikiServiceError;
use crate::handlers::view::UserView;
use crate::state::AppState;
use crate::usecase::account::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(default)]
    pub agree_terms: bool,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), WikiServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
            password_confirmation: body.password2,
            agree_terms: body.agree_terms,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserView,
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, WikiServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.session_key.secret(),
    };
    let remember = body.remember_me;
    let out = usecase
        .execute(LoginInput {
            login: body.login,
            password: body.password,
            remember_me: remember,
        })
        .await?;

    let jar = set_session_cookie(jar, out.token, &state.cookies, remember);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(LoginResponse {
            user: out.user.into(),
            expires_at: out.exp,
        }),
    ))
}

// ── DELETE /auth/token ───────────────────────────────────────────────────────

pub async fn logout(
    session: Option<Session>,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WikiServiceError> {
    let usecase = LogoutUseCase {
        users: state.user_repo(),
    };
    usecase.execute(session.map(|s| s.user_id)).await?;
    let jar = clear_session_cookie(jar, &state.cookies);
    Ok((StatusCode::NO_CONTENT, jar))
}
