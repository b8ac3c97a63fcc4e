use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use delight_core::health::healthz;
use delight_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{
        create_crop, create_meal, create_user, delete_crop, delete_meal, delete_user, list_users,
        update_crop, update_meal, update_user,
    },
    auth::{login, logout, register},
    catalog::{get_crop, get_meal, home, list_crops, list_meals, rankings},
    health::readyz,
    like::toggle_like,
    search::search,
    user::{get_me, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Catalog
        .route("/", get(home))
        .route("/crops", get(list_crops))
        .route("/crops/{id}", get(get_crop))
        .route("/meals", get(list_meals))
        .route("/meals/{id}", get(get_meal))
        .route("/search", get(search))
        .route("/rankings", get(rankings))
        // Likes
        .route("/api/like/{kind}/{id}", post(toggle_like))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/token", post(login).delete(logout))
        // Profile
        .route("/users/@me", get(get_me).patch(update_me))
        // Admin
        .route("/admin/crops", post(create_crop))
        .route("/admin/crops/{id}", patch(update_crop).delete(delete_crop))
        .route("/admin/meals", post(create_meal))
        .route("/admin/meals/{id}", patch(update_meal).delete(delete_meal))
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", patch(update_user).delete(delete_user))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
