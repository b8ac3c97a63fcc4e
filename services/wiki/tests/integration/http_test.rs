//! End-to-end requests through the router against SQLite.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use uuid::Uuid;

use delight_auth_types::cookie::{CookieSettings, DELIGHT_ACCESS_TOKEN};
use delight_auth_types::identity::SessionKey;
use delight_domain::user::UserRole;
use delight_testing::auth::{MockSession, TEST_SESSION_SECRET};
use delight_testing::db::memory_db;
use delight_wiki::domain::repository::{CropRepository, MealRepository, UserRepository};
use delight_wiki::domain::types::{CropDraft, IngredientDraft, MealDraft, User};
use delight_wiki::router::build_router;
use delight_wiki::state::AppState;
use delight_wiki_migration::{Migrator, MigratorTrait};

async fn setup() -> (TestServer, AppState) {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    let state = AppState {
        db,
        session_key: SessionKey::new(TEST_SESSION_SECRET),
        cookies: CookieSettings::default(),
        items_per_page: 12,
    };
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state)
}

async fn insert_user(state: &AppState, username: &str, role: UserRole) -> User {
    let user = User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_hash: "pbkdf2-sha512$00$00".to_owned(),
        role,
        created_at: chrono::Utc::now(),
    };
    state.user_repo().create(&user).await.unwrap();
    user
}

/// Rice (crop) used by Fried Rice (meal).
async fn seed_catalog(state: &AppState) -> (i32, i32) {
    let rice = state
        .crop_repo()
        .create(&CropDraft {
            name: "Rice".to_owned(),
            description: Some("A staple grain.".to_owned()),
            image_url: None,
            hunger_points: 1,
        })
        .await
        .unwrap();
    let fried = state
        .meal_repo()
        .create(&MealDraft {
            name: "Fried Rice".to_owned(),
            description: None,
            image_url: None,
            hunger_restored: 10,
            saturation: 8.0,
            ingredients: Some(vec![IngredientDraft {
                crop_id: rice.id,
                quantity: 1,
            }]),
        })
        .await
        .unwrap();
    (rice.id, fried.id)
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_health_and_readiness() {
    let (server, _) = setup().await;
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_render_catalog_views() {
    let (server, state) = setup().await;
    let (rice, fried) = seed_catalog(&state).await;

    let home: Value = server.get("/").await.json();
    assert_eq!(home["top_meals"][0]["name"], "Fried Rice");
    assert_eq!(home["top_meals"][0]["likes_count"], 0);

    let crops: Value = server.get("/crops").add_query_param("per-page", 5).await.json();
    assert_eq!(crops["total"], 1);
    assert_eq!(crops["per_page"], 5);

    let detail: Value = server.get(&format!("/crops/{rice}")).await.json();
    assert_eq!(detail["crop"]["name"], "Rice");
    assert_eq!(detail["is_liked"], false);
    assert_eq!(detail["meals"][0]["id"], fried);

    let meal: Value = server.get(&format!("/meals/{fried}")).await.json();
    assert_eq!(meal["ingredients"][0]["crop"]["id"], rice);
    assert_eq!(meal["ingredients"][0]["quantity"], 1);
}

#[tokio::test]
async fn should_return_json_404_for_missing_entities() {
    let (server, _) = setup().await;

    let response = server.get("/crops/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "CROP_NOT_FOUND");

    server
        .get("/meals/not-a-number")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_with_lenient_parameters() {
    let (server, state) = setup().await;
    seed_catalog(&state).await;

    let body: Value = server
        .get("/search")
        .add_query_param("keyword", "rice")
        .add_query_param("search-type", "everything")
        .add_query_param("sort-by", "hunger")
        .await
        .json();

    assert_eq!(body["search_type"], "all");
    assert_eq!(body["sort_by"], "hunger");
    let kinds: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["meal", "crop"]);
}

#[tokio::test]
async fn should_reject_blank_search_keyword() {
    let (server, _) = setup().await;
    let response = server.get("/search").add_query_param("keyword", "  ").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

// ── Likes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_toggle_like_for_signed_in_user() {
    let (server, state) = setup().await;
    let (rice, _) = seed_catalog(&state).await;
    let alice = insert_user(&state, "alice", UserRole::Normal).await;
    let (name, value) = MockSession::normal(alice.id).cookie();

    let liked: Value = server
        .post(&format!("/api/like/crop/{rice}"))
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(liked, json!({"success": true, "likes_count": 1, "is_liked": true}));

    let detail: Value = server
        .get(&format!("/crops/{rice}"))
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(detail["is_liked"], true);

    let unliked: Value = server
        .post(&format!("/api/like/crop/{rice}"))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(unliked, json!({"success": true, "likes_count": 0, "is_liked": false}));
}

#[tokio::test]
async fn should_require_session_to_like() {
    let (server, state) = setup().await;
    let (_, fried) = seed_catalog(&state).await;

    let response = server.post(&format!("/api/like/meal/{fried}")).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");

    // A valid token for a user that no longer exists.
    let (name, value) = MockSession::normal(Uuid::now_v7()).cookie();
    server
        .post(&format!("/api/like/meal/{fried}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_login_and_read_profile() {
    let (server, _) = setup().await;

    server
        .post("/auth/register")
        .json(&json!({
            "username": "farmer",
            "email": "farmer@example.com",
            "password": "harvest123",
            "password2": "harvest123",
            "agree_terms": true,
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let login = server
        .post("/auth/token")
        .json(&json!({"login": "farmer@example.com", "password": "harvest123"}))
        .await;
    login.assert_status(StatusCode::CREATED);
    let cookie = login.cookie(DELIGHT_ACCESS_TOKEN);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.max_age(), None);

    let token = cookie.value().to_owned();
    let me: Value = server
        .get("/users/@me")
        .add_cookie(cookie)
        .await
        .json();
    assert_eq!(me["user"]["username"], "farmer");
    assert_eq!(me["user"]["role"], "normal");
    assert_eq!(me["liked_crops"], json!([]));
    assert!(!token.is_empty());

    let logout = server.delete("/auth/token").await;
    logout.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(logout.cookie(DELIGHT_ACCESS_TOKEN).value(), "");
}

#[tokio::test]
async fn should_reject_bad_credentials() {
    let (server, _) = setup().await;
    let response = server
        .post("/auth/token")
        .json(&json!({"login": "ghost", "password": "harvest123"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_update_own_profile() {
    let (server, state) = setup().await;
    let alice = insert_user(&state, "alice", UserRole::Normal).await;
    insert_user(&state, "bob", UserRole::Normal).await;
    let (name, value) = MockSession::normal(alice.id).cookie();

    let updated: Value = server
        .patch("/users/@me")
        .add_header(name.clone(), value.clone())
        .json(&json!({"username": "alicia"}))
        .await
        .json();
    assert_eq!(updated["username"], "alicia");

    server
        .patch("/users/@me")
        .add_header(name, value)
        .json(&json!({"email": "bob@example.com"}))
        .await
        .assert_status(StatusCode::CONFLICT);
}

// ── Admin ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_guard_admin_routes_by_stored_role() {
    let (server, state) = setup().await;
    let alice = insert_user(&state, "alice", UserRole::Normal).await;

    server
        .get("/admin/users")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // The token claims admin but the stored role is normal.
    let (name, value) = MockSession::admin(alice.id).cookie();
    server
        .get("/admin/users")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_manage_catalog_as_admin() {
    let (server, state) = setup().await;
    let admin = insert_user(&state, "admin", UserRole::Admin).await;
    let (name, value) = MockSession::admin(admin.id).cookie();

    let crop: Value = server
        .post("/admin/crops")
        .add_header(name.clone(), value.clone())
        .json(&json!({"name": "Tomato", "hunger_points": 2}))
        .await
        .json();
    let tomato = crop["id"].as_i64().unwrap();

    let meal = server
        .post("/admin/meals")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "name": "Tomato Soup",
            "hunger_restored": 8,
            "saturation": 6.0,
            "ingredients": [{"crop_id": tomato, "quantity": 2}],
        }))
        .await;
    meal.assert_status(StatusCode::CREATED);
    let soup = meal.json::<Value>()["id"].as_i64().unwrap();

    server
        .post("/admin/crops")
        .add_header(name.clone(), value.clone())
        .json(&json!({"name": "Tomato", "hunger_points": 2}))
        .await
        .assert_status(StatusCode::CONFLICT);

    let patched: Value = server
        .patch(&format!("/admin/meals/{soup}"))
        .add_header(name.clone(), value.clone())
        .json(&json!({"hunger_restored": 9}))
        .await
        .json();
    assert_eq!(patched["hunger_restored"], 9);
    assert_eq!(patched["saturation"], 6.0);

    server
        .delete(&format!("/admin/crops/{tomato}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let detail: Value = server.get(&format!("/meals/{soup}")).await.json();
    assert_eq!(detail["ingredients"], json!([]));
}

#[tokio::test]
async fn should_manage_users_as_admin() {
    let (server, state) = setup().await;
    let admin = insert_user(&state, "admin", UserRole::Admin).await;
    let (name, value) = MockSession::admin(admin.id).cookie();

    let created = server
        .post("/admin/users")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "username": "helper",
            "email": "helper@example.com",
            "password": "harvest123",
            "role": "admin",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_owned();

    let listed: Value = server
        .get("/admin/users")
        .add_query_param("q", "help")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["items"][0]["role"], "admin");

    server
        .delete(&format!("/admin/users/{id}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(
        state
            .user_repo()
            .find_by_login("helper")
            .await
            .unwrap()
            .is_none()
    );
}
