use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use delight_auth_types::cookie::CookieSettings;
use delight_auth_types::identity::SessionKey;

use crate::infra::db::{DbCropRepository, DbLikeRepository, DbMealRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_key: SessionKey,
    pub cookies: CookieSettings,
    pub items_per_page: u32,
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn crop_repo(&self) -> DbCropRepository {
        DbCropRepository {
            db: self.db.clone(),
        }
    }

    pub fn meal_repo(&self) -> DbMealRepository {
        DbMealRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }
}
