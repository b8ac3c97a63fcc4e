//! Session helpers for integration tests.
//!
//! `MockSession` signs a real session token with the test secret, so requests
//! pass through the same cookie extractor as production traffic.

use axum::http::{HeaderName, HeaderValue, header};
use delight_auth_types::cookie::DELIGHT_ACCESS_TOKEN;
use delight_auth_types::token::issue_session_token;
use delight_domain::user::UserRole;
use uuid::Uuid;

/// Secret shared by test app state and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "delight-test-session-secret";

/// Configurable identity attached to test requests.
pub struct MockSession {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockSession {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn normal(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Normal)
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// `Cookie` header carrying a session token valid for one hour.
    pub fn cookie(&self) -> (HeaderName, HeaderValue) {
        let (token, _) = issue_session_token(
            self.user_id,
            self.user_role.as_u8(),
            3600,
            TEST_SESSION_SECRET,
        )
        .unwrap();
        (
            header::COOKIE,
            HeaderValue::from_str(&format!("{DELIGHT_ACCESS_TOKEN}={token}")).unwrap(),
        )
    }
}
