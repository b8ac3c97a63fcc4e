//! Session cookie extractor.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::DELIGHT_ACCESS_TOKEN;
use crate::token::validate_session_token;

/// Secret used to sign and verify session tokens. Application state exposes
/// it through [`FromRef`].
#[derive(Debug, Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Identity of the signed-in user, read from the `delight_access_token`
/// cookie.
///
/// Returns 401 if the cookie is absent or the token does not validate. Role
/// enforcement (403) is done by handlers after extraction. Use
/// `Option<Session>` for pages that also serve anonymous visitors.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub user_role: u8,
}

fn session_from_parts(parts: &Parts, key: &SessionKey) -> Option<Session> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(DELIGHT_ACCESS_TOKEN)?;
    let info = validate_session_token(token.value(), key.secret()).ok()?;
    Some(Session {
        user_id: info.user_id,
        user_role: info.user_role,
    })
}

impl<S> FromRequestParts<S> for Session
where
    SessionKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Resolve synchronously and return a 'static future; axum-core 0.5
    // declares this as `fn -> impl Future + Send`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = session_from_parts(parts, &SessionKey::from_ref(state));
        async move { session.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> OptionalFromRequestParts<S> for Session
where
    SessionKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let session = session_from_parts(parts, &SessionKey::from_ref(state));
        async move { Ok(session) }
    }
}
