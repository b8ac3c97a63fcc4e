pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod like;
pub mod search;
pub mod user;
pub mod view;

use serde::de::DeserializeOwned;

use delight_auth_types::identity::Session;

use crate::error::WikiServiceError;

/// Parse a kebab-case query string; an absent query yields the defaults.
pub(crate) fn parse_query<T>(raw_query: Option<String>) -> Result<T, WikiServiceError>
where
    T: DeserializeOwned + Default,
{
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| WikiServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

pub(crate) fn require_session(session: Option<Session>) -> Result<Session, WikiServiceError> {
    session.ok_or(WikiServiceError::Unauthenticated)
}
