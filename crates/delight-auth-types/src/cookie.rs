//! Cookie builders for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session access token.
pub const DELIGHT_ACCESS_TOKEN: &str = "delight_access_token";

/// Session lifetime in seconds without "remember me" (1 day).
pub const SESSION_TOKEN_EXP: u64 = 86_400;

/// Session lifetime in seconds with "remember me" (30 days).
pub const REMEMBERED_TOKEN_EXP: u64 = 2_592_000;

/// Cookie attributes that depend on the deployment.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub secure: bool,
}

fn base_cookie(value: String, settings: &CookieSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((DELIGHT_ACCESS_TOKEN, value))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax);
    if let Some(domain) = &settings.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Set the session cookie on the jar.
///
/// A remembered session gets a Max-Age matching [`REMEMBERED_TOKEN_EXP`];
/// otherwise the cookie lasts for the browser session.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use delight_auth_types::cookie::{CookieSettings, set_session_cookie, DELIGHT_ACCESS_TOKEN};
///
/// let settings = CookieSettings { domain: Some("example.com".to_string()), secure: true };
/// let jar = set_session_cookie(CookieJar::new(), "token_value".to_string(), &settings, true);
/// let cookie = jar.get(DELIGHT_ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(2_592_000)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    value: String,
    settings: &CookieSettings,
    remember: bool,
) -> CookieJar {
    let mut cookie = base_cookie(value, settings);
    if remember {
        cookie.set_max_age(Duration::seconds(REMEMBERED_TOKEN_EXP as i64));
    }
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use delight_auth_types::cookie::{
///     CookieSettings, clear_session_cookie, set_session_cookie, DELIGHT_ACCESS_TOKEN,
/// };
///
/// let settings = CookieSettings::default();
/// let jar = set_session_cookie(CookieJar::new(), "a".to_string(), &settings, false);
/// let jar = clear_session_cookie(jar, &settings);
/// let cookie = jar.get(DELIGHT_ACCESS_TOKEN).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    let mut cookie = base_cookie(String::new(), settings);
    cookie.set_max_age(Duration::ZERO);
    jar.add(cookie)
}
