//! Session and OAuth cookies, and the extractor that requires a session.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::session::{Session, SESSION_TTL_DAYS};

pub const AUTH_TOKEN_COOKIE: &str = "auth-token";
pub const AUTH_STATE_COOKIE: &str = "auth-state";
pub const AUTH_CALLBACK_URL_COOKIE: &str = "auth-callback-url";

/// Lifetime of the state and callback cookies set at sign-in.
const SIGN_IN_COOKIE_MINUTES: i64 = 10;

fn cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}

pub fn sign_in_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    cookie(name, value, Duration::minutes(SIGN_IN_COOKIE_MINUTES), secure)
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    cookie(AUTH_TOKEN_COOKIE, token, Duration::days(SESSION_TTL_DAYS), secure)
}

/// Expires the state and callback cookies.
pub fn clear_sign_in_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(AUTH_STATE_COOKIE).path("/"))
        .remove(Cookie::build(AUTH_CALLBACK_URL_COOKIE).path("/"))
}

/// The signed-in user. Rejects with 401 when the `auth-token` cookie is
/// absent or does not verify.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthorized)?;
        let session = state
            .sessions
            .decode(&token)
            .map_err(|_| ApiError::Unauthorized)?;
        Ok(CurrentSession(session))
    }
}
