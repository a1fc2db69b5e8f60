//! HTTP handlers for OAuth sign-in.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::dto::{CallbackQuery, SignInQuery};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::session::{
    clear_sign_in_cookies, session_cookie, sign_in_cookie, AUTH_CALLBACK_URL_COOKIE,
    AUTH_STATE_COOKIE,
};
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{BeginSignInCommand, CompleteSignInCommand};
use crate::domain::auth::{sanitize_callback_url, OAuthProviderKind};

/// GET /api/auth/signin/{provider}
pub async fn sign_in(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<SignInQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let kind: OAuthProviderKind = provider.parse()?;
    let handler = state.begin_sign_in_handler(kind)?;

    let result = handler.handle(BeginSignInCommand {
        callback_url: query.callback_url,
    })?;

    let jar = jar
        .add(sign_in_cookie(
            AUTH_CALLBACK_URL_COOKIE,
            result.callback_url,
            state.secure_cookies,
        ))
        .add(sign_in_cookie(AUTH_STATE_COOKIE, result.state, state.secure_cookies));

    Ok((jar, Redirect::to(&result.authorization_url)))
}

/// GET /api/auth/callback/{provider}
///
/// The state and callback cookies are cleared on every outcome.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Response {
    let stored_state = jar.get(AUTH_STATE_COOKIE).map(|c| c.value().to_string());
    let destination =
        sanitize_callback_url(jar.get(AUTH_CALLBACK_URL_COOKIE).map(|c| c.value()));
    let jar = clear_sign_in_cookies(jar);

    match complete(&state, &provider, stored_state, query).await {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, state.secure_cookies));
            (jar, Redirect::to(&destination)).into_response()
        }
        Err(err) => (jar, err).into_response(),
    }
}

async fn complete(
    state: &AppState,
    provider: &str,
    stored_state: Option<String>,
    query: CallbackQuery,
) -> Result<String, ApiError> {
    let kind: OAuthProviderKind = provider.parse()?;
    let handler = state.complete_sign_in_handler(kind)?;
    let result = handler
        .handle(CompleteSignInCommand {
            stored_state,
            returned_state: query.state,
            code: query.code,
        })
        .await?;
    Ok(state.sessions.encode(&result.session)?)
}
