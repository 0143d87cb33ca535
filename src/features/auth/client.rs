//! Client wrappers for the SheetForge auth API. These helpers centralize
//! request decoration and timeouts, keeping auth flows consistent and
//! preventing token leakage in route code.

use crate::app_lib::{
    AppError, RequestOptions, api, delete_for_status, get_json, post_empty, post_for_status,
    post_json,
};

use super::callback::Provider;
use super::types::{
    CallbackExchangeRequest, CsrfTokenResponse, DisplayNameRequest, LoginRequest,
    PasswordResetRequest, RegisterRequest, Session, SessionEntry, VerifiedUser,
};

fn authed(bearer: Option<&str>) -> RequestOptions {
    match bearer {
        Some(token) => RequestOptions::new().bearer(token),
        None => RequestOptions::new(),
    }
}

fn with_csrf(options: RequestOptions, csrf: Option<&str>) -> RequestOptions {
    match csrf {
        Some(token) => options.csrf(token),
        None => options,
    }
}

/// Signs in with email and password and returns the new session.
/// Must never log the password or the returned bearer.
pub async fn login(request: &LoginRequest, csrf: Option<&str>) -> Result<Session, AppError> {
    let options = with_csrf(RequestOptions::new(), csrf);
    post_json("login", request, &options).await
}

/// Creates an account. The server's `error` field surfaces verbatim on
/// rejection; a successful register is followed by a normal login.
pub async fn register(request: &RegisterRequest, csrf: Option<&str>) -> Result<(), AppError> {
    let options = with_csrf(RequestOptions::new(), csrf);
    post_for_status("register", request, &options).await
}

/// Clears the session on the server. Best-effort; callers log failures and
/// clear local state regardless.
pub async fn logout(bearer: Option<&str>) -> Result<(), AppError> {
    post_empty("logout", &authed(bearer)).await
}

/// Verifies the current bearer and returns the server's view of the user.
pub async fn verify_token(bearer: Option<&str>) -> Result<VerifiedUser, AppError> {
    get_json("verify-token", &authed(bearer)).await
}

/// Refreshes the session cookie. Carries the query-token fallback for
/// WebKit and an explicit deadline because the route guard races against it.
pub async fn refresh_token(
    bearer: Option<&str>,
    timeout_ms: u32,
) -> Result<VerifiedUser, AppError> {
    let options = authed(bearer)
        .timeout(timeout_ms)
        .with_query_token_fallback();
    let response = api::send(
        "refresh-token",
        api::Method::Post,
        None,
        &options,
    )
    .await?;
    if response.ok() {
        response.json()
    } else {
        Err(response.into_http_error())
    }
}

/// Exchanges a provider callback credential for a session. The raw token is
/// sent once and never retried or stored.
pub async fn exchange_callback(
    provider: Provider,
    request: &CallbackExchangeRequest,
) -> Result<Session, AppError> {
    post_json(provider.exchange_path(), request, &RequestOptions::new()).await
}

/// Fetches the CSRF token with the short deadline; callers treat failure as
/// "proceed without it".
pub async fn fetch_csrf_token() -> Result<String, AppError> {
    let options = RequestOptions::new().timeout(api::CSRF_TIMEOUT_MS);
    let response: CsrfTokenResponse = get_json("csrf-token", &options).await?;
    Ok(response.token)
}

/// Sets the display name used across the product.
pub async fn update_display_name(
    display_name: &str,
    bearer: Option<&str>,
    csrf: Option<&str>,
) -> Result<(), AppError> {
    let request = DisplayNameRequest {
        display_name: display_name.to_string(),
    };
    let options = with_csrf(authed(bearer), csrf);
    post_for_status("user/display-name", &request, &options).await
}

/// Requests a password-reset email without leaking account existence.
pub async fn request_password_reset(email: &str, csrf: Option<&str>) -> Result<(), AppError> {
    let request = PasswordResetRequest {
        email: email.to_string(),
    };
    let options = with_csrf(RequestOptions::new(), csrf);
    post_for_status("reset-password", &request, &options).await
}

/// Lists the account's active sessions for the account page.
pub async fn list_sessions(bearer: Option<&str>) -> Result<Vec<SessionEntry>, AppError> {
    get_json("user/sessions", &authed(bearer)).await
}

/// Revokes one session by id.
pub async fn revoke_session(session_id: &str, bearer: Option<&str>) -> Result<(), AppError> {
    let path = format!("user/sessions/{session_id}");
    delete_for_status(&path, &authed(bearer)).await
}
