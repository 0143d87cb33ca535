//! HTTP wrapper for the SheetForge API with consistent timeouts, retry, and
//! error handling. Feature clients use these helpers to avoid duplicating
//! request setup and to keep the timeout policy in one place. The wrapper does
//! not store secrets; it attaches the bearer and CSRF headers callers provide,
//! falling back to the persisted session mirror for the bearer.

use super::{browser, config::AppConfig, errors::AppError, storage};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::to_string;

/// Deadline for the CSRF token prefetch; login must not stall behind it.
pub const CSRF_TIMEOUT_MS: u32 = 3_000;
/// Deadline for the route guard's background session probe.
pub const GUARD_PROBE_TIMEOUT_MS: u32 = 5_000;
/// Deadline for checkout session creation at the payment provider.
pub const CHECKOUT_TIMEOUT_MS: u32 = 30_000;
/// Deadline for reference workbook uploads.
pub const UPLOAD_TIMEOUT_MS: u32 = 60_000;
/// Default deadline; sized for generation calls that wait on inference.
pub const DEFAULT_TIMEOUT_MS: u32 = 240_000;

/// Total attempts per request. One retry absorbs transient transport drops
/// and the 401 window right after a token rotation.
const MAX_ATTEMPTS: u32 = 2;
/// Pause before the retry attempt.
const RETRY_DELAY_MS: u32 = 500;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Raw outcome of a request that reached the server. Status 0 models a
/// network-origin failure some transports report instead of raising.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_str(&self.body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Server-supplied `error` field when the body is JSON, otherwise the
    /// sanitized body itself.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|field| field.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| sanitize_body(&self.body))
    }

    pub fn into_http_error(self) -> AppError {
        AppError::Http {
            status: self.status,
            message: self.error_message(),
        }
    }
}

/// Per-request knobs. `Default` gives the standard decorated request:
/// bearer from the session mirror, no CSRF header, default timeout.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub bearer: Option<String>,
    pub csrf_token: Option<String>,
    pub timeout_ms: Option<u32>,
    pub query_token_fallback: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn csrf(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, milliseconds: u32) -> Self {
        self.timeout_ms = Some(milliseconds);
        self
    }

    /// Duplicates the bearer into the query string on WebKit browsers, which
    /// drop the Authorization header on some cross-site session calls.
    pub fn with_query_token_fallback(mut self) -> Self {
        self.query_token_fallback = true;
        self
    }

    fn resolved_bearer(&self) -> Option<String> {
        self.bearer
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(fallback_bearer)
    }

    fn effective_timeout(&self) -> u32 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }
}

/// Sends a request against the configured API base with the bounded retry
/// policy: at most one retry, never after a timeout.
pub async fn send(
    path: &str,
    method: Method,
    body: Option<String>,
    options: &RequestOptions,
) -> Result<ApiResponse, AppError> {
    let url = request_url(path, options);
    send_with_retry(|attempt| {
        let url = url.clone();
        let body = body.clone();
        let options = options.clone();
        async move {
            if attempt > 1 {
                log::debug!("retrying request to {url} (attempt {attempt})");
            }
            send_once(&url, method, body.as_deref(), &options).await
        }
    })
    .await
}

/// Fetches JSON; non-2xx statuses surface as `AppError::Http`.
pub async fn get_json<T: DeserializeOwned>(
    path: &str,
    options: &RequestOptions,
) -> Result<T, AppError> {
    let response = send(path, Method::Get, None, options).await?;
    decode(response)
}

/// Posts JSON and parses a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    options: &RequestOptions,
) -> Result<T, AppError> {
    let payload = encode(body)?;
    let response = send(path, Method::Post, Some(payload), options).await?;
    decode(response)
}

/// Posts JSON and expects any 2xx; the response body is ignored.
pub async fn post_for_status<B: Serialize>(
    path: &str,
    body: &B,
    options: &RequestOptions,
) -> Result<(), AppError> {
    let payload = encode(body)?;
    let response = send(path, Method::Post, Some(payload), options).await?;
    ensure_ok(response)
}

/// Posts an empty body, used to clear a session.
pub async fn post_empty(path: &str, options: &RequestOptions) -> Result<(), AppError> {
    let response = send(path, Method::Post, None, options).await?;
    ensure_ok(response)
}

/// Deletes a resource and expects any 2xx.
pub async fn delete_for_status(path: &str, options: &RequestOptions) -> Result<(), AppError> {
    let response = send(path, Method::Delete, None, options).await?;
    ensure_ok(response)
}

/// Multipart upload of a reference workbook. The browser supplies the
/// content type and boundary; setting them by hand breaks the form parse.
#[cfg(target_arch = "wasm32")]
pub async fn upload<T: DeserializeOwned>(
    path: &str,
    file: &browser::FileHandle,
    file_field: &str,
    fields: &[(String, String)],
    options: &RequestOptions,
) -> Result<T, AppError> {
    use gloo_net::http::Request;
    use gloo_timers::callback::Timeout;
    use web_sys::{AbortController, FormData, RequestCredentials};

    let url = request_url(path, options);
    let form = FormData::new()
        .map_err(|_| AppError::Serialization("Failed to build upload form.".to_string()))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|_| AppError::Serialization("Failed to build upload form.".to_string()))?;
    }
    form.append_with_blob(file_field, file)
        .map_err(|_| AppError::Serialization("Failed to attach the file.".to_string()))?;

    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let timeout_ms = options.timeout_ms.unwrap_or(UPLOAD_TIMEOUT_MS);
    let _timeout = Timeout::new(timeout_ms, move || timeout_controller.abort());

    let mut builder = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .abort_signal(Some(&signal))
        .header("Accept", "application/json")
        .header("Cache-Control", "no-cache");
    if let Some(token) = options.resolved_bearer() {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }

    let request = builder
        .body(form)
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;
    let response = request.send().await.map_err(|err| {
        let mapped = map_request_error(err);
        if mapped.is_timeout() {
            AppError::Timeout("The upload timed out. Try a smaller file.".to_string())
        } else {
            mapped
        }
    })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    decode(ApiResponse { status, body })
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn upload<T: DeserializeOwned>(
    _path: &str,
    _file: &browser::FileHandle,
    _file_field: &str,
    _fields: &[(String, String)],
    _options: &RequestOptions,
) -> Result<T, AppError> {
    Err(AppError::Config(
        "Uploads are only available in the browser.".to_string(),
    ))
}

/// Bounded retry loop. The first retryable outcome triggers exactly one
/// follow-up attempt after a short pause; everything else returns as-is.
async fn send_with_retry<F, Fut>(mut attempt: F) -> Result<ApiResponse, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<ApiResponse, AppError>>,
{
    let mut outcome = attempt(1).await;
    for attempt_number in 2..=MAX_ATTEMPTS {
        if !should_retry(&outcome) {
            break;
        }
        retry_delay().await;
        outcome = attempt(attempt_number).await;
    }
    outcome
}

/// Retried once: auth rejections (401/403/405), status 0, and non-timeout
/// transport errors. Timeouts are final.
fn should_retry(outcome: &Result<ApiResponse, AppError>) -> bool {
    match outcome {
        Ok(response) => matches!(response.status, 0 | 401 | 403 | 405),
        Err(AppError::Network(_)) => true,
        Err(_) => false,
    }
}

async fn retry_delay() {
    browser::sleep_ms(RETRY_DELAY_MS).await;
}

#[cfg(target_arch = "wasm32")]
async fn send_once(
    url: &str,
    method: Method,
    body: Option<&str>,
    options: &RequestOptions,
) -> Result<ApiResponse, AppError> {
    use gloo_net::http::Request;
    use gloo_timers::callback::Timeout;
    use web_sys::{AbortController, RequestCredentials};

    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(options.effective_timeout(), move || {
        timeout_controller.abort();
    });

    let mut builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Delete => Request::delete(url),
    }
    .credentials(RequestCredentials::Include)
    .abort_signal(Some(&signal))
    .header("Accept", "application/json")
    .header("Cache-Control", "no-cache");

    if let Some(token) = options.resolved_bearer() {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    if let Some(csrf) = &options.csrf_token {
        builder = builder.header("X-CSRF-Token", csrf);
    }

    let request = match body {
        Some(payload) => builder
            .header("Content-Type", "application/json")
            .body(payload.to_string()),
        None => builder.build(),
    }
    .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

    let response = request.send().await.map_err(map_request_error)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(ApiResponse { status, body })
}

#[cfg(not(target_arch = "wasm32"))]
async fn send_once(
    _url: &str,
    _method: Method,
    _body: Option<&str>,
    _options: &RequestOptions,
) -> Result<ApiResponse, AppError> {
    Err(AppError::Config(
        "The HTTP client is only available in the browser.".to_string(),
    ))
}

/// Maps transport errors into `AppError` variants with timeout detection.
#[cfg(target_arch = "wasm32")]
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Absolute URL for an API endpoint, for plain anchors such as the
/// provider sign-in links.
pub fn endpoint_url(path: &str) -> String {
    let config = AppConfig::load();
    build_url_with_base(&config.api_base_url, &api_path(path))
}

fn request_url(path: &str, options: &RequestOptions) -> String {
    let config = AppConfig::load();
    let mut url = build_url_with_base(&config.api_base_url, &api_path(path));
    if options.query_token_fallback
        && browser::user_agent().is_some_and(|agent| needs_query_token(&agent))
    {
        if let Some(token) = options.resolved_bearer() {
            url = append_token_query(&url, &token);
        }
    }
    url
}

/// Prefixes `api/` unless the path already carries it.
fn api_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed == "api" || trimmed.starts_with("api/") {
        trimmed.to_string()
    } else {
        format!("api/{trimmed}")
    }
}

/// Builds a URL from a base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// True on WebKit engines: desktop Safari, and every iOS browser regardless
/// of brand. Chromium and Gecko report "Safari" too, so they are excluded
/// by their own tokens.
fn needs_query_token(user_agent: &str) -> bool {
    let ios_device = user_agent.contains("iPhone")
        || user_agent.contains("iPad")
        || user_agent.contains("iPod");
    let desktop_safari = user_agent.contains("Safari")
        && !user_agent.contains("Chrome")
        && !user_agent.contains("Chromium")
        && !user_agent.contains("CriOS")
        && !user_agent.contains("FxiOS")
        && !user_agent.contains("Android");
    ios_device || desktop_safari
}

fn append_token_query(url: &str, token: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}token={encoded}")
}

/// Bearer fallback from the persisted session mirror, read as loose JSON so
/// this layer stays independent of the session schema.
fn fallback_bearer() -> Option<String> {
    let raw = storage::get_item(storage::SESSION_KEY)?;
    let mirror: serde_json::Value = serde_json::from_str(&raw).ok()?;
    let token = mirror.get("token")?.as_str()?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, AppError> {
    to_string(body).map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, AppError> {
    if response.ok() {
        response.json()
    } else {
        Err(response.into_http_error())
    }
}

fn ensure_ok(response: ApiResponse) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        Err(response.into_http_error())
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::{
        ApiResponse, RequestOptions, api_path, append_token_query, build_url_with_base,
        needs_query_token, sanitize_body, send_with_retry, should_retry,
    };
    use crate::app_lib::errors::AppError;
    use crate::app_lib::storage;

    fn response(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn auth_rejection_gets_exactly_one_retry() {
        let calls = Cell::new(0u32);
        let outcome = block_on(send_with_retry(|_attempt| {
            calls.set(calls.get() + 1);
            async { Ok(response(401)) }
        }));

        assert_eq!(calls.get(), 2);
        assert_eq!(outcome.map(|r| r.status).ok(), Some(401));
    }

    #[test]
    fn success_is_not_retried() {
        let calls = Cell::new(0u32);
        let outcome = block_on(send_with_retry(|_attempt| {
            calls.set(calls.get() + 1);
            async { Ok(response(200)) }
        }));

        assert_eq!(calls.get(), 1);
        assert!(outcome.is_ok());
    }

    #[test]
    fn timeout_is_never_retried() {
        let calls = Cell::new(0u32);
        let outcome = block_on(send_with_retry(|_attempt| {
            calls.set(calls.get() + 1);
            async { Err(AppError::Timeout("deadline".to_string())) }
        }));

        assert_eq!(calls.get(), 1);
        assert!(matches!(outcome, Err(AppError::Timeout(_))));
    }

    #[test]
    fn transport_error_is_retried_then_surfaced() {
        let calls = Cell::new(0u32);
        let outcome = block_on(send_with_retry(|_attempt| {
            calls.set(calls.get() + 1);
            async { Err(AppError::Network("connection reset".to_string())) }
        }));

        assert_eq!(calls.get(), 2);
        assert!(matches!(outcome, Err(AppError::Network(_))));
    }

    #[test]
    fn second_attempt_can_recover() {
        let calls = Cell::new(0u32);
        let outcome = block_on(send_with_retry(|attempt| {
            calls.set(calls.get() + 1);
            let status = if attempt == 1 { 401 } else { 200 };
            async move { Ok(response(status)) }
        }));

        assert_eq!(calls.get(), 2);
        assert_eq!(outcome.map(|r| r.status).ok(), Some(200));
    }

    #[test]
    fn retry_policy_covers_the_documented_statuses() {
        for status in [0u16, 401, 403, 405] {
            assert!(should_retry(&Ok(response(status))), "status {status}");
        }
        for status in [200u16, 201, 204, 400, 404, 409, 422, 500, 503] {
            assert!(!should_retry(&Ok(response(status))), "status {status}");
        }
        assert!(should_retry(&Err(AppError::Network("drop".to_string()))));
        assert!(!should_retry(&Err(AppError::Timeout("late".to_string()))));
        assert!(!should_retry(&Err(AppError::Parse("bad".to_string()))));
    }

    #[test]
    fn api_prefix_is_added_once() {
        assert_eq!(api_path("login"), "api/login");
        assert_eq!(api_path("/login"), "api/login");
        assert_eq!(api_path("api/login"), "api/login");
        assert_eq!(api_path("/api/login"), "api/login");
        assert_eq!(api_path("apiary/hives"), "api/apiary/hives");
    }

    #[test]
    fn build_url_with_base_joins_slashes() {
        assert_eq!(
            build_url_with_base("https://api.sheetforge.app/", "/api/auth/login"),
            "https://api.sheetforge.app/api/auth/login"
        );
        assert_eq!(
            build_url_with_base("https://api.sheetforge.app", "api/auth/login"),
            "https://api.sheetforge.app/api/auth/login"
        );
        assert_eq!(build_url_with_base("", "api/auth/login"), "api/auth/login");
    }

    #[test]
    fn append_token_query_handles_existing_query_strings() {
        assert_eq!(
            append_token_query("https://a.example/verify", "abc"),
            "https://a.example/verify?token=abc"
        );
        assert_eq!(
            append_token_query("https://a.example/verify?x=1", "abc"),
            "https://a.example/verify?x=1&token=abc"
        );
    }

    #[test]
    fn append_token_query_escapes_reserved_characters() {
        let url = append_token_query("https://a.example/verify", "a+b/c=");
        assert_eq!(url, "https://a.example/verify?token=a%2Bb%2Fc%3D");
    }

    #[test]
    fn webkit_detection_targets_safari_and_ios_only() {
        let desktop_safari = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";
        let mac_chrome = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
             AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
        let iphone_safari = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";
        let iphone_chrome = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/124.0 Mobile/15E148 Safari/604.1";
        let android_chrome = "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/124.0 Mobile Safari/537.36";
        let linux_firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0";

        assert!(needs_query_token(desktop_safari));
        assert!(needs_query_token(iphone_safari));
        assert!(needs_query_token(iphone_chrome));
        assert!(!needs_query_token(mac_chrome));
        assert!(!needs_query_token(android_chrome));
        assert!(!needs_query_token(linux_firefox));
    }

    #[test]
    fn error_message_prefers_the_server_error_field() {
        let json = ApiResponse {
            status: 400,
            body: r#"{"error":"That plan does not exist"}"#.to_string(),
        };
        assert_eq!(json.error_message(), "That plan does not exist");

        let plain = ApiResponse {
            status: 502,
            body: "  upstream exploded  ".to_string(),
        };
        assert_eq!(plain.error_message(), "upstream exploded");

        let empty = ApiResponse {
            status: 500,
            body: String::new(),
        };
        assert_eq!(empty.error_message(), "Request failed.");
    }

    #[test]
    fn sanitize_body_truncates_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).chars().count(), 200);
    }

    #[test]
    fn bearer_falls_back_to_the_session_mirror() {
        storage::set_item(storage::SESSION_KEY, r#"{"token":"mirror-token"}"#);
        let options = RequestOptions::new();
        assert_eq!(options.resolved_bearer(), Some("mirror-token".to_string()));

        let explicit = RequestOptions::new().bearer("explicit-token");
        assert_eq!(explicit.resolved_bearer(), Some("explicit-token".to_string()));
        storage::remove_item(storage::SESSION_KEY);
    }

    #[test]
    fn empty_mirror_token_yields_no_bearer() {
        storage::set_item(storage::SESSION_KEY, r#"{"token":""}"#);
        assert_eq!(RequestOptions::new().resolved_bearer(), None);
        storage::remove_item(storage::SESSION_KEY);
    }

    #[test]
    fn effective_timeout_defaults_to_the_generic_deadline() {
        assert_eq!(
            RequestOptions::new().effective_timeout(),
            super::DEFAULT_TIMEOUT_MS
        );
        assert_eq!(
            RequestOptions::new().timeout(super::CSRF_TIMEOUT_MS).effective_timeout(),
            3_000
        );
    }
}
