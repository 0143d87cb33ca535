//! Browser interop kept behind one seam. Everything here has a native
//! fallback so the rest of the crate compiles and tests on the host target;
//! the fallbacks return empty values and never panic.

#[cfg(target_arch = "wasm32")]
pub use web_sys::File as FileHandle;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileHandle;

#[cfg(target_arch = "wasm32")]
pub fn user_agent() -> Option<String> {
    let agent = web_sys::window()?.navigator().user_agent().ok()?;
    if agent.is_empty() { None } else { Some(agent) }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn user_agent() -> Option<String> {
    None
}

/// Async pause. The native form returns immediately; it exists so callers
/// compile and test on the host target.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(milliseconds: u32) {
    gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(milliseconds))).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(_milliseconds: u32) {}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Fragment part of the current URL without the leading `#`.
#[cfg(target_arch = "wasm32")]
pub fn location_fragment() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| hash.trim_start_matches('#').to_string())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn location_fragment() -> String {
    String::new()
}

/// Scheme plus host of the current page, without a trailing slash.
#[cfg(target_arch = "wasm32")]
pub fn location_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn location_origin() -> String {
    String::new()
}

/// Query part of the current URL without the leading `?`.
#[cfg(target_arch = "wasm32")]
pub fn location_query() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .map(|search| search.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn location_query() -> String {
    String::new()
}

/// Rewrites the address bar to `path`, dropping any token-bearing fragment or
/// query from session history.
#[cfg(target_arch = "wasm32")]
pub fn strip_url_credentials(path: &str) {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        if history
            .replace_state_with_url(&JsValue::NULL, "", Some(path))
            .is_err()
        {
            log::warn!("could not clear credentials from the address bar");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn strip_url_credentials(_path: &str) {}

/// Full-page navigation, used for external destinations such as Stripe
/// checkout where the SPA router must not intercept.
#[cfg(target_arch = "wasm32")]
pub fn navigate_external(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            log::error!("navigation to external URL failed");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_external(_url: &str) {}

/// One step back in session history.
#[cfg(target_arch = "wasm32")]
pub fn history_back() {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.back();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn history_back() {}

/// First file selected in the `<input type="file">` that fired `event`.
#[cfg(target_arch = "wasm32")]
pub fn selected_file(event: &leptos::ev::Event) -> Option<FileHandle> {
    use wasm_bindgen::JsCast;

    let input = event
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    input.files()?.get(0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn selected_file(_event: &leptos::ev::Event) -> Option<FileHandle> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn file_name(file: &FileHandle) -> String {
    file.name()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn file_name(_file: &FileHandle) -> String {
    String::new()
}

/// Whether the OS-level color scheme prefers dark.
#[cfg(target_arch = "wasm32")]
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_dark_scheme() -> bool {
    false
}

/// Sets `data-theme` on the document root.
#[cfg(target_arch = "wasm32")]
pub fn apply_document_theme(theme: &str) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    if let Some(root) = root {
        if root.set_attribute("data-theme", theme).is_err() {
            log::warn!("could not apply document theme");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn apply_document_theme(_theme: &str) {}
