//! Thin wrapper over `window.localStorage`. Keys are centralized here so the
//! session mirror, the logout marker, and the theme preference never drift
//! between writers. Native builds keep values in a thread-local map, which is
//! enough for unit tests since each test runs on its own thread.

/// Serialized session snapshot. Readable by the API layer for the bearer
/// fallback, owned by the auth feature.
pub const SESSION_KEY: &str = "authUser";
/// Coarse flag mirroring whether a session snapshot is present.
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";
/// Set when the user explicitly signs out; consumed once on next load.
pub const MANUAL_LOGOUT_KEY: &str = "manualLogout";
/// Dark-mode preference.
pub const THEME_KEY: &str = "sheetforge_theme";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for {key}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get(key: &str) -> Option<String> {
        STORE.with(|store| store.borrow().get(key).cloned())
    }

    pub fn set(key: &str, value: &str) {
        STORE.with(|store| {
            store.borrow_mut().insert(key.to_string(), value.to_string());
        });
    }

    pub fn remove(key: &str) {
        STORE.with(|store| {
            store.borrow_mut().remove(key);
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    native::get(key)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) {
    native::set(key, value);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_item(key: &str) {
    native::remove(key);
}

pub fn load_json<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("discarding malformed {key} payload: {err}");
            remove_item(key);
            None
        }
    }
}

pub fn save_json<T: serde::Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => set_item(key, &raw),
        Err(err) => log::warn!("could not serialize {key} payload: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{get_item, load_json, remove_item, save_json, set_item};

    #[test]
    fn set_get_remove_round_trip() {
        set_item("k", "v");
        assert_eq!(get_item("k"), Some("v".to_string()));
        remove_item("k");
        assert_eq!(get_item("k"), None);
    }

    #[test]
    fn load_json_discards_malformed_payloads() {
        set_item("broken", "{not json");
        let loaded: Option<serde_json::Value> = load_json("broken");
        assert!(loaded.is_none());
        // The corrupt entry is cleared so the next load starts clean.
        assert_eq!(get_item("broken"), None);
    }

    #[test]
    fn save_json_round_trips_values() {
        save_json("pair", &vec![1u32, 2, 3]);
        let loaded: Option<Vec<u32>> = load_json("pair");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
