//! Build-time configuration for the API origin and Stripe publishable key,
//! with an optional runtime override read from `window.SHEETFORGE_CONFIG`
//! so static deployments can repoint endpoints without rebuilding.
//! Configuration values are public; do not store secrets here.

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub stripe_publishable_key: String,
    pub environment: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let api_base_url = option_env!("SHEETFORGE_API_BASE_URL")
            .or(option_env!("SHEETFORGE_API_HOST"))
            .unwrap_or("");
        let stripe_publishable_key =
            option_env!("SHEETFORGE_STRIPE_PUBLISHABLE_KEY").unwrap_or("");
        let environment = option_env!("SHEETFORGE_ENV").unwrap_or("development");

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            stripe_publishable_key: stripe_publishable_key.to_string(),
            environment: environment.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    stripe_publishable_key: Option<String>,
    environment: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.stripe_publishable_key {
        config.stripe_publishable_key = value;
    }
    if let Some(value) = runtime.environment {
        config.environment = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("SHEETFORGE_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        stripe_publishable_key: read_runtime_value(&object, "stripe_publishable_key"),
        environment: read_runtime_value(&object, "environment"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value};

    fn base_config() -> AppConfig {
        AppConfig {
            api_base_url: "https://api.default".to_string(),
            stripe_publishable_key: "pk_test_default".to_string(),
            environment: "development".to_string(),
        }
    }

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.sheetforge.app "),
            Some("https://api.sheetforge.app".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = base_config();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            stripe_publishable_key: normalize_runtime_value("  "),
            environment: normalize_runtime_value(""),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.stripe_publishable_key, "pk_test_default");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = base_config();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            stripe_publishable_key: normalize_runtime_value("pk_live_override"),
            environment: normalize_runtime_value("production"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.stripe_publishable_key, "pk_live_override");
        assert_eq!(config.environment, "production");
        assert!(config.is_production());
    }
}
