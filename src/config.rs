//! Client Configuration
//!
//! Defaults are compiled in (`TODO_API_BASE_URL` overrides the API base at
//! build time). A page may also set `window.TODO_CONFIG = { apiBaseUrl,
//! toastDurationMs }` before the wasm bundle loads.

use serde::Deserialize;
use wasm_bindgen::JsValue;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// Global consulted for runtime overrides
const CONFIG_GLOBAL: &str = "TODO_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base of the todo API, without trailing slash (e.g. `https://host/api`)
    pub api_base_url: String,
    /// How long a toast stays on screen
    pub toast_duration_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: trim_base_url(option_env!("TODO_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

/// Optional fields of `window.TODO_CONFIG`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub toast_duration_ms: Option<u32>,
}

impl Config {
    /// Defaults merged with the page's overrides, if any
    pub fn load() -> Self {
        let config = Self::default();
        match read_overrides() {
            Ok(Some(overrides)) => config.merge(overrides),
            Ok(None) => config,
            Err(e) => {
                log::warn!("Ignoring invalid window.{}: {}", CONFIG_GLOBAL, e);
                config
            }
        }
    }

    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = trim_base_url(&url);
        }
        if let Some(ms) = overrides.toast_duration_ms {
            self.toast_duration_ms = ms;
        }
        self
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_overrides() -> Result<Option<ConfigOverrides>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| format!("{:?}", e))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| e.to_string())
}
