//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults; partial files are fine).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMSMITH_DEBUG` | `debug` |
//! | `FORMSMITH_LOG_LEVEL` | `log_level` |
//! | `FORMSMITH_SUBMIT_URL` | `submit_url` |
//! | `FORMSMITH_NOTIFICATION_DURATION_MS` | `notification_duration_ms` |
//! | `FORMSMITH_REQUEST_TIMEOUT_SECS` | `request_timeout_secs` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formsmith_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("formsmith.toml").unwrap();
//! settings.validate().unwrap();
//! ```

use std::path::Path;

use crate::error::FormsmithError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormsmithError> {
    // Go through serde_json so partial documents merge onto the defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormsmithError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_onto_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormsmithError> {
    let content = read_config_file(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormsmithError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormsmithError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormsmithError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_onto_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormsmithError> {
    let content = read_config_file(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormsmithError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Numeric variables that fail to parse are ignored and logged.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMSMITH_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMSMITH_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMSMITH_SUBMIT_URL") {
        settings.submit_url = val;
    }

    if let Ok(val) = std::env::var("FORMSMITH_NOTIFICATION_DURATION_MS") {
        match val.parse::<u64>() {
            Ok(ms) => settings.notification_duration_ms = ms,
            Err(_) => tracing::warn!(value = %val, "ignoring FORMSMITH_NOTIFICATION_DURATION_MS"),
        }
    }

    if let Ok(val) = std::env::var("FORMSMITH_REQUEST_TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(secs) => settings.request_timeout_secs = Some(secs),
            Err(_) => tracing::warn!(value = %val, "ignoring FORMSMITH_REQUEST_TIMEOUT_SECS"),
        }
    }
}

fn read_config_file(path: &Path, format: &str) -> Result<String, FormsmithError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormsmithError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_onto_defaults(value: serde_json::Value, format: &str) -> Result<Settings, FormsmithError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormsmithError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormsmithError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

// ============================================================
// Helpers
// ============================================================

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
