use crate::foundation::error::{PreviewError, PreviewResult};

/// Option name → value mapping handed to stages before the first run.
pub type RuntimeConfig = serde_json::Map<String, serde_json::Value>;

/// Runtime option toggling preview rendering.
pub const DISPLAY_KEY: &str = "display";

/// Parse a JSON object into a [`RuntimeConfig`].
pub fn parse_runtime_config(json: &str) -> PreviewResult<RuntimeConfig> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| PreviewError::config(format!("runtime config is not valid JSON: {e}")))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(PreviewError::config(format!(
            "runtime config must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Read a boolean option. `Ok(None)` when absent, error when present with another type.
pub fn bool_option(config: &RuntimeConfig, key: &str) -> PreviewResult<Option<bool>> {
    match config.get(key) {
        None => Ok(None),
        Some(serde_json::Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(PreviewError::config(format!(
            "runtime option '{key}' must be a boolean, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/runtime.rs"]
mod tests;
