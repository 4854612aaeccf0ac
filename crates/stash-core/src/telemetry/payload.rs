//! Telemetry payload as sent by the plugin

use serde::Deserialize;
use serde_json::Value;

use super::TelemetryError;

/// Plugin version triple; components may arrive as numbers or strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginVersion {
    #[serde(default)]
    pub major: Value,
    #[serde(default)]
    pub minor: Value,
    #[serde(default)]
    pub revision: Value,
}

/// Host application version quadruple
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightroomVersion {
    #[serde(default)]
    pub major: Value,
    #[serde(default)]
    pub minor: Value,
    #[serde(default)]
    pub build: Value,
    #[serde(default)]
    pub revision: Value,
}

/// Install report attached to a manifest request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    pub plugin_version: PluginVersion,
    pub lightroom_version: LightroomVersion,
    pub arch: String,
    pub os: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub upload_count: Option<Value>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl TelemetryPayload {
    /// Parse the `data` query parameter
    ///
    /// The plugin URL-encodes the JSON before putting it in the query
    /// string, so it is decoded once more here on top of the query string
    /// decoding already done by the HTTP layer. Form encoding applies to
    /// this inner layer too, so `+` decodes to a space.
    ///
    /// # Errors
    /// Returns an error if the decoded text is not valid UTF-8 or not a
    /// valid payload.
    pub fn parse(raw: &str) -> Result<Self, TelemetryError> {
        let spaced = raw.replace('+', " ");
        let decoded =
            urlencoding::decode(&spaced).map_err(|e| TelemetryError::Encoding(e.to_string()))?;
        Ok(serde_json::from_str(&decoded)?)
    }
}

impl PluginVersion {
    /// `major.minor.revision`
    #[must_use]
    pub fn dotted(&self) -> String {
        [&self.major, &self.minor, &self.revision]
            .map(scalar_to_string)
            .join(".")
    }
}

impl LightroomVersion {
    /// `major.minor.build.revision`
    #[must_use]
    pub fn dotted(&self) -> String {
        [&self.major, &self.minor, &self.build, &self.revision]
            .map(scalar_to_string)
            .join(".")
    }
}

/// String form of a loosely typed JSON scalar
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}
