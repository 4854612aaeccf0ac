//! Installation record derivation

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::payload::scalar_to_string;
use super::TelemetryPayload;

/// Row stored for each reporting installation, keyed by `uuid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallRecord {
    pub uuid: String,
    pub no_hash: bool,
    pub plugin_version: String,
    pub lightroom_version: String,
    pub arch: String,
    pub os: String,
    pub username: String,
    pub upload_count: String,
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SS+00:00`
    pub last_seen: String,
}

impl InstallRecord {
    /// Build the record for `payload` as reported from `caller_address` at `now`
    #[must_use]
    pub fn from_payload(
        payload: &TelemetryPayload,
        caller_address: &str,
        now: DateTime<Utc>,
    ) -> Self {
        // "0" counts as no hash, like an unset one
        let hash = payload.hash.as_deref().filter(|h| !h.is_empty() && *h != "0");

        Self {
            uuid: hash.map_or_else(|| caller_identity(caller_address), str::to_string),
            no_hash: hash.is_none(),
            plugin_version: payload.plugin_version.dotted(),
            lightroom_version: payload.lightroom_version.dotted(),
            arch: payload.arch.clone(),
            os: payload.os.clone(),
            username: payload.username.clone().unwrap_or_else(|| "Nil".to_string()),
            upload_count: payload
                .upload_count
                .as_ref()
                .map_or_else(|| "0".to_string(), scalar_to_string),
            last_seen: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

/// Fallback identity for installs that did not send a hash
///
/// Hex MD5 of the caller's address. Installs behind a shared or rotating
/// address collapse onto one identity.
#[must_use]
pub fn caller_identity(caller_address: &str) -> String {
    format!("{:x}", md5::compute(caller_address.as_bytes()))
}
