//! Telemetry module: install reporting
//!
//! Parses the optional `data` payload sent alongside manifest requests,
//! derives an installation record and upserts it into a [`TelemetrySink`].
//! Nothing here may influence the manifest response; callers log the
//! returned error and move on.

mod payload;
mod record;
mod sink;

use thiserror::Error;

pub use payload::{LightroomVersion, PluginVersion, TelemetryPayload};
pub use record::{caller_identity, InstallRecord};
pub use sink::{MemoryTelemetrySink, TelemetrySink};

/// Errors that can occur while recording telemetry
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Payload is not valid UTF-8 after URL decoding: {0}")]
    Encoding(String),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Parse `raw_data`, derive a record for `caller_address` and upsert it
///
/// # Errors
/// Returns an error if the payload cannot be parsed or the sink rejects
/// the record.
pub async fn record_install(
    sink: &dyn TelemetrySink,
    raw_data: &str,
    caller_address: &str,
) -> Result<InstallRecord, TelemetryError> {
    let payload = TelemetryPayload::parse(raw_data)?;
    let record = InstallRecord::from_payload(&payload, caller_address, chrono::Utc::now());
    sink.upsert(&record).await?;
    Ok(record)
}
