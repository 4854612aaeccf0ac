//! Telemetry storage seam

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;

use super::{InstallRecord, TelemetryError};

/// Persistent store for installation records
///
/// `upsert` must be idempotent per `uuid`: storing the same installation
/// twice leaves a single record holding the latest values.
pub trait TelemetrySink: Send + Sync {
    /// Insert or replace the record with `record.uuid`
    fn upsert<'a>(
        &'a self,
        record: &'a InstallRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>>;
}

/// In-process sink, keyed by uuid
#[derive(Debug, Default)]
pub struct MemoryTelemetrySink {
    records: Mutex<HashMap<String, InstallRecord>>,
}

impl MemoryTelemetrySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, uuid: &str) -> Option<InstallRecord> {
        self.lock().get(uuid).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, InstallRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TelemetrySink for MemoryTelemetrySink {
    fn upsert<'a>(
        &'a self,
        record: &'a InstallRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>> {
        Box::pin(async move {
            self.lock().insert(record.uuid.clone(), record.clone());
            Ok(())
        })
    }
}
