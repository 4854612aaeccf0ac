//! Installation-related Neo4j queries

use futures::future::BoxFuture;
use neo4rs::Query;

use super::Neo4jClient;
use crate::graph::neo4j::Neo4jError;
use crate::telemetry::{InstallRecord, TelemetryError, TelemetrySink};

impl Neo4jClient {
    /// Create or replace the installation node for `record.uuid`
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn upsert_installation(&self, record: &InstallRecord) -> Result<(), Neo4jError> {
        let query = Query::new(
            r#"
            MERGE (i:Installation {uuid: $uuid})
            SET i.no_hash = $no_hash,
                i.plugin_version = $plugin_version,
                i.lightroom_version = $lightroom_version,
                i.arch = $arch,
                i.os = $os,
                i.username = $username,
                i.upload_count = $upload_count,
                i.last_seen = $last_seen
            "#
            .to_string(),
        )
        .param("uuid", record.uuid.clone())
        .param("no_hash", record.no_hash)
        .param("plugin_version", record.plugin_version.clone())
        .param("lightroom_version", record.lightroom_version.clone())
        .param("arch", record.arch.clone())
        .param("os", record.os.clone())
        .param("username", record.username.clone())
        .param("upload_count", record.upload_count.clone())
        .param("last_seen", record.last_seen.clone());

        self.graph().run(query).await?;
        Ok(())
    }

    /// Look up an installation by uuid
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_installation(&self, uuid: &str) -> Result<Option<InstallRecord>, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (i:Installation {uuid: $uuid})
            RETURN i.uuid, i.no_hash, i.plugin_version, i.lightroom_version,
                   i.arch, i.os, i.username, i.upload_count, i.last_seen
            LIMIT 1
            "#
            .to_string(),
        )
        .param("uuid", uuid);

        let mut result = self.graph().execute(query).await?;

        Ok(result.next().await?.map(|row| InstallRecord {
            uuid: row.get("i.uuid").unwrap_or_default(),
            no_hash: row.get("i.no_hash").unwrap_or(false),
            plugin_version: row.get("i.plugin_version").unwrap_or_default(),
            lightroom_version: row.get("i.lightroom_version").unwrap_or_default(),
            arch: row.get("i.arch").unwrap_or_default(),
            os: row.get("i.os").unwrap_or_default(),
            username: row.get("i.username").unwrap_or_default(),
            upload_count: row.get("i.upload_count").unwrap_or_default(),
            last_seen: row.get("i.last_seen").unwrap_or_default(),
        }))
    }
}

impl TelemetrySink for Neo4jClient {
    fn upsert<'a>(
        &'a self,
        record: &'a InstallRecord,
    ) -> BoxFuture<'a, Result<(), TelemetryError>> {
        Box::pin(async move {
            self.upsert_installation(record)
                .await
                .map_err(|e| TelemetryError::Store(e.to_string()))
        })
    }
}
