//! Neo4j connection used as the install telemetry store
//!
//! Each reporting install is one `Installation` node keyed by `uuid`.

use std::sync::Arc;

use neo4rs::{ConfigBuilder, Graph, Query};
use thiserror::Error;
use tracing::info;

/// Failures talking to the telemetry store
#[derive(Debug, Error)]
pub enum Neo4jError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

/// Where the telemetry store lives and how to log in
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
}

impl Neo4jConfig {
    /// Settings for the store at `uri`, using the server's default database
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Write installations to `database` instead of the default one
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

/// Shared handle to the Installation graph
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Open the store and make sure `Installation.uuid` is unique
    ///
    /// # Errors
    /// Returns an error if the server is unreachable, rejects the
    /// credentials, or refuses the schema statements.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, Neo4jError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password);

        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }

        let neo_config = builder
            .build()
            .map_err(|e| Neo4jError::Connection(e.to_string()))?;
        let graph = Graph::connect(neo_config).await?;

        let client = Self {
            graph: Arc::new(graph),
        };

        client.ensure_constraints().await?;
        info!("Telemetry store ready at {}", config.uri);

        Ok(client)
    }

    /// Installation schema: unique `uuid`, indexed `last_seen`
    ///
    /// Two reports for one uuid racing through MERGE must land on a
    /// single node.
    async fn ensure_constraints(&self) -> Result<(), Neo4jError> {
        let statements = [
            "CREATE CONSTRAINT installation_uuid IF NOT EXISTS FOR (i:Installation) REQUIRE i.uuid IS UNIQUE",
            "CREATE INDEX installation_last_seen IF NOT EXISTS FOR (i:Installation) ON (i.last_seen)",
        ];

        for stmt in statements {
            self.graph.run(Query::new(stmt.to_string())).await?;
        }

        Ok(())
    }

    /// Raw graph for the installation queries
    pub(super) fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl std::fmt::Debug for Neo4jClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jClient").finish_non_exhaustive()
    }
}
