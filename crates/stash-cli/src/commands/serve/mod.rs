//! Serve command: HTTP endpoint for manifests and install telemetry
//!
//! Builds the manifest service over the filesystem artifact store,
//! optionally connects the Neo4j telemetry store, and serves the routes
//! until interrupted.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use stash_core::graph::neo4j::{Neo4jClient, Neo4jConfig};
use stash_core::{FsArtifactStore, ManifestCache, ManifestService, TelemetrySink};
use tracing::{info, warn};

use crate::cli::ServeArgs;

pub use routes::{caller_address, router, AppState, UpdateParams};

/// Run the serve command
///
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run(args: ServeArgs) -> Result<()> {
    info!(
        "Serving collections from {} (prefix: {}, head: {})",
        args.document_root.display(),
        args.collection_prefix,
        args.head_dir
    );

    let state = AppState {
        service: build_service(&args),
        telemetry: connect_telemetry(args.neo4j_config().as_ref()).await,
    };

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

fn build_service(args: &ServeArgs) -> ManifestService {
    let cache = ManifestCache::new(Arc::new(FsArtifactStore::new()));
    ManifestService::new(args.service_config(), cache)
}

/// Connect the telemetry store; an unreachable store disables telemetry
async fn connect_telemetry(config: Option<&Neo4jConfig>) -> Option<Arc<dyn TelemetrySink>> {
    let Some(config) = config else {
        info!("No Neo4j password given, install telemetry will not be stored");
        return None;
    };

    match Neo4jClient::connect(config).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Failed to connect to Neo4j, install telemetry disabled: {}", e);
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
