//! Command line arguments

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stash_core::service::{DEFAULT_COLLECTION_PREFIX, DEFAULT_HEAD_DIR};
use stash_core::{Neo4jConfig, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "stash")]
#[command(author, version, about = "Plugin update manifest server", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve manifests and collect install telemetry over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Directory containing one sub-directory per collection
    #[arg(long)]
    pub document_root: PathBuf,

    /// Required prefix of collection ids
    #[arg(long, default_value = DEFAULT_COLLECTION_PREFIX)]
    pub collection_prefix: String,

    /// Release sub-directory inside each collection
    #[arg(long, default_value = DEFAULT_HEAD_DIR)]
    pub head_dir: String,

    /// Neo4j connection URI
    #[arg(long, default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password; telemetry is only stored when set
    #[arg(long)]
    pub neo4j_password: Option<String>,

    /// Neo4j database name
    #[arg(long)]
    pub neo4j_database: Option<String>,
}

impl ServeArgs {
    /// Manifest service settings
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new(&self.document_root)
            .with_prefix(&self.collection_prefix)
            .with_head_dir(&self.head_dir)
    }

    /// Telemetry store settings, if a password was given
    #[must_use]
    pub fn neo4j_config(&self) -> Option<Neo4jConfig> {
        let password = self.neo4j_password.as_deref()?;
        let config = Neo4jConfig::new(&self.neo4j_uri, &self.neo4j_user, password);
        Some(match &self.neo4j_database {
            Some(db) => config.with_database(db),
            None => config,
        })
    }
}
