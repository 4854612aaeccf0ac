//! Graph module: Neo4j storage for install telemetry
//!
//! Provides the Neo4j client used as the persistent telemetry store and
//! the installation queries run against it.

pub mod neo4j;
pub mod queries;
