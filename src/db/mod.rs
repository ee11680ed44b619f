//! Live database access for catalog probes and DDL execution.

pub mod client;

pub use client::PgStore;

use anyhow::Result;
use async_trait::async_trait;

/// Database capability consumed by the reconciliation engine.
///
/// Injected rather than reached ambiently so detection and creation can be
/// exercised against fakes.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Whether a table with this name exists in the public schema.
    async fn table_exists(&self, table_name: &str) -> Result<bool>;

    /// Execute generated DDL text.
    async fn execute(&self, sql: &str) -> Result<()>;
}
