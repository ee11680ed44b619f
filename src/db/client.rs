//! Postgres-backed schema store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};

use super::SchemaStore;

/// Schema store backed by a live Postgres connection.
pub struct PgStore {
    client: Client,
}

impl PgStore {
    /// Connect to the database and spawn the connection driver task.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .context("Failed to connect to database")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Database connection error: {}", e);
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl SchemaStore for PgStore {
    async fn table_exists(&self, table_name: &str) -> Result<bool> {
        // Unquoted identifiers fold to lowercase in the catalog.
        let row = self
            .client
            .query_one(
                "SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )",
                &[&table_name.to_lowercase()],
            )
            .await
            .with_context(|| format!("Failed to check existence of table {table_name}"))?;

        Ok(row.get(0))
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        // Generated DDL is a multi-statement batch (table, comment, indexes).
        self.client
            .batch_execute(sql)
            .await
            .context("Failed to execute DDL")?;
        Ok(())
    }
}
