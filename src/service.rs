//! Project analysis and sync orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;

use crate::artifacts;
use crate::db::SchemaStore;
use crate::ddl::{self, naming::to_pascal_case};
use crate::models::{
    AnalysisResult, MissingTableResult, ProjectSnapshot, SyncError, SyncOptions, SyncOutcome,
    SyncResult, TableDefinition, TableStatus,
};

/// Reconciliation engine for one database and one frontend workspace.
pub struct SyncService {
    store: Arc<dyn SchemaStore>,
    workspace_root: PathBuf,
}

impl SyncService {
    pub fn new(store: Arc<dyn SchemaStore>, workspace_root: PathBuf) -> Self {
        Self {
            store,
            workspace_root,
        }
    }

    /// Classify declared tables as present or missing, preserving input
    /// order. Probe failures log at WARN and count as missing; the
    /// generated DDL's IF NOT EXISTS keeps a redundant create harmless.
    pub async fn detect_missing_tables(
        &self,
        tables: &[TableDefinition],
    ) -> Vec<TableDefinition> {
        let mut missing = Vec::new();
        for table in tables {
            let Some(name) = table.table_name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            let exists = match self.store.table_exists(name).await {
                Ok(exists) => exists,
                Err(e) => {
                    tracing::warn!("Probe failed for table {}: {}; treating as missing", name, e);
                    false
                }
            };
            if !exists {
                missing.push(table.clone());
            }
        }
        missing
    }

    /// Create every declared-but-absent table. Failures are isolated per
    /// table: generation or execution errors become `status: error`
    /// entries and the remaining tables are still attempted.
    pub async fn generate_missing_tables(
        &self,
        tables: &[TableDefinition],
        project_id: i64,
    ) -> Result<Vec<MissingTableResult>> {
        let missing = self.detect_missing_tables(tables).await;
        let mut results = Vec::new();

        for table in &missing {
            let table_name = table.table_name.clone().unwrap_or_default();
            match ddl::generate_table_sql(table, project_id) {
                Ok(Some(sql)) => match self.store.execute(&sql).await {
                    Ok(()) => {
                        tracing::info!("Created table {}", table_name);
                        results.push(MissingTableResult {
                            table_name,
                            status: TableStatus::Created,
                            sql: Some(sql),
                            error: None,
                        });
                    }
                    Err(e) => {
                        tracing::error!("Failed to create table {}: {}", table_name, e);
                        results.push(MissingTableResult {
                            table_name,
                            status: TableStatus::Error,
                            sql: None,
                            error: Some(e.to_string()),
                        });
                    }
                },
                Ok(None) => {}
                Err(e) => results.push(MissingTableResult {
                    table_name,
                    status: TableStatus::Error,
                    sql: None,
                    error: Some(e.to_string()),
                }),
            }
        }

        Ok(results)
    }

    /// Read-only analysis of one project snapshot. Errors when the
    /// snapshot has no project id; issues no DDL.
    pub async fn analyze_project(&self, snapshot: &ProjectSnapshot) -> Result<AnalysisResult> {
        let project = snapshot.project.as_ref();
        let Some(project_id) = project.and_then(|p| p.id) else {
            bail!("Project ID is required");
        };
        let project_name = project.and_then(|p| p.project_name.clone());
        let page_name = to_pascal_case(project_name.as_deref().unwrap_or("Project"));

        let missing_tables = self.detect_missing_tables(&snapshot.tables).await;
        let missing_components = artifacts::detect_missing_components(
            &snapshot.tables,
            &snapshot.reports,
            &page_name,
            &self.workspace_root,
        );
        let missing_routes =
            artifacts::detect_missing_routes(&snapshot.menus, &page_name, &self.workspace_root);

        Ok(AnalysisResult {
            project_id,
            project_name,
            missing_tables,
            missing_components,
            missing_routes,
        })
    }

    /// Analyze, then apply whatever the options allow. Creation failures
    /// are returned as data; only a missing project id propagates as an
    /// error.
    pub async fn sync_project(
        &self,
        snapshot: &ProjectSnapshot,
        options: SyncOptions,
    ) -> Result<SyncResult> {
        let analysis = self.analyze_project(snapshot).await?;
        let mut results = SyncOutcome::default();

        if options.generate_db_tables && !analysis.missing_tables.is_empty() {
            match self
                .generate_missing_tables(&analysis.missing_tables, analysis.project_id)
                .await
            {
                Ok(table_results) => {
                    for result in table_results {
                        match result.status {
                            TableStatus::Created => results.tables_created.push(result),
                            TableStatus::Error => results.errors.push(SyncError::Table {
                                table_name: result.table_name,
                                error: result.error.unwrap_or_default(),
                            }),
                        }
                    }
                }
                Err(e) => results.errors.push(SyncError::TableGeneration {
                    error: e.to_string(),
                }),
            }
        }

        // Component and route generation are accepted but not built yet;
        // an explicit entry keeps "nothing was missing" distinguishable
        // from "generation was requested but not performed".
        if options.generate_components {
            results.errors.push(SyncError::NotImplemented {
                feature: "component_generation".to_string(),
            });
        }
        if options.generate_routes {
            results.errors.push(SyncError::NotImplemented {
                feature: "route_generation".to_string(),
            });
        }

        Ok(SyncResult {
            analysis,
            results,
            completed_at: Utc::now(),
        })
    }
}
