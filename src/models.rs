//! Data models for project snapshots and reconciliation reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Project record inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// One column descriptor inside a declared table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// A user-declared description of a table that should exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub parent_table: Option<String>,
    /// The admin console stores this either as a JSON array or as a
    /// JSON-encoded string column; both shapes are accepted.
    #[serde(default, deserialize_with = "field_definitions_from_any")]
    pub field_definitions: Vec<FieldDefinition>,
    /// Workflow marker ("In progress" / "Done" / "In Review"); not consumed
    /// by the reconciliation engine.
    #[serde(default)]
    pub status: Option<String>,
}

/// Declared report inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    #[serde(default)]
    pub report_name: Option<String>,
}

/// Declared menu inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub menu_name: Option<String>,
}

/// Aggregate read of one project, as produced by the admin console's
/// `/project/:id/full` summary endpoint. Extra sections (payments, bugs,
/// roles, access mappings) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
    #[serde(default)]
    pub reports: Vec<ReportDefinition>,
    #[serde(default)]
    pub menus: Vec<MenuDefinition>,
}

fn field_definitions_from_any<'de, D>(deserializer: D) -> Result<Vec<FieldDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(_) => serde_json::from_value(value).unwrap_or_default(),
        serde_json::Value::String(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        _ => Vec::new(),
    })
}

/// Outcome of attempting to create one declared-but-absent table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingTableResult {
    pub table_name: String,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-table creation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Created,
    Error,
}

/// A table-view or modal component expected in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingComponent {
    pub table_name: String,
    pub component_name: String,
    pub component_path: String,
}

/// A report-view component expected in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReportComponent {
    pub report_name: String,
    pub component_name: String,
    pub component_path: String,
}

/// A service file expected in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingService {
    pub table_name: String,
    pub service_name: String,
    pub service_path: String,
}

/// A route registration expected for a declared menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingRoute {
    pub menu_name: String,
    pub route_path: String,
    pub component_path: String,
}

/// The four scaffolding buckets checked on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissingComponents {
    pub tables: Vec<MissingComponent>,
    pub reports: Vec<MissingReportComponent>,
    pub modals: Vec<MissingComponent>,
    pub services: Vec<MissingService>,
}

/// Read-only analysis report for one snapshot. Produced fresh on every
/// call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub project_id: i64,
    pub project_name: Option<String>,
    pub missing_tables: Vec<TableDefinition>,
    pub missing_components: MissingComponents,
    pub missing_routes: Vec<MissingRoute>,
}

/// Options accepted by the sync operation.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub generate_db_tables: bool,
    pub generate_components: bool,
    pub generate_routes: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            generate_db_tables: true,
            generate_components: false,
            generate_routes: false,
        }
    }
}

/// One entry in the sync error list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncError {
    Table { table_name: String, error: String },
    TableGeneration { error: String },
    NotImplemented { feature: String },
}

/// What the sync pass actually did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncOutcome {
    pub tables_created: Vec<MissingTableResult>,
    pub components_created: Vec<MissingComponent>,
    pub routes_created: Vec<MissingRoute>,
    pub errors: Vec<SyncError>,
}

/// Combined analysis plus applied results.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub analysis: AnalysisResult,
    pub results: SyncOutcome,
    pub completed_at: DateTime<Utc>,
}
