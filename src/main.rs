//! Schema reconciliation CLI for project-managed workspaces.
//!
//! Compares a project's declared table metadata against a live Postgres
//! database and a frontend workspace, reports what is missing, and can
//! create the missing tables.
//!
//! # Usage
//! ```bash
//! schemasync analyze --snapshot project.json          # Read-only report
//! schemasync sync --snapshot project.json             # Create missing tables
//! schemasync sync --snapshot project.json --no-tables # Analysis only
//! ```

mod artifacts;
mod db;
mod ddl;
mod models;
mod service;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::db::PgStore;
use crate::models::{ProjectSnapshot, SyncOptions};
use crate::service::SyncService;

/// Resolve the Postgres connection string from flag or environment.
fn get_database_url(flag: Option<String>) -> Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    std::env::var("DATABASE_URL")
        .context("No --database-url given and DATABASE_URL is not set")
}

/// Load a project snapshot (the `/project/:id/full` shape) from disk.
fn load_snapshot(path: &Path) -> Result<ProjectSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse project snapshot")
}

#[derive(Parser)]
#[command(name = "schemasync")]
#[command(about = "Reconcile declared project schema against a live database and workspace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report missing tables, components, and routes without changing anything
    Analyze {
        /// Path to the project snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Postgres connection string (default: DATABASE_URL)
        #[arg(short, long)]
        database_url: Option<String>,

        /// Frontend workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },

    /// Analyze, then create whatever the flags allow
    Sync {
        /// Path to the project snapshot JSON
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Postgres connection string (default: DATABASE_URL)
        #[arg(short, long)]
        database_url: Option<String>,

        /// Frontend workspace root
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,

        /// Skip creating missing database tables
        #[arg(long)]
        no_tables: bool,

        /// Request component generation (reported as not implemented)
        #[arg(long)]
        components: bool,

        /// Request route generation (reported as not implemented)
        #[arg(long)]
        routes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schemasync=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            snapshot,
            database_url,
            workspace,
        } => cmd_analyze(snapshot, database_url, workspace),
        Commands::Sync {
            snapshot,
            database_url,
            workspace,
            no_tables,
            components,
            routes,
        } => {
            let options = SyncOptions {
                generate_db_tables: !no_tables,
                generate_components: components,
                generate_routes: routes,
            };
            cmd_sync(snapshot, database_url, workspace, options)
        }
    }
}

fn cmd_analyze(snapshot: PathBuf, database_url: Option<String>, workspace: PathBuf) -> Result<()> {
    let snapshot = load_snapshot(&snapshot)?;
    let database_url = get_database_url(database_url)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let analysis = runtime.block_on(async {
        let store = PgStore::connect(&database_url).await?;
        let service = SyncService::new(Arc::new(store), workspace);
        service.analyze_project(&snapshot).await
    })?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn cmd_sync(
    snapshot: PathBuf,
    database_url: Option<String>,
    workspace: PathBuf,
    options: SyncOptions,
) -> Result<()> {
    let snapshot = load_snapshot(&snapshot)?;
    let database_url = get_database_url(database_url)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let store = PgStore::connect(&database_url).await?;
        let service = SyncService::new(Arc::new(store), workspace);
        service.sync_project(&snapshot, options).await
    })?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
