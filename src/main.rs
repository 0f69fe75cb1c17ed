// Main entry point - Dependency injection, server setup and manifest builder CLI
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use crate::application::manifest_repository::ManifestRepository;
use crate::application::state_store::KeyValueStore;
use crate::infrastructure::config::{PortalConfig, StateBackend, load_portal_config};
use crate::infrastructure::file_state_store::FileStateStore;
use crate::infrastructure::json_manifest_repository::JsonManifestRepository;
use crate::infrastructure::manifest_writer::build_from_workbook;
use crate::infrastructure::memory_store::MemoryStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[derive(Parser)]
#[command(name = "dashboard-portal", version, about = "Department dashboard portal service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the portal API (default)
    Serve,
    /// Convert a workbook of sheet exports into the manifest JSON
    BuildManifest {
        /// Directory holding Databases.tsv and Files.tsv
        #[arg(long)]
        workbook: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_portal_config().context("Failed to load portal configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::BuildManifest {
            workbook,
            output,
            public_dir,
        } => {
            let output = output.unwrap_or(config.builder.output);
            let public_dir = public_dir.unwrap_or(config.builder.public_dir);
            let outcome = build_from_workbook(&workbook, &output, &public_dir)?;

            println!("Created {}", outcome.output.display());
            if outcome.report.warnings.is_empty() {
                println!("No warnings.");
            } else {
                println!("\nWarnings:");
                for warning in &outcome.report.warnings {
                    println!(" - {}", warning);
                }
            }
            if !outcome.placeholders.is_empty() {
                println!(
                    "\nCreated {} placeholder(s) under {} for local files.",
                    outcome.placeholders.len(),
                    public_dir.display()
                );
            }
            Ok(())
        }
    }
}

async fn serve(config: PortalConfig) -> anyhow::Result<()> {
    // Load the manifest (infrastructure layer)
    let repository = JsonManifestRepository::new(config.manifest.path.clone());
    let manifest = repository.load().await?;

    let store: Arc<dyn KeyValueStore> = match config.state.backend {
        StateBackend::File => Arc::new(FileStateStore::new(config.state.path.clone())),
        StateBackend::Memory => Arc::new(MemoryStore::default()),
    };

    // Services share one in-memory working copy (application layer)
    let state = Arc::new(AppState::new(Arc::new(RwLock::new(manifest)), store));

    // Build router (presentation layer)
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting dashboard-portal on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
