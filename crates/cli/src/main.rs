use anyhow::Result;
use clap::{Parser, Subcommand};
use murmur_http::{create_router, AppState};
use murmur_storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "Social feed backend for murmur", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file; defaults to the per-user data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[arg(short, long, default_value = "37740")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Apply pending schema migrations and report the version.
    Migrate,
    /// Reverse schema migrations down to a target version.
    Rollback {
        #[arg(long)]
        to: i32,
    },
    Stats,
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("murmur")
        .join("social.db")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(default_db_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let storage = Storage::new(&db_path)?;

    match cli.command {
        Commands::Serve { port, host } => {
            let state = Arc::new(AppState { storage: Arc::new(storage) });
            let router = create_router(state);
            let addr = format!("{}:{}", host, port);
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Migrate => {
            // Storage::new already applied pending migrations on open
            println!("Schema at version {}", storage.schema_version()?);
        }
        Commands::Rollback { to } => {
            storage.rollback_to(to)?;
            println!("Schema at version {}", storage.schema_version()?);
        }
        Commands::Stats => {
            let stats = storage.get_stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
