//! Parkcam CLI: inspect how uploaded camera photos are decoded and routed.
//!
//! `preview` and `photos` read DATABASE_URL and the storage settings from the
//! environment (or `.env`). `preview --snapshot` works offline against an
//! exported JSON snapshot of the lookup tables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use parkcam_cli::{failure_report, init_tracing, photo_table, print_json};
use parkcam_core::{AppError, Config};
use parkcam_db::{create_pool, PgStore};
use parkcam_resolver::{decode, preview, recent_camera_photos, Lookups, MemoryStore};
use parkcam_storage::create_signer;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "parkcam", about = "Park camera photo routing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a storage path without any lookups
    Decode {
        /// Storage path, e.g. plose-plosebob/1963186224002020_S0420.jpg
        path: String,
    },
    /// Decode a storage path and resolve park, camera and attraction
    Preview {
        /// Storage path as uploaded by the camera
        path: String,
        /// Resolve against a JSON snapshot instead of the database
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },
    /// List the most recent photos of a camera with display URLs
    Photos {
        /// Park UUID
        #[arg(long, value_name = "UUID")]
        park: Uuid,
        /// Camera customer code
        #[arg(long, value_name = "CODE")]
        code: String,
        /// Maximum number of photos (default: PHOTO_PREVIEW_LIMIT)
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn load_config() -> Result<Config, AppError> {
    Config::from_env().map_err(|e| AppError::Config(format!("{:#}", e)))
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Decode { path } => print_json(&decode(&path)),
        Commands::Preview {
            path,
            snapshot: Some(file),
        } => {
            let store = MemoryStore::from_json_file(&file)?;
            print_json(&preview(&path, Lookups::from_store(&store)).await?)
        }
        Commands::Preview {
            path,
            snapshot: None,
        } => {
            let config = load_config()?;
            let store = PgStore::new(create_pool(&config).await?);
            print_json(&preview(&path, Lookups::from_store(&store)).await?)
        }
        Commands::Photos {
            park,
            code,
            limit,
            format,
        } => {
            let config = load_config()?;
            let store = PgStore::new(create_pool(&config).await?);
            let signer = create_signer(&config).await?;

            let photos = recent_camera_photos(
                &store,
                signer.as_ref(),
                park,
                &code,
                limit.unwrap_or(config.photo_preview_limit),
                config.signed_url_ttl(),
            )
            .await?;

            match format {
                OutputFormat::Json => print_json(&photos),
                OutputFormat::Table => {
                    print!("{}", photo_table(&photos));
                    Ok(())
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env first so RUST_LOG from it reaches the subscriber.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_report(&err));
            ExitCode::FAILURE
        }
    }
}
