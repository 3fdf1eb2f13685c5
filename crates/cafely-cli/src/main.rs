mod find;
mod quiz;
mod recommend;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(name = "cafely-cli")]
#[command(about = "Coffee drink recommendations and nearby café search")]
struct Cli {
    /// Drink catalog file (JSON or YAML); overrides `CAFELY_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend drinks for the given preferences
    Recommend(RecommendArgs),
    /// Answer the drink quiz interactively
    Quiz,
    /// Find cafés near an address
    Find {
        /// Street address or place name
        address: String,
        /// Search radius in meters (defaults to `CAFELY_SEARCH_RADIUS_METERS`)
        #[arg(long)]
        radius: Option<u32>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = cafely_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.catalog.as_deref().or(config.catalog_path.as_deref());

    match cli.command {
        Some(Commands::Recommend(args)) => {
            let catalog = cafely_core::load_configured_catalog(catalog_path)?;
            recommend::run_recommend(&catalog, &args, &mut std::io::stdout().lock())?;
        }
        Some(Commands::Quiz) => {
            let catalog = cafely_core::load_configured_catalog(catalog_path)?;
            quiz::run_quiz(
                &catalog,
                &mut std::io::stdin().lock(),
                &mut std::io::stdout().lock(),
            )?;
        }
        Some(Commands::Find {
            address,
            radius,
            json,
        }) => {
            find::run_find(&config, &address, radius, json, &mut std::io::stdout().lock()).await?;
        }
        None => println!("cafely-cli: run with --help to list commands"),
    }

    Ok(())
}
