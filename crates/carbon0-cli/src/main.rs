mod analyze;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "carbon0")]
#[command(about = "Score a product page's carbon footprint and suggest greener alternatives")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile extracted product data, score it, and show alternatives
    Analyze(AnalyzeArgs),
    /// Print the marketplace detected for a URL
    Platform {
        /// Product page URL
        url: String,
    },
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArgs {
    /// Product page URL
    #[arg(long)]
    pub url: String,

    /// JSON reply from the DOM-scraping content script (`-` reads stdin)
    #[arg(long)]
    pub dom: Option<PathBuf>,

    /// Screenshot of the page to run through the vision model
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Print the reconciled product and stop before contacting the backend
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = carbon0_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, &args).await,
        Some(Commands::Platform { url }) => {
            println!("{}", carbon0_core::detect_platform(&url));
            Ok(())
        }
        None => {
            println!("carbon0: run `carbon0 analyze --url <page> --dom <file>` to score a product");
            Ok(())
        }
    }
}
