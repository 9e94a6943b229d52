mod check;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use burnpermit_core::DEFAULT_SEARCH_URL;

#[derive(Debug, Parser)]
#[command(name = "burnpermit-cli")]
#[command(about = "Michigan DNR burn permit status lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the permit status for a township once and print it
    Check(check::CheckArgs),
    /// Print the search URL queried for a county
    Url {
        #[arg(long, env = "BURNPERMIT_COUNTY")]
        county: String,

        #[arg(long, env = "BURNPERMIT_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
        search_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_level = std::env::var("BURNPERMIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => check::run(args).await,
        Commands::Url { county, search_url } => {
            let county = county.trim().to_uppercase();
            anyhow::ensure!(!county.is_empty(), "county must be non-empty");
            println!("{}", burnpermit_scraper::search_url(&search_url, &county)?);
            Ok(())
        }
    }
}
