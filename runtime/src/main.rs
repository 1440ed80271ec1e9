//! title-scout: scrape page titles concurrently, printed in input order.

use anyhow::Result;
use clap::Parser;
use title_scout::cli::scrape_cmd::{self, ScrapeArgs};

#[derive(Parser)]
#[command(name = "title-scout", version, about = "Fetch pages in parallel and print one title per page, in order")]
struct Cli {
    #[command(flatten)]
    scrape: ScrapeArgs,

    /// Log worker progress to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Disable colored status output
    #[arg(long)]
    no_color: bool,

    /// Emit diagnostics as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "title_scout=info" } else { "title_scout=warn" };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.parse()?);
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    scrape_cmd::run(cli.scrape, cli.no_color).await
}
