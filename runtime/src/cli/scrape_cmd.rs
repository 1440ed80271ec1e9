//! `title-scout [URL]...`: scrape titles and print one line per URL.

use crate::acquisition::http_client::{Fetcher, HttpClient};
use crate::cli::output::{self, Styled};
use crate::config::ScrapeConfig;
use crate::extraction::title::ScrapeResult;
use crate::pool::orchestrator::scrape_ordered;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_stream::StreamExt;

/// Pages scraped when no URL is given.
pub const DEFAULT_URLS: &[&str] = &[
    "https://pt.wikipedia.org/wiki/A_Era_do_Apocalipse",
    "https://pt.wikipedia.org/wiki/Banshee_(Marvel_Comics)",
    "https://pt.wikipedia.org/wiki/Cable",
    "https://pt.wikipedia.org/wiki/Colossus_(Marvel_Comics)",
    "https://pt.wikipedia.org/wiki/Lockheed_(Marvel_Comics)",
    "https://pt.wikipedia.org/wiki/Rogue",
];

#[derive(Debug, Clone, Default, Args)]
pub struct ScrapeArgs {
    /// URLs to scrape, in output order
    pub urls: Vec<String>,

    /// Read additional URLs from a file, one per line
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Tag name of the title element
    #[arg(long)]
    pub tag: Option<String>,

    /// Class substring of the title element
    #[arg(long)]
    pub class: Option<String>,

    /// Per-URL deadline in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum concurrent fetches (0 = unbounded)
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Only print result lines
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl ScrapeArgs {
    /// Environment config with flag overrides on top.
    pub fn config(&self) -> Result<ScrapeConfig> {
        let mut config = ScrapeConfig::from_env().context("reading TITLE_SCOUT_* environment")?;
        if let Some(tag) = &self.tag {
            config.target.tag = tag.clone();
        }
        if let Some(class) = &self.class {
            config.target.class = class.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_ms = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Positional URLs, then file URLs; the built-in list if both are empty.
    pub fn identifiers(&self) -> Result<Vec<String>> {
        let mut urls = self.urls.clone();
        if let Some(path) = &self.file {
            urls.extend(read_url_file(path)?);
        }
        if urls.is_empty() {
            urls = DEFAULT_URLS.iter().map(|u| u.to_string()).collect();
        }
        Ok(urls)
    }
}

/// Read identifiers from a file; blank lines and `#` comments are skipped.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading URL list {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Run the scrape command, printing results to stdout.
pub async fn run(args: ScrapeArgs, no_color: bool) -> Result<()> {
    let config = args.config()?;
    let urls = args.identifiers()?;
    let client = HttpClient::new(&config.user_agent, config.request_timeout_ms, config.max_redirects)
        .context("creating HTTP client")?;
    let styled = if no_color { Styled::plain() } else { Styled::new() };

    let mut stdout = std::io::stdout();
    run_with(Arc::new(client), &urls, &config, &args, &styled, &mut stdout).await
}

/// Scrape with an explicit fetcher and write results to `out` as `args` asks.
///
/// Result lines are written as they arrive; the status summary goes to stderr.
pub async fn run_with(
    fetcher: Arc<dyn Fetcher>,
    urls: &[String],
    config: &ScrapeConfig,
    args: &ScrapeArgs,
    styled: &Styled,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let start = Instant::now();
    let mut stream = scrape_ordered(fetcher, urls, config);
    let mut results: Vec<ScrapeResult> = Vec::with_capacity(urls.len());

    if !args.json && !args.quiet {
        writeln!(out, "{}", output::BANNER)?;
    }

    while let Some(result) = stream.next().await {
        if !args.json {
            writeln!(out, "{}", output::result_line(&result))?;
            out.flush()?;
        }
        results.push(result);
    }

    let elapsed = start.elapsed();

    if args.json {
        output::write_json(out, &output::results_json(&results, elapsed))?;
        return Ok(());
    }

    writeln!(out, "{}", output::elapsed_line(elapsed))?;

    if !args.quiet {
        output::print_summary(styled, &results);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identifiers() {
        let args = ScrapeArgs::default();
        let urls = args.identifiers().unwrap();
        assert_eq!(urls.len(), 6);
        assert_eq!(urls[5], "https://pt.wikipedia.org/wiki/Rogue");
    }

    #[test]
    fn test_positional_then_file_identifiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comic pages").unwrap();
        writeln!(file, "https://example.com/b").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://example.com/c  ").unwrap();

        let args = ScrapeArgs {
            urls: vec!["https://example.com/a".to_string()],
            file: Some(file.path().to_path_buf()),
            ..ScrapeArgs::default()
        };
        assert_eq!(
            args.identifiers().unwrap(),
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ]
        );
    }

    #[test]
    fn test_missing_url_file_is_error() {
        let err = read_url_file(Path::new("/nonexistent/title-scout/urls.txt")).unwrap_err();
        assert!(err.to_string().contains("reading URL list"));
    }

    #[test]
    fn test_flags_override_config() {
        let args = ScrapeArgs {
            tag: Some("h1".to_string()),
            class: Some("firstHeading".to_string()),
            timeout: Some(2_000),
            concurrency: Some(4),
            ..ScrapeArgs::default()
        };
        let config = args.config().unwrap();
        assert_eq!(config.target.tag, "h1");
        assert_eq!(config.target.class, "firstHeading");
        assert_eq!(config.request_timeout_ms, 2_000);
        assert_eq!(config.max_concurrency, 4);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let args = ScrapeArgs {
            tag: Some(String::new()),
            ..ScrapeArgs::default()
        };
        assert!(args.config().is_err());
    }
}
