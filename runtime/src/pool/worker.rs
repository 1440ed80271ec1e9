//! One worker per identifier: fetch, parse, extract, report once.

use crate::acquisition::http_client::Fetcher;
use crate::error::{FetchError, ParseError};
use crate::extraction::document::parse_document;
use crate::extraction::title::{extract, ScrapeResult, TitleOutcome, TitleTarget};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A spawned worker and the channel it reports on.
pub struct WorkerHandle {
    pub task: JoinHandle<()>,
    /// Carries exactly one result, then closes. Closes empty if the task dies.
    pub result: oneshot::Receiver<ScrapeResult>,
}

/// Fetch `url`, parse the body and extract the title.
///
/// Fetch and parse failures are reported with a `warn!` diagnostic and
/// folded into the outcome; a missing element or text is not logged.
pub async fn scrape_one(fetcher: &dyn Fetcher, url: &str, target: &Arc<TitleTarget>) -> ScrapeResult {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(url, error = %e, "fetch failed");
            return ScrapeResult::new(url, TitleOutcome::FetchFailed(e.to_string()));
        }
    };

    debug!(
        url,
        status = page.status,
        final_url = %page.final_url,
        bytes = page.body.len(),
        "fetched"
    );

    // scraper's document is not Send, so parse and extract on a blocking thread.
    let target = Arc::clone(target);
    let parsed = tokio::task::spawn_blocking(move || extract(&parse_document(&page.body), &target))
        .await
        .map_err(|e| ParseError::Task(e.to_string()));

    let outcome = match parsed {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(url, error = %e, "parse failed");
            TitleOutcome::ParseFailed(e.to_string())
        }
    };

    if matches!(outcome, TitleOutcome::NoMatch | TitleOutcome::NoText) {
        debug!(url, outcome = outcome.kind(), "no title");
    }

    ScrapeResult::new(url, outcome)
}

/// Spawn a worker task for `url`.
///
/// The task waits for a permit when `permits` is set, then runs
/// [`scrape_one`] under a `timeout_ms` deadline and sends the result on its
/// own channel.
pub fn spawn_worker(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    target: Arc<TitleTarget>,
    permits: Option<Arc<Semaphore>>,
    timeout_ms: u64,
) -> WorkerHandle {
    let (tx, rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        // A closed semaphore just means no cap.
        let _permit = match permits {
            Some(sem) => sem.acquire_owned().await.ok(),
            None => None,
        };

        let deadline = Duration::from_millis(timeout_ms);
        let timed = tokio::time::timeout(deadline, scrape_one(fetcher.as_ref(), &url, &target)).await;
        let result = match timed {
            Ok(result) => result,
            Err(_) => {
                let e = FetchError::Timeout {
                    url: url.clone(),
                    timeout_ms,
                };
                warn!(url = %url, error = %e, "worker deadline exceeded");
                ScrapeResult::new(url, TitleOutcome::FetchFailed(e.to_string()))
            }
        };

        // Receiver gone means the batch was dropped.
        let _ = tx.send(result);
    });

    WorkerHandle { task, result: rx }
}
