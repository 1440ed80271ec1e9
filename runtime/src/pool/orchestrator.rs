//! Fan-out / fan-in over a list of identifiers.
//!
//! Every identifier gets its own worker, spawned eagerly in input order. A
//! merge task then drains the workers' channels one at a time, in input
//! order, into a single stream. Output order therefore always matches input
//! order; a slow early worker holds back later results until it reports or
//! hits its deadline.

use super::worker::{spawn_worker, WorkerHandle};
use crate::acquisition::http_client::Fetcher;
use crate::config::ScrapeConfig;
use crate::extraction::title::{ScrapeResult, TitleOutcome};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Scrape `urls` concurrently and stream one result per URL, in input order.
///
/// Must be called from within a tokio runtime. The stream closes after the
/// last result; an empty input yields an already-closed stream. Dropping the
/// stream aborts workers that have not been drained yet.
pub fn scrape_ordered(
    fetcher: Arc<dyn Fetcher>,
    urls: &[String],
    config: &ScrapeConfig,
) -> ReceiverStream<ScrapeResult> {
    let (tx, rx) = mpsc::channel(1);

    if urls.is_empty() {
        return ReceiverStream::new(rx);
    }

    let target = Arc::new(config.target.clone());
    let permits = (config.max_concurrency > 0).then(|| Arc::new(Semaphore::new(config.max_concurrency)));

    info!(
        count = urls.len(),
        max_concurrency = config.max_concurrency,
        "spawning workers"
    );

    let workers: Vec<(String, WorkerHandle)> = urls
        .iter()
        .map(|url| {
            let handle = spawn_worker(
                Arc::clone(&fetcher),
                url.clone(),
                Arc::clone(&target),
                permits.clone(),
                config.request_timeout_ms,
            );
            (url.clone(), handle)
        })
        .collect();

    tokio::spawn(merge_in_order(workers, tx));

    ReceiverStream::new(rx)
}

/// Collect [`scrape_ordered`] into a vector.
pub async fn scrape_all(
    fetcher: Arc<dyn Fetcher>,
    urls: &[String],
    config: &ScrapeConfig,
) -> Vec<ScrapeResult> {
    scrape_ordered(fetcher, urls, config).collect().await
}

async fn merge_in_order(workers: Vec<(String, WorkerHandle)>, tx: mpsc::Sender<ScrapeResult>) {
    let mut pending = workers.into_iter();

    while let Some((url, mut worker)) = pending.next() {
        let received = tokio::select! {
            received = &mut worker.result => received,
            _ = tx.closed() => {
                worker.task.abort();
                abort_all(pending);
                return;
            }
        };

        let result = received.unwrap_or_else(|_| {
            warn!(url = %url, "worker ended without a result");
            ScrapeResult::new(url, TitleOutcome::Lost)
        });

        if tx.send(result).await.is_err() {
            abort_all(pending);
            return;
        }
    }
}

fn abort_all(rest: impl Iterator<Item = (String, WorkerHandle)>) {
    let mut aborted = 0usize;
    for (_, worker) in rest {
        worker.task.abort();
        aborted += 1;
    }
    debug!(aborted, "result stream dropped, aborting remaining workers");
}
