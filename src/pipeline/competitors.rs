// Competitor collection — several live pages fetched with bounded
// concurrency.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::collect::{collect_page_metrics, CollectOptions};
use crate::graph::GraphClient;
use crate::metrics::PageMetrics;

/// Fetch metrics for each competitor page. Pages that fail are logged and
/// left out; the result order follows completion, not input.
pub async fn collect_competitors(
    client: &GraphClient,
    page_ids: &[String],
    options: &CollectOptions,
    concurrency: usize,
) -> Vec<PageMetrics> {
    let pb = ProgressBar::new(page_ids.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  Competitors [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results: Vec<_> = stream::iter(page_ids.iter().map(|page_id| {
        let pb = pb.clone();
        async move {
            let result = collect_page_metrics(client, page_id, options).await;
            pb.inc(1);
            (page_id, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let mut collected = Vec::with_capacity(results.len());
    for (page_id, result) in results {
        match result {
            Ok(metrics) => collected.push(metrics),
            Err(e) => warn!(
                page_id = page_id.as_str(),
                error = %e,
                "Failed to fetch competitor, skipping"
            ),
        }
    }
    collected
}
