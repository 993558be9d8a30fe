// Orchestration — fetch metrics, run the analysis, persist history.
//
// `collect` and `competitors` talk to the Graph API; `process` ties an
// analysis run to the history store and the alert detector.

pub mod collect;
pub mod competitors;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::graph::GraphClient;
use crate::metrics::PageMetrics;

pub use collect::{collect_page_metrics, CollectOptions};
pub use competitors::collect_competitors;
pub use process::{process_metrics, ProcessOutcome};

/// Where a page's metrics come from on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A `PageMetrics` JSON snapshot on disk
    File(PathBuf),
    /// A page id fetched live from the Graph API
    Page(String),
}

impl Source {
    /// Existing files and anything ending in `.json` are snapshots;
    /// everything else is a page id.
    pub fn parse(s: &str) -> Self {
        let path = Path::new(s);
        if path.exists() || path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            Source::File(path.to_path_buf())
        } else {
            Source::Page(s.to_string())
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Source::Page(_))
    }

    /// Load the snapshot or fetch it. `client` is required for live pages.
    pub async fn load(
        &self,
        client: Option<&GraphClient>,
        options: &CollectOptions,
    ) -> Result<PageMetrics> {
        match self {
            Source::File(path) => {
                let mut metrics = PageMetrics::load(path)?;
                if metrics.industry.is_none() {
                    metrics.industry = options.industry.clone();
                }
                Ok(metrics)
            }
            Source::Page(page_id) => {
                let Some(client) = client else {
                    anyhow::bail!("Fetching page {page_id} live needs PAGE_ACCESS_TOKEN");
                };
                collect_page_metrics(client, page_id, options).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("snapshots/cafe.json"),
            Source::File(PathBuf::from("snapshots/cafe.json"))
        );
        assert_eq!(Source::parse("1234567890"), Source::Page("1234567890".to_string()));
        assert!(Source::parse("1234567890").is_live());
        assert_eq!(Source::parse("Cargo.toml"), Source::File(PathBuf::from("Cargo.toml")));
    }

    #[tokio::test]
    async fn test_live_source_without_client_fails() {
        let err = Source::Page("42".to_string())
            .load(None, &CollectOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("PAGE_ACCESS_TOKEN"));
    }
}
