// Live collection: Graph API responses -> one PageMetrics snapshot.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::graph::client::is_permission_error;
use crate::graph::{fetch_fan_growth, fetch_page_profile, fetch_post_insights, fetch_posts};
use crate::graph::GraphClient;
use crate::metrics::{PageMetrics, PostKind, DEFAULT_PERIOD_DAYS};

/// Default cap on posts fetched per page.
pub const DEFAULT_MAX_POSTS: usize = 100;

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub industry: Option<String>,
    pub period_days: u32,
    pub max_posts: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            industry: None,
            period_days: DEFAULT_PERIOD_DAYS,
            max_posts: DEFAULT_MAX_POSTS,
        }
    }
}

/// Fetch everything one analysis needs for `page_id`.
///
/// Missing permissions degrade gracefully: an unreadable profile, fan
/// insights or click insights become None, and the affected triggers report
/// the metric as unavailable. Any other failure is an error.
pub async fn collect_page_metrics(
    client: &GraphClient,
    page_id: &str,
    options: &CollectOptions,
) -> Result<PageMetrics> {
    let until = Utc::now();
    let since = until - Duration::days(i64::from(options.period_days));

    let (name, fan_count, profile) = match fetch_page_profile(client, page_id).await {
        Ok(info) => (info.name, info.fan_count, Some(info.profile)),
        Err(e) if is_permission_error(&e) => {
            warn!(page_id = page_id, "No permission to read page profile");
            (page_id.to_string(), None, None)
        }
        Err(e) => return Err(e),
    };

    let mut posts = fetch_posts(client, page_id, since, options.max_posts).await?;
    let fan_growth = fetch_fan_growth(client, page_id, since, until).await?;

    // Click data only matters for link posts. The first missing permission
    // means every later call would fail the same way.
    let mut with_clicks = 0usize;
    for post in posts.iter_mut().filter(|p| p.kind == PostKind::Link) {
        match fetch_post_insights(client, &post.id).await? {
            Some((clicks, impressions)) => {
                post.clicks = Some(clicks);
                post.impressions = Some(impressions);
                with_clicks += 1;
            }
            None => {
                warn!(page_id = page_id, "No insights permission, click data unavailable");
                break;
            }
        }
    }
    debug!(page_id = page_id, with_clicks, "Post insights collected");

    info!(
        page_id = page_id,
        posts = posts.len(),
        fan_count = fan_count,
        "Collected page metrics"
    );

    Ok(PageMetrics {
        page_id: page_id.to_string(),
        name,
        industry: options.industry.clone(),
        period_days: options.period_days,
        fan_count,
        fan_growth,
        profile,
        posts,
    })
}
