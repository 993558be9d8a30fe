use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::graph::DEFAULT_GRAPH_API_URL;
use crate::metrics::DEFAULT_PERIOD_DAYS;
use crate::pipeline::collect::DEFAULT_MAX_POSTS;
use crate::pipeline::CollectOptions;
use crate::trends::AlertThresholds;

/// Default number of competitor pages fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded at startup via
/// dotenvy.
#[derive(Clone)]
pub struct Config {
    /// Graph API base URL, including the version segment
    pub graph_api_url: String,
    /// Page access token. Only needed for live fetches.
    pub access_token: String,
    pub db_path: String,
    /// Industry code used when the command line gives none
    pub industry: Option<String>,
    pub period_days: u32,
    pub max_posts: usize,
    pub concurrency: usize,
    pub alert_thresholds: AlertThresholds,
}

/// Read a numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default; only live fetches need the access token.
    pub fn load() -> Result<Self> {
        let defaults = AlertThresholds::default();
        let config = Self {
            graph_api_url: env::var("GRAPH_API_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPH_API_URL.to_string()),
            access_token: env::var("PAGE_ACCESS_TOKEN").unwrap_or_default(),
            db_path: env::var("PAGEGRADE_DB_PATH")
                .unwrap_or_else(|_| "./pagegrade.db".to_string()),
            industry: env::var("PAGEGRADE_INDUSTRY").ok().filter(|s| !s.is_empty()),
            period_days: parse_var("PAGEGRADE_PERIOD_DAYS", DEFAULT_PERIOD_DAYS)?,
            max_posts: parse_var("PAGEGRADE_MAX_POSTS", DEFAULT_MAX_POSTS)?,
            concurrency: parse_var("PAGEGRADE_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            alert_thresholds: AlertThresholds {
                overall_delta: parse_var("PAGEGRADE_ALERT_OVERALL_DELTA", defaults.overall_delta)?,
                category_delta: parse_var(
                    "PAGEGRADE_ALERT_CATEGORY_DELTA",
                    defaults.category_delta,
                )?,
            },
        };

        if config.period_days == 0 {
            anyhow::bail!("PAGEGRADE_PERIOD_DAYS must be at least 1");
        }
        Ok(config)
    }

    /// Check that a page access token is configured.
    /// Call this before any operation that fetches pages live.
    pub fn require_access_token(&self) -> Result<()> {
        if self.access_token.is_empty() {
            anyhow::bail!(
                "PAGE_ACCESS_TOKEN not set. Add it to your .env file, or pass a\n\
                 metrics snapshot (.json) instead of a page id.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Collection options, with `industry` overriding the configured one.
    pub fn collect_options(&self, industry: Option<&str>) -> CollectOptions {
        CollectOptions {
            industry: industry.map(str::to_string).or_else(|| self.industry.clone()),
            period_days: self.period_days,
            max_posts: self.max_posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            graph_api_url: DEFAULT_GRAPH_API_URL.to_string(),
            access_token: String::new(),
            db_path: ":memory:".to_string(),
            industry: Some("RETAIL".to_string()),
            period_days: 30,
            max_posts: 50,
            concurrency: 2,
            alert_thresholds: AlertThresholds::default(),
        }
    }

    #[test]
    fn test_require_access_token() {
        let mut c = config();
        let err = c.require_access_token().unwrap_err();
        assert!(err.to_string().contains("PAGE_ACCESS_TOKEN"));
        c.access_token = "token".to_string();
        assert!(c.require_access_token().is_ok());
    }

    #[test]
    fn test_collect_options_industry_override() {
        let c = config();
        assert_eq!(c.collect_options(None).industry.as_deref(), Some("RETAIL"));
        assert_eq!(c.collect_options(Some("FOOD")).industry.as_deref(), Some("FOOD"));
        assert_eq!(c.collect_options(None).period_days, 30);
    }

    #[test]
    fn test_parse_var_reports_bad_numbers() {
        // A name nothing else sets, so tests don't race on the environment
        let name = "PAGEGRADE_TEST_PARSE_VAR_UNIQUE";
        assert_eq!(parse_var(name, 7u32).unwrap(), 7);
        env::set_var(name, "twelve");
        let err = parse_var(name, 7u32).unwrap_err();
        assert!(err.to_string().contains(name));
        env::set_var(name, " 12 ");
        assert_eq!(parse_var(name, 7u32).unwrap(), 12);
        env::remove_var(name);
    }
}
