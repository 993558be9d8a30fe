// Page profile and fan-growth fetching.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::client::{is_permission_error, GraphClient};
use crate::metrics::{FanGrowth, PageProfile};

const PAGE_FIELDS: &str = "id,name,about,website,phone,single_line_address,category,\
fan_count,username,cover{source},picture{is_silhouette},call_to_actions{type}";

#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub single_line_address: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub fan_count: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub cover: Option<serde_json::Value>,
    #[serde(default)]
    pub picture: Option<RawPicture>,
    #[serde(default)]
    pub call_to_actions: Option<RawList<RawCallToAction>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPicture {
    pub data: RawPictureData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPictureData {
    #[serde(default)]
    pub is_silhouette: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCallToAction {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Basic page identity plus the profile fields the triggers read.
#[derive(Debug, Clone)]
pub struct PageInfo {
    pub id: String,
    pub name: String,
    pub fan_count: Option<u64>,
    pub profile: PageProfile,
}

pub fn map_page(raw: RawPage) -> PageInfo {
    let profile = PageProfile {
        about: raw.about,
        website: raw.website,
        phone: raw.phone,
        location: raw.single_line_address,
        category: raw.category,
        has_cover_photo: raw.cover.is_some(),
        // A silhouette is the placeholder avatar
        has_profile_picture: raw.picture.is_some_and(|p| !p.data.is_silhouette),
        cta_button: raw
            .call_to_actions
            .and_then(|c| c.data.into_iter().next())
            .map(|c| c.kind),
        username: raw.username.filter(|u| !u.is_empty()),
    };
    PageInfo {
        id: raw.id,
        name: raw.name,
        fan_count: raw.fan_count,
        profile,
    }
}

pub async fn fetch_page_profile(client: &GraphClient, page_id: &str) -> Result<PageInfo> {
    let raw: RawPage = client
        .get(page_id, &[("fields", PAGE_FIELDS)])
        .await
        .with_context(|| format!("Failed to fetch page {page_id}"))?;
    info!(page_id = page_id, name = %raw.name, "Fetched page profile");
    Ok(map_page(raw))
}

// -- Insights --

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightMetric {
    pub name: String,
    #[serde(default)]
    pub values: Vec<InsightValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightValue {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl InsightsResponse {
    /// Numeric values of one metric, in response order.
    pub fn values_of(&self, metric: &str) -> Vec<u64> {
        self.data
            .iter()
            .filter(|m| m.name == metric)
            .flat_map(|m| m.values.iter())
            .filter_map(|v| v.value.as_u64())
            .collect()
    }
}

/// First and last daily fan count in the window.
pub fn fan_growth_from_insights(insights: &InsightsResponse) -> Option<FanGrowth> {
    let values = insights.values_of("page_fans");
    match (values.first(), values.last()) {
        (Some(&start), Some(&end)) if values.len() >= 2 => Some(FanGrowth { start, end }),
        _ => None,
    }
}

/// Fan counts at both ends of the window. Missing insights permission
/// yields None instead of an error.
pub async fn fetch_fan_growth(
    client: &GraphClient,
    page_id: &str,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Result<Option<FanGrowth>> {
    let since = since.timestamp().to_string();
    let until = until.timestamp().to_string();
    let path = format!("{page_id}/insights");
    let result: Result<InsightsResponse> = client
        .get(
            &path,
            &[
                ("metric", "page_fans"),
                ("period", "day"),
                ("since", since.as_str()),
                ("until", until.as_str()),
            ],
        )
        .await;

    match result {
        Ok(insights) => Ok(fan_growth_from_insights(&insights)),
        Err(e) if is_permission_error(&e) => {
            warn!(page_id = page_id, "No insights permission, fan growth unavailable");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to fetch fan insights for {page_id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_page_profile() {
        let json = r#"{
            "id": "42",
            "name": "Corner Cafe",
            "about": "Coffee and cake",
            "website": "https://cafe.example",
            "single_line_address": "1 Main St",
            "category": "Cafe",
            "fan_count": 1200,
            "username": "cornercafe",
            "cover": {"source": "https://img.example/cover.jpg", "id": "1"},
            "picture": {"data": {"is_silhouette": false, "url": "x"}},
            "call_to_actions": {"data": [{"type": "BOOK_NOW", "id": "9"}]}
        }"#;
        let info = map_page(serde_json::from_str(json).unwrap());
        assert_eq!(info.fan_count, Some(1200));
        assert_eq!(info.profile.location.as_deref(), Some("1 Main St"));
        assert_eq!(info.profile.cta_button.as_deref(), Some("BOOK_NOW"));
        assert!(info.profile.has_cover_photo);
        assert!(info.profile.has_profile_picture);
        // about, website, location, category, cover, picture (no phone)
        assert_eq!(info.profile.filled_fields(), 6);
    }

    #[test]
    fn test_silhouette_and_missing_cta() {
        let json = r#"{"id": "1", "name": "New Page", "picture": {"data": {"is_silhouette": true}}}"#;
        let info = map_page(serde_json::from_str(json).unwrap());
        assert!(!info.profile.has_profile_picture);
        assert!(info.profile.cta_button.is_none());
        assert!(info.profile.username.is_none());
    }

    #[test]
    fn test_fan_growth_from_insights() {
        let json = r#"{"data": [{"name": "page_fans", "period": "day", "values": [
            {"value": 1000, "end_time": "2024-01-01T08:00:00+0000"},
            {"value": 1010, "end_time": "2024-01-02T08:00:00+0000"},
            {"value": 1050, "end_time": "2024-01-03T08:00:00+0000"}
        ]}]}"#;
        let insights: InsightsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            fan_growth_from_insights(&insights),
            Some(FanGrowth { start: 1000, end: 1050 })
        );

        let single: InsightsResponse = serde_json::from_str(
            r#"{"data": [{"name": "page_fans", "values": [{"value": 5}]}]}"#,
        )
        .unwrap();
        assert_eq!(fan_growth_from_insights(&single), None);
    }
}
