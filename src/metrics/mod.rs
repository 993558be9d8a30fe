// Normalized page metrics — the input snapshot for one analysis run.
//
// Everything the trigger catalog reads comes from these types. They can be
// built by the Graph API collector (see `pipeline::collect`) or loaded from a
// JSON snapshot on disk, which keeps the evaluation core testable without
// network access.

pub mod summary;
pub mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default analysis window in days.
pub const DEFAULT_PERIOD_DAYS: u32 = 90;

/// The broad format of a post, derived from its attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Photo,
    Video,
    Link,
    Status,
}

impl PostKind {
    pub const ALL: [PostKind; 4] = [
        PostKind::Photo,
        PostKind::Video,
        PostKind::Link,
        PostKind::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Photo => "photo",
            PostKind::Video => "video",
            PostKind::Link => "link",
            PostKind::Status => "status",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-type reaction counts for a single post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionBreakdown {
    pub like: u64,
    pub love: u64,
    pub care: u64,
    pub haha: u64,
    pub wow: u64,
    pub sad: u64,
    pub angry: u64,
}

impl ReactionBreakdown {
    pub fn total(&self) -> u64 {
        self.like + self.love + self.care + self.haha + self.wow + self.sad + self.angry
    }
}

/// Dimensions of one attached image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Lowercase file extension when known ("jpg", "png", ...)
    #[serde(default)]
    pub format: Option<String>,
}

/// One post with its engagement figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMetrics {
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub kind: PostKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reactions: ReactionBreakdown,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    /// Link clicks — None when the insights permission wasn't granted
    #[serde(default)]
    pub clicks: Option<u64>,
    #[serde(default)]
    pub impressions: Option<u64>,
    /// Whether the post was boosted — None when promotion data is unavailable
    #[serde(default)]
    pub promoted: Option<bool>,
    #[serde(default)]
    pub images: Vec<ImageInfo>,
}

impl PostMetrics {
    /// Reactions + comments + shares.
    pub fn interactions(&self) -> u64 {
        self.reactions.total() + self.comments + self.shares
    }
}

/// Public profile fields of the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageProfile {
    pub about: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub has_cover_photo: bool,
    pub has_profile_picture: bool,
    /// Type of the configured call-to-action button, if any
    pub cta_button: Option<String>,
    /// Vanity username (the custom part of the page URL)
    pub username: Option<String>,
}

impl PageProfile {
    /// Number of completeness fields checked by `filled_fields`.
    pub const COMPLETENESS_FIELDS: usize = 7;

    /// Count of filled profile fields out of `COMPLETENESS_FIELDS`.
    pub fn filled_fields(&self) -> usize {
        let text_fields = [
            &self.about,
            &self.website,
            &self.phone,
            &self.location,
            &self.category,
        ];
        let filled_text = text_fields
            .iter()
            .filter(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
            .count();
        filled_text + usize::from(self.has_cover_photo) + usize::from(self.has_profile_picture)
    }
}

/// Fan (follower) count at the start and end of the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanGrowth {
    pub start: u64,
    pub end: u64,
}

impl FanGrowth {
    /// Percentage change over the window. None when the start count is zero.
    pub fn growth_pct(&self) -> Option<f64> {
        if self.start == 0 {
            return None;
        }
        Some((self.end as f64 - self.start as f64) / self.start as f64 * 100.0)
    }
}

/// The complete snapshot for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetrics {
    pub page_id: String,
    pub name: String,
    /// Industry code used to select a benchmark (falls back to default)
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_period_days")]
    pub period_days: u32,
    #[serde(default)]
    pub fan_count: Option<u64>,
    #[serde(default)]
    pub fan_growth: Option<FanGrowth>,
    /// None when the profile could not be read
    #[serde(default)]
    pub profile: Option<PageProfile>,
    #[serde(default)]
    pub posts: Vec<PostMetrics>,
}

fn default_period_days() -> u32 {
    DEFAULT_PERIOD_DAYS
}

impl PageMetrics {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metrics file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse metrics file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_total() {
        let r = ReactionBreakdown {
            like: 10,
            love: 2,
            angry: 1,
            ..Default::default()
        };
        assert_eq!(r.total(), 13);
    }

    #[test]
    fn test_fan_growth_pct() {
        let g = FanGrowth {
            start: 1000,
            end: 1050,
        };
        assert!((g.growth_pct().unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(FanGrowth { start: 0, end: 10 }.growth_pct(), None);
    }

    #[test]
    fn test_profile_filled_fields_ignores_blank_strings() {
        let profile = PageProfile {
            about: Some("  ".to_string()),
            website: Some("https://example.com".to_string()),
            has_cover_photo: true,
            ..Default::default()
        };
        assert_eq!(profile.filled_fields(), 2);
    }

    #[test]
    fn test_minimal_snapshot_deserializes_with_defaults() {
        let json = r#"{"page_id": "123", "name": "Cafe"}"#;
        let metrics: PageMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.period_days, DEFAULT_PERIOD_DAYS);
        assert!(metrics.posts.is_empty());
        assert!(metrics.profile.is_none());
    }
}
