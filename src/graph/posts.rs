// Post fetching — paginated page feed with per-type reaction summaries.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::client::{is_permission_error, GraphClient};
use super::page::InsightsResponse;
use crate::metrics::{ImageInfo, PostKind, PostMetrics, ReactionBreakdown};

/// The API caps page size at 100.
const PAGE_SIZE: usize = 100;

/// Graph timestamps look like `2024-03-01T12:00:00+0000`.
const GRAPH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const REACTION_TYPES: [&str; 7] = ["LIKE", "LOVE", "CARE", "HAHA", "WOW", "SAD", "ANGRY"];

/// Field list for the posts edge. Each reaction type is requested as an
/// aliased summary (`reactions_like`, ...) so one call returns all counts.
fn post_fields() -> String {
    let reactions: Vec<String> = REACTION_TYPES
        .iter()
        .map(|t| {
            format!(
                "reactions.type({t}).limit(0).summary(total_count).as(reactions_{})",
                t.to_lowercase()
            )
        })
        .collect();
    format!(
        "id,created_time,message,status_type,promotion_status,shares,\
         comments.limit(0).summary(total_count),{},\
         attachments{{media_type,media,subattachments{{media}}}}",
        reactions.join(",")
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub data: Vec<RawPost>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryEdge {
    #[serde(default)]
    pub summary: Summary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareCount {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMedia {
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAttachment {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media: Option<RawMedia>,
    #[serde(default)]
    pub subattachments: Option<RawAttachmentList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAttachmentList {
    #[serde(default)]
    pub data: Vec<RawAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub created_time: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status_type: Option<String>,
    #[serde(default)]
    pub promotion_status: Option<String>,
    #[serde(default)]
    pub shares: Option<ShareCount>,
    #[serde(default)]
    pub comments: SummaryEdge,
    #[serde(default)]
    pub attachments: Option<RawAttachmentList>,
    #[serde(default)]
    pub reactions_like: SummaryEdge,
    #[serde(default)]
    pub reactions_love: SummaryEdge,
    #[serde(default)]
    pub reactions_care: SummaryEdge,
    #[serde(default)]
    pub reactions_haha: SummaryEdge,
    #[serde(default)]
    pub reactions_wow: SummaryEdge,
    #[serde(default)]
    pub reactions_sad: SummaryEdge,
    #[serde(default)]
    pub reactions_angry: SummaryEdge,
}

/// Parse a Graph timestamp. RFC 3339 is accepted too, for snapshots written
/// by other tools.
pub fn parse_graph_time(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(s, GRAPH_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("Invalid Graph timestamp: {s}"))
}

/// Attachment type wins; `status_type` is the fallback for posts without
/// attachments metadata.
pub fn post_kind(attachment_type: Option<&str>, status_type: Option<&str>) -> PostKind {
    match attachment_type {
        Some("photo" | "album") => return PostKind::Photo,
        Some("video" | "animated_image_video") => return PostKind::Video,
        Some("link" | "share") => return PostKind::Link,
        _ => {}
    }
    match status_type {
        Some("added_photos") => PostKind::Photo,
        Some("added_video") => PostKind::Video,
        Some("shared_story") => PostKind::Link,
        _ => PostKind::Status,
    }
}

fn image_format(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    (!ext.is_empty() && ext.len() <= 4).then_some(ext)
}

/// Albums repeat their cover as the first subattachment, so an attachment
/// with subattachments contributes only those.
fn collect_images(attachment: &RawAttachment, out: &mut Vec<ImageInfo>) {
    if let Some(subs) = attachment.subattachments.as_ref().filter(|s| !s.data.is_empty()) {
        for sub in &subs.data {
            collect_images(sub, out);
        }
        return;
    }
    if let Some(image) = attachment.media.as_ref().and_then(|m| m.image.as_ref()) {
        out.push(ImageInfo {
            width: image.width,
            height: image.height,
            format: image.src.as_deref().and_then(image_format),
        });
    }
}

/// Promotion states that mean the post was (or is being) boosted.
fn is_promoted(status: &str) -> bool {
    matches!(status, "active" | "extendable" | "finished" | "paused")
}

pub fn map_post(raw: RawPost) -> Result<PostMetrics> {
    let created_time = parse_graph_time(&raw.created_time)?;
    let first_attachment = raw.attachments.as_ref().and_then(|a| a.data.first());
    let kind = post_kind(
        first_attachment.and_then(|a| a.media_type.as_deref()),
        raw.status_type.as_deref(),
    );

    let mut images = Vec::new();
    if kind == PostKind::Photo {
        if let Some(attachments) = &raw.attachments {
            for attachment in &attachments.data {
                collect_images(attachment, &mut images);
            }
        }
    }

    Ok(PostMetrics {
        id: raw.id,
        created_time,
        kind,
        message: raw.message.unwrap_or_default(),
        reactions: ReactionBreakdown {
            like: raw.reactions_like.summary.total_count,
            love: raw.reactions_love.summary.total_count,
            care: raw.reactions_care.summary.total_count,
            haha: raw.reactions_haha.summary.total_count,
            wow: raw.reactions_wow.summary.total_count,
            sad: raw.reactions_sad.summary.total_count,
            angry: raw.reactions_angry.summary.total_count,
        },
        comments: raw.comments.summary.total_count,
        shares: raw.shares.map_or(0, |s| s.count),
        clicks: None,
        impressions: None,
        promoted: raw.promotion_status.as_deref().map(is_promoted),
        images,
    })
}

/// Fetch posts newer than `since`, newest first, up to `max_posts`.
///
/// Posts that fail to map (bad timestamp) are logged and skipped.
pub async fn fetch_posts(
    client: &GraphClient,
    page_id: &str,
    since: DateTime<Utc>,
    max_posts: usize,
) -> Result<Vec<PostMetrics>> {
    let fields = post_fields();
    let limit = max_posts.clamp(1, PAGE_SIZE).to_string();
    let since_ts = since.timestamp().to_string();
    let path = format!("{page_id}/posts");

    let mut posts = Vec::new();
    let mut response: PostsResponse = client
        .get(
            &path,
            &[
                ("fields", fields.as_str()),
                ("limit", limit.as_str()),
                ("since", since_ts.as_str()),
            ],
        )
        .await
        .with_context(|| format!("Failed to fetch posts for {page_id}"))?;

    loop {
        for raw in response.data {
            match map_post(raw) {
                Ok(post) if post.created_time >= since => posts.push(post),
                Ok(_) => {}
                Err(e) => warn!(page_id = page_id, error = %e, "Skipping unreadable post"),
            }
            if posts.len() >= max_posts {
                break;
            }
        }

        let next = response.paging.and_then(|p| p.next);
        match next {
            Some(url) if posts.len() < max_posts => {
                debug!(page_id = page_id, fetched = posts.len(), "Fetching next page of posts");
                response = client
                    .get_url(&url)
                    .await
                    .with_context(|| format!("Failed to fetch more posts for {page_id}"))?;
            }
            _ => break,
        }
    }

    info!(page_id = page_id, count = posts.len(), "Fetched posts");
    Ok(posts)
}

/// Lifetime clicks and impressions for one post. None when the token lacks
/// the insights permission.
pub async fn fetch_post_insights(
    client: &GraphClient,
    post_id: &str,
) -> Result<Option<(u64, u64)>> {
    let path = format!("{post_id}/insights");
    let result: Result<InsightsResponse> = client
        .get(&path, &[("metric", "post_clicks,post_impressions")])
        .await;

    match result {
        Ok(insights) => {
            let clicks = insights.values_of("post_clicks").first().copied();
            let impressions = insights.values_of("post_impressions").first().copied();
            Ok(clicks.zip(impressions))
        }
        Err(e) if is_permission_error(&e) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to fetch insights for post {post_id}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_graph_time() {
        let t = parse_graph_time("2024-03-01T12:30:00+0000").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        let t = parse_graph_time("2024-03-01T14:30:00+0200").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert!(parse_graph_time("2024-03-01T12:30:00Z").is_ok());
        assert!(parse_graph_time("yesterday").is_err());
    }

    #[test]
    fn test_post_kind() {
        assert_eq!(post_kind(Some("album"), None), PostKind::Photo);
        assert_eq!(post_kind(Some("video"), Some("added_photos")), PostKind::Video);
        assert_eq!(post_kind(None, Some("shared_story")), PostKind::Link);
        assert_eq!(post_kind(None, Some("mobile_status_update")), PostKind::Status);
    }

    #[test]
    fn test_image_format() {
        assert_eq!(image_format("https://cdn.example/a/b/photo.JPG?x=1"), Some("jpg".to_string()));
        assert_eq!(image_format("https://cdn.example/a/b/photo"), None);
    }

    #[test]
    fn test_map_post() {
        let json = r#"{
            "id": "42_1",
            "created_time": "2024-03-01T12:00:00+0000",
            "message": "New menu!",
            "status_type": "added_photos",
            "promotion_status": "inactive",
            "shares": {"count": 4},
            "comments": {"data": [], "summary": {"total_count": 7}},
            "reactions_like": {"data": [], "summary": {"total_count": 30}},
            "reactions_angry": {"data": [], "summary": {"total_count": 2}},
            "attachments": {"data": [{
                "media_type": "album",
                "subattachments": {"data": [
                    {"media": {"image": {"width": 1080, "height": 1350, "src": "https://cdn.example/1.jpg"}}},
                    {"media": {"image": {"width": 640, "height": 480, "src": "https://cdn.example/2.png"}}}
                ]}
            }]}
        }"#;
        let post = map_post(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(post.kind, PostKind::Photo);
        assert_eq!(post.reactions.total(), 32);
        assert_eq!(post.comments, 7);
        assert_eq!(post.shares, 4);
        assert_eq!(post.promoted, Some(false));
        assert_eq!(post.images.len(), 2);
        assert_eq!(post.images[1].format.as_deref(), Some("png"));
        assert_eq!(post.interactions(), 43);
    }

    #[test]
    fn test_album_cover_not_counted_twice() {
        let json = r#"{
            "id": "42_2",
            "created_time": "2024-03-02T12:00:00+0000",
            "status_type": "added_photos",
            "attachments": {"data": [{
                "media_type": "album",
                "media": {"image": {"width": 1080, "height": 1350, "src": "https://cdn.example/1.jpg"}},
                "subattachments": {"data": [
                    {"media": {"image": {"width": 1080, "height": 1350, "src": "https://cdn.example/1.jpg"}}},
                    {"media": {"image": {"width": 720, "height": 720, "src": "https://cdn.example/2.jpg"}}}
                ]}
            }]}
        }"#;
        let post = map_post(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(post.images.len(), 2);
        assert_eq!(post.images[1].width, 720);
    }

    #[test]
    fn test_single_photo_uses_attachment_media() {
        let json = r#"{
            "id": "42_3",
            "created_time": "2024-03-03T12:00:00+0000",
            "status_type": "added_photos",
            "attachments": {"data": [{
                "media_type": "photo",
                "media": {"image": {"width": 1200, "height": 1200, "src": "https://cdn.example/3.jpg"}},
                "subattachments": {"data": []}
            }]}
        }"#;
        let post = map_post(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(post.images.len(), 1);
        assert_eq!(post.images[0].width, 1200);
    }

    #[test]
    fn test_post_fields_alias_every_reaction() {
        let fields = post_fields();
        for t in REACTION_TYPES {
            assert!(fields.contains(&format!("as(reactions_{})", t.to_lowercase())));
        }
    }
}
