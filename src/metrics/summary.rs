// Page summary — the numeric domain the trigger classifiers read.
//
// Built once per run from a PageMetrics snapshot. Every percentage is on a
// 0-100 scale and empty denominators produce 0.0 (or None where "no data" has
// to stay distinguishable from "zero"), so classifiers never see NaN.

use std::collections::HashMap;

use chrono::{Datelike, Weekday};
use serde::Serialize;

use super::text::TextStats;
use super::{PageMetrics, PostKind};

/// Minimum image width (px) considered sharp on high-density screens.
pub const RECOMMENDED_MIN_WIDTH: u32 = 1080;

/// Recommended height/width range: square (1.0) through portrait 4:5 (1.25).
pub const RECOMMENDED_ASPECT: (f64, f64) = (1.0, 1.25);

/// A format needs at least this many posts before it can be called "best".
const MIN_POSTS_FOR_BEST_KIND: usize = 2;

/// Share of posts per format, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindMix {
    pub photo: f64,
    pub video: f64,
    pub link: f64,
    pub status: f64,
}

impl KindMix {
    pub fn get(&self, kind: PostKind) -> f64 {
        match kind {
            PostKind::Photo => self.photo,
            PostKind::Video => self.video,
            PostKind::Link => self.link,
            PostKind::Status => self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageSummary {
    pub period_days: u32,
    pub total_posts: usize,

    // --- Engagement ---
    pub total_reactions: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_interactions: u64,
    /// "Like" share of all reactions
    pub likes_pct: f64,
    /// "Angry" share of all reactions
    pub angry_pct: f64,
    /// Comments as a share of all interactions
    pub comment_pct: f64,
    /// Shares as a share of all interactions
    pub share_pct: f64,
    pub avg_interactions: f64,
    pub avg_comments: f64,
    /// Average interactions per post relative to fan count, in percent
    pub engagement_rate: Option<f64>,
    /// Best post's interactions divided by the average
    pub top_to_avg_ratio: f64,
    /// Change in average interactions from the earlier half of the window
    /// to the later half, in percent
    pub engagement_change_pct: Option<f64>,

    // --- Content ---
    pub kind_mix: KindMix,
    pub best_kind: Option<PostKind>,
    pub most_used_kind: Option<PostKind>,
    pub promoted_pct: Option<f64>,

    // --- Images ---
    pub total_images: usize,
    pub recommended_resolution_pct: f64,
    pub recommended_aspect_pct: f64,

    // --- Text ---
    pub avg_text_length: f64,
    pub long_posts: usize,
    pub structured_long_pct: f64,
    pub list_long_pct: f64,
    pub avg_emojis: f64,
    pub no_emoji_pct: f64,
    pub too_many_emoji_pct: f64,
    pub avg_hashtags: f64,

    // --- Timing ---
    pub posts_per_week: f64,
    /// Coefficient of variation of the gaps between consecutive posts
    pub gap_cv: Option<f64>,
    pub weekend_pct: f64,

    // --- Sharing ---
    pub link_posts: usize,
    /// Clicks / impressions over link posts that report both, in percent
    pub link_ctr: Option<f64>,

    // --- Page ---
    pub fan_count: Option<u64>,
    pub fan_growth_pct: Option<f64>,
    pub profile_completeness_pct: Option<f64>,
    pub has_cta: Option<bool>,
    pub has_username: Option<bool>,
}

impl PageSummary {
    pub fn from_metrics(metrics: &PageMetrics) -> Self {
        let posts = &metrics.posts;
        let total_posts = posts.len();

        let total_reactions: u64 = posts.iter().map(|p| p.reactions.total()).sum();
        let total_likes: u64 = posts.iter().map(|p| p.reactions.like).sum();
        let total_angry: u64 = posts.iter().map(|p| p.reactions.angry).sum();
        let total_comments: u64 = posts.iter().map(|p| p.comments).sum();
        let total_shares: u64 = posts.iter().map(|p| p.shares).sum();
        let total_interactions = total_reactions + total_comments + total_shares;

        let avg_interactions = ratio(total_interactions as f64, total_posts as f64);
        let max_interactions = posts.iter().map(|p| p.interactions()).max().unwrap_or(0);
        let top_to_avg_ratio = ratio(max_interactions as f64, avg_interactions);

        let engagement_rate = metrics
            .fan_count
            .filter(|&fans| fans > 0)
            .map(|fans| avg_interactions / fans as f64 * 100.0);

        let texts: Vec<TextStats> = posts
            .iter()
            .map(|p| TextStats::from_message(&p.message))
            .collect();
        let long: Vec<&TextStats> = texts.iter().filter(|t| t.is_long()).collect();

        let images: Vec<_> = posts.iter().flat_map(|p| p.images.iter()).collect();
        let sharp_images = images
            .iter()
            .filter(|i| i.width >= RECOMMENDED_MIN_WIDTH)
            .count();
        let well_framed_images = images
            .iter()
            .filter(|i| {
                if i.width == 0 {
                    return false;
                }
                let aspect = i.height as f64 / i.width as f64;
                aspect >= RECOMMENDED_ASPECT.0 && aspect <= RECOMMENDED_ASPECT.1
            })
            .count();

        let weeks = metrics.period_days as f64 / 7.0;
        let weekend_posts = posts
            .iter()
            .filter(|p| matches!(p.created_time.weekday(), Weekday::Sat | Weekday::Sun))
            .count();

        let link_posts: Vec<_> = posts.iter().filter(|p| p.kind == PostKind::Link).collect();
        let link_ctr = {
            let tracked: Vec<(u64, u64)> = link_posts
                .iter()
                .filter_map(|p| Some((p.clicks?, p.impressions?)))
                .collect();
            let impressions: u64 = tracked.iter().map(|(_, i)| i).sum();
            if tracked.is_empty() || impressions == 0 {
                None
            } else {
                let clicks: u64 = tracked.iter().map(|(c, _)| c).sum();
                Some(clicks as f64 / impressions as f64 * 100.0)
            }
        };

        let promoted_known: Vec<bool> = posts.iter().filter_map(|p| p.promoted).collect();
        let promoted_pct = if promoted_known.is_empty() {
            None
        } else {
            let promoted = promoted_known.iter().filter(|&&p| p).count();
            Some(pct(promoted, promoted_known.len()))
        };

        let (best_kind, most_used_kind) = kind_leaders(metrics);

        let profile = metrics.profile.as_ref();

        Self {
            period_days: metrics.period_days,
            total_posts,
            total_reactions,
            total_comments,
            total_shares,
            total_interactions,
            likes_pct: pct_u64(total_likes, total_reactions),
            angry_pct: pct_u64(total_angry, total_reactions),
            comment_pct: pct_u64(total_comments, total_interactions),
            share_pct: pct_u64(total_shares, total_interactions),
            avg_interactions,
            avg_comments: ratio(total_comments as f64, total_posts as f64),
            engagement_rate,
            top_to_avg_ratio,
            engagement_change_pct: engagement_change_pct(metrics),
            kind_mix: kind_mix(metrics),
            best_kind,
            most_used_kind,
            promoted_pct,
            total_images: images.len(),
            recommended_resolution_pct: pct(sharp_images, images.len()),
            recommended_aspect_pct: pct(well_framed_images, images.len()),
            avg_text_length: ratio(
                texts.iter().map(|t| t.chars).sum::<usize>() as f64,
                total_posts as f64,
            ),
            long_posts: long.len(),
            structured_long_pct: pct(long.iter().filter(|t| t.paragraphs >= 2).count(), long.len()),
            list_long_pct: pct(long.iter().filter(|t| t.list_lines > 0).count(), long.len()),
            avg_emojis: ratio(
                texts.iter().map(|t| t.emojis).sum::<usize>() as f64,
                total_posts as f64,
            ),
            no_emoji_pct: pct(texts.iter().filter(|t| t.emojis == 0).count(), total_posts),
            too_many_emoji_pct: pct(
                texts.iter().filter(|t| t.has_too_many_emojis()).count(),
                total_posts,
            ),
            avg_hashtags: ratio(
                texts.iter().map(|t| t.hashtags).sum::<usize>() as f64,
                total_posts as f64,
            ),
            posts_per_week: ratio(total_posts as f64, weeks),
            gap_cv: gap_cv(metrics),
            weekend_pct: pct(weekend_posts, total_posts),
            link_posts: link_posts.len(),
            link_ctr,
            fan_count: metrics.fan_count,
            fan_growth_pct: metrics.fan_growth.and_then(|g| g.growth_pct()),
            profile_completeness_pct: profile.map(|p| {
                pct(p.filled_fields(), super::PageProfile::COMPLETENESS_FIELDS)
            }),
            has_cta: profile.map(|p| p.cta_button.is_some()),
            has_username: profile.map(|p| p.username.as_deref().is_some_and(|u| !u.is_empty())),
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    ratio(part as f64, whole as f64) * 100.0
}

fn pct_u64(part: u64, whole: u64) -> f64 {
    ratio(part as f64, whole as f64) * 100.0
}

fn kind_mix(metrics: &PageMetrics) -> KindMix {
    let total = metrics.posts.len();
    let count = |kind: PostKind| metrics.posts.iter().filter(|p| p.kind == kind).count();
    KindMix {
        photo: pct(count(PostKind::Photo), total),
        video: pct(count(PostKind::Video), total),
        link: pct(count(PostKind::Link), total),
        status: pct(count(PostKind::Status), total),
    }
}

/// (best performing format, most used format).
///
/// Ties are broken by PostKind's declaration order so the result is stable.
fn kind_leaders(metrics: &PageMetrics) -> (Option<PostKind>, Option<PostKind>) {
    let mut by_kind: HashMap<PostKind, (usize, u64)> = HashMap::new();
    for post in &metrics.posts {
        let entry = by_kind.entry(post.kind).or_default();
        entry.0 += 1;
        entry.1 += post.interactions();
    }

    let mut most_used: Option<(PostKind, usize)> = None;
    let mut best: Option<(PostKind, f64)> = None;
    for kind in PostKind::ALL {
        let Some(&(count, interactions)) = by_kind.get(&kind) else {
            continue;
        };
        if most_used.is_none_or(|(_, c)| count > c) {
            most_used = Some((kind, count));
        }
        if count >= MIN_POSTS_FOR_BEST_KIND {
            let avg = interactions as f64 / count as f64;
            if best.is_none_or(|(_, a)| avg > a) {
                best = Some((kind, avg));
            }
        }
    }

    (best.map(|(k, _)| k), most_used.map(|(k, _)| k))
}

/// Compare average interactions of the older half of posts with the newer half.
fn engagement_change_pct(metrics: &PageMetrics) -> Option<f64> {
    if metrics.posts.len() < 4 {
        return None;
    }
    let mut posts: Vec<_> = metrics.posts.iter().collect();
    posts.sort_by_key(|p| p.created_time);

    let (earlier, later) = posts.split_at(posts.len() / 2);
    let avg = |half: &[&super::PostMetrics]| {
        half.iter().map(|p| p.interactions()).sum::<u64>() as f64 / half.len() as f64
    };
    let before = avg(earlier);
    if before <= 0.0 {
        return None;
    }
    Some((avg(later) - before) / before * 100.0)
}

/// Coefficient of variation (stddev / mean) of hours between consecutive posts.
fn gap_cv(metrics: &PageMetrics) -> Option<f64> {
    if metrics.posts.len() < 3 {
        return None;
    }
    let mut times: Vec<_> = metrics.posts.iter().map(|p| p.created_time).collect();
    times.sort();

    let gaps: Vec<f64> = times
        .windows(2)
        .map(|w| (w[1] - w[0]).num_seconds() as f64 / 3600.0)
        .collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if mean <= 0.0 {
        return None;
    }
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
    Some(variance.sqrt() / mean)
}
