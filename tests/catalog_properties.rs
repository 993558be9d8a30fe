// Property tests for the trigger catalog: whatever the page looks like,
// every trigger lands on a key its table knows, scores stay in range, and
// the fallback result is the same neutral value everywhere.

use pagegrade::benchmarks::{find_benchmark, BENCHMARKS};
use pagegrade::metrics::summary::{KindMix, PageSummary};
use pagegrade::metrics::PostKind;
use pagegrade::scoring::{category_scores, overall_score};
use pagegrade::triggers::catalog::{evaluate_all, find};
use pagegrade::triggers::{
    basic, TriggerInput, TriggerStatus, FALLBACK_SCORE, INSUFFICIENT, UNAVAILABLE,
};
use proptest::prelude::*;

fn pct() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

fn kind() -> impl Strategy<Value = Option<PostKind>> {
    prop::option::of(prop::sample::select(PostKind::ALL.to_vec()))
}

prop_compose! {
    fn engagement()(
        total_posts in 0usize..60,
        total_reactions in 0u64..500,
        total_comments in 0u64..200,
        total_shares in 0u64..100,
        likes_pct in pct(),
        angry_pct in pct(),
        comment_pct in pct(),
        share_pct in pct(),
        avg_comments in 0.0..20.0f64,
        engagement_rate in prop::option::of(0.0..2.0f64),
        top_to_avg_ratio in 0.0..6.0f64,
        engagement_change_pct in prop::option::of(-80.0..80.0f64),
    ) -> PageSummary {
        PageSummary {
            total_posts,
            total_reactions,
            total_comments,
            total_shares,
            total_interactions: total_reactions + total_comments + total_shares,
            likes_pct,
            angry_pct,
            comment_pct,
            share_pct,
            avg_comments,
            engagement_rate,
            top_to_avg_ratio,
            engagement_change_pct,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn page_summary()(
        base in engagement(),
        photo_pct in pct(),
        best_kind in kind(),
        most_used_kind in kind(),
        promoted_pct in prop::option::of(pct()),
        images in (0usize..10, pct(), pct()),
        text in (0.0..800.0f64, 0usize..10, pct(), pct()),
        emojis in (0.0..8.0f64, pct(), pct(), 0.0..6.0f64),
        timing in (0u32..120, 0.0..20.0f64, prop::option::of(0.0..3.0f64), pct()),
        links in (0usize..10, prop::option::of(0.0..5.0f64)),
        page in (
            prop::option::of(-10.0..10.0f64),
            prop::option::of(pct()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
        ),
    ) -> PageSummary {
        PageSummary {
            kind_mix: KindMix {
                photo: photo_pct,
                video: 100.0 - photo_pct,
                link: 0.0,
                status: 0.0,
            },
            best_kind,
            most_used_kind,
            promoted_pct,
            total_images: images.0,
            recommended_resolution_pct: images.1,
            recommended_aspect_pct: images.2,
            avg_text_length: text.0,
            long_posts: text.1,
            structured_long_pct: text.2,
            list_long_pct: text.3,
            avg_emojis: emojis.0,
            no_emoji_pct: emojis.1,
            too_many_emoji_pct: emojis.2,
            avg_hashtags: emojis.3,
            period_days: timing.0,
            posts_per_week: timing.1,
            gap_cv: timing.2,
            weekend_pct: timing.3,
            link_posts: links.0,
            link_ctr: links.1,
            fan_growth_pct: page.0,
            profile_completeness_pct: page.1,
            has_cta: page.2,
            has_username: page.3,
            ..base
        }
    }
}

fn benchmark_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(BENCHMARKS.iter().map(|b| b.code).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn status_is_monotonic_in_score(a in -20.0..120.0f64, b in -20.0..120.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let (low, high) = (TriggerStatus::from_score(low), TriggerStatus::from_score(high));
        prop_assert!(low.rank() <= high.rank());
    }

    #[test]
    fn every_key_has_a_table_entry(summary in page_summary(), code in benchmark_code()) {
        let input = TriggerInput { summary: &summary, benchmark: find_benchmark(Some(code)) };
        let evals = evaluate_all(&input);
        prop_assert!(evals.is_ok(), "unknown key: {:?}", evals.err());
        for eval in evals.unwrap() {
            let def = find(&eval.trigger_id).unwrap().definition();
            let key = eval.category_key.clone().unwrap_or_default();
            prop_assert!(def.keys().any(|k| k == key), "{} produced {}", eval.trigger_id, key);
            prop_assert!((0.0..=100.0).contains(&eval.score));
            prop_assert_eq!(eval.status, TriggerStatus::from_score(eval.score));
        }
    }

    #[test]
    fn fallbacks_are_always_neutral(summary in page_summary()) {
        let input = TriggerInput { summary: &summary, benchmark: find_benchmark(None) };
        for eval in evaluate_all(&input).unwrap() {
            let key = eval.category_key.as_deref().unwrap_or_default();
            let sentinel = key == INSUFFICIENT || key == UNAVAILABLE;
            prop_assert_eq!(eval.is_fallback(), sentinel);
            if sentinel {
                prop_assert_eq!(eval.score, FALLBACK_SCORE);
                prop_assert_eq!(eval.status, TriggerStatus::NeedsImprovement);
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic(summary in page_summary()) {
        let input = TriggerInput { summary: &summary, benchmark: find_benchmark(None) };
        let first = evaluate_all(&input).unwrap();
        let second = evaluate_all(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn overall_score_stays_between_category_extremes(summary in page_summary()) {
        let input = TriggerInput { summary: &summary, benchmark: find_benchmark(None) };
        let categories = category_scores(&evaluate_all(&input).unwrap());
        let overall = overall_score(&categories);
        let min = categories.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
        let max = categories.iter().map(|c| c.score).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(overall >= min - 1e-9 && overall <= max + 1e-9);
    }

    #[test]
    fn small_reaction_samples_short_circuit(
        total in 0u64..basic::MIN_REACTIONS,
        likes in pct(),
        angry in pct(),
    ) {
        prop_assert_eq!(basic::reaction_sentiment_key(total, likes, angry), INSUFFICIENT);
    }
}
