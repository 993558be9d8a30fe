// Industry benchmarks — baseline values several triggers compare against.
//
// These are compile-time constants. A page whose industry is unknown (or
// unset) is compared against the `default` entry.

use serde::Serialize;

/// Ideal content mix, in percent of posts. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentMix {
    pub photo: f64,
    pub video: f64,
    pub link: f64,
    pub status: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryBenchmark {
    pub code: &'static str,
    pub name: &'static str,
    /// Average interactions per post as a percentage of fans
    pub avg_engagement_rate: f64,
    /// Typical split of interactions, in percent (sums to 100)
    pub reaction_pct: f64,
    pub comment_pct: f64,
    pub share_pct: f64,
    pub ideal_mix: ContentMix,
    pub ideal_posts_per_week: f64,
}

pub const DEFAULT_CODE: &str = "default";

pub const BENCHMARKS: &[IndustryBenchmark] = &[
    IndustryBenchmark {
        code: DEFAULT_CODE,
        name: "All industries",
        avg_engagement_rate: 0.15,
        reaction_pct: 80.0,
        comment_pct: 12.0,
        share_pct: 8.0,
        ideal_mix: ContentMix { photo: 45.0, video: 25.0, link: 15.0, status: 15.0 },
        ideal_posts_per_week: 5.0,
    },
    IndustryBenchmark {
        code: "retail",
        name: "Retail & e-commerce",
        avg_engagement_rate: 0.10,
        reaction_pct: 82.0,
        comment_pct: 10.0,
        share_pct: 8.0,
        ideal_mix: ContentMix { photo: 50.0, video: 25.0, link: 20.0, status: 5.0 },
        ideal_posts_per_week: 7.0,
    },
    IndustryBenchmark {
        code: "restaurant",
        name: "Food & restaurants",
        avg_engagement_rate: 0.20,
        reaction_pct: 78.0,
        comment_pct: 15.0,
        share_pct: 7.0,
        ideal_mix: ContentMix { photo: 60.0, video: 25.0, link: 5.0, status: 10.0 },
        ideal_posts_per_week: 5.0,
    },
    IndustryBenchmark {
        code: "media",
        name: "Media & publishing",
        avg_engagement_rate: 0.08,
        reaction_pct: 70.0,
        comment_pct: 15.0,
        share_pct: 15.0,
        ideal_mix: ContentMix { photo: 25.0, video: 25.0, link: 45.0, status: 5.0 },
        ideal_posts_per_week: 14.0,
    },
    IndustryBenchmark {
        code: "education",
        name: "Education",
        avg_engagement_rate: 0.25,
        reaction_pct: 80.0,
        comment_pct: 10.0,
        share_pct: 10.0,
        ideal_mix: ContentMix { photo: 45.0, video: 20.0, link: 20.0, status: 15.0 },
        ideal_posts_per_week: 4.0,
    },
    IndustryBenchmark {
        code: "health",
        name: "Health & fitness",
        avg_engagement_rate: 0.18,
        reaction_pct: 79.0,
        comment_pct: 11.0,
        share_pct: 10.0,
        ideal_mix: ContentMix { photo: 40.0, video: 35.0, link: 10.0, status: 15.0 },
        ideal_posts_per_week: 5.0,
    },
    IndustryBenchmark {
        code: "nonprofit",
        name: "Nonprofits",
        avg_engagement_rate: 0.30,
        reaction_pct: 72.0,
        comment_pct: 10.0,
        share_pct: 18.0,
        ideal_mix: ContentMix { photo: 45.0, video: 25.0, link: 15.0, status: 15.0 },
        ideal_posts_per_week: 4.0,
    },
    IndustryBenchmark {
        code: "services",
        name: "Professional services",
        avg_engagement_rate: 0.12,
        reaction_pct: 84.0,
        comment_pct: 9.0,
        share_pct: 7.0,
        ideal_mix: ContentMix { photo: 40.0, video: 15.0, link: 30.0, status: 15.0 },
        ideal_posts_per_week: 3.0,
    },
    IndustryBenchmark {
        code: "travel",
        name: "Travel & hospitality",
        avg_engagement_rate: 0.16,
        reaction_pct: 81.0,
        comment_pct: 9.0,
        share_pct: 10.0,
        ideal_mix: ContentMix { photo: 55.0, video: 30.0, link: 10.0, status: 5.0 },
        ideal_posts_per_week: 4.0,
    },
];

/// Look up a benchmark by industry code (case-insensitive).
/// Unknown or missing codes get the default entry.
pub fn find_benchmark(code: Option<&str>) -> &'static IndustryBenchmark {
    code.and_then(|c| {
        let c = c.trim();
        BENCHMARKS.iter().find(|b| b.code.eq_ignore_ascii_case(c))
    })
    .unwrap_or(&BENCHMARKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(BENCHMARKS[0].code, DEFAULT_CODE);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(find_benchmark(Some("Restaurant")).code, "restaurant");
        assert_eq!(find_benchmark(Some(" media ")).code, "media");
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        assert_eq!(find_benchmark(Some("space-mining")).code, DEFAULT_CODE);
        assert_eq!(find_benchmark(None).code, DEFAULT_CODE);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        for b in BENCHMARKS {
            let mix = b.ideal_mix.photo + b.ideal_mix.video + b.ideal_mix.link + b.ideal_mix.status;
            assert!((mix - 100.0).abs() < 1e-9, "{} mix sums to {mix}", b.code);
            let split = b.reaction_pct + b.comment_pct + b.share_pct;
            assert!((split - 100.0).abs() < 1e-9, "{} split sums to {split}", b.code);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = BENCHMARKS.iter().map(|b| b.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), BENCHMARKS.len());
    }
}
