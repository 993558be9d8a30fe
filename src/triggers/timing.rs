// TIMING triggers — posting cadence.

use super::{
    DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput, INSUFFICIENT,
};

pub const MIN_POSTS: usize = 10;
/// Shorter windows can't tell a weekly rhythm from noise.
pub const MIN_PERIOD_DAYS: u32 = 7;

// --- Dimensions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    TooLow,
    Low,
    Optimal,
    TooHigh,
}

impl Frequency {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r < 0.5 => Frequency::TooLow,
            r if r < 0.8 => Frequency::Low,
            r if r <= 1.5 => Frequency::Optimal,
            _ => Frequency::TooHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::TooLow => "TOO_LOW",
            Frequency::Low => "LOW",
            Frequency::Optimal => "OPTIMAL",
            Frequency::TooHigh => "TOO_HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Consistent,
    Irregular,
    Erratic,
}

impl Consistency {
    pub fn from_gap_cv(cv: f64) -> Self {
        match cv {
            c if c <= 0.5 => Consistency::Consistent,
            c if c <= 1.0 => Consistency::Irregular,
            _ => Consistency::Erratic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Consistency::Consistent => "CONSISTENT",
            Consistency::Irregular => "IRREGULAR",
            Consistency::Erratic => "ERRATIC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekendPresence {
    Absent,
    Low,
    Active,
}

impl WeekendPresence {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p <= 0.0 => WeekendPresence::Absent,
            p if p < 15.0 => WeekendPresence::Low,
            _ => WeekendPresence::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekendPresence::Absent => "NONE",
            WeekendPresence::Low => "LOW",
            WeekendPresence::Active => "ACTIVE",
        }
    }
}

// --- Classifiers ---

/// TIME_001: posts per week relative to the industry's ideal cadence.
pub fn posting_frequency_key(period_days: u32, posts_per_week: f64, ideal_per_week: f64) -> String {
    if period_days < MIN_PERIOD_DAYS {
        return INSUFFICIENT.to_string();
    }
    let ratio = if ideal_per_week > 0.0 {
        posts_per_week / ideal_per_week
    } else {
        0.0
    };
    Frequency::from_ratio(ratio).as_str().to_string()
}

/// TIME_002: coefficient of variation of the gaps between posts.
pub fn consistency_key(total_posts: usize, gap_cv: Option<f64>) -> String {
    match gap_cv {
        Some(cv) if total_posts >= MIN_POSTS => Consistency::from_gap_cv(cv).as_str().to_string(),
        _ => INSUFFICIENT.to_string(),
    }
}

/// TIME_003: share of posts published on Saturday or Sunday (UTC).
pub fn weekend_key(total_posts: usize, weekend_pct: f64) -> String {
    if total_posts < MIN_POSTS {
        return INSUFFICIENT.to_string();
    }
    WeekendPresence::from_pct(weekend_pct).as_str().to_string()
}

// --- Definitions ---

pub static POSTING_FREQUENCY: TriggerDefinition = TriggerDefinition {
    id: "TIME_001",
    name: "Posting frequency",
    category: TriggerCategory::Timing,
    intro: "How often you post compared with the cadence that works for your industry.",
    requirement: "an analysis window of at least 7 days",
    outcomes: &[
        Outcome {
            key: "TOO_LOW",
            score: 25.0,
            recommendation: "You post {posts_per_week} times a week. {industry} pages do best with about {ideal_posts}. Plan a content calendar to post more regularly.",
        },
        Outcome {
            key: "LOW",
            score: 55.0,
            recommendation: "You post {posts_per_week} times a week, a bit under the {ideal_posts} that works for {industry} pages.",
        },
        Outcome {
            key: "OPTIMAL",
            score: 92.0,
            recommendation: "You post {posts_per_week} times a week, in line with the {ideal_posts} that works for {industry} pages.",
        },
        Outcome {
            key: "TOO_HIGH",
            score: 60.0,
            recommendation: "You post {posts_per_week} times a week, well above the {ideal_posts} typical for {industry}. Posting less but better often lifts engagement per post.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "The analysis window is too short to measure posting frequency.",
        },
    ],
};

pub static CONSISTENCY: TriggerDefinition = TriggerDefinition {
    id: "TIME_002",
    name: "Posting consistency",
    category: TriggerCategory::Timing,
    intro: "Regular posting keeps your page in your fans' feeds.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "CONSISTENT",
            score: 90.0,
            recommendation: "You post at a steady rhythm. Your audience knows when to expect you.",
        },
        Outcome {
            key: "IRREGULAR",
            score: 62.0,
            recommendation: "Your posting is uneven, with bursts and gaps. Schedule posts in advance to smooth it out.",
        },
        Outcome {
            key: "ERRATIC",
            score: 35.0,
            recommendation: "Your posting is erratic, with long silences between bursts. Pick fixed posting days and stick to them.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so posting consistency can be measured.",
        },
    ],
};

pub static WEEKEND: TriggerDefinition = TriggerDefinition {
    id: "TIME_003",
    name: "Weekend presence",
    category: TriggerCategory::Timing,
    intro: "Many people browse more on weekends, when fewer pages post.",
    requirement: "at least 10 posts",
    outcomes: &[
        Outcome {
            key: "NONE",
            score: 45.0,
            recommendation: "You never post on weekends. Schedule a post for Saturday or Sunday to reach people when competition is lower.",
        },
        Outcome {
            key: "LOW",
            score: 65.0,
            recommendation: "Only {weekend_pct}% of your posts go out on weekends. Try scheduling a few more.",
        },
        Outcome {
            key: "ACTIVE",
            score: 88.0,
            recommendation: "{weekend_pct}% of your posts go out on weekends. You reach people when they have time to browse.",
        },
        Outcome {
            key: INSUFFICIENT,
            score: 50.0,
            recommendation: "Publish at least 10 posts so weekend activity can be assessed.",
        },
    ],
};

// --- Triggers ---

pub struct PostingFrequency;

impl Trigger for PostingFrequency {
    fn definition(&self) -> &'static TriggerDefinition {
        &POSTING_FREQUENCY
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        posting_frequency_key(
            input.summary.period_days,
            input.summary.posts_per_week,
            input.benchmark.ideal_posts_per_week,
        )
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("period_days", input.summary.period_days),
            DebugInput::num("posts_per_week", input.summary.posts_per_week),
            DebugInput::num("ideal_posts_per_week", input.benchmark.ideal_posts_per_week),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![
            ("posts_per_week", format!("{:.1}", input.summary.posts_per_week)),
            ("ideal_posts", format!("{:.0}", input.benchmark.ideal_posts_per_week)),
            ("industry", input.benchmark.name.to_string()),
        ]
    }
}

pub struct PostingConsistency;

impl Trigger for PostingConsistency {
    fn definition(&self) -> &'static TriggerDefinition {
        &CONSISTENCY
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        consistency_key(input.summary.total_posts, input.summary.gap_cv)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::opt("gap_cv", input.summary.gap_cv),
        ]
    }
}

pub struct WeekendPresenceTrigger;

impl Trigger for WeekendPresenceTrigger {
    fn definition(&self) -> &'static TriggerDefinition {
        &WEEKEND
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        weekend_key(input.summary.total_posts, input.summary.weekend_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![
            DebugInput::new("total_posts", input.summary.total_posts),
            DebugInput::num("weekend_pct", input.summary.weekend_pct),
        ]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        vec![("weekend_pct", format!("{:.0}", input.summary.weekend_pct))]
    }
}
