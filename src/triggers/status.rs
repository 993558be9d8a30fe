// Status bands and category labels shared by every trigger.

use serde::{Deserialize, Serialize};

/// Status band derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerStatus {
    Excellent,
    Good,
    NeedsImprovement,
    Critical,
}

impl TriggerStatus {
    /// Map a score to its band. Lower bounds are inclusive (85 is EXCELLENT,
    /// 40 is NEEDS_IMPROVEMENT). Scores outside 0-100 use the same
    /// inequalities; NaN fails every comparison and lands in CRITICAL.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => TriggerStatus::Excellent,
            s if s >= 70.0 => TriggerStatus::Good,
            s if s >= 40.0 => TriggerStatus::NeedsImprovement,
            _ => TriggerStatus::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerStatus::Excellent => "EXCELLENT",
            TriggerStatus::Good => "GOOD",
            TriggerStatus::NeedsImprovement => "NEEDS_IMPROVEMENT",
            TriggerStatus::Critical => "CRITICAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TriggerStatus::Excellent => "Excellent",
            TriggerStatus::Good => "Good",
            TriggerStatus::NeedsImprovement => "Needs improvement",
            TriggerStatus::Critical => "Critical",
        }
    }

    /// 0 (CRITICAL) through 3 (EXCELLENT); used to detect degradations.
    pub fn rank(&self) -> u8 {
        match self {
            TriggerStatus::Critical => 0,
            TriggerStatus::NeedsImprovement => 1,
            TriggerStatus::Good => 2,
            TriggerStatus::Excellent => 3,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EXCELLENT" => Some(TriggerStatus::Excellent),
            "GOOD" => Some(TriggerStatus::Good),
            "NEEDS_IMPROVEMENT" => Some(TriggerStatus::NeedsImprovement),
            "CRITICAL" => Some(TriggerStatus::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriggerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed set of trigger categories and their weight in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerCategory {
    Basic,
    Content,
    Technical,
    Timing,
    Sharing,
    PageSettings,
}

impl TriggerCategory {
    pub const ALL: [TriggerCategory; 6] = [
        TriggerCategory::Basic,
        TriggerCategory::Content,
        TriggerCategory::Technical,
        TriggerCategory::Timing,
        TriggerCategory::Sharing,
        TriggerCategory::PageSettings,
    ];

    /// Weight in the overall score. The six weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            TriggerCategory::Basic => 0.35,
            TriggerCategory::Content => 0.30,
            TriggerCategory::Technical => 0.20,
            TriggerCategory::Timing => 0.05,
            TriggerCategory::Sharing => 0.05,
            TriggerCategory::PageSettings => 0.05,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Basic => "BASIC",
            TriggerCategory::Content => "CONTENT",
            TriggerCategory::Technical => "TECHNICAL",
            TriggerCategory::Timing => "TIMING",
            TriggerCategory::Sharing => "SHARING",
            TriggerCategory::PageSettings => "PAGE_SETTINGS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TriggerCategory::Basic => "Engagement basics",
            TriggerCategory::Content => "Content strategy",
            TriggerCategory::Technical => "Post formatting",
            TriggerCategory::Timing => "Posting schedule",
            TriggerCategory::Sharing => "Reach & sharing",
            TriggerCategory::PageSettings => "Page settings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = TriggerCategory::ALL.iter().map(|c| c.weight()).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&TriggerStatus::NeedsImprovement).unwrap();
        assert_eq!(json, "\"NEEDS_IMPROVEMENT\"");
        let json = serde_json::to_string(&TriggerCategory::PageSettings).unwrap();
        assert_eq!(json, "\"PAGE_SETTINGS\"");
    }

    #[test]
    fn test_display_matches_as_str() {
        for status in [
            TriggerStatus::Excellent,
            TriggerStatus::Good,
            TriggerStatus::NeedsImprovement,
            TriggerStatus::Critical,
        ] {
            assert_eq!(status.to_string(), status.as_str());
        }
        for category in TriggerCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_rank_follows_score_order() {
        let ranks: Vec<u8> = [10.0, 50.0, 75.0, 90.0]
            .iter()
            .map(|s| TriggerStatus::from_score(*s).rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(TriggerStatus::parse("GOOD"), Some(TriggerStatus::Good));
        assert_eq!(TriggerStatus::parse("good"), None);
        assert_eq!(
            TriggerCategory::parse("PAGE_SETTINGS"),
            Some(TriggerCategory::PageSettings)
        );
        assert_eq!(TriggerCategory::parse("OTHER"), None);
    }
}
