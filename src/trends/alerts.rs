// Change alerts between two consecutive analysis runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::history::ScoreSnapshot;
use crate::triggers::TriggerStatus;

/// Minimum score swings (points) that raise an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub overall_delta: f64,
    pub category_delta: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            overall_delta: 10.0,
            category_delta: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "INFO",
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Critical => "CRITICAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INFO" => Some(AlertSeverity::Info),
            "WARNING" => Some(AlertSeverity::Warning),
            "CRITICAL" => Some(AlertSeverity::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    OverallScoreChange,
    CategoryScoreChange,
    TriggerDegraded,
    TriggerImproved,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::OverallScoreChange => "OVERALL_SCORE_CHANGE",
            AlertKind::CategoryScoreChange => "CATEGORY_SCORE_CHANGE",
            AlertKind::TriggerDegraded => "TRIGGER_DEGRADED",
            AlertKind::TriggerImproved => "TRIGGER_IMPROVED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OVERALL_SCORE_CHANGE" => Some(AlertKind::OverallScoreChange),
            "CATEGORY_SCORE_CHANGE" => Some(AlertKind::CategoryScoreChange),
            "TRIGGER_DEGRADED" => Some(AlertKind::TriggerDegraded),
            "TRIGGER_IMPROVED" => Some(AlertKind::TriggerImproved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub page_id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    /// "OVERALL", a category name, or a trigger id
    pub subject: String,
    pub previous: String,
    pub current: String,
    pub message: String,
    pub detected_at: DateTime<Utc>,
}

/// Severity of a score swing: rises are INFO, drops WARNING, drops of twice
/// the threshold CRITICAL. None below the threshold.
fn score_change_severity(delta: f64, threshold: f64) -> Option<AlertSeverity> {
    match delta {
        d if d <= -2.0 * threshold => Some(AlertSeverity::Critical),
        d if d <= -threshold => Some(AlertSeverity::Warning),
        d if d >= threshold => Some(AlertSeverity::Info),
        _ => None,
    }
}

/// Compare two consecutive snapshots of the same page.
pub fn detect_alerts(
    previous: &ScoreSnapshot,
    current: &ScoreSnapshot,
    thresholds: &AlertThresholds,
    detected_at: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let alert = |kind, severity, subject: String, was: String, now: String, message| Alert {
        page_id: current.page_id.clone(),
        kind,
        severity,
        subject,
        previous: was,
        current: now,
        message,
        detected_at,
    };

    let delta = current.overall_score - previous.overall_score;
    if let Some(severity) = score_change_severity(delta, thresholds.overall_delta) {
        let verb = if delta > 0.0 { "rose" } else { "dropped" };
        alerts.push(alert(
            AlertKind::OverallScoreChange,
            severity,
            "OVERALL".to_string(),
            format!("{:.1}", previous.overall_score),
            format!("{:.1}", current.overall_score),
            format!(
                "Overall score {verb} {:.1} points ({:.1} -> {:.1})",
                delta.abs(),
                previous.overall_score,
                current.overall_score
            ),
        ));
    }

    for (category, &now) in &current.category_scores {
        let Some(&before) = previous.category_scores.get(category) else {
            continue;
        };
        let delta = now - before;
        if let Some(severity) = score_change_severity(delta, thresholds.category_delta) {
            let verb = if delta > 0.0 { "rose" } else { "dropped" };
            alerts.push(alert(
                AlertKind::CategoryScoreChange,
                severity,
                category.as_str().to_string(),
                format!("{before:.1}"),
                format!("{now:.1}"),
                format!(
                    "{} score {verb} {:.1} points ({before:.1} -> {now:.1})",
                    category.label(),
                    delta.abs()
                ),
            ));
        }
    }

    for (trigger_id, &now) in &current.trigger_statuses {
        let Some(&before) = previous.trigger_statuses.get(trigger_id) else {
            continue;
        };
        let (kind, severity, verb) = match now.rank().cmp(&before.rank()) {
            std::cmp::Ordering::Less => {
                let severity = if now == TriggerStatus::Critical {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                };
                (AlertKind::TriggerDegraded, severity, "degraded")
            }
            std::cmp::Ordering::Greater => {
                (AlertKind::TriggerImproved, AlertSeverity::Info, "improved")
            }
            std::cmp::Ordering::Equal => continue,
        };
        alerts.push(alert(
            kind,
            severity,
            trigger_id.clone(),
            before.as_str().to_string(),
            now.as_str().to_string(),
            format!("{trigger_id} {verb} from {before} to {now}"),
        ));
    }

    alerts
}
