// PAGE_SETTINGS triggers — profile setup. These read the page profile only,
// so there is no sample-size guard; a missing profile is UNAVAILABLE.

use super::{
    DebugInput, Outcome, Trigger, TriggerCategory, TriggerDefinition, TriggerInput, UNAVAILABLE,
};
use crate::metrics::PageProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Mostly,
    Incomplete,
}

impl Completeness {
    pub fn from_pct(pct: f64) -> Self {
        match pct {
            p if p >= 100.0 => Completeness::Complete,
            p if p >= 60.0 => Completeness::Mostly,
            _ => Completeness::Incomplete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Completeness::Complete => "COMPLETE",
            Completeness::Mostly => "MOSTLY",
            Completeness::Incomplete => "INCOMPLETE",
        }
    }
}

/// PAGE_001
pub fn profile_completeness_key(completeness_pct: Option<f64>) -> String {
    match completeness_pct {
        Some(pct) => Completeness::from_pct(pct).as_str().to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

/// PAGE_002
pub fn cta_key(has_cta: Option<bool>) -> String {
    match has_cta {
        Some(true) => "CONFIGURED".to_string(),
        Some(false) => "MISSING".to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

/// PAGE_003
pub fn username_key(has_username: Option<bool>) -> String {
    match has_username {
        Some(true) => "SET".to_string(),
        Some(false) => "MISSING".to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

pub static PROFILE_COMPLETENESS: TriggerDefinition = TriggerDefinition {
    id: "PAGE_001",
    name: "Profile completeness",
    category: TriggerCategory::PageSettings,
    intro: "A complete profile (description, contact details, images) builds trust with new visitors.",
    requirement: "read access to the page profile",
    outcomes: &[
        Outcome {
            key: "COMPLETE",
            score: 95.0,
            recommendation: "Your profile is complete. Review it every few months to keep details current.",
        },
        Outcome {
            key: "MOSTLY",
            score: 70.0,
            recommendation: "Your profile is {completeness}% complete ({filled} of {total} fields). Fill in the rest so visitors find everything they need.",
        },
        Outcome {
            key: "INCOMPLETE",
            score: 30.0,
            recommendation: "Your profile is only {completeness}% complete ({filled} of {total} fields). Add a description, website, phone, address and cover photo.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "Profile details couldn't be read. Check the page permissions granted to the app.",
        },
    ],
};

pub static CTA_BUTTON: TriggerDefinition = TriggerDefinition {
    id: "PAGE_002",
    name: "Call-to-action button",
    category: TriggerCategory::PageSettings,
    intro: "The action button on your page turns visitors into customers.",
    requirement: "read access to the page profile",
    outcomes: &[
        Outcome {
            key: "CONFIGURED",
            score: 95.0,
            recommendation: "Your page has a call-to-action button. Make sure it points to the action you care about most.",
        },
        Outcome {
            key: "MISSING",
            score: 35.0,
            recommendation: "Your page has no call-to-action button. Add one such as Book now, Shop or Contact us.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "The call-to-action setting couldn't be read.",
        },
    ],
};

pub static USERNAME: TriggerDefinition = TriggerDefinition {
    id: "PAGE_003",
    name: "Custom username",
    category: TriggerCategory::PageSettings,
    intro: "A custom username gives your page a short, memorable address.",
    requirement: "read access to the page profile",
    outcomes: &[
        Outcome {
            key: "SET",
            score: 95.0,
            recommendation: "Your page has a custom username. Use the short address on receipts, signs and business cards.",
        },
        Outcome {
            key: "MISSING",
            score: 40.0,
            recommendation: "Your page has no custom username. Claim one that matches your brand.",
        },
        Outcome {
            key: UNAVAILABLE,
            score: 50.0,
            recommendation: "The page username couldn't be read.",
        },
    ],
};

pub struct ProfileCompleteness;

impl Trigger for ProfileCompleteness {
    fn definition(&self) -> &'static TriggerDefinition {
        &PROFILE_COMPLETENESS
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        profile_completeness_key(input.summary.profile_completeness_pct)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![DebugInput::opt(
            "profile_completeness_pct",
            input.summary.profile_completeness_pct,
        )]
    }

    fn template_vars(&self, input: &TriggerInput<'_>) -> Vec<(&'static str, String)> {
        let pct = input.summary.profile_completeness_pct.unwrap_or(0.0);
        let total = PageProfile::COMPLETENESS_FIELDS;
        let filled = (pct / 100.0 * total as f64).round() as usize;
        vec![
            ("completeness", format!("{pct:.0}")),
            ("filled", filled.to_string()),
            ("total", total.to_string()),
        ]
    }
}

pub struct CtaButton;

impl Trigger for CtaButton {
    fn definition(&self) -> &'static TriggerDefinition {
        &CTA_BUTTON
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        cta_key(input.summary.has_cta)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![DebugInput::new("has_cta", format!("{:?}", input.summary.has_cta))]
    }
}

pub struct Username;

impl Trigger for Username {
    fn definition(&self) -> &'static TriggerDefinition {
        &USERNAME
    }

    fn category_key(&self, input: &TriggerInput<'_>) -> String {
        username_key(input.summary.has_username)
    }

    fn inputs(&self, input: &TriggerInput<'_>) -> Vec<DebugInput> {
        vec![DebugInput::new(
            "has_username",
            format!("{:?}", input.summary.has_username),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_completeness() {
        assert_eq!(profile_completeness_key(None), UNAVAILABLE);
        assert_eq!(profile_completeness_key(Some(100.0)), "COMPLETE");
        assert_eq!(profile_completeness_key(Some(60.0)), "MOSTLY");
        assert_eq!(profile_completeness_key(Some(57.1)), "INCOMPLETE");
    }

    #[test]
    fn test_flags() {
        assert_eq!(cta_key(Some(true)), "CONFIGURED");
        assert_eq!(cta_key(Some(false)), "MISSING");
        assert_eq!(cta_key(None), UNAVAILABLE);
        assert_eq!(username_key(Some(true)), "SET");
        assert_eq!(username_key(None), UNAVAILABLE);
    }
}
