use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    /// Parses a level case-insensitively; anything outside LOW/MEDIUM/HIGH is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a term was flagged.
///
/// Locally computed hits always use one of the three known reasons. Analyses
/// produced by the model may carry free text, kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskReason {
    AllergyMatch,
    PreferenceMatch,
    HealthGoalConflict,
    Other(String),
}

impl RiskReason {
    pub fn as_str(&self) -> &str {
        match self {
            RiskReason::AllergyMatch => "Allergy match",
            RiskReason::PreferenceMatch => "Preference match",
            RiskReason::HealthGoalConflict => "Health goal conflict",
            RiskReason::Other(reason) => reason,
        }
    }
}

impl From<String> for RiskReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Allergy match" => RiskReason::AllergyMatch,
            "Preference match" => RiskReason::PreferenceMatch,
            "Health goal conflict" => RiskReason::HealthGoalConflict,
            _ => RiskReason::Other(value),
        }
    }
}

impl From<RiskReason> for String {
    fn from(value: RiskReason) -> Self {
        match value {
            RiskReason::Other(reason) => reason,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskHit {
    pub term: String,
    #[schema(value_type = String, example = "Allergy match")]
    pub reason: RiskReason,
    pub level: RiskLevel,
}

impl RiskHit {
    pub fn new(term: impl Into<String>, reason: RiskReason, level: RiskLevel) -> Self {
        Self {
            term: term.into(),
            reason,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn level_parse_is_case_insensitive() {
        assert_eq!(RiskLevel::parse("high"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse("Medium"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse("severe"), None);
        assert_eq!(RiskLevel::parse(""), None);
    }

    #[test]
    fn hit_serializes_with_readable_reason() {
        let hit = RiskHit::new("peanut", RiskReason::AllergyMatch, RiskLevel::High);
        let value = serde_json::to_value(&hit).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"term": "peanut", "reason": "Allergy match", "level": "HIGH"})
        );
    }

    #[test]
    fn unknown_reason_text_is_preserved() {
        let hit: RiskHit = serde_json::from_str(
            r#"{"term": "msg", "reason": "Contains additive", "level": "LOW"}"#,
        )
        .unwrap();
        assert_eq!(hit.reason, RiskReason::Other("Contains additive".to_string()));
        assert_eq!(
            serde_json::to_value(&hit).unwrap()["reason"],
            serde_json::json!("Contains additive")
        );
    }
}
