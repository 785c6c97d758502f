//! Preference matching over a normalized haystack, and reduction of the
//! resulting hits into a risk level and suggestions.

use crate::domain::menu_analysis::{
    entities::{AnalyzeResult, MenuItem, Preferences, RiskHit, RiskLevel, RiskReason},
    normalize::{normalize_term, normalize_text},
};

const NO_CONFLICT_SUGGESTION: &str =
    "No obvious conflicts found. Consider portion size and ingredients.";

/// Keywords that conflict with each supported health goal, checked in order.
const HEALTH_GOAL_KEYWORDS: &[(&str, &[&str])] = &[
    ("low_sugar", &["sugar", "syrup", "honey", "sweet", "糖", "甜"]),
    ("low_salt", &["salt", "sodium", "soy", "酱油", "盐"]),
    ("low_fat", &["oil", "fried", "cream", "butter", "油", "炸", "奶油"]),
];

fn goal_keywords(goal: &str) -> Option<&'static [&'static str]> {
    HEALTH_GOAL_KEYWORDS
        .iter()
        .find(|(key, _)| *key == goal)
        .map(|(_, keywords)| *keywords)
}

/// Concatenates the normalized text, then each item's name and ingredients.
///
/// Ingredients are joined without separators, so a term may match across
/// the boundary of two adjacent ingredients.
pub fn build_haystack(text: &str, items: &[MenuItem]) -> String {
    let mut haystack = normalize_term(&normalize_text(text));
    for item in items {
        haystack.push_str(&normalize_term(&item.name));
        for ingredient in &item.ingredients {
            haystack.push_str(&normalize_term(ingredient));
        }
    }
    haystack
}

/// Flags every preference term whose normalized form occurs in the haystack.
///
/// Allergies come first (HIGH), then dislikes (MEDIUM), then at most one LOW
/// hit per recognised health goal.
pub fn collect_hits(text: &str, items: &[MenuItem], preferences: &Preferences) -> Vec<RiskHit> {
    let haystack = build_haystack(text, items);
    let contains = |term: &str| {
        let needle = normalize_term(term);
        !needle.is_empty() && haystack.contains(&needle)
    };

    let mut hits = Vec::new();

    for term in preferences.allergies.iter().filter(|term| contains(term.as_str())) {
        hits.push(RiskHit::new(
            term.clone(),
            RiskReason::AllergyMatch,
            RiskLevel::High,
        ));
    }

    for term in preferences.dislikes.iter().filter(|term| contains(term.as_str())) {
        hits.push(RiskHit::new(
            term.clone(),
            RiskReason::PreferenceMatch,
            RiskLevel::Medium,
        ));
    }

    for goal in &preferences.health_goals {
        let Some(keywords) = goal_keywords(&normalize_term(goal)) else {
            continue;
        };
        if keywords.iter().any(|keyword| contains(*keyword)) {
            hits.push(RiskHit::new(
                goal.clone(),
                RiskReason::HealthGoalConflict,
                RiskLevel::Low,
            ));
        }
    }

    hits
}

/// Highest level among the hits, or LOW when there are none.
pub fn pick_risk_level(hits: &[RiskHit]) -> RiskLevel {
    hits.iter()
        .map(|hit| hit.level)
        .max()
        .unwrap_or(RiskLevel::Low)
}

/// One suggestion per hit, in hit order; a generic note when nothing matched.
pub fn build_suggestions(hits: &[RiskHit]) -> Vec<String> {
    if hits.is_empty() {
        return vec![NO_CONFLICT_SUGGESTION.to_string()];
    }

    hits.iter()
        .map(|hit| match hit.level {
            RiskLevel::High => format!("Avoid items containing '{}'.", hit.term),
            RiskLevel::Medium => format!("Consider skipping items containing '{}'.", hit.term),
            RiskLevel::Low => format!("Review items for '{}' related concerns.", hit.term),
        })
        .collect()
}

/// Runs matcher and aggregator over the given items.
pub fn assess(text: &str, menu_items: Vec<MenuItem>, preferences: &Preferences) -> AnalyzeResult {
    let hits = collect_hits(text, &menu_items, preferences);
    AnalyzeResult {
        risk_level: pick_risk_level(&hits),
        suggestions: build_suggestions(&hits),
        menu_items,
        hits,
    }
}
