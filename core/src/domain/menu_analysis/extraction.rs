//! Lenient decoding of model replies into menu items and analyses.

use serde_json::Value;

use crate::domain::menu_analysis::entities::{
    AnalyzeResult, GatewayError, MenuItem, RiskHit, RiskLevel, RiskReason,
};

const MISSING_IMAGE_MARKERS: &[&str] = &[
    "don't see an image",
    "do not see an image",
    "can't see the image",
    "cannot see the image",
    "unable to see the image",
    "please upload the image",
    "no image provided",
    "no image was provided",
];

/// Returns the span from the first `{` to the last `}`.
///
/// Prose around the payload is tolerated; several concatenated objects come
/// back as one (invalid) span and fail later at parse time.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extracts and parses the JSON object embedded in a model reply.
pub fn parse_reply(content: &str) -> Result<Value, GatewayError> {
    let block = extract_json_block(content).ok_or(GatewayError::MissingJson)?;
    serde_json::from_str(block).map_err(|e| {
        tracing::debug!("Model reply JSON did not parse: {}", e);
        GatewayError::Unparsable
    })
}

/// Reads `menu_items` from a decoded reply. Non-object input yields no items.
pub fn decode_menu_items(data: &Value) -> Vec<MenuItem> {
    let Some(entries) = data.get("menu_items").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            let name = entry.get("name").map(stringify).unwrap_or_default();
            let ingredients: Vec<String> = entry
                .get("ingredients")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(stringify).collect())
                .unwrap_or_default();
            MenuItem::new(&name, ingredients)
        })
        .collect()
}

/// Decodes a complete analysis produced by the model.
///
/// Only a non-object reply is rejected; every field falls back to a safe
/// default and malformed hits or suggestions are dropped individually.
pub fn decode_analysis(data: &Value) -> Option<AnalyzeResult> {
    if !data.is_object() {
        return None;
    }

    let risk_level = data
        .get("risk_level")
        .map(stringify)
        .and_then(|raw| RiskLevel::parse(&raw))
        .unwrap_or(RiskLevel::Low);

    let hits = data
        .get("hits")
        .and_then(Value::as_array)
        .map(|raw_hits| raw_hits.iter().filter_map(decode_hit).collect())
        .unwrap_or_default();

    let suggestions = data
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(Value::as_str)
                .filter(|suggestion| !suggestion.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(AnalyzeResult {
        menu_items: decode_menu_items(data),
        risk_level,
        hits,
        suggestions,
    })
}

fn decode_hit(raw: &Value) -> Option<RiskHit> {
    if !raw.is_object() {
        return None;
    }

    let term = raw.get("term").map(stringify).unwrap_or_default();
    let term = term.trim();
    let level = RiskLevel::parse(&raw.get("level").map(stringify).unwrap_or_default())?;
    if term.is_empty() {
        return None;
    }

    let reason = raw
        .get("reason")
        .map(stringify)
        .unwrap_or_default()
        .trim()
        .to_string();

    Some(RiskHit::new(term, RiskReason::from(reason), level))
}

/// Renders a JSON value as text: strings verbatim, `null` as empty, anything
/// else as its JSON encoding.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Detects replies in which the model admits it never received the image.
pub fn looks_like_missing_image(text: &str) -> bool {
    let normalized = text.to_lowercase().replace('\u{2019}', "'");
    MISSING_IMAGE_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let reply = "Sure! Here it is:\n```json\n{\"menu_items\": []}\n```\nEnjoy.";
        assert_eq!(extract_json_block(reply), Some("{\"menu_items\": []}"));
    }

    #[test]
    fn extraction_is_identity_on_clean_json() {
        let clean = r#"{"menu_items":[{"name":"Tea","ingredients":[]}]}"#;
        assert_eq!(extract_json_block(clean), Some(clean));
    }

    #[test]
    fn extraction_fails_without_braces() {
        assert_eq!(extract_json_block("no json here"), None);
        assert_eq!(extract_json_block("} backwards {"), None);
        assert_eq!(extract_json_block("{ unterminated"), None);
    }

    #[test]
    fn concatenated_objects_fail_to_parse() {
        let reply = r#"{"a": 1} and {"b": 2}"#;
        assert_eq!(extract_json_block(reply), Some(reply));
        assert_eq!(parse_reply(reply), Err(GatewayError::Unparsable));
        assert_eq!(parse_reply("nothing"), Err(GatewayError::MissingJson));
    }

    #[test]
    fn decodes_menu_items_leniently() {
        let data = json!({
            "menu_items": [
                {"name": " Pad Thai ", "ingredients": ["peanut", " ", 3, null]},
                {"name": "   ", "ingredients": ["ignored"]},
                {"name": "Soup", "ingredients": "tomato"},
                "not an object",
                {"ingredients": ["nameless"]}
            ]
        });

        let items = decode_menu_items(&data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Pad Thai");
        assert_eq!(items[0].ingredients, vec!["peanut", "3"]);
        assert_eq!(items[1].name, "Soup");
        assert!(items[1].ingredients.is_empty());
    }

    #[test]
    fn non_object_yields_no_items() {
        assert!(decode_menu_items(&json!([1, 2, 3])).is_empty());
        assert!(decode_menu_items(&json!({"menu_items": "none"})).is_empty());
        assert!(decode_menu_items(&json!({})).is_empty());
    }

    #[test]
    fn decodes_full_analysis() {
        let data = json!({
            "menu_items": [{"name": "Pancakes", "ingredients": ["honey", "butter"]}],
            "risk_level": "medium",
            "hits": [
                {"term": "honey", "reason": "Health goal conflict", "level": "low"},
                {"term": "", "reason": "Allergy match", "level": "HIGH"},
                {"term": "butter", "level": "EXTREME"},
                {"term": "gluten", "level": "MEDIUM"},
                42
            ],
            "suggestions": ["Skip the honey.", "  ", 7]
        });

        let result = decode_analysis(&data).unwrap();
        assert_eq!(result.menu_items.len(), 1);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(
            result.hits,
            vec![
                RiskHit::new("honey", RiskReason::HealthGoalConflict, RiskLevel::Low),
                RiskHit::new("gluten", RiskReason::Other(String::new()), RiskLevel::Medium),
            ]
        );
        assert_eq!(result.suggestions, vec!["Skip the honey."]);
    }

    #[test]
    fn analysis_defaults_unknown_risk_level() {
        let result = decode_analysis(&json!({"risk_level": "catastrophic"})).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.menu_items.is_empty());
        assert!(result.hits.is_empty());
        assert!(result.suggestions.is_empty());

        assert!(decode_analysis(&json!(["not", "an", "object"])).is_none());
    }

    #[test]
    fn analysis_round_trips_through_json() {
        let original = AnalyzeResult {
            menu_items: vec![MenuItem::new("Pad Thai", ["peanut", "shrimp"]).unwrap()],
            risk_level: RiskLevel::High,
            hits: vec![RiskHit::new(
                "peanut",
                RiskReason::AllergyMatch,
                RiskLevel::High,
            )],
            suggestions: vec!["Avoid items containing 'peanut'.".to_string()],
        };

        let encoded = serde_json::to_value(&original).unwrap();
        assert_eq!(decode_analysis(&encoded), Some(original));
    }

    #[test]
    fn detects_missing_image_replies() {
        assert!(looks_like_missing_image("I DON'T SEE AN IMAGE attached."));
        assert!(looks_like_missing_image("Sorry, I can\u{2019}t see the image."));
        assert!(looks_like_missing_image("No image was provided in your message"));
        assert!(!looks_like_missing_image("A bowl of ramen with egg and scallions."));
    }
}
