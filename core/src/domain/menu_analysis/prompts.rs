use crate::domain::menu_analysis::entities::Preferences;

const MENU_ITEMS_SCHEMA: &str = r#"{"menu_items":[{"name":"...", "ingredients":["..."]}]}"#;

pub const IMAGE_CAPTION_PROMPT: &str = "Describe the dishes and ingredients in the food image. \
     Keep the response short and factual.";

pub const IMAGE_CAPTION_REQUEST: &str = "Describe the food image.";

pub const IMAGE_ANALYZE_REQUEST: &str = "Analyze the food image.";

/// System prompt for extracting menu items from OCR text.
pub fn menu_extraction_prompt() -> String {
    format!(
        "You extract menu items and their ingredients from OCR text. \
         Return JSON only with the schema: {MENU_ITEMS_SCHEMA}"
    )
}

/// Default system prompt for direct image → menu items extraction.
pub fn default_image_prompt() -> String {
    format!(
        "Identify the dishes and ingredients in the food photo. \
         Return JSON only with the schema: {MENU_ITEMS_SCHEMA}"
    )
}

/// User prompt converting an image caption into menu items.
pub fn caption_to_json_prompt(caption: &str) -> String {
    format!(
        "Convert the image description into JSON only. \
         Schema: {MENU_ITEMS_SCHEMA}. \
         Image description: {caption}"
    )
}

/// User prompt asking for a complete analysis of a caption in one round trip.
pub fn caption_analysis_prompt(caption: &str, preferences: &Preferences) -> String {
    format!(
        "You are a food safety assistant. \
         Given the image description and user preferences, extract dishes and ingredients, \
         determine risk_level (LOW|MEDIUM|HIGH), list hits with term/reason/level, \
         and give concise suggestions. \
         Return JSON only with the schema: \
         {{\"menu_items\":[{{\"name\":\"...\", \"ingredients\":[\"...\"]}}], \
         \"risk_level\":\"LOW|MEDIUM|HIGH\", \
         \"hits\":[{{\"term\":\"...\",\"reason\":\"Allergy match|Preference match|Health goal conflict\",\
         \"level\":\"LOW|MEDIUM|HIGH\"}}], \
         \"suggestions\":[\"...\"]}}. \
         Image description: {caption}. \
         Allergies: {allergies}. Dislikes: {dislikes}. Health goals: {goals}.",
        allergies = join_or_none(&preferences.allergies),
        dislikes = join_or_none(&preferences.dislikes),
        goals = join_or_none(&preferences.health_goals),
    )
}

fn join_or_none(terms: &[String]) -> String {
    if terms.is_empty() {
        "none".to_string()
    } else {
        terms.join(", ")
    }
}
