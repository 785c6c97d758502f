use menuscan_core::domain::menu_analysis::entities::Preferences;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeTextRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
    #[serde(default)]
    pub preferences: Preferences,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("OCR text is empty.".into());
        return Err(error);
    }
    Ok(())
}

/// Multipart form accepted by the image endpoint, for the OpenAPI document.
#[derive(Debug, ToSchema)]
pub struct AnalyzeImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// JSON-encoded preferences; malformed JSON is treated as no preferences.
    #[schema(example = r#"{"allergies":["peanut"],"dislikes":[],"health_goals":["low_sugar"]}"#)]
    pub preferences: Option<String>,
}
