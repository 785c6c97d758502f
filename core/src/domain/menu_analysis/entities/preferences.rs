use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dietary preferences supplied with every analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Preferences {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
}

impl Preferences {
    /// Parses the JSON form field sent alongside an uploaded image.
    ///
    /// Blank or malformed input yields empty preferences rather than an error.
    pub fn from_json_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::debug!("Ignoring malformed preferences payload: {}", e);
            Self::default()
        })
    }
}
