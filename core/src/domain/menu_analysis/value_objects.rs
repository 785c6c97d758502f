use crate::domain::menu_analysis::entities::Preferences;

#[derive(Debug, Clone)]
pub struct AnalyzeTextInput {
    pub text: String,
    pub preferences: Preferences,
}

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image: ImageUpload,
    pub preferences: Preferences,
}

/// Raw image bytes as uploaded, with the client-declared MIME type.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl ImageUpload {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
