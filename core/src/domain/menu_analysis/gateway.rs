use crate::domain::menu_analysis::{
    entities::{AnalyzeResult, GatewayError, MenuItem, Preferences},
    extraction::{decode_analysis, decode_menu_items, looks_like_missing_image, parse_reply},
    ports::LLMClient,
    prompts::{
        IMAGE_ANALYZE_REQUEST, IMAGE_CAPTION_PROMPT, IMAGE_CAPTION_REQUEST,
        caption_analysis_prompt, caption_to_json_prompt, menu_extraction_prompt,
    },
    value_objects::ImageUpload,
};

/// Typed operations over an [`LLMClient`]: prompt construction, JSON
/// extraction and decoding. Every method is one upstream attempt.
#[derive(Debug, Clone)]
pub struct MenuGateway<L> {
    client: L,
}

impl<L: LLMClient> MenuGateway<L> {
    pub fn new(client: L) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Extracts menu items from OCR text.
    pub async fn menu_items_from_text(&self, text: &str) -> Result<Vec<MenuItem>, GatewayError> {
        let content = self
            .client
            .generate_with_text(Some(menu_extraction_prompt()), text.to_string())
            .await?;
        Ok(decode_menu_items(&parse_reply(&content)?))
    }

    /// Asks the vision model for a short description of the image.
    pub async fn caption_image(&self, image: &ImageUpload) -> Result<String, GatewayError> {
        let content = self
            .client
            .generate_with_image(
                IMAGE_CAPTION_PROMPT.to_string(),
                IMAGE_CAPTION_REQUEST.to_string(),
                image,
            )
            .await?;
        reject_missing_image(&content)?;
        Ok(content)
    }

    /// Produces items, risk level, hits and suggestions from a caption in a
    /// single prompt.
    pub async fn analyze_caption(
        &self,
        caption: &str,
        preferences: &Preferences,
    ) -> Result<AnalyzeResult, GatewayError> {
        let content = self
            .client
            .generate_with_text(None, caption_analysis_prompt(caption, preferences))
            .await?;
        decode_analysis(&parse_reply(&content)?).ok_or(GatewayError::Unparsable)
    }

    /// Converts a caption into structured menu items.
    pub async fn menu_items_from_caption(
        &self,
        caption: &str,
    ) -> Result<Vec<MenuItem>, GatewayError> {
        let content = self
            .client
            .generate_with_text(None, caption_to_json_prompt(caption))
            .await?;
        Ok(decode_menu_items(&parse_reply(&content)?))
    }

    /// Sends the image again and extracts menu items directly.
    pub async fn menu_items_from_image(
        &self,
        image: &ImageUpload,
        prompt: String,
    ) -> Result<Vec<MenuItem>, GatewayError> {
        let content = self
            .client
            .generate_with_image(prompt, IMAGE_ANALYZE_REQUEST.to_string(), image)
            .await?;
        reject_missing_image(&content)?;
        Ok(decode_menu_items(&parse_reply(&content)?))
    }
}

fn reject_missing_image(content: &str) -> Result<(), GatewayError> {
    if looks_like_missing_image(content) {
        tracing::warn!("Vision model reply suggests the image was not received");
        return Err(GatewayError::MissingImage);
    }
    Ok(())
}
