use tracing::{debug, info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    menu_analysis::{
        entities::{AnalyzeResult, GatewayError, MenuItem, menu_items_to_text},
        naive_parser::naive_items_from_text,
        ports::{LLMClient, MenuAnalysisService},
        prompts::default_image_prompt,
        risk::assess,
        value_objects::{AnalyzeImageInput, AnalyzeTextInput},
    },
};

/// Where the menu items of an image analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemsSource {
    CaptionJson,
    CaptionNaive,
    DirectImage,
}

fn log_soft_failure(stage: &str, error: &GatewayError) {
    match error {
        GatewayError::MissingCredential => debug!(stage, "Skipping model call: {}", error),
        _ => warn!(stage, "Model call failed, falling back: {}", error),
    }
}

impl<LLM> MenuAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[tracing::instrument(skip_all, fields(text_len = input.text.len()))]
    async fn analyze_text(&self, input: AnalyzeTextInput) -> Result<AnalyzeResult, CoreError> {
        if input.text.trim().is_empty() {
            return Err(CoreError::EmptyText);
        }

        let menu_items = match self.gateway.menu_items_from_text(&input.text).await {
            Ok(items) => {
                debug!(count = items.len(), "Menu items extracted by model");
                items
            }
            Err(e) => {
                log_soft_failure("text_to_items", &e);
                naive_items_from_text(&input.text)
            }
        };

        // Matching runs over the original input, not a re-rendering of the items.
        Ok(assess(&input.text, menu_items, &input.preferences))
    }

    #[tracing::instrument(
        skip_all,
        fields(mime_type = %input.image.mime_type, bytes = input.image.data.len())
    )]
    async fn analyze_image(&self, input: AnalyzeImageInput) -> Result<AnalyzeResult, CoreError> {
        if !input.image.is_image() {
            return Err(CoreError::InvalidImageType);
        }
        if input.image.data.is_empty() {
            return Err(CoreError::EmptyImage);
        }
        if !self.gateway.is_configured() {
            return Err(CoreError::MissingCredential);
        }

        let (menu_items, source): (Vec<MenuItem>, ItemsSource) =
            match self.gateway.caption_image(&input.image).await {
                Ok(caption) => {
                    match self
                        .gateway
                        .analyze_caption(&caption, &input.preferences)
                        .await
                    {
                        Ok(analysis) => {
                            info!("Image analysed from caption by the model");
                            return Ok(analysis);
                        }
                        Err(e) => log_soft_failure("caption_to_analysis", &e),
                    }

                    match self.gateway.menu_items_from_caption(&caption).await {
                        Ok(items) => (items, ItemsSource::CaptionJson),
                        Err(e) => {
                            log_soft_failure("caption_to_items", &e);
                            (naive_items_from_text(&caption), ItemsSource::CaptionNaive)
                        }
                    }
                }
                Err(caption_error) => {
                    log_soft_failure("caption", &caption_error);
                    let items = self
                        .gateway
                        .menu_items_from_image(&input.image, default_image_prompt())
                        .await
                        .map_err(|e| {
                            warn!("Image analysis cascade exhausted: {}", e);
                            CoreError::ImageAnalysisFailed(e.to_string())
                        })?;
                    (items, ItemsSource::DirectImage)
                }
            };

        info!(?source, count = menu_items.len(), "Menu items obtained from image");

        let text = menu_items_to_text(&menu_items);
        Ok(assess(&text, menu_items, &input.preferences))
    }

    fn upstream_configured(&self) -> bool {
        self.gateway.is_configured()
    }
}
