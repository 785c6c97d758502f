use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu_analysis::{
        entities::{AnalyzeResult, GatewayError},
        value_objects::{AnalyzeImageInput, AnalyzeTextInput, ImageUpload},
    },
};

/// LLM Client trait for calling a chat-completion model.
///
/// Each call is a single attempt; implementations never retry.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Whether a credential is configured. Without one every call fails with
    /// [`GatewayError::MissingCredential`] and no request is sent.
    fn is_configured(&self) -> bool;

    fn generate_with_text(
        &self,
        system_prompt: Option<String>,
        prompt: String,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    fn generate_with_image(
        &self,
        system_prompt: String,
        prompt: String,
        image: &ImageUpload,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

/// Service trait for menu analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait MenuAnalysisService: Send + Sync {
    fn analyze_text(
        &self,
        input: AnalyzeTextInput,
    ) -> impl Future<Output = Result<AnalyzeResult, CoreError>> + Send;

    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AnalyzeResult, CoreError>> + Send;

    fn upstream_configured(&self) -> bool;
}
