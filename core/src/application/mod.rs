use crate::{
    domain::common::{MenuScanConfig, services::Service},
    infrastructure::llm::ChatLLMClient,
};

pub type MenuScanService = Service<ChatLLMClient>;

pub fn create_service(config: MenuScanConfig) -> Result<MenuScanService, anyhow::Error> {
    let llm_client = ChatLLMClient::new(&config.llm)?;

    if config.llm.has_credential() {
        tracing::info!(
            base_url = %config.llm.base_url,
            text_model = %config.llm.text_model,
            image_model = %config.llm.image_model,
            "Chat completion upstream configured"
        );
    } else {
        tracing::warn!("No upstream API key set; text analysis uses the local parser only");
    }

    Ok(Service::new(llm_client))
}
