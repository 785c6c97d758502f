use crate::domain::menu_analysis::{gateway::MenuGateway, ports::LLMClient};

#[derive(Debug, Clone)]
pub struct Service<LLM> {
    pub(crate) gateway: MenuGateway<LLM>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM) -> Self {
        Self {
            gateway: MenuGateway::new(llm_client),
        }
    }
}
