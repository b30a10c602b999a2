use crate::domain::meal_analysis::ports::LLMClient;

/// Application service wiring the domain to its adapters.
///
/// The LLM client is absent when no API key was configured; operations that
/// need it fail with `CoreError::MissingApiKey` instead of reaching the network.
#[derive(Clone, Debug)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Option<LLM>,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: Option<LLM>) -> Self {
        Self { llm_client }
    }

    pub fn is_llm_configured(&self) -> bool {
        self.llm_client.is_some()
    }
}
