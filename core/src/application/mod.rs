use reqwest::Url;
use tracing::{info, warn};

use crate::{
    domain::common::{
        LLMConfig, SnapCalorieConfig, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type SnapCalorieService = Service<GeminiLLMClient>;

/// Builds the service from explicit configuration.
///
/// A missing API key is not an error here: the service is still created so
/// the page can render, and analysis calls report the missing key instead.
/// A blank model name or a base URL that is not http(s) is rejected.
pub async fn create_service(config: SnapCalorieConfig) -> Result<SnapCalorieService, CoreError> {
    validate_llm_config(&config.llm)?;

    let llm_client = match config.llm.api_key() {
        Some(api_key) => {
            info!(
                model = %config.llm.gemini_model,
                base_url = %config.llm.gemini_base_url,
                structured_output = config.llm.structured_output,
                "Gemini client configured"
            );
            Some(
                GeminiLLMClient::new(api_key.to_string(), config.llm.gemini_model.clone())
                    .with_base_url(config.llm.gemini_base_url.clone())
                    .with_structured_output(config.llm.structured_output),
            )
        }
        None => {
            warn!("GOOGLE_API_KEY is missing, meal analysis is disabled");
            None
        }
    };

    Ok(Service::new(llm_client))
}

fn validate_llm_config(config: &LLMConfig) -> Result<(), CoreError> {
    if config.gemini_model.trim().is_empty() {
        return Err(CoreError::InvalidConfiguration(
            "Gemini model name is empty".to_string(),
        ));
    }

    let base_url = Url::parse(&config.gemini_base_url).map_err(|e| {
        CoreError::InvalidConfiguration(format!(
            "invalid Gemini base URL {:?}: {}",
            config.gemini_base_url, e
        ))
    })?;

    match base_url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(CoreError::InvalidConfiguration(format!(
            "Gemini base URL must use http or https, got {}",
            scheme
        ))),
    }
}
