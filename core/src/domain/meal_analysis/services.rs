use tracing::{debug, error, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    meal_analysis::{
        entities::NutritionReport,
        parser::parse_nutrition_report,
        ports::{LLMClient, MealAnalysisService},
        prompt::MEAL_ANALYSIS_PROMPT,
        value_objects::AnalyzeMealInput,
    },
};

/// Allowed drift between the model's total and the sum of its items.
const TOTALS_TOLERANCE: f64 = 1.0;

impl<LLM> MealAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(
        skip(self, input),
        fields(
            mime_type = input.image.mime_type(),
            size_bytes = input.image.data.len(),
            width = input.image.width,
            height = input.image.height,
        )
    )]
    async fn analyze_meal(&self, input: AnalyzeMealInput) -> Result<NutritionReport, CoreError> {
        let llm_client = self.llm_client.as_ref().ok_or_else(|| {
            warn!("Meal analysis requested without a configured API key");
            CoreError::MissingApiKey
        })?;

        let raw_response = llm_client
            .generate_with_image(MEAL_ANALYSIS_PROMPT.to_string(), input.image)
            .await?;

        debug!(response_len = raw_response.len(), "Received LLM response");

        let report = parse_nutrition_report(&raw_response).map_err(|e| {
            error!("Failed to parse LLM response: {}", e);
            CoreError::MalformedResponse(e)
        })?;

        let items_sum = report.items_sum();
        if !report.items.is_empty() && !items_sum.approx_eq(&report.total, TOTALS_TOLERANCE) {
            warn!(
                reported = ?report.total,
                summed = ?items_sum,
                "Model total differs from the sum of its items"
            );
        }

        Ok(report)
    }
}
