use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::{MealImage, NutritionReport},
        value_objects::AnalyzeMealInput,
    },
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends the prompt and the image, returning the model's raw text reply.
    fn generate_with_image(
        &self,
        prompt: String,
        image: MealImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for meal analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait MealAnalysisService: Send + Sync {
    fn analyze_meal(
        &self,
        input: AnalyzeMealInput,
    ) -> impl Future<Output = Result<NutritionReport, CoreError>> + Send;
}
