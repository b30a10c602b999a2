use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use snapcalorie_core::domain::{
    meal_analysis::{
        entities::NutritionReport, ports::MealAnalysisService, value_objects::AnalyzeMealInput,
    },
    report::{ReportView, build_report_view},
};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    upload::read_image_upload,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealAnalysis {
    pub report: NutritionReport,
    pub view: ReportView,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMealResponse {
    pub data: MealAnalysis,
}

#[utoipa::path(
    post,
    path = "/meal-analysis",
    tag = "meal-analysis",
    summary = "Analyze a meal photo",
    description = "Sends a JPEG or PNG photo (multipart field `image`) to the vision model and returns the nutritional breakdown with its rendered layout",
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, description = "Missing, empty or unsupported image"),
        (status = 502, description = "Model call failed or returned an unusable response"),
        (status = 503, description = "GOOGLE_API_KEY is not configured")
    ),
)]
pub async fn analyze_meal(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeMealResponse>, ApiError> {
    let upload = read_image_upload(&mut multipart).await?;
    let image = upload.into_meal_image()?;

    let report = state
        .service
        .analyze_meal(AnalyzeMealInput { image })
        .await
        .map_err(ApiError::from)?;

    info!(items = report.items.len(), "Meal analyzed");

    let view = build_report_view(&report);

    Ok(Response::OK(AnalyzeMealResponse {
        data: MealAnalysis { report, view },
    }))
}
