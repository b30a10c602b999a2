use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
};
use base64::{Engine as _, engine::general_purpose};
use snapcalorie_core::domain::{
    meal_analysis::{ports::MealAnalysisService, value_objects::AnalyzeMealInput},
    report::{ReportView, build_report_view},
};
use tracing::{info, warn};

use crate::application::http::{
    page::{
        handlers::get_index::base_context,
        views::{AnalysisOutcome, ImagePreview, PageContext, render_page},
    },
    server::{api_entities::api_error::ApiError, app_state::AppState},
    upload::read_image_upload,
};

/// Form target of the "Analyze Meal" button. Always answers with the full
/// page; failures are shown inline next to the button.
pub async fn analyze_meal_page(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let mut context = base_context(&state);

    match analyze(&state, &mut multipart, &mut context).await {
        Ok(view) => {
            info!(items = view.items.len(), "Meal analyzed");
            context.outcome = Some(AnalysisOutcome::Report(Box::new(view)));
            (StatusCode::OK, Html(render_page(&context)))
        }
        Err(e) => {
            warn!(error = %e, "Meal analysis failed");
            let status = e.status_code();
            context.outcome = Some(AnalysisOutcome::Error(e.to_string()));
            (status, Html(render_page(&context)))
        }
    }
}

async fn analyze(
    state: &AppState,
    multipart: &mut Multipart,
    context: &mut PageContext,
) -> Result<ReportView, ApiError> {
    let upload = read_image_upload(multipart).await?;
    let image = upload.into_meal_image()?;

    context.preview = Some(ImagePreview {
        mime_type: image.mime_type().to_string(),
        data_base64: general_purpose::STANDARD.encode(&image.data),
    });

    let report = state
        .service
        .analyze_meal(AnalyzeMealInput { image })
        .await?;

    Ok(build_report_view(&report))
}
