use super::handlers::analyze_meal::{__path_analyze_meal, analyze_meal};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_meal))]
pub struct MealAnalysisApiDoc;

pub fn meal_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/meal-analysis", state.args.server.root_path),
            post(analyze_meal),
        )
        // photos are forwarded as-is, whatever their size
        .layer(DefaultBodyLimit::disable())
}
