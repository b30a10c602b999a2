use crate::application::http::{
    meal_analysis::router::MealAnalysisApiDoc, server::config::__path_get_config,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SnapCalorie API"
    ),
    paths(get_config),
    nest(
        (path = "/api", api = MealAnalysisApiDoc),
    )
)]
pub struct ApiDoc;
