use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    server::{api_entities::response::Response, app_state::AppState},
    upload::ACCEPTED_EXTENSIONS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    pub gemini_model: String,
    pub api_key_configured: bool,
    pub accepted_file_types: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get public configuration",
    description = "Reports the model in use and whether meal analysis is available",
    responses(
        (status = 200, body = ConfigResponse)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Response<ConfigResponse> {
    Response::OK(ConfigResponse {
        gemini_model: state.args.llm.gemini_model.clone(),
        api_key_configured: state.service.is_llm_configured(),
        accepted_file_types: ACCEPTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
    })
}
