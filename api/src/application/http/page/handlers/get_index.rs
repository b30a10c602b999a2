use axum::{extract::State, response::Html};

use crate::application::http::{
    page::views::{MISSING_KEY_BANNER, PageContext, render_page},
    server::app_state::AppState,
};

/// Context shared by every render of the page.
pub fn base_context(state: &AppState) -> PageContext {
    PageContext {
        root_path: state.root_path().to_string(),
        config_error: (!state.service.is_llm_configured()).then(|| MISSING_KEY_BANNER.to_string()),
        ..PageContext::default()
    }
}

pub async fn get_index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&base_context(&state)))
}
