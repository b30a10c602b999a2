use super::handlers::{analyze_meal_page::analyze_meal_page, get_index::get_index};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

pub fn page_routes(state: AppState) -> Router<AppState> {
    let root_path = state.root_path();

    let router = Router::new()
        .route(&format!("{}/", root_path), get(get_index))
        .route(
            &format!("{}/analyze", root_path),
            post(analyze_meal_page).layer(DefaultBodyLimit::disable()),
        );

    if root_path.is_empty() {
        router
    } else {
        router.route(root_path, get(get_index))
    }
}
