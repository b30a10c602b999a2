use std::sync::Arc;

use snapcalorie_core::application::SnapCalorieService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SnapCalorieService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: SnapCalorieService) -> Self {
        Self { args, service }
    }

    pub fn root_path(&self) -> &str {
        &self.args.server.root_path
    }
}
