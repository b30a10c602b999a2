pub mod entities;
pub mod services;

pub use entities::*;
pub use services::build_report_view;
