use thiserror::Error;

use crate::domain::meal_analysis::parser::ReportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(#[from] ReportError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
