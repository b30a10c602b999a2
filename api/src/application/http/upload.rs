use std::borrow::Cow;

use axum::extract::Multipart;
use snapcalorie_core::domain::meal_analysis::entities::MealImage;
use tracing::{debug, error};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Multipart field carrying the photo on both the page and the JSON API.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Validate)]
pub struct ImageUpload {
    #[validate(custom(function = "validate_image_file_name"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "Uploaded image is empty"))]
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn into_meal_image(self) -> Result<MealImage, ApiError> {
        MealImage::from_bytes(self.data).map_err(ApiError::from)
    }
}

pub fn validate_image_file_name(file_name: &str) -> Result<(), ValidationError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension {
        Some(extension) if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) => Ok(()),
        _ => Err(ValidationError::new("file_type").with_message(Cow::from(format!(
            "Unsupported file type, expected one of: {}",
            ACCEPTED_EXTENSIONS.join(", ")
        )))),
    }
}

/// Reads the `image` field from the form and validates name and size.
pub async fn read_image_upload(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        debug!(file_name = %file_name, size_bytes = data.len(), "Received image upload");

        upload = Some(ImageUpload {
            file_name,
            data: data.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    upload.validate().map_err(validation_error)?;

    Ok(upload)
}

fn validation_error(errors: ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .map(|error| {
            error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| error.code.to_string())
        })
        .collect::<Vec<_>>()
        .join("; ");

    ApiError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_extensions() {
        for name in ["meal.jpg", "meal.JPEG", "photo.final.png", "a.Png"] {
            assert!(validate_image_file_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_rejected_extensions() {
        for name in ["meal.gif", "meal", "", "png", "meal.png.exe"] {
            assert!(validate_image_file_name(name).is_err(), "{}", name);
        }
    }

    #[test]
    fn test_empty_upload_is_invalid() {
        let upload = ImageUpload {
            file_name: "meal.png".to_string(),
            data: Vec::new(),
        };
        let err = validation_error(upload.validate().unwrap_err());
        assert_eq!(err, ApiError::BadRequest("Uploaded image is empty".to_string()));
    }
}
