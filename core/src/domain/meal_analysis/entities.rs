use std::{fmt, io::Cursor, ops::Add};

use image::ImageReader;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// A nutrient amount exactly as the model wrote it.
///
/// `40` and `40.0` carry the same value but display differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Integer(i64),
    Decimal(f64),
}

impl Quantity {
    pub fn from_number(number: &Number) -> Option<Self> {
        number
            .as_i64()
            .map(Quantity::Integer)
            .or_else(|| number.as_f64().map(Quantity::Decimal))
    }

    pub fn value(&self) -> f64 {
        match *self {
            Quantity::Integer(value) => value as f64,
            Quantity::Decimal(value) => value,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Integer(0)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Integer(value)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Decimal(value)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, other: Quantity) -> Quantity {
        match (self, other) {
            (Quantity::Integer(a), Quantity::Integer(b)) => a
                .checked_add(b)
                .map(Quantity::Integer)
                .unwrap_or(Quantity::Decimal(a as f64 + b as f64)),
            _ => Quantity::Decimal(self.value() + other.value()),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Quantity::Integer(value) => write!(f, "{}", value),
            // keep the decimal point the model sent
            Quantity::Decimal(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{:.1}", value)
            }
            Quantity::Decimal(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Quantity::Integer(value) => serializer.serialize_i64(value),
            Quantity::Decimal(value) => serializer.serialize_f64(value),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = Number::deserialize(deserializer)?;
        Quantity::from_number(&number)
            .ok_or_else(|| serde::de::Error::custom("quantity must be a finite number"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionItem {
    pub name: String,
    #[schema(value_type = f64)]
    pub calories: Quantity,
    #[schema(value_type = f64)]
    pub protein: Quantity,
    #[schema(value_type = f64)]
    pub carbs: Quantity,
    #[schema(value_type = f64)]
    pub fat: Quantity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionTotals {
    #[schema(value_type = f64)]
    pub calories: Quantity,
    #[schema(value_type = f64)]
    pub protein: Quantity,
    #[schema(value_type = f64)]
    pub carbs: Quantity,
    #[schema(value_type = f64)]
    pub fat: Quantity,
}

/// Nutritional breakdown of one meal as reported by the model.
///
/// `total` is the model's own aggregate and is never recomputed from `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionReport {
    pub items: Vec<NutritionItem>,
    pub total: NutritionTotals,
}

impl NutritionTotals {
    pub fn sum_of(items: &[NutritionItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            calories: acc.calories + item.calories,
            protein: acc.protein + item.protein,
            carbs: acc.carbs + item.carbs,
            fat: acc.fat + item.fat,
        })
    }

    /// Field-wise comparison allowing `tolerance` of absolute drift.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let close = |a: Quantity, b: Quantity| (a.value() - b.value()).abs() <= tolerance;

        close(self.calories, other.calories)
            && close(self.protein, other.protein)
            && close(self.carbs, other.carbs)
            && close(self.fat, other.fat)
    }
}

impl NutritionReport {
    pub fn items_sum(&self) -> NutritionTotals {
        NutritionTotals::sum_of(&self.items)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// An uploaded meal photo whose format and header have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl MealImage {
    /// Sniffs the format from the leading bytes and reads the image header.
    ///
    /// Only JPEG and PNG are accepted. No size or resolution limit applies.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidImage("image is empty".to_string()));
        }

        let format = match image::guess_format(&data) {
            Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Ok(image::ImageFormat::Png) => ImageFormat::Png,
            Ok(other) => {
                return Err(CoreError::InvalidImage(format!(
                    "unsupported image format {:?}, expected JPEG or PNG",
                    other
                )));
            }
            Err(_) => {
                return Err(CoreError::InvalidImage(
                    "unrecognized image data, expected JPEG or PNG".to_string(),
                ));
            }
        };

        let (width, height) = ImageReader::with_format(Cursor::new(data.as_slice()), format.into())
            .into_dimensions()
            .map_err(|e| CoreError::InvalidImage(format!("failed to decode image: {}", e)))?;

        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
