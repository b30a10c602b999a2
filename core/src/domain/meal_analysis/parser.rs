use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::meal_analysis::entities::{
    NutritionItem, NutritionReport, NutritionTotals, Quantity,
};

/// Opening or closing fence, with the language tag glued to it if any.
static FENCE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*").expect("fence marker pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// Removes every code fence marker and trims surrounding whitespace.
///
/// Applying it twice yields the same text as applying it once.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_MARKER.replace_all(text, "").trim().to_string()
}

/// Sanitizes raw model output and decodes it into a [`NutritionReport`].
pub fn parse_nutrition_report(text: &str) -> Result<NutritionReport, ReportError> {
    let sanitized = strip_code_fences(text);
    let value: Value =
        serde_json::from_str(&sanitized).map_err(|e| ReportError::InvalidJson(e.to_string()))?;

    let root = as_object(&value, "response")?;

    let items = match root.get("items") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_item(entry, &format!("items[{}]", index)))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(ReportError::WrongType {
                field: "items".to_string(),
                expected: "an array",
            });
        }
        None => {
            return Err(ReportError::MissingField {
                field: "items".to_string(),
            });
        }
    };

    let total = root.get("total").ok_or_else(|| ReportError::MissingField {
        field: "total".to_string(),
    })?;
    let total = as_object(total, "total")?;

    Ok(NutritionReport {
        items,
        total: NutritionTotals {
            calories: number(total, "total", "calories")?,
            protein: number(total, "total", "protein")?,
            carbs: number(total, "total", "carbs")?,
            fat: number(total, "total", "fat")?,
        },
    })
}

fn parse_item(value: &Value, path: &str) -> Result<NutritionItem, ReportError> {
    let item = as_object(value, path)?;

    let name = match field(item, path, "name")? {
        Value::String(name) => name.clone(),
        _ => {
            return Err(ReportError::WrongType {
                field: join(path, "name"),
                expected: "a string",
            });
        }
    };

    Ok(NutritionItem {
        name,
        calories: number(item, path, "calories")?,
        protein: number(item, path, "protein")?,
        carbs: number(item, path, "carbs")?,
        fat: number(item, path, "fat")?,
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ReportError> {
    value.as_object().ok_or_else(|| ReportError::WrongType {
        field: path.to_string(),
        expected: "an object",
    })
}

fn field<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, ReportError> {
    object.get(key).ok_or_else(|| ReportError::MissingField {
        field: join(path, key),
    })
}

fn number(object: &Map<String, Value>, path: &str, key: &str) -> Result<Quantity, ReportError> {
    match field(object, path, key)? {
        Value::Number(number) => Quantity::from_number(number),
        _ => None,
    }
    .ok_or_else(|| ReportError::WrongType {
        field: join(path, key),
        expected: "a number",
    })
}

fn join(path: &str, key: &str) -> String {
    format!("{}.{}", path, key)
}
