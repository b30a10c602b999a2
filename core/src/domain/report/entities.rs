use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_analysis::entities::Quantity;

/// Everything the result page shows for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportView {
    pub metrics: Vec<MetricCard>,
    pub macro_chart: MacroChart,
    pub items: Vec<ItemRow>,
    pub tip: HealthyTip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Carbs, Macro::Fat];

    pub fn label(&self) -> &'static str {
        match self {
            Macro::Protein => "Protein",
            Macro::Carbs => "Carbs",
            Macro::Fat => "Fat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacroChart {
    /// Ordered by descending value.
    pub slices: Vec<MacroSlice>,
}

impl MacroChart {
    /// True when there is nothing to draw (all values zero or negative).
    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(|slice| slice.share <= 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MacroSlice {
    pub category: Macro,
    #[schema(value_type = f64)]
    pub value: Quantity,
    /// Value to one decimal place.
    pub label: String,
    /// Fraction of the donut covered by this slice, in `[0, 1]`.
    pub share: f64,
    /// Fraction of the donut covered by the slices drawn before this one.
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemRow {
    pub name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

impl ItemRow {
    pub fn header(&self) -> String {
        format!("🍽️ {} ({} kcal)", self.name, self.calories)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthyTip {
    GreatProteinSource,
    AddMoreProtein,
}

impl HealthyTip {
    pub fn message(&self) -> &'static str {
        match self {
            HealthyTip::GreatProteinSource => "Great protein source!",
            HealthyTip::AddMoreProtein => "Consider adding more protein next time.",
        }
    }
}
