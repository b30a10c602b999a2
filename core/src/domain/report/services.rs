use crate::domain::{
    meal_analysis::entities::{NutritionReport, NutritionTotals, Quantity},
    report::entities::{
        HealthyTip, ItemRow, Macro, MacroChart, MacroSlice, MetricCard, ReportView,
    },
};

/// Grams of protein above which the meal counts as a good protein source.
pub const PROTEIN_TIP_THRESHOLD: f64 = 30.0;

/// Builds the result layout for a report. Pure; never fails.
pub fn build_report_view(report: &NutritionReport) -> ReportView {
    let total = &report.total;

    ReportView {
        metrics: build_metrics(total),
        macro_chart: build_macro_chart(total),
        items: report
            .items
            .iter()
            .map(|item| ItemRow {
                name: item.name.clone(),
                calories: item.calories.to_string(),
                protein: format!("{}g", item.protein),
                carbs: format!("{}g", item.carbs),
                fat: format!("{}g", item.fat),
            })
            .collect(),
        tip: healthy_tip(total),
    }
}

fn build_metrics(total: &NutritionTotals) -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "Calories".to_string(),
            value: format!("{} kcal", total.calories),
            badge: None,
        },
        MetricCard {
            label: "Protein".to_string(),
            value: format!("{}g", total.protein),
            badge: Some("💪".to_string()),
        },
        MetricCard {
            label: "Carbs".to_string(),
            value: format!("{}g", total.carbs),
            badge: Some("🍞".to_string()),
        },
        MetricCard {
            label: "Fat".to_string(),
            value: format!("{}g", total.fat),
            badge: Some("🥑".to_string()),
        },
    ]
}

fn build_macro_chart(total: &NutritionTotals) -> MacroChart {
    let mut values: Vec<(Macro, Quantity)> = Macro::ALL
        .iter()
        .map(|category| {
            let value = match category {
                Macro::Protein => total.protein,
                Macro::Carbs => total.carbs,
                Macro::Fat => total.fat,
            };
            (*category, value)
        })
        .collect();

    // Stable, so equal values keep the Protein, Carbs, Fat order.
    values.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));

    let sum: f64 = values.iter().map(|(_, value)| value.value().max(0.0)).sum();

    let mut offset = 0.0;
    let slices = values
        .into_iter()
        .map(|(category, value)| {
            let share = if sum > 0.0 {
                value.value().max(0.0) / sum
            } else {
                0.0
            };
            let slice = MacroSlice {
                category,
                value,
                label: format!("{:.1}", value.value()),
                share,
                offset,
            };
            offset += share;
            slice
        })
        .collect();

    MacroChart { slices }
}

fn healthy_tip(total: &NutritionTotals) -> HealthyTip {
    if total.protein.value() > PROTEIN_TIP_THRESHOLD {
        HealthyTip::GreatProteinSource
    } else {
        HealthyTip::AddMoreProtein
    }
}
