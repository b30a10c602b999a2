use std::f64::consts::PI;
use std::fmt::Write as _;

use snapcalorie_core::domain::report::{Macro, MacroChart};

const SIZE: f64 = 340.0;
const CENTER: f64 = SIZE / 2.0;
const OUTER_RADIUS: f64 = 120.0;
const INNER_RADIUS: f64 = 60.0;
const LABEL_RADIUS: f64 = 140.0;

/// Same palette the category colors get in Vega's default scheme.
pub fn macro_color(category: Macro) -> &'static str {
    match category {
        Macro::Carbs => "#4c78a8",
        Macro::Fat => "#f58518",
        Macro::Protein => "#e45756",
    }
}

/// Renders the macro donut as inline SVG.
///
/// Each slice is a dashed stroke on one ring, so a 100% slice needs no
/// special casing. An empty chart renders the bare ring.
pub fn render_macro_chart(chart: &MacroChart) -> String {
    let ring_radius = (OUTER_RADIUS + INNER_RADIUS) / 2.0;
    let ring_width = OUTER_RADIUS - INNER_RADIUS;
    let circumference = 2.0 * PI * ring_radius;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="macro-chart" viewBox="0 0 {SIZE} {SIZE}" width="{SIZE}" height="{SIZE}" role="img" aria-label="Macro distribution">"#
    );
    let _ = write!(
        svg,
        r##"<circle cx="{CENTER}" cy="{CENTER}" r="{ring_radius}" fill="none" stroke="#e5e7eb" stroke-width="{ring_width}"/>"##
    );

    for slice in chart.slices.iter().filter(|slice| slice.share > 0.0) {
        let tooltip = format!("{}: {}", slice.category.label(), slice.value);
        let _ = write!(
            svg,
            r#"<circle class="slice" data-category="{category}" cx="{CENTER}" cy="{CENTER}" r="{ring_radius}" fill="none" stroke="{color}" stroke-width="{ring_width}" stroke-dasharray="{dash:.3} {circumference:.3}" stroke-dashoffset="{offset:.3}" transform="rotate(-90 {CENTER} {CENTER})"><title>{tooltip}</title></circle>"#,
            category = slice.category.label(),
            color = macro_color(slice.category),
            dash = slice.share * circumference,
            offset = -slice.offset * circumference,
            tooltip = html_escape::encode_text(&tooltip),
        );
    }

    for slice in chart.slices.iter().filter(|slice| slice.share > 0.0) {
        let angle = 2.0 * PI * (slice.offset + slice.share / 2.0) - PI / 2.0;
        let _ = write!(
            svg,
            r#"<text class="slice-label" x="{x:.1}" y="{y:.1}" text-anchor="middle" dominant-baseline="middle">{label}</text>"#,
            x = CENTER + LABEL_RADIUS * angle.cos(),
            y = CENTER + LABEL_RADIUS * angle.sin(),
            label = html_escape::encode_text(&slice.label),
        );
    }

    svg.push_str("</svg>");

    svg.push_str(r#"<ul class="legend">"#);
    for category in Macro::ALL {
        let _ = write!(
            svg,
            r#"<li><span class="swatch" style="background:{color}"></span>{label}</li>"#,
            color = macro_color(category),
            label = category.label(),
        );
    }
    svg.push_str("</ul>");

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapcalorie_core::domain::{
        meal_analysis::entities::{NutritionReport, NutritionTotals, Quantity},
        report::build_report_view,
    };

    fn chart(protein: i64, carbs: i64, fat: i64) -> MacroChart {
        build_report_view(&NutritionReport {
            items: Vec::new(),
            total: NutritionTotals {
                calories: Quantity::Integer(0),
                protein: Quantity::Integer(protein),
                carbs: Quantity::Integer(carbs),
                fat: Quantity::Integer(fat),
            },
        })
        .macro_chart
    }

    #[test]
    fn test_slices_and_labels_in_descending_order() {
        let svg = render_macro_chart(&chart(40, 50, 10));

        let carbs = svg.find(r#"data-category="Carbs""#).unwrap();
        let protein = svg.find(r#"data-category="Protein""#).unwrap();
        let fat = svg.find(r#"data-category="Fat""#).unwrap();
        assert!(carbs < protein && protein < fat);

        assert!(svg.contains(">50.0</text>"));
        assert!(svg.contains(">40.0</text>"));
        assert!(svg.contains(">10.0</text>"));
        assert!(svg.contains("<title>Protein: 40</title>"));
    }

    #[test]
    fn test_all_zero_draws_no_slices() {
        let svg = render_macro_chart(&chart(0, 0, 0));
        assert!(!svg.contains(r#"class="slice""#));
        assert!(!svg.contains("slice-label"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_zero_slice_is_skipped() {
        let svg = render_macro_chart(&chart(25, 0, 5));
        assert!(!svg.contains(r#"data-category="Carbs""#));
        assert!(svg.contains(r#"data-category="Protein""#));
    }
}
