use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use snapcalorie_core::domain::report::ReportView;

use super::chart::render_macro_chart;

pub const MISSING_KEY_BANNER: &str =
    "❌ GOOGLE_API_KEY is missing. Please create a .env file with your API key.";

/// Everything the single page can show.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub root_path: String,
    pub config_error: Option<String>,
    pub preview: Option<ImagePreview>,
    pub outcome: Option<AnalysisOutcome>,
}

#[derive(Debug, Clone)]
pub struct ImagePreview {
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Report(Box<ReportView>),
    Error(String),
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #1f2937; }
main { max-width: 760px; margin: 0 auto; padding: 2rem 1rem; }
.banner { background: #fee2e2; color: #991b1b; padding: .75rem 1rem; border-radius: .5rem; }
.error { background: #fef2f2; color: #b91c1c; padding: .75rem 1rem; border-radius: .5rem; }
.busy { color: #2563eb; }
figure { margin: 1rem 0; }
figure img { max-width: 100%; border-radius: .5rem; }
figcaption { color: #6b7280; text-align: center; }
button { padding: .5rem 1.25rem; border-radius: .5rem; border: 1px solid #d1d5db; background: #fff; cursor: pointer; }
button:disabled { cursor: not-allowed; opacity: .5; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.metric-label { display: block; color: #6b7280; font-size: .875rem; }
.metric-value { display: block; font-size: 1.75rem; }
.metric-badge { font-size: .875rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
.macro-chart { max-width: 100%; height: auto; }
.slice-label { font-size: 14px; fill: #1f2937; }
.legend { list-style: none; padding: 0; display: flex; gap: 1rem; }
.swatch { display: inline-block; width: .75rem; height: .75rem; margin-right: .35rem; border-radius: 2px; }
details.item { border: 1px solid #e5e7eb; border-radius: .5rem; padding: .5rem .75rem; margin-bottom: .5rem; background: #fff; }
.tip { background: #dcfce7; color: #166534; padding: .75rem 1rem; border-radius: .5rem; margin-top: 1.5rem; }
"#;

const SCRIPT: &str = r#"
const form = document.getElementById('analyze-form');
const input = document.getElementById('image');
const preview = document.getElementById('preview');
const previewImage = document.getElementById('preview-image');
const button = document.getElementById('analyze');
const busy = document.getElementById('busy');
input.addEventListener('change', () => {
  const file = input.files[0];
  if (!file) return;
  const reader = new FileReader();
  reader.onload = (event) => { previewImage.src = event.target.result; preview.hidden = false; };
  reader.readAsDataURL(file);
});
form.addEventListener('submit', () => {
  button.disabled = true;
  busy.hidden = false;
});
"#;

pub fn render_page(context: &PageContext) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>SnapCalorie AI</title>\n",
    );
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<main>\n");

    if let Some(config_error) = &context.config_error {
        let _ = writeln!(
            html,
            r#"<div class="banner" role="alert">{}</div>"#,
            encode_text(config_error)
        );
    }

    html.push_str("<h1>🍎 SnapCalorie AI</h1>\n");
    html.push_str("<p>Upload a photo of your meal to get instant nutritional insights.</p>\n");

    render_form(&mut html, context);

    if let Some(AnalysisOutcome::Report(view)) = &context.outcome {
        html.push_str(&render_report_section(view));
    }

    let _ = writeln!(html, "<script>{}</script>", SCRIPT);
    html.push_str("</main>\n</body>\n</html>\n");

    html
}

fn render_form(html: &mut String, context: &PageContext) {
    let action = format!("{}/analyze", context.root_path);
    let _ = writeln!(
        html,
        r#"<form id="analyze-form" method="post" action="{}" enctype="multipart/form-data">"#,
        encode_double_quoted_attribute(&action)
    );
    html.push_str("<label for=\"image\">Choose an image...</label>\n");
    html.push_str(
        "<input id=\"image\" type=\"file\" name=\"image\" accept=\".jpg,.jpeg,.png,image/jpeg,image/png\" required>\n",
    );

    match &context.preview {
        Some(preview) => {
            let src = format!("data:{};base64,{}", preview.mime_type, preview.data_base64);
            let _ = writeln!(
                html,
                r#"<figure id="preview"><img id="preview-image" src="{}" alt="Your Meal"><figcaption>Your Meal</figcaption></figure>"#,
                encode_double_quoted_attribute(&src)
            );
        }
        None => html.push_str(
            "<figure id=\"preview\" hidden><img id=\"preview-image\" alt=\"Your Meal\"><figcaption>Your Meal</figcaption></figure>\n",
        ),
    }

    let disabled = if context.config_error.is_some() {
        " disabled"
    } else {
        ""
    };
    let _ = writeln!(
        html,
        r#"<button id="analyze" type="submit"{}>Analyze Meal</button>"#,
        disabled
    );
    html.push_str("<p id=\"busy\" class=\"busy\" hidden>🤖 AI is analyzing your food...</p>\n");

    if let Some(AnalysisOutcome::Error(message)) = &context.outcome {
        let _ = writeln!(
            html,
            r#"<div class="error" role="alert">{}</div>"#,
            encode_text(message)
        );
    }

    html.push_str("</form>\n");
}

/// Renders the result sections for one report. Pure; no I/O.
pub fn render_report_section(view: &ReportView) -> String {
    let mut html = String::new();

    html.push_str("<section class=\"report\">\n<h2>Total Nutrition</h2>\n<div class=\"metrics\">\n");
    for metric in &view.metrics {
        html.push_str("<div class=\"metric\">");
        let _ = write!(
            html,
            r#"<span class="metric-label">{}</span><span class="metric-value">{}</span>"#,
            encode_text(&metric.label),
            encode_text(&metric.value)
        );
        if let Some(badge) = &metric.badge {
            let _ = write!(html, r#"<span class="metric-badge">{}</span>"#, encode_text(badge));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n<hr>\n<div class=\"columns\">\n");

    html.push_str("<div class=\"column\">\n<h3>Macro Distribution</h3>\n");
    html.push_str(&render_macro_chart(&view.macro_chart));
    html.push_str("\n</div>\n");

    html.push_str("<div class=\"column\">\n<h3>Item Breakdown</h3>\n");
    for row in &view.items {
        let _ = writeln!(
            html,
            r#"<details class="item"><summary>{}</summary><ul><li><strong>Protein:</strong> {}</li><li><strong>Carbs:</strong> {}</li><li><strong>Fat:</strong> {}</li></ul></details>"#,
            encode_text(&row.header()),
            encode_text(&row.protein),
            encode_text(&row.carbs),
            encode_text(&row.fat)
        );
    }
    html.push_str("</div>\n</div>\n");

    let _ = writeln!(
        html,
        r#"<div class="tip">💡 <strong>Healthy Tip:</strong> {}</div>"#,
        view.tip.message()
    );
    html.push_str("</section>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapcalorie_core::domain::{
        meal_analysis::entities::{NutritionItem, NutritionReport, NutritionTotals, Quantity},
        report::build_report_view,
    };

    fn item(name: &str, calories: i64) -> NutritionItem {
        NutritionItem {
            name: name.to_string(),
            calories: Quantity::Integer(calories),
            protein: Quantity::Integer(10),
            carbs: Quantity::Integer(20),
            fat: Quantity::Decimal(5.5),
        }
    }

    fn view(protein: i64) -> ReportView {
        build_report_view(&NutritionReport {
            items: vec![item("A", 50), item("B", 700), item("C", 120)],
            total: NutritionTotals {
                calories: Quantity::Integer(500),
                protein: Quantity::Integer(protein),
                carbs: Quantity::Integer(50),
                fat: Quantity::Integer(10),
            },
        })
    }

    #[test]
    fn test_report_section_metrics() {
        let html = render_report_section(&view(40));
        assert!(html.contains("Total Nutrition"));
        assert!(html.contains(r#"<span class="metric-value">500 kcal</span>"#));
        assert!(html.contains(r#"<span class="metric-value">40g</span>"#));
        assert!(html.contains(r#"<span class="metric-value">50g</span>"#));
        assert!(html.contains(r#"<span class="metric-value">10g</span>"#));
    }

    #[test]
    fn test_report_section_items_in_received_order() {
        let html = render_report_section(&view(40));
        let a = html.find("🍽️ A (50 kcal)").unwrap();
        let b = html.find("🍽️ B (700 kcal)").unwrap();
        let c = html.find("🍽️ C (120 kcal)").unwrap();
        assert!(a < b && b < c);
        assert!(html.contains("<strong>Fat:</strong> 5.5g"));
    }

    #[test]
    fn test_report_section_tip() {
        assert!(render_report_section(&view(40)).contains("Great protein source!"));
        assert!(
            render_report_section(&view(20)).contains("Consider adding more protein next time.")
        );
    }

    #[test]
    fn test_item_names_are_escaped() {
        let view = build_report_view(&NutritionReport {
            items: vec![item("<script>alert(1)</script>", 1)],
            total: NutritionTotals::default(),
        });
        let html = render_report_section(&view);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_page_without_key_shows_banner_and_disables_button() {
        let html = render_page(&PageContext {
            config_error: Some(MISSING_KEY_BANNER.to_string()),
            ..PageContext::default()
        });
        assert!(html.contains("GOOGLE_API_KEY is missing"));
        assert!(html.contains(r#"<button id="analyze" type="submit" disabled>"#));
    }

    #[test]
    fn test_page_with_key_has_enabled_button_and_no_report() {
        let html = render_page(&PageContext {
            root_path: "/snap".to_string(),
            ..PageContext::default()
        });
        assert!(!html.contains("class=\"banner\""));
        assert!(html.contains(r#"<button id="analyze" type="submit">"#));
        assert!(html.contains(r#"action="/snap/analyze""#));
        assert!(!html.contains("Total Nutrition"));
    }

    #[test]
    fn test_page_error_outcome_renders_inline_without_report() {
        let html = render_page(&PageContext {
            outcome: Some(AnalysisOutcome::Error(
                "Error parsing AI response: missing field `total`".to_string(),
            )),
            ..PageContext::default()
        });
        assert!(html.contains("Error parsing AI response"));
        assert!(!html.contains("Total Nutrition"));
    }

    #[test]
    fn test_page_shows_uploaded_preview() {
        let html = render_page(&PageContext {
            preview: Some(ImagePreview {
                mime_type: "image/png".to_string(),
                data_base64: "iVBORw0KGgo=".to_string(),
            }),
            outcome: Some(AnalysisOutcome::Report(Box::new(view(40)))),
            ..PageContext::default()
        });
        assert!(html.contains(r#"src="data:image/png;base64,iVBORw0KGgo=""#));
        assert!(html.contains("Total Nutrition"));
    }
}
