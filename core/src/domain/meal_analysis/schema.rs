use serde_json::json;

/// Returns the JSON schema for nutrition report LLM responses
pub fn get_nutrition_report_schema() -> serde_json::Value {
    let macros = json!({
        "calories": { "type": "number" },
        "protein": { "type": "number" },
        "carbs": { "type": "number" },
        "fat": { "type": "number" }
    });

    let mut item_properties = macros.clone();
    item_properties["name"] = json!({ "type": "string" });

    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": item_properties,
                    "required": ["name", "calories", "protein", "carbs", "fat"]
                }
            },
            "total": {
                "type": "object",
                "properties": macros,
                "required": ["calories", "protein", "carbs", "fat"]
            }
        },
        "required": ["items", "total"]
    })
}
