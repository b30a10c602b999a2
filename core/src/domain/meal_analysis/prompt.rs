/// Instruction sent alongside the meal photo.
pub const MEAL_ANALYSIS_PROMPT: &str = r#"You are an expert nutritionist. Analyze the food items in this image.
Identify each food item and estimate its nutritional content based on portion size.

Return the response strictly in this JSON format (no markdown, no other text):
{
    "items": [
        {"name": "Food Name", "calories": 0, "protein": 0, "carbs": 0, "fat": 0},
        ...
    ],
    "total": {
        "calories": 0, "protein": 0, "carbs": 0, "fat": 0
    }
}"#;
