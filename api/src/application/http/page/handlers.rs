pub mod analyze_meal_page;
pub mod get_index;
