use crate::domain::meal_analysis::entities::MealImage;

#[derive(Debug, Clone)]
pub struct AnalyzeMealInput {
    pub image: MealImage,
}
