pub mod health;
pub mod meal_analysis;
pub mod page;
pub mod server;
pub mod upload;
