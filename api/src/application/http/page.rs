pub mod chart;
pub mod handlers;
pub mod router;
pub mod views;
