pub mod alerts;
pub mod analyze;
pub mod pages;
pub mod triggers;
