// Library exports for integration tests and the bootstrap binary

pub mod app_data;
pub mod config;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;

pub use app_data::AppData;
