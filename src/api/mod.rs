pub mod client;
pub mod error;
pub mod models;
pub mod packages;
pub mod stores;

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

pub use client::HttpBackend;
pub use error::ApiError;
pub use models::*;
