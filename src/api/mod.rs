mod client;
mod error;

pub use client::{ApiClient, Resource};
pub use error::ApiError;
