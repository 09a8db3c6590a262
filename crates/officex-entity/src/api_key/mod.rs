//! API key records.

pub mod model;

pub use model::{ApiKey, ApiKeyFE};
