//! # officex-core
//!
//! Core crate for the OfficeX drive contract. Contains the unified error
//! system, configuration schemas, prefixed identifiers and their
//! generator, resource-ID unions, cursor pagination, and the `ok`/`err`
//! response envelope.
//!
//! This crate has **no** internal dependencies on other OfficeX crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
