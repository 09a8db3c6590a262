//! File records.

pub mod model;

pub use model::{FileRecord, FileRecordFE};
