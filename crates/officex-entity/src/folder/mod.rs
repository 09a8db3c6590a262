//! Folder records.

pub mod model;

pub use model::{FolderRecord, FolderRecordFE};
