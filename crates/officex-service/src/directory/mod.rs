//! Directory actions and listings over an in-memory store.

pub mod listing;
pub mod naming;
pub mod service;
pub mod store;

pub use service::{DirectoryService, DiskFolderIds};
pub use store::DirectoryStore;
