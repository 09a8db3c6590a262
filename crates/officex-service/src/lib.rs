//! # officex-service
//!
//! Reference executor for the OfficeX directory contract. Records live in
//! concurrent in-memory maps; every operation takes a [`RequestContext`]
//! naming the caller.
//!
//! Services follow constructor injection: identifier generation and time
//! are supplied at construction so batches replay deterministically.

pub mod context;
pub mod directory;

pub use context::{Clock, FixedClock, RequestContext, SystemClock};
pub use directory::{DirectoryService, DirectoryStore, DiskFolderIds};
