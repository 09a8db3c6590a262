//! Disk records.

pub mod model;

pub use model::{Disk, DiskFE};
