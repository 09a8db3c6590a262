//! Drive records and state diffs.

pub mod model;
pub mod state_diff;

pub use model::{Drive, DriveFE};
pub use state_diff::{StateDiffImplementation, StateDiffRecord};
