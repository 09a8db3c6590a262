//! Label records.

pub mod model;

pub use model::{Label, LabelFE};
