//! Purchases (formerly job runs).

pub mod model;
pub mod status;

pub use model::{JobRun, Purchase, PurchaseFE};
pub use status::{JobRunStatus, PurchaseStatus};
