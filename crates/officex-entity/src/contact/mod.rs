//! Contact records.

pub mod model;

pub use model::{Contact, ContactFE, ContactGroupInvitePreview};
