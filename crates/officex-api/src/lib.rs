//! # officex-api
//!
//! The JSON wire contract spoken by OfficeX drives and their clients:
//!
//! - [`directory`]: batched directory actions, their outcomes, and listing.
//! - [`routes`]: request/response shapes per resource.
//! - [`webhook`]: webhook delivery payloads.
//! - [`iframe`]: the cross-frame command protocol.
//! - [`vendor`]: vendor offers and checkout.
//!
//! Request shapes carry `validator` rules; call `.validate()` (or
//! [`validation::validate_request`]) before acting on them.

pub mod directory;
pub mod iframe;
pub mod routes;
pub mod validation;
pub mod vendor;
pub mod webhook;

pub use directory::{
    DirectoryAction, DirectoryActionEnum, DirectoryActionOutcome, DirectoryActionPayload,
    DirectoryActionRequestBody, DirectoryActionResult, FileConflictResolutionEnum,
    ResourceIdentifier,
};
