//! Request and response shapes of the per-resource routes.
//!
//! Every response travels inside the `ok`/`err` envelope
//! ([`ApiResponse`](officex_core::types::ApiResponse)); the aliases in each
//! submodule name the envelope of one route.

pub mod api_keys;
pub mod contacts;
pub mod disks;
pub mod drives;
pub mod giftcards;
pub mod group_invites;
pub mod groups;
pub mod labels;
pub mod permissions;
pub mod purchases;
pub mod webhooks;

use serde::{Deserialize, Serialize};

/// Body returned by delete routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse<Id> {
    /// Identifier of the deleted record.
    pub id: Id,
    /// Whether the record was removed.
    pub deleted: bool,
}

impl<Id> DeletedResponse<Id> {
    /// A successful delete of `id`.
    pub fn deleted(id: Id) -> Self {
        Self { id, deleted: true }
    }
}

/// Body returned by permission delete routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePermissionResponse<Id> {
    pub deleted_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use officex_core::types::{ApiResponse, DiskID};
    use serde_json::json;

    #[test]
    fn test_deleted_response_envelope() {
        let id: DiskID = "DiskID_1".parse().unwrap();
        let response = ApiResponse::ok(DeletedResponse::deleted(id));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"ok": {"data": {"id": "DiskID_1", "deleted": true}}})
        );
    }
}
