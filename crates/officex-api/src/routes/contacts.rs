//! Contact routes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use officex_core::types::{
    ApiResponse, EvmPublicAddress, ExternalID, ExternalPayload, ICPPrincipalString, PageRequest,
    PageResponse, UserID,
};
use officex_entity::ContactFE;

use super::DeletedResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetContactRequest {
    pub contact_id: UserID,
}

pub type ListContactsRequest = PageRequest;

/// Create a contact.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_create_contact"))]
pub struct CreateContactRequest {
    /// Identifier to use; must be derived from `icp_principal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserID>,
    /// Principal of the contact.
    #[validate(length(min = 1))]
    pub icp_principal: ICPPrincipalString,
    /// Nickname.
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_public_address: Option<EvmPublicAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

impl CreateContactRequest {
    /// The identifier the contact will have.
    pub fn user_id(&self) -> UserID {
        self.id
            .clone()
            .unwrap_or_else(|| UserID::from_principal(&self.icp_principal))
    }
}

fn validate_create_contact(
    request: &CreateContactRequest,
) -> Result<(), validator::ValidationError> {
    match &request.id {
        Some(id) if id.principal() != request.icp_principal => {
            let mut err = validator::ValidationError::new("principal_mismatch");
            err.message = Some("Contact id must be derived from icp_principal".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Update a contact. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateContactRequest {
    pub id: UserID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub notifications_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_public_address: Option<EvmPublicAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<ExternalPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteContactRequest {
    pub id: UserID,
}

/// Swap a placeholder contact for the real user that redeemed it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedeemContactRequest {
    pub current_user_id: UserID,
    pub new_user_id: UserID,
    #[validate(length(min = 1))]
    pub redeem_code: String,
}

pub type GetContactResponse = ApiResponse<ContactFE>;
pub type ListContactsResponse = ApiResponse<PageResponse<ContactFE>>;
pub type CreateContactResponse = ApiResponse<ContactFE>;
pub type UpdateContactResponse = ApiResponse<ContactFE>;
pub type DeleteContactResponse = ApiResponse<DeletedResponse<UserID>>;
pub type RedeemContactResponse = ApiResponse<ContactFE>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_id_derived_from_principal() {
        let request: CreateContactRequest =
            serde_json::from_value(json!({"icp_principal": "abc-123", "name": "Bob"})).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.user_id().as_str(), "UserID_abc-123");
    }

    #[test]
    fn test_mismatched_principal_fails() {
        let request: CreateContactRequest = serde_json::from_value(json!({
            "id": "UserID_other",
            "icp_principal": "abc-123",
            "name": "Bob"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_checks_email_and_url() {
        let request: UpdateContactRequest = serde_json::from_value(json!({
            "id": "UserID_abc",
            "email": "not-an-email",
        }))
        .unwrap();
        assert!(request.validate().is_err());
        let request: UpdateContactRequest = serde_json::from_value(json!({
            "id": "UserID_abc",
            "email": "bob@example.com",
            "notifications_url": "https://example.com/hook",
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }
}
