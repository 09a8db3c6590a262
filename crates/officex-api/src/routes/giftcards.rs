//! Gift card, org spawning, and cross-org routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use officex_core::types::{
    ApiResponse, DriveID, GiftcardSpawnOrgID, HostURL, ICPPrincipalString, InboxNotifID,
    UnixTimestampMs, UserID,
};

/// Replace every reference to one user id with another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperswapUserRequest {
    pub current_user_id: UserID,
    pub new_user_id: UserID,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperswapUserResult {
    pub success: bool,
    pub message: String,
}

/// Spend a gift card to spawn a new org.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedeemGiftcardRequest {
    pub giftcard_id: GiftcardSpawnOrgID,
    #[validate(length(min = 1))]
    pub owner_icp_principal: ICPPrincipalString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemGiftcardResult {
    pub owner_id: UserID,
    pub drive_id: DriveID,
    pub endpoint_url: HostURL,
    /// Code the owner later exchanges for admin credentials.
    pub redeem_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedeemOrgRequest {
    #[validate(length(min = 1))]
    pub redeem_code: String,
}

/// Admin credentials of a spawned org.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemOrgResult {
    pub drive_id: DriveID,
    pub endpoint_url: HostURL,
    pub api_key: String,
    pub note: String,
    pub admin_login_password: String,
}

/// Drop a notification into another org's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InboxOrgRequest {
    pub drive_id: DriveID,
    #[validate(length(min = 1))]
    pub recipient: String,
    /// Arbitrary JSON delivered as-is.
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxOrgResult {
    pub inbox_notif_id: InboxNotifID,
    pub drive_id: DriveID,
    pub timestamp_ms: UnixTimestampMs,
    pub note: String,
}

pub type SuperswapUserResponse = ApiResponse<SuperswapUserResult>;
pub type RedeemGiftcardResponse = ApiResponse<RedeemGiftcardResult>;
pub type RedeemOrgResponse = ApiResponse<RedeemOrgResult>;
pub type InboxOrgResponse = ApiResponse<InboxOrgResult>;
