//! Vendor offers and the checkout handshake with vendor servers.
//!
//! A checkout goes init → validate → finalize. The init response shares a
//! common base and then carries exactly one of `crypto_checkout` or
//! `external_checkout`, matching the offer's checkout pattern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use officex_core::types::{ApiKeyValue, DiskTypeEnum, DriveID, IdPrefix, PurchaseID, UserID};

pub type CheckoutFlowID = String;
pub type CheckoutSessionID = String;
pub type OfferID = String;

/// A service with the offers vendors make for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWithOffersFromVendors {
    pub id: String,
    pub name: String,
    pub subheading: String,
    pub cover_image: String,
    pub is_featured: bool,
    pub offers: Vec<OfferPreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferPreview {
    pub id: OfferID,
    pub title: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    pub price: f64,
    pub price_unit: String,
    pub price_explanation: String,
    pub bookmarks: u64,
    pub bookmarked_demand: f64,
    pub cumulative_sales: u64,
    pub bookmark_url: String,
    pub call_to_action: String,
    #[serde(default)]
    pub vendors: Vec<VendorOffer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityLink {
    pub label: String,
    pub url: String,
}

/// One vendor's take on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOffer {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_video: Option<String>,
    pub uptime_score: f64,
    pub reviews_score: f64,
    #[serde(default)]
    pub community_links: Vec<CommunityLink>,
    pub price_line: String,
    pub view_page_link: String,
    pub call_to_action: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_url: Option<String>,
    #[serde(default)]
    pub checkout_options: Vec<CheckoutOption>,
}

/// How payment is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartCheckoutPatternEnum {
    CryptoDirectTransfer,
    CryptoWalletTopup,
    ExternalPaymentLink,
}

impl CartCheckoutPatternEnum {
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::CryptoDirectTransfer | Self::CryptoWalletTopup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOption {
    pub offer_id: OfferID,
    pub checkout_flow_id: CheckoutFlowID,
    pub title: String,
    pub note: String,
    pub checkout_init_endpoint: String,
    pub checkout_pattern: CartCheckoutPatternEnum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_email_for_init: Option<bool>,
}

/// Plain input kinds of a requirement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReqFieldInputKind {
    Number,
    Date,
    Text,
    Url,
    Select,
    MultiSelect,
    Boolean,
}

/// What a requirement field asks for: a plain input, a resource of some
/// kind, or a disk backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VendorOfferReqFieldType {
    Input(ReqFieldInputKind),
    Resource(IdPrefix),
    Disk(DiskTypeEnum),
}

/// A field the buyer fills in during checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOfferReqField {
    pub id: String,
    pub title: String,
    pub explanation: String,
    #[serde(rename = "type")]
    pub field_type: VendorOfferReqFieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(rename = "defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Start a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutInitRequest {
    #[validate(length(min = 1))]
    pub checkout_flow_id: CheckoutFlowID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<DriveID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckoutPostPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_cloud_officex: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_installation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_installation_url: Option<String>,
}

/// Fields every init response carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutInitBase {
    pub offer_id: OfferID,
    pub checkout_flow_id: CheckoutFlowID,
    pub checkout_pattern: CartCheckoutPatternEnum,
    /// Vendor-side session; passed back on validate and finalize.
    pub checkout_session_id: CheckoutSessionID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_note_from_customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalization_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_cta: Option<String>,
    #[serde(default)]
    pub requirements: Vec<VendorOfferReqField>,
    #[serde(default)]
    pub post_payment: CheckoutPostPayment,
}

/// Token transfer the buyer must make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoCheckout {
    pub receiving_address: String,
    pub token_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u8,
    /// Amounts are in whole tokens, not base units.
    pub suggested_amount_decimals: f64,
    pub minimum_amount_decimals: f64,
    pub maximum_amount_decimals: f64,
    pub chain: String,
    pub chain_explorer_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCheckout {
    pub external_checkout_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
}

/// The pattern-specific part of an init response, keyed by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckoutInitKind {
    #[serde(rename = "crypto_checkout")]
    Crypto(CryptoCheckout),
    #[serde(rename = "external_checkout")]
    External(ExternalCheckout),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutInitResponse {
    #[serde(flatten)]
    pub base: CheckoutInitBase,
    #[serde(flatten)]
    pub checkout: CheckoutInitKind,
}

impl CheckoutInitResponse {
    /// Whether the checkout details match the declared pattern.
    pub fn is_consistent(&self) -> bool {
        match self.checkout {
            CheckoutInitKind::Crypto(_) => self.base.checkout_pattern.is_crypto(),
            CheckoutInitKind::External(_) => {
                self.base.checkout_pattern == CartCheckoutPatternEnum::ExternalPaymentLink
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutValidateRequest {
    #[validate(length(min = 1))]
    pub checkout_flow_id: CheckoutFlowID,
    #[validate(length(min = 1))]
    pub checkout_session_id: CheckoutSessionID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutValidateResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "type")]
    pub checkout_pattern: CartCheckoutPatternEnum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    pub checkout_session_id: CheckoutSessionID,
    pub checkout_flow_id: CheckoutFlowID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
}

/// Buyer org details forwarded when an org buys on behalf of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyBuyerData {
    pub org_id: DriveID,
    pub org_endpoint: String,
    pub user_id: UserID,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutFinalizeRequest {
    #[validate(length(min = 1))]
    pub checkout_flow_id: CheckoutFlowID,
    #[validate(length(min = 1))]
    pub checkout_session_id: CheckoutSessionID,
    pub officex_purchase_id: PurchaseID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_buyer_data: Option<ProxyBuyerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep_tokens: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFinalizeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_disclaimer: Option<String>,
    pub checkout_session_id: CheckoutSessionID,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    pub checkout_flow_id: CheckoutFlowID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_to_final_redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_to_final_cta: Option<String>,
}

/// A vendor's checkout entry as shown in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRun {
    #[serde(rename = "vendorID")]
    pub vendor_id: String,
    #[serde(rename = "vendorName")]
    pub vendor_name: String,
    #[serde(rename = "vendorAvatar")]
    pub vendor_avatar: String,
    #[serde(rename = "aboutUrl")]
    pub about_url: String,
    #[serde(rename = "offerName")]
    pub offer_name: String,
    #[serde(rename = "offerDescription")]
    pub offer_description: String,
    #[serde(rename = "checkoutOptions")]
    pub checkout_options: Vec<CheckoutOption>,
    #[serde(rename = "callToAction")]
    pub call_to_action: String,
    #[serde(rename = "checkoutVideo", default, skip_serializing_if = "Option::is_none")]
    pub checkout_video: Option<String>,
    #[serde(rename = "priceLine")]
    pub price_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
}

/// Install a purchase into the buyer's drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInstallationRequest {
    pub checkout_session_id: CheckoutSessionID,
    /// Answers to the requirement fields, by field id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<DriveID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_api_key: Option<ApiKeyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeem_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthInstallationStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInstallationResponse {
    pub status: AuthInstallationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_cta: Option<String>,
    /// Purchase created by the installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_run_id: Option<PurchaseID>,
}
