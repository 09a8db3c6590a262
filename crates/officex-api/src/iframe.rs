//! Cross-frame command protocol between an embedding page and an embedded
//! drive UI.
//!
//! Commands travel as `{"type": "OFFICEX_NAVIGATE", "data": {...},
//! "tracer": "t"}`. The `type` selects the schema of `data`; results echo
//! the command's `type` and `tracer` so the sender can correlate them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use officex_core::types::{
    ApiKeyValue, DiskID, DiskTypeEnum, DriveID, ExternalID, FolderID, HostURL,
    LabelValue, UserID,
};
use officex_core::{AppError, AppResult};

use crate::directory::{
    CreateFilePayload, CreateFolderPayload, DirectoryAction, DirectoryActionPayload,
    FileConflictResolutionEnum, ResourceIdentifier,
};

/// Identity generated in the browser for anonymous embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IFrameEphemeralConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_entropy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_entropy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
}

/// Credentials injected by the embedding page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IFrameInjectedConfig {
    pub host: HostURL,
    pub drive_id: DriveID,
    pub org_name: String,
    pub user_id: UserID,
    pub profile_name: String,
    pub api_key_value: ApiKeyValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Data of `OFFICEX_INIT`: injected credentials when complete, an
/// ephemeral identity otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IFrameInitConfig {
    Injected(IFrameInjectedConfig),
    Ephemeral(IFrameEphemeralConfig),
}

/// Command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IFrameCommandType {
    #[serde(rename = "OFFICEX_INIT")]
    Init,
    #[serde(rename = "OFFICEX_ABOUT")]
    About,
    #[serde(rename = "OFFICEX_AUTH_TOKEN")]
    AuthToken,
    #[serde(rename = "OFFICEX_NAVIGATE")]
    Navigate,
    #[serde(rename = "OFFICEX_DIRECTORY_ACTION")]
    DirectoryAction,
    #[serde(rename = "OFFICEX_HEARTBEAT")]
    Heartbeat,
}

impl IFrameCommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "OFFICEX_INIT",
            Self::About => "OFFICEX_ABOUT",
            Self::AuthToken => "OFFICEX_AUTH_TOKEN",
            Self::Navigate => "OFFICEX_NAVIGATE",
            Self::DirectoryAction => "OFFICEX_DIRECTORY_ACTION",
            Self::Heartbeat => "OFFICEX_HEARTBEAT",
        }
    }
}

/// Data of `OFFICEX_NAVIGATE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IFrameNavigate {
    /// Route below the drive prefix, e.g. `/settings`.
    pub route: String,
}

/// `CREATE_FILE` as sent through the frame. Content may be inlined as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IFrameCreateFilePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    /// File content, plain base64 or a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_uuid: Option<FolderID>,
}

impl IFrameCreateFilePayload {
    /// Decode the inline content, if any.
    pub fn decoded_bytes(&self) -> AppResult<Option<Vec<u8>>> {
        let Some(content) = self.base64.as_deref() else {
            return Ok(None);
        };
        let encoded = match content.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => content,
        };
        Ok(Some(STANDARD.decode(encoded.trim())?))
    }
}

/// `CREATE_FOLDER` as sent through the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IFrameCreateFolderPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_conflict_resolution: Option<FileConflictResolutionEnum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sovereign_permissions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut_to: Option<FolderID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalID>,
    /// Any JSON; stored as its serialized text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_uuid: Option<FolderID>,
}

/// Directory actions allowed through the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IFrameDirectoryAction {
    CreateFile(IFrameCreateFilePayload),
    CreateFolder(IFrameCreateFolderPayload),
}

/// Where frame-originated resources land when the command omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFrameActionTarget {
    pub parent_folder_uuid: FolderID,
    pub disk_id: DiskID,
    pub disk_type: DiskTypeEnum,
}

impl IFrameDirectoryAction {
    /// Expand into a full directory action placed on `target`.
    ///
    /// The receiving folder becomes the action's target; the payload's own
    /// parent, when given, overrides the frame default.
    pub fn into_directory_action(self, target: &IFrameActionTarget) -> AppResult<DirectoryAction> {
        match self {
            Self::CreateFile(payload) => {
                let inline_size = payload.decoded_bytes()?.map(|b| b.len() as u64);
                let parent = payload
                    .parent_folder_uuid
                    .unwrap_or_else(|| target.parent_folder_uuid.clone());
                Ok(DirectoryAction::targeted(
                    ResourceIdentifier::id(parent),
                    DirectoryActionPayload::CreateFile(CreateFilePayload {
                        id: None,
                        name: payload.name,
                        parent_folder_uuid: None,
                        extension: String::new(),
                        labels: Vec::new(),
                        file_size: payload.file_size.or(inline_size).unwrap_or(0),
                        disk_id: target.disk_id.clone(),
                        disk_type: Some(target.disk_type),
                        raw_url: payload.raw_url,
                        expires_at: payload.expires_at,
                        file_conflict_resolution: None,
                        has_sovereign_permissions: None,
                        shortcut_to: None,
                        external_id: None,
                        external_payload: None,
                    }),
                ))
            }
            Self::CreateFolder(payload) => {
                let parent = payload
                    .parent_folder_uuid
                    .unwrap_or_else(|| target.parent_folder_uuid.clone());
                Ok(DirectoryAction::targeted(
                    ResourceIdentifier::id(parent),
                    DirectoryActionPayload::CreateFolder(CreateFolderPayload {
                        id: None,
                        name: payload.name,
                        labels: payload.labels.unwrap_or_default(),
                        parent_folder_uuid: None,
                        disk_id: target.disk_id.clone(),
                        disk_type: Some(target.disk_type),
                        expires_at: payload.expires_at,
                        file_conflict_resolution: payload.file_conflict_resolution,
                        has_sovereign_permissions: payload.has_sovereign_permissions,
                        shortcut_to: payload.shortcut_to,
                        external_id: payload.external_id,
                        external_payload: payload.external_payload.map(|v| v.to_string()),
                    }),
                ))
            }
        }
    }
}

/// Typed data of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum IFrameCommandData {
    Init(IFrameInitConfig),
    About,
    AuthToken,
    Navigate(IFrameNavigate),
    DirectoryAction(IFrameDirectoryAction),
    Heartbeat,
}

impl IFrameCommandData {
    pub fn command_type(&self) -> IFrameCommandType {
        match self {
            Self::Init(_) => IFrameCommandType::Init,
            Self::About => IFrameCommandType::About,
            Self::AuthToken => IFrameCommandType::AuthToken,
            Self::Navigate(_) => IFrameCommandType::Navigate,
            Self::DirectoryAction(_) => IFrameCommandType::DirectoryAction,
            Self::Heartbeat => IFrameCommandType::Heartbeat,
        }
    }
}

/// A command sent across frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawIFrameCommand")]
pub struct IFrameCommand {
    pub data: IFrameCommandData,
    /// Correlation token echoed in the result.
    pub tracer: Option<String>,
}

impl IFrameCommand {
    pub fn new(data: IFrameCommandData) -> Self {
        Self { data, tracer: None }
    }

    pub fn with_tracer(mut self, tracer: impl Into<String>) -> Self {
        self.tracer = Some(tracer.into());
        self
    }

    pub fn command_type(&self) -> IFrameCommandType {
        self.data.command_type()
    }
}

/// Commands without data carry an empty object.
#[derive(Serialize)]
struct EmptyData {}

impl Serialize for IFrameCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.tracer.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("IFrameCommand", len)?;
        state.serialize_field("type", &self.command_type())?;
        match &self.data {
            IFrameCommandData::Init(config) => state.serialize_field("data", config)?,
            IFrameCommandData::Navigate(navigate) => state.serialize_field("data", navigate)?,
            IFrameCommandData::DirectoryAction(action) => state.serialize_field("data", action)?,
            IFrameCommandData::About
            | IFrameCommandData::AuthToken
            | IFrameCommandData::Heartbeat => state.serialize_field("data", &EmptyData {})?,
        }
        if let Some(tracer) = &self.tracer {
            state.serialize_field("tracer", tracer)?;
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawIFrameCommand {
    #[serde(rename = "type")]
    command_type: IFrameCommandType,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    tracer: Option<String>,
}

impl TryFrom<RawIFrameCommand> for IFrameCommand {
    type Error = AppError;

    fn try_from(raw: RawIFrameCommand) -> Result<Self, Self::Error> {
        let data = match raw.command_type {
            IFrameCommandType::Init => IFrameCommandData::Init(from_data(raw.data)?),
            IFrameCommandType::About => IFrameCommandData::About,
            IFrameCommandType::AuthToken => IFrameCommandData::AuthToken,
            IFrameCommandType::Navigate => IFrameCommandData::Navigate(from_data(raw.data)?),
            IFrameCommandType::DirectoryAction => {
                IFrameCommandData::DirectoryAction(from_data(raw.data)?)
            }
            IFrameCommandType::Heartbeat => IFrameCommandData::Heartbeat,
        };
        Ok(Self {
            data,
            tracer: raw.tracer,
        })
    }
}

fn from_data<T: serde::de::DeserializeOwned>(data: Value) -> AppResult<T> {
    let data = if data.is_null() {
        Value::Object(Default::default())
    } else {
        data
    };
    Ok(serde_json::from_value(data)?)
}

/// Reply to a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IFrameCommandResult {
    #[serde(rename = "type")]
    pub command_type: IFrameCommandType,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IFrameCommandResult {
    /// Successful reply to `command`.
    pub fn ok(command: &IFrameCommand, data: &impl Serialize) -> AppResult<Self> {
        Ok(Self {
            command_type: command.command_type(),
            data: serde_json::to_value(data)?,
            tracer: command.tracer.clone(),
            success: true,
            error: None,
        })
    }

    /// Failed reply to `command`.
    pub fn err(command: &IFrameCommand, err: &AppError) -> Self {
        Self {
            command_type: command.command_type(),
            data: Value::Null,
            tracer: command.tracer.clone(),
            success: false,
            error: Some(err.message.clone()),
        }
    }
}

/// Result data of `OFFICEX_ABOUT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IFrameAboutResponse {
    pub org_name: String,
    pub drive_id: DriveID,
    pub user_id: UserID,
    pub profile_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostURL>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
}

/// Result data of `OFFICEX_AUTH_TOKEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IFrameAuthTokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostURL>,
    pub drive_id: DriveID,
    pub user_id: UserID,
    pub auth_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<String>,
}
