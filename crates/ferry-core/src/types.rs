// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the ingestion pipeline and its collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Action string of the legacy "SMS received" broadcast.
pub const ACTION_SMS_RECEIVED: &str = "android.provider.Telephony.SMS_RECEIVED";

/// Action string of the "MMS downloaded" broadcast.
pub const ACTION_MMS_DOWNLOADED: &str = "android.provider.Telephony.MMS_DOWNLOADED";

/// Raw subscriber value meaning "no specific subscriber".
pub const UNSPECIFIED_SUBSCRIBER_RAW: i64 = -1;

// --- Inbound side ---

/// Platform message class of a decoded fragment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageClass {
    #[default]
    Unknown,
    /// Flash message: shown immediately, never stored.
    #[serde(rename = "CLASS_0")]
    #[strum(serialize = "CLASS_0")]
    Class0,
    #[serde(rename = "CLASS_1")]
    #[strum(serialize = "CLASS_1")]
    Class1,
    #[serde(rename = "CLASS_2")]
    #[strum(serialize = "CLASS_2")]
    Class2,
    #[serde(rename = "CLASS_3")]
    #[strum(serialize = "CLASS_3")]
    Class3,
}

/// A single platform-decoded unit of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fragment {
    pub originating_address: Option<String>,
    pub body: String,
    /// Service-centre timestamp in milliseconds since the epoch.
    pub timestamp_ms: Option<i64>,
    pub message_class: MessageClass,
    pub service_center: Option<String>,
    pub protocol_identifier: i32,
    pub reply_path_present: bool,
    pub pseudo_subject: Option<String>,
}

/// Extra data attached to an inbound event by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventExtras {
    #[serde(rename = "errorCode")]
    pub error_code: Option<i32>,
    /// Routing hint for the originating subscriber/line. May be negative.
    pub subscription: Option<i32>,
}

/// An asynchronous system notification that message fragments have arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboundEvent {
    pub action: String,
    /// Absent or empty means the event carries nothing to process.
    pub fragments: Option<Vec<Fragment>>,
    pub extras: EventExtras,
}

impl InboundEvent {
    /// Build an event for the given action and fragments with no extras.
    pub fn new(action: impl Into<String>, fragments: Vec<Fragment>) -> Self {
        Self {
            action: action.into(),
            fragments: Some(fragments),
            extras: EventExtras::default(),
        }
    }
}

/// Inbound event kinds that trigger the secondary-context notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventAction {
    SmsReceived,
    MmsDownloaded,
}

impl EventAction {
    /// Match a raw action string against the recognized kinds.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            ACTION_SMS_RECEIVED => Some(Self::SmsReceived),
            ACTION_MMS_DOWNLOADED => Some(Self::MmsDownloaded),
            _ => None,
        }
    }
}

// --- Normalized record ---

/// Subscriber/line a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriberId {
    Specified(u32),
    Unspecified,
}

impl SubscriberId {
    /// The platform representation, with `-1` for [`SubscriberId::Unspecified`].
    pub fn as_raw(self) -> i64 {
        match self {
            SubscriberId::Specified(id) => i64::from(id),
            SubscriberId::Unspecified => UNSPECIFIED_SUBSCRIBER_RAW,
        }
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriberId::Specified(id) => write!(f, "{id}"),
            SubscriberId::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// Transport error code reported alongside an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// No transport error.
    pub const NONE: ErrorCode = ErrorCode(0);
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::NONE
    }
}

/// Delivery class of an inbound message, decided from its first fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryClass {
    /// Regular message that goes to durable handling.
    Standard,
    /// Flash message that is only presented, never persisted.
    TransientClass0,
}

/// Field map handed to the transient presentation collaborator.
pub type MessageFields = BTreeMap<String, serde_json::Value>;

/// The single record assembled from all fragments of one inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub address: Option<String>,
    pub body: String,
    /// Receive timestamp in milliseconds since the epoch.
    pub date_ms: i64,
    pub date_sent_ms: Option<i64>,
    pub read: bool,
    pub seen: bool,
    pub subscriber: SubscriberId,
    pub error_code: ErrorCode,
    pub delivery_class: DeliveryClass,
    pub protocol: i32,
    pub reply_path_present: bool,
    pub service_center: Option<String>,
    pub subject: Option<String>,
}

impl NormalizedMessage {
    /// Render the record as the field map used by the presentation path.
    pub fn to_fields(&self) -> MessageFields {
        use serde_json::Value;

        let mut fields = MessageFields::new();
        fields.insert("address".into(), self.address.clone().into());
        fields.insert("body".into(), Value::String(self.body.clone()));
        fields.insert("date".into(), self.date_ms.into());
        fields.insert("date_sent".into(), self.date_sent_ms.into());
        fields.insert("read".into(), i32::from(self.read).into());
        fields.insert("seen".into(), i32::from(self.seen).into());
        fields.insert("sub_id".into(), self.subscriber.as_raw().into());
        fields.insert("error_code".into(), self.error_code.0.into());
        fields.insert("protocol".into(), self.protocol.into());
        fields.insert(
            "reply_path_present".into(),
            i32::from(self.reply_path_present).into(),
        );
        fields.insert("service_center".into(), self.service_center.clone().into());
        if let Some(subject) = &self.subject {
            fields.insert("subject".into(), Value::String(subject.clone()));
        }
        fields
    }
}

// --- Execution context ---

/// Which delivery path the process is currently acting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// The platform's own delivery path owns incoming messages.
    Primary,
    /// Constrained context where this receiver surfaces new-message notices.
    Secondary,
}

/// Platform components whose enablement the receiver controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ComponentRef {
    SmsReceiver,
    RespondViaMessageService,
}

// --- Notifications ---

/// Presentation priority hint for a posted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
    Default,
    High,
}

/// Everything the notification subsystem needs to show one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSpec {
    pub channel_id: String,
    pub title: String,
    pub ticker: String,
    pub big_text: String,
    pub small_icon: String,
    pub priority: Priority,
    pub default_lights: bool,
    pub default_vibrate: bool,
    /// Action launched when the notification is tapped.
    pub content_action: String,
}

// --- APN ---

/// Network configuration required to complete an MMS transport operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnSettings {
    pub name: String,
    pub mmsc: String,
    pub proxy: Option<String>,
    pub proxy_port: Option<u16>,
}
