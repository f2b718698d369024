// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Ferry ingestion pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Ferry configuration.
///
/// All sections are optional and default to the values the receiver ships with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FerryConfig {
    /// Receiver identity and logging.
    #[serde(default)]
    pub receiver: ReceiverConfig,

    /// Secondary-context new-message notification.
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Opt-in suppression of redelivered events.
    #[serde(default)]
    pub redelivery: RedeliveryConfig,

    /// Access point entries used for MMS transport.
    #[serde(default)]
    pub apn: Vec<ApnEntry>,
}

/// Receiver identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReceiverConfig {
    /// Installed package name. Prefixes the notification tag.
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_package_name() -> String {
    "org.ferry.messaging".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Secondary-context notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Notification channel the post is filed under.
    #[serde(default = "default_channel_id")]
    pub channel_id: String,

    /// Appended to the package name to form the notification tag.
    #[serde(default = "default_tag_suffix")]
    pub tag_suffix: String,

    /// Numeric id paired with the tag. No other notification may reuse it.
    #[serde(default = "default_notification_id")]
    pub id: i32,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_ticker")]
    pub ticker: String,

    #[serde(default = "default_small_icon")]
    pub small_icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            channel_id: default_channel_id(),
            tag_suffix: default_tag_suffix(),
            id: default_notification_id(),
            title: default_title(),
            ticker: default_ticker(),
            small_icon: default_small_icon(),
        }
    }
}

impl NotificationConfig {
    /// The full notification tag for an installed package.
    pub fn tag_for(&self, package_name: &str) -> String {
        format!("{package_name}{}", self.tag_suffix)
    }
}

fn default_channel_id() -> String {
    "messaging_channel".to_string()
}

fn default_tag_suffix() -> String {
    ":secondaryuser".to_string()
}

fn default_notification_id() -> i32 {
    5
}

fn default_title() -> String {
    "New message".to_string()
}

fn default_ticker() -> String {
    "New message received".to_string()
}

fn default_small_icon() -> String {
    "ic_sms_light".to_string()
}

/// Redelivery suppression configuration.
///
/// Disabled by default: every physical event is processed as it arrives.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedeliveryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// How long an admitted message key suppresses identical events.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum number of remembered keys.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for RedeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window_secs: default_window_secs(),
            capacity: default_capacity(),
        }
    }
}

fn default_window_secs() -> u64 {
    60
}

fn default_capacity() -> usize {
    256
}

/// One configured access point.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApnEntry {
    pub name: String,

    /// Subscriber this entry applies to. `None` makes it the fallback entry.
    #[serde(default)]
    pub subscriber: Option<u32>,

    #[serde(default)]
    pub mmsc: Option<String>,

    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default)]
    pub proxy_port: Option<u16>,
}
