// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::FerryConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &FerryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.receiver.package_name.trim().is_empty() {
        errors.push(validation("receiver.package_name must not be empty"));
    }

    let level = config.receiver.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(validation(format!(
            "receiver.log_level `{}` must be one of: {}",
            config.receiver.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.notification.tag_suffix.is_empty() {
        errors.push(validation("notification.tag_suffix must not be empty"));
    }

    if config.notification.id < 0 {
        errors.push(validation(format!(
            "notification.id must be non-negative, got {}",
            config.notification.id
        )));
    }

    if config.notification.channel_id.trim().is_empty() {
        errors.push(validation("notification.channel_id must not be empty"));
    }

    if config.redelivery.enabled {
        if config.redelivery.window_secs == 0 {
            errors.push(validation(
                "redelivery.window_secs must be at least 1 when redelivery is enabled",
            ));
        }
        if config.redelivery.capacity == 0 {
            errors.push(validation(
                "redelivery.capacity must be at least 1 when redelivery is enabled",
            ));
        }
    }

    for (i, entry) in config.apn.iter().enumerate() {
        if entry.name.trim().is_empty() {
            errors.push(validation(format!("apn[{i}].name must not be empty")));
        }
    }

    // At most one entry per subscriber, and at most one fallback entry.
    let mut seen_subscribers = HashSet::new();
    for entry in &config.apn {
        if !seen_subscribers.insert(entry.subscriber) {
            let which = match entry.subscriber {
                Some(id) => format!("subscriber {id}"),
                None => "the fallback (no subscriber)".to_string(),
            };
            errors.push(validation(format!(
                "duplicate apn entry for {which} in [[apn]] array"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}
