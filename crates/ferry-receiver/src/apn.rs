// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config-backed APN lookup.

use ferry_config::model::{ApnEntry, FerryConfig};
use ferry_core::error::{ConfigResolutionError, FerryError};
use ferry_core::traits::ApnResolver;
use ferry_core::types::{ApnSettings, SubscriberId};
use tracing::warn;

/// Resolves APNs from the `[[apn]]` entries of the configuration.
///
/// An entry whose `subscriber` matches wins; otherwise the entry without a
/// subscriber is the fallback.
pub struct ConfiguredApnResolver {
    entries: Vec<ApnEntry>,
}

impl ConfiguredApnResolver {
    pub fn new(entries: Vec<ApnEntry>) -> Self {
        Self { entries }
    }

    pub fn from_config(config: &FerryConfig) -> Self {
        Self::new(config.apn.clone())
    }

    fn entry_for(&self, subscriber: SubscriberId) -> Option<&ApnEntry> {
        let exact = match subscriber {
            SubscriberId::Specified(id) => self.entries.iter().find(|e| e.subscriber == Some(id)),
            SubscriberId::Unspecified => None,
        };
        exact.or_else(|| self.entries.iter().find(|e| e.subscriber.is_none()))
    }
}

impl ApnResolver for ConfiguredApnResolver {
    fn resolve(&self, subscriber: SubscriberId) -> Result<ApnSettings, ConfigResolutionError> {
        let entry = self.entry_for(subscriber).ok_or_else(|| {
            ConfigResolutionError::with_message(format!(
                "no apn configured for subscriber {subscriber}"
            ))
        })?;

        let mmsc = entry
            .mmsc
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                ConfigResolutionError::with_message(format!("apn `{}` has no mmsc", entry.name))
            })?;

        if entry.proxy_port.is_some() && entry.proxy.is_none() {
            return Err(ConfigResolutionError::with_message(format!(
                "apn `{}` sets proxy_port without a proxy",
                entry.name
            )));
        }

        Ok(ApnSettings {
            name: entry.name.clone(),
            mmsc: mmsc.to_string(),
            proxy: entry.proxy.clone(),
            proxy_port: entry.proxy_port,
        })
    }
}

/// Resolve the APN a transport operation needs, or fail that operation.
///
/// The lookup is not retried; the error is handed back to the caller.
pub fn require_apn(
    resolver: &dyn ApnResolver,
    subscriber: SubscriberId,
) -> Result<ApnSettings, FerryError> {
    resolver.resolve(subscriber).map_err(|e| {
        warn!(%subscriber, error = %e, "apn resolution failed");
        FerryError::from(e)
    })
}
