// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! APN configuration lookup.

use crate::error::ConfigResolutionError;
use crate::types::{ApnSettings, SubscriberId};

/// Looks up the access point needed to complete a transport operation.
pub trait ApnResolver: Send + Sync {
    /// Resolve the APN for `subscriber`.
    ///
    /// A [`ConfigResolutionError`] is terminal for the current attempt; this
    /// trait never retries.
    fn resolve(&self, subscriber: SubscriberId) -> Result<ApnSettings, ConfigResolutionError>;
}
