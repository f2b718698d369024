// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform notification delivery.

use crate::error::FerryError;
use crate::types::NotificationSpec;

/// Posts and cancels user-visible notifications keyed by `(tag, id)`.
///
/// Posting under an existing key replaces the previous notification.
pub trait NotificationManager: Send + Sync {
    fn post(&self, tag: &str, id: i32, spec: &NotificationSpec) -> Result<(), FerryError>;

    /// Remove the notification under `(tag, id)`. Succeeds when none exists.
    fn cancel(&self, tag: &str, id: i32) -> Result<(), FerryError>;
}
