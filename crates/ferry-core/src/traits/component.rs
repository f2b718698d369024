// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform component enablement.

use crate::error::FerryError;
use crate::types::ComponentRef;

/// Flips the platform's enabled flag for one of our components.
///
/// Setting the state a component already has must be a no-op.
pub trait ComponentToggle: Send + Sync {
    fn set_enabled(&self, component: ComponentRef, enabled: bool) -> Result<(), FerryError>;
}
