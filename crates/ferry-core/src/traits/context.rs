// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution-context lookup.

use crate::types::ContextMode;

/// Reports which delivery path the process currently serves.
///
/// Answers may change over the process lifetime (for example on a user
/// switch), so callers must query on every decision instead of caching.
pub trait ContextModeProvider: Send + Sync {
    /// Whether the process runs in the constrained secondary context.
    fn is_secondary_execution_context(&self) -> bool;

    /// Whether messaging is enabled at all for the current context.
    fn is_messaging_enabled_for_this_context(&self) -> bool;

    /// Snapshot of the current mode.
    fn current_mode(&self) -> ContextMode {
        if self.is_secondary_execution_context() {
            ContextMode::Secondary
        } else {
            ContextMode::Primary
        }
    }
}
