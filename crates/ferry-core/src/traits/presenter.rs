// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ephemeral presentation of flash messages.

use crate::types::MessageFields;

/// Shows a transient (class 0) message without persisting it.
///
/// Fire-and-forget: the receiver does not wait on or observe the outcome.
pub trait TransientPresenter: Send + Sync {
    fn present_transient_message(&self, fields: MessageFields);
}
