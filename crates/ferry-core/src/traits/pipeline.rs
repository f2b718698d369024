// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable message pipeline reached through the follow-up action boundary.

use async_trait::async_trait;

use crate::error::FerryError;
use crate::types::NormalizedMessage;

/// Persists a message and triggers its follow-up effects.
///
/// Retry and durability guarantees belong to the implementation. The
/// dispatcher runs `start` off the caller's critical path.
#[async_trait]
pub trait MessagePipeline: Send + Sync + 'static {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Take ownership of one assembled message.
    async fn start(&self, message: NormalizedMessage) -> Result<(), FerryError>;
}
