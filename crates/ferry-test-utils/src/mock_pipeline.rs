// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock durable pipeline for deterministic dispatch tests.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ferry_core::FerryError;
use ferry_core::traits::MessagePipeline;
use ferry_core::types::NormalizedMessage;

/// Captures every message handed to `start`.
///
/// Can be configured to fail every call or to sleep before recording, which
/// lets tests show that ingest returns before the pipeline finishes.
pub struct RecordingPipeline {
    received: Mutex<Vec<NormalizedMessage>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingPipeline {
    pub fn new() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            failure: None,
            delay: None,
        }
    }

    /// A pipeline that records the message and then fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// A pipeline that waits `delay` before recording.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub async fn received(&self) -> Vec<NormalizedMessage> {
        self.received.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.received.lock().await.len()
    }
}

impl Default for RecordingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePipeline for RecordingPipeline {
    fn name(&self) -> &str {
        "recording-pipeline"
    }

    async fn start(&self, message: NormalizedMessage) -> Result<(), FerryError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.received.lock().await.push(message);
        match &self.failure {
            Some(reason) => Err(FerryError::Pipeline {
                message: reason.clone(),
                source: None,
            }),
            None => Ok(()),
        }
    }
}
