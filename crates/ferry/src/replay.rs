// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline replay of recorded inbound events.
//!
//! Each platform collaborator is backed by `tracing`, so a replay shows what
//! the receiver would have posted, presented, toggled, and dispatched.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use ferry_config::FerryConfig;
use ferry_core::FerryError;
use ferry_core::traits::{
    ComponentToggle, ContextModeProvider, MessagePipeline, NotificationManager,
    TransientPresenter,
};
use ferry_core::types::{ComponentRef, InboundEvent, MessageFields, NormalizedMessage, NotificationSpec};
use ferry_receiver::{EventOutcome, IngestOutcome, IngestionReceiver, Platform};
use tracing::{info, warn};

/// How the replayed process reports its execution context.
#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    pub secondary: bool,
    pub messaging_enabled: bool,
}

/// Counts of what happened to the replayed events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub notifications: usize,
    pub presented: usize,
    pub dispatched: usize,
    pub ignored: usize,
    pub redelivered: usize,
    pub failed: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "replayed {} events: {} notified, {} presented, {} dispatched ({} failed), {} ignored, {} redelivered",
            self.events,
            self.notifications,
            self.presented,
            self.dispatched,
            self.failed,
            self.ignored,
            self.redelivered
        )
    }
}

struct StaticContext(ReplayOptions);

impl ContextModeProvider for StaticContext {
    fn is_secondary_execution_context(&self) -> bool {
        self.0.secondary
    }

    fn is_messaging_enabled_for_this_context(&self) -> bool {
        self.0.messaging_enabled
    }
}

struct TracingPresenter;

impl TransientPresenter for TracingPresenter {
    fn present_transient_message(&self, fields: MessageFields) {
        let body = fields.get("body").and_then(|v| v.as_str()).unwrap_or_default();
        info!(body, "class 0 message shown");
    }
}

struct TracingPipeline;

#[async_trait]
impl MessagePipeline for TracingPipeline {
    fn name(&self) -> &str {
        "log"
    }

    async fn start(&self, message: NormalizedMessage) -> Result<(), FerryError> {
        info!(
            address = message.address.as_deref().unwrap_or("unknown"),
            subscriber = %message.subscriber,
            date_ms = message.date_ms,
            body = %message.body,
            "message stored"
        );
        Ok(())
    }
}

struct TracingNotificationManager;

impl NotificationManager for TracingNotificationManager {
    fn post(&self, tag: &str, id: i32, spec: &NotificationSpec) -> Result<(), FerryError> {
        info!(tag, id, title = %spec.title, channel = %spec.channel_id, "notification posted");
        Ok(())
    }

    fn cancel(&self, tag: &str, id: i32) -> Result<(), FerryError> {
        info!(tag, id, "notification cancelled");
        Ok(())
    }
}

struct TracingComponentToggle;

impl ComponentToggle for TracingComponentToggle {
    fn set_enabled(&self, component: ComponentRef, enabled: bool) -> Result<(), FerryError> {
        info!(%component, enabled, "component toggled");
        Ok(())
    }
}

/// Parse JSON-lines events, skipping blank lines.
pub fn parse_events(input: &str) -> Result<Vec<InboundEvent>, FerryError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| FerryError::Internal(format!("event on line {}: {e}", index + 1)))
        })
        .collect()
}

/// Build a receiver wired to the tracing-backed collaborators.
pub fn build_receiver(
    config: &FerryConfig,
    options: ReplayOptions,
) -> Result<IngestionReceiver, FerryError> {
    IngestionReceiver::new(
        config,
        Platform {
            context: Arc::new(StaticContext(options)),
            presenter: Arc::new(TracingPresenter),
            pipeline: Arc::new(TracingPipeline),
            notifications: Arc::new(TracingNotificationManager),
            components: Arc::new(TracingComponentToggle),
        },
    )
}

/// Run every event through notification and delivery, waiting for all
/// dispatched pipeline runs before returning.
pub async fn replay_events(receiver: &IngestionReceiver, events: &[InboundEvent]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    let mut pending = Vec::new();

    receiver.update_receiver_enablement();

    for event in events {
        summary.events += 1;
        if let EventOutcome::NotificationPosted(_) = receiver.on_event(event) {
            summary.notifications += 1;
        }
        match receiver.deliver_event(event) {
            IngestOutcome::Ignored => summary.ignored += 1,
            IngestOutcome::Presented { .. } => summary.presented += 1,
            IngestOutcome::Redelivered => summary.redelivered += 1,
            IngestOutcome::Dispatched(handle) => {
                summary.dispatched += 1;
                pending.push(handle);
            }
        }
    }

    for handle in pending {
        if let Err(e) = handle.completion().await {
            warn!(error = %e, "replayed dispatch failed");
            summary.failed += 1;
        }
    }

    summary
}

/// Load events from `path` and replay them.
pub async fn run_replay(
    config: &FerryConfig,
    path: &Path,
    options: ReplayOptions,
) -> Result<ReplaySummary, FerryError> {
    let input = tokio::fs::read_to_string(path).await.map_err(|e| {
        FerryError::Internal(format!("failed to read {}: {e}", path.display()))
    })?;
    let events = parse_events(&input)?;
    info!(path = %path.display(), count = events.len(), "replaying events");

    let receiver = build_receiver(config, options)?;
    Ok(replay_events(&receiver, &events).await)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EVENTS: &str = r#"
{"action": "android.provider.Telephony.SMS_RECEIVED", "fragments": [{"body": "hi", "originating_address": "+15550100"}], "extras": {"subscription": 1}}
{"action": "android.provider.Telephony.SMS_RECEIVED", "fragments": [{"body": "flash", "message_class": "CLASS_0"}]}

{"action": "android.provider.Telephony.SMS_RECEIVED", "fragments": []}
{"action": "android.provider.Telephony.MMS_DOWNLOADED"}
"#;

    const PRIMARY: ReplayOptions = ReplayOptions {
        secondary: false,
        messaging_enabled: true,
    };

    #[test]
    fn parse_skips_blank_lines() {
        let events = parse_events(EVENTS).expect("valid jsonl");
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].extras.subscription, Some(1));
        assert!(events[3].fragments.is_none());
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse_events("{\"action\": \"x\"}\nnot json\n").expect_err("invalid line");
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[tokio::test]
    async fn primary_replay_routes_without_notifying() {
        let receiver = build_receiver(&FerryConfig::default(), PRIMARY).unwrap();
        let events = parse_events(EVENTS).unwrap();

        let summary = replay_events(&receiver, &events).await;
        assert_eq!(
            summary,
            ReplaySummary {
                events: 4,
                notifications: 0,
                presented: 1,
                dispatched: 1,
                ignored: 2,
                redelivered: 0,
                failed: 0,
            }
        );
    }

    #[tokio::test]
    async fn secondary_replay_notifies_for_each_recognized_event() {
        let options = ReplayOptions {
            secondary: true,
            messaging_enabled: true,
        };
        let receiver = build_receiver(&FerryConfig::default(), options).unwrap();
        let events = parse_events(EVENTS).unwrap();

        let summary = replay_events(&receiver, &events).await;
        assert_eq!(summary.notifications, 4);
    }

    #[tokio::test]
    async fn run_replay_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EVENTS.as_bytes()).unwrap();

        let summary = run_replay(&FerryConfig::default(), file.path(), PRIMARY)
            .await
            .unwrap();
        assert_eq!(summary.events, 4);
        assert!(summary.to_string().starts_with("replayed 4 events"));
    }

    #[tokio::test]
    async fn run_replay_missing_file_is_an_error() {
        let result = run_replay(
            &FerryConfig::default(),
            Path::new("/nonexistent/ferry-events.jsonl"),
            PRIMARY,
        )
        .await;
        assert!(matches!(result, Err(FerryError::Internal(_))));
    }
}
