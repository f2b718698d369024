// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry point for inbound message events.
//!
//! [`IngestionReceiver`] has two jobs:
//! - In the secondary context, turn "message arrived" events into the
//!   new-message notification ([`IngestionReceiver::on_event`]).
//! - Where it is also responsible for delivery, run the full
//!   extract / resolve / classify / route path ([`IngestionReceiver::ingest`]).
//!
//! It also keeps the platform's receiver component enabled only while the
//! process runs in the secondary context.

use std::sync::Arc;

use ferry_config::FerryConfig;
use ferry_core::FerryError;
use ferry_core::traits::{
    ComponentToggle, ContextModeProvider, MessagePipeline, NotificationManager,
    TransientPresenter,
};
use ferry_core::types::{
    ComponentRef, ContextMode, DeliveryClass, ErrorCode, EventAction, InboundEvent, SubscriberId,
};
use tokio::runtime::Handle;
use tracing::{debug, info, trace, warn};

use crate::dispatcher::{ActionDispatcher, DispatchHandle};
use crate::notifier::SecondaryContextNotifier;
use crate::redelivery::{RedeliveryGuard, redelivery_key};
use crate::{classifier, extractor, metrics, record, subscriber};

/// The platform collaborators a receiver is wired to.
pub struct Platform {
    pub context: Arc<dyn ContextModeProvider>,
    pub presenter: Arc<dyn TransientPresenter>,
    pub pipeline: Arc<dyn MessagePipeline>,
    pub notifications: Arc<dyn NotificationManager>,
    pub components: Arc<dyn ComponentToggle>,
}

/// What [`IngestionReceiver::on_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Messaging is turned off for this context.
    MessagingDisabled,
    /// The primary delivery path owns the event.
    PrimaryContext,
    /// Secondary context, but not a message-arrival action.
    UnrecognizedAction,
    /// The new-message notification was (re)posted.
    NotificationPosted(EventAction),
}

/// What [`IngestionReceiver::ingest`] did with an event.
#[derive(Debug)]
pub enum IngestOutcome {
    /// No usable fragments; nothing was classified or routed.
    Ignored,
    /// Flash message handed to the presenter.
    Presented { subscriber: SubscriberId },
    /// Standard message handed to the durable pipeline.
    Dispatched(DispatchHandle),
    /// Suppressed as a redelivery of an already dispatched message.
    Redelivered,
}

/// Whether the receiver component should be enabled in `mode`.
pub fn is_receiver_enabled(mode: ContextMode) -> bool {
    matches!(mode, ContextMode::Secondary)
}

/// Orchestrates ingestion of inbound message events.
pub struct IngestionReceiver {
    context: Arc<dyn ContextModeProvider>,
    presenter: Arc<dyn TransientPresenter>,
    components: Arc<dyn ComponentToggle>,
    dispatcher: ActionDispatcher,
    notifier: Arc<SecondaryContextNotifier>,
    redelivery: Option<Arc<RedeliveryGuard>>,
}

impl IngestionReceiver {
    /// Build a receiver that dispatches on the current tokio runtime.
    pub fn new(config: &FerryConfig, platform: Platform) -> Result<Self, FerryError> {
        let runtime = Handle::try_current().map_err(|e| {
            FerryError::Internal(format!("ingestion receiver needs a tokio runtime: {e}"))
        })?;
        Ok(Self::with_runtime(config, platform, runtime))
    }

    /// Build a receiver that dispatches on an explicit runtime.
    pub fn with_runtime(config: &FerryConfig, platform: Platform, runtime: Handle) -> Self {
        let notifier = SecondaryContextNotifier::new(
            &config.notification,
            &config.receiver.package_name,
            platform.notifications,
        );

        Self {
            context: platform.context,
            presenter: platform.presenter,
            components: platform.components,
            dispatcher: ActionDispatcher::new(platform.pipeline, runtime),
            notifier: Arc::new(notifier),
            redelivery: RedeliveryGuard::from_config(&config.redelivery).map(Arc::new),
        }
    }

    /// The notifier this receiver posts through. Callers use it to cancel.
    pub fn notifier(&self) -> &Arc<SecondaryContextNotifier> {
        &self.notifier
    }

    /// Handle a message-arrival broadcast.
    ///
    /// Only the secondary context does anything here: it posts the
    /// new-message notification for SMS-received and MMS-downloaded actions.
    /// Extraction and routing are never run from this path.
    pub fn on_event(&self, event: &InboundEvent) -> EventOutcome {
        trace!(action = %event.action, "inbound event");

        if !self.context.is_messaging_enabled_for_this_context() {
            debug!(action = %event.action, "messaging disabled for this context");
            return EventOutcome::MessagingDisabled;
        }

        if self.context.current_mode() != ContextMode::Secondary {
            return EventOutcome::PrimaryContext;
        }

        match EventAction::from_action(&event.action) {
            Some(action) => {
                self.notifier.post_new_message_notification();
                EventOutcome::NotificationPosted(action)
            }
            None => {
                debug!(action = %event.action, "ignoring unrecognized action");
                EventOutcome::UnrecognizedAction
            }
        }
    }

    /// Run the full delivery path using the routing hint and error code
    /// carried in the event's extras.
    pub fn deliver_event(&self, event: &InboundEvent) -> IngestOutcome {
        self.ingest(event.extras.subscription, event.extras.error_code, event)
    }

    /// Extract, normalize, classify, and route one event.
    ///
    /// Exactly one of presenter or dispatcher is called for an admitted
    /// event; neither is called for an event without fragments. Never fails.
    pub fn ingest(
        &self,
        subscriber_hint: Option<i32>,
        error_code: Option<i32>,
        event: &InboundEvent,
    ) -> IngestOutcome {
        let Some(fragments) = extractor::extract(event) else {
            debug!(action = %event.action, "ignoring event with no usable fragments");
            metrics::record_event("ignored");
            return IngestOutcome::Ignored;
        };

        let subscriber = subscriber::resolve(subscriber_hint);
        let error_code = error_code.map(ErrorCode).unwrap_or_default();
        let delivery_class = classifier::classify(fragments.first());
        let now_ms = chrono::Utc::now().timestamp_millis();
        let message = record::assemble(&fragments, subscriber, error_code, delivery_class, now_ms);

        match delivery_class {
            DeliveryClass::TransientClass0 => {
                info!(
                    %subscriber,
                    fragments = fragments.len(),
                    "presenting class 0 message"
                );
                self.presenter.present_transient_message(message.to_fields());
                metrics::record_event("presented");
                IngestOutcome::Presented { subscriber }
            }
            DeliveryClass::Standard => {
                let Some(guard) = &self.redelivery else {
                    let handle = self.dispatcher.start(message);
                    return dispatched(subscriber, fragments.len(), error_code, handle);
                };

                let key = redelivery_key(&message);
                if !guard.admit_key(&key) {
                    info!(%subscriber, "suppressing redelivered message");
                    metrics::record_event("redelivered");
                    return IngestOutcome::Redelivered;
                }

                // A failed run stored nothing, so a redelivery must get through.
                let guard = Arc::clone(guard);
                let handle = self
                    .dispatcher
                    .start_with_failure_hook(message, move || guard.forget(&key));
                dispatched(subscriber, fragments.len(), error_code, handle)
            }
        }
    }

    /// Whether the receiver component should be enabled right now.
    ///
    /// Reads the live context mode on every call.
    pub fn is_enabled_now(&self) -> bool {
        is_receiver_enabled(self.context.current_mode())
    }

    /// Enable the receiver component in the secondary context and disable it
    /// otherwise. The respond-via-message service is always enabled.
    ///
    /// Safe to call repeatedly; toggle failures are logged, not raised.
    pub fn update_receiver_enablement(&self) {
        let enabled = self.is_enabled_now();
        if enabled {
            debug!("enabling sms message receiving");
        } else {
            debug!("disabling sms message receiving");
        }
        self.set_component(ComponentRef::SmsReceiver, enabled);
        self.set_component(ComponentRef::RespondViaMessageService, true);
    }

    fn set_component(&self, component: ComponentRef, enabled: bool) {
        if let Err(e) = self.components.set_enabled(component, enabled) {
            warn!(%component, enabled, error = %e, "component toggle failed");
        }
    }
}

fn dispatched(
    subscriber: SubscriberId,
    fragments: usize,
    error_code: ErrorCode,
    handle: DispatchHandle,
) -> IngestOutcome {
    info!(
        %subscriber,
        fragments,
        error_code = error_code.0,
        "dispatched message to durable pipeline"
    );
    metrics::record_event("dispatched");
    IngestOutcome::Dispatched(handle)
}
