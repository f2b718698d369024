// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget hand-off to the durable message pipeline.
//!
//! [`ActionDispatcher::start`] spawns the pipeline run and returns at once.
//! The returned [`DispatchHandle`] may be awaited for the result or dropped
//! to detach; either way the run continues.

use std::sync::Arc;

use ferry_core::FerryError;
use ferry_core::traits::MessagePipeline;
use ferry_core::types::NormalizedMessage;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::metrics;

/// Starts durable handling for standard-class messages.
pub struct ActionDispatcher {
    pipeline: Arc<dyn MessagePipeline>,
    runtime: Handle,
}

impl ActionDispatcher {
    /// Create a dispatcher that spawns pipeline runs on `runtime`.
    pub fn new(pipeline: Arc<dyn MessagePipeline>, runtime: Handle) -> Self {
        Self { pipeline, runtime }
    }

    /// Hand one message to the pipeline without waiting for it.
    ///
    /// Failures inside the pipeline are logged and counted here; they only
    /// reach the caller if the caller awaits the handle.
    pub fn start(&self, message: NormalizedMessage) -> DispatchHandle {
        self.start_with_failure_hook(message, || {})
    }

    /// Like [`Self::start`], but runs `on_failure` inside the spawned task
    /// when the pipeline returns an error, before the handle resolves.
    pub fn start_with_failure_hook<F>(
        &self,
        message: NormalizedMessage,
        on_failure: F,
    ) -> DispatchHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let pipeline = Arc::clone(&self.pipeline);
        let subscriber = message.subscriber;

        debug!(pipeline = pipeline.name(), %subscriber, "dispatching message");
        let task = self.runtime.spawn(async move {
            let result = pipeline.start(message).await;
            if let Err(e) = &result {
                warn!(
                    pipeline = pipeline.name(),
                    %subscriber,
                    error = %e,
                    "durable pipeline failed"
                );
                metrics::record_dispatch_failure();
                on_failure();
            }
            result
        });

        DispatchHandle { task }
    }
}

/// Handle to one spawned pipeline run.
#[derive(Debug)]
pub struct DispatchHandle {
    task: JoinHandle<Result<(), FerryError>>,
}

impl DispatchHandle {
    /// Wait for the pipeline run and return its result.
    pub async fn completion(self) -> Result<(), FerryError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(FerryError::Internal(format!("dispatch task did not complete: {e}"))),
        }
    }

    /// Whether the pipeline run has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ferry_core::types::{DeliveryClass, ErrorCode, SubscriberId};
    use ferry_test_utils::RecordingPipeline;

    use super::*;

    fn message(body: &str) -> NormalizedMessage {
        NormalizedMessage {
            address: Some("+15550100".into()),
            body: body.into(),
            date_ms: 1,
            date_sent_ms: None,
            read: false,
            seen: false,
            subscriber: SubscriberId::Specified(1),
            error_code: ErrorCode::NONE,
            delivery_class: DeliveryClass::Standard,
            protocol: 0,
            reply_path_present: false,
            service_center: None,
            subject: None,
        }
    }

    #[tokio::test]
    async fn completion_reports_pipeline_success() {
        let pipeline = Arc::new(RecordingPipeline::new());
        let dispatcher = ActionDispatcher::new(pipeline.clone(), Handle::current());

        dispatcher.start(message("hi")).completion().await.unwrap();

        let received = pipeline.received().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].body, "hi");
    }

    #[tokio::test]
    async fn completion_reports_pipeline_failure() {
        let pipeline = Arc::new(RecordingPipeline::failing("store unavailable"));
        let dispatcher = ActionDispatcher::new(pipeline, Handle::current());

        let err = dispatcher.start(message("hi")).completion().await.unwrap_err();
        assert!(matches!(err, FerryError::Pipeline { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn start_returns_before_pipeline_finishes() {
        let pipeline = Arc::new(RecordingPipeline::slow(Duration::from_secs(5)));
        let dispatcher = ActionDispatcher::new(pipeline.clone(), Handle::current());

        let handle = dispatcher.start(message("slow"));
        assert!(!handle.is_finished());
        assert_eq!(pipeline.count().await, 0);

        handle.completion().await.unwrap();
        assert_eq!(pipeline.count().await, 1);
    }

    #[tokio::test]
    async fn dropped_handle_still_runs_pipeline() {
        let pipeline = Arc::new(RecordingPipeline::new());
        let dispatcher = ActionDispatcher::new(pipeline.clone(), Handle::current());

        drop(dispatcher.start(message("detached")));

        for _ in 0..100 {
            if pipeline.count().await == 1 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("detached dispatch never reached the pipeline");
    }

    #[tokio::test]
    async fn failure_hook_runs_only_on_error() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));

        let ok = ActionDispatcher::new(Arc::new(RecordingPipeline::new()), Handle::current());
        let counter = calls.clone();
        ok.start_with_failure_hook(message("fine"), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .completion()
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let failing = ActionDispatcher::new(
            Arc::new(RecordingPipeline::failing("disk full")),
            Handle::current(),
        );
        let counter = calls.clone();
        let result = failing
            .start_with_failure_hook(message("lost"), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .completion()
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
