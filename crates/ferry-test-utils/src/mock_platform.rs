// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous platform collaborator mocks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use ferry_core::FerryError;
use ferry_core::traits::{
    ComponentToggle, ContextModeProvider, NotificationManager, TransientPresenter,
};
use ferry_core::types::{ComponentRef, ContextMode, MessageFields, NotificationSpec};

/// Context provider whose mode can be flipped mid-test.
///
/// Counts how often the secondary flag is queried so tests can assert that
/// callers re-read the mode instead of caching it.
pub struct MockContext {
    secondary: AtomicBool,
    messaging_enabled: AtomicBool,
    queries: AtomicUsize,
}

impl MockContext {
    /// A context in `mode` with messaging enabled.
    pub fn new(mode: ContextMode) -> Self {
        Self {
            secondary: AtomicBool::new(mode == ContextMode::Secondary),
            messaging_enabled: AtomicBool::new(true),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn set_mode(&self, mode: ContextMode) {
        self.secondary
            .store(mode == ContextMode::Secondary, Ordering::SeqCst);
    }

    pub fn set_messaging_enabled(&self, enabled: bool) {
        self.messaging_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Number of times the secondary flag has been read.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ContextModeProvider for MockContext {
    fn is_secondary_execution_context(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.secondary.load(Ordering::SeqCst)
    }

    fn is_messaging_enabled_for_this_context(&self) -> bool {
        self.messaging_enabled.load(Ordering::SeqCst)
    }
}

/// Captures every transient presentation.
#[derive(Default)]
pub struct RecordingPresenter {
    presented: Mutex<Vec<MessageFields>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<MessageFields> {
        self.presented.lock().expect("presenter lock poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.presented.lock().expect("presenter lock poisoned").len()
    }
}

impl TransientPresenter for RecordingPresenter {
    fn present_transient_message(&self, fields: MessageFields) {
        self.presented
            .lock()
            .expect("presenter lock poisoned")
            .push(fields);
    }
}

/// Notification table keyed by `(tag, id)`, with replace-on-post semantics.
#[derive(Default)]
pub struct InMemoryNotificationManager {
    active: Mutex<HashMap<(String, i32), NotificationSpec>>,
    posts: AtomicUsize,
    cancels: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryNotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent post and cancel fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of notifications currently showing.
    pub fn active_count(&self) -> usize {
        self.active.lock().expect("notification lock poisoned").len()
    }

    pub fn active(&self, tag: &str, id: i32) -> Option<NotificationSpec> {
        self.active
            .lock()
            .expect("notification lock poisoned")
            .get(&(tag.to_string(), id))
            .cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.load(Ordering::SeqCst)
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    fn check_failing(&self, op: &str) -> Result<(), FerryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FerryError::Notification {
                message: format!("mock {op} failure"),
                source: None,
            });
        }
        Ok(())
    }
}

impl NotificationManager for InMemoryNotificationManager {
    fn post(&self, tag: &str, id: i32, spec: &NotificationSpec) -> Result<(), FerryError> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        self.check_failing("post")?;
        self.active
            .lock()
            .expect("notification lock poisoned")
            .insert((tag.to_string(), id), spec.clone());
        Ok(())
    }

    fn cancel(&self, tag: &str, id: i32) -> Result<(), FerryError> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.check_failing("cancel")?;
        self.active
            .lock()
            .expect("notification lock poisoned")
            .remove(&(tag.to_string(), id));
        Ok(())
    }
}

/// Component enablement table that also logs every call.
#[derive(Default)]
pub struct InMemoryComponentToggle {
    states: Mutex<HashMap<ComponentRef, bool>>,
    calls: Mutex<Vec<(ComponentRef, bool)>>,
    failing: AtomicBool,
}

impl InMemoryComponentToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current state of a component; `None` if never toggled.
    pub fn state(&self, component: ComponentRef) -> Option<bool> {
        self.states
            .lock()
            .expect("component lock poisoned")
            .get(&component)
            .copied()
    }

    pub fn calls(&self) -> Vec<(ComponentRef, bool)> {
        self.calls.lock().expect("component lock poisoned").clone()
    }
}

impl ComponentToggle for InMemoryComponentToggle {
    fn set_enabled(&self, component: ComponentRef, enabled: bool) -> Result<(), FerryError> {
        self.calls
            .lock()
            .expect("component lock poisoned")
            .push((component, enabled));
        if self.failing.load(Ordering::SeqCst) {
            return Err(FerryError::Component {
                message: format!("mock failure toggling {component}"),
                source: None,
            });
        }
        self.states
            .lock()
            .expect("component lock poisoned")
            .insert(component, enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ferry_core::types::Priority;

    use super::*;

    fn spec(title: &str) -> NotificationSpec {
        NotificationSpec {
            channel_id: "c".into(),
            title: title.into(),
            ticker: "t".into(),
            big_text: title.into(),
            small_icon: "i".into(),
            priority: Priority::High,
            default_lights: true,
            default_vibrate: true,
            content_action: "open".into(),
        }
    }

    #[test]
    fn post_replaces_under_same_key() {
        let manager = InMemoryNotificationManager::new();
        manager.post("tag", 1, &spec("first")).unwrap();
        manager.post("tag", 1, &spec("second")).unwrap();
        assert_eq!(manager.active_count(), 1);
        assert_eq!(manager.active("tag", 1).unwrap().title, "second");
        assert_eq!(manager.post_count(), 2);
    }

    #[test]
    fn cancel_of_missing_key_is_ok() {
        let manager = InMemoryNotificationManager::new();
        assert!(manager.cancel("tag", 1).is_ok());
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn failing_manager_keeps_table_unchanged() {
        let manager = InMemoryNotificationManager::new();
        manager.set_failing(true);
        assert!(manager.post("tag", 1, &spec("x")).is_err());
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn context_counts_queries() {
        let context = MockContext::new(ContextMode::Primary);
        assert_eq!(context.current_mode(), ContextMode::Primary);
        context.set_mode(ContextMode::Secondary);
        assert_eq!(context.current_mode(), ContextMode::Secondary);
        assert_eq!(context.query_count(), 2);
    }

    #[test]
    fn toggle_records_calls_and_state() {
        let toggle = InMemoryComponentToggle::new();
        toggle.set_enabled(ComponentRef::SmsReceiver, true).unwrap();
        toggle.set_enabled(ComponentRef::SmsReceiver, false).unwrap();
        assert_eq!(toggle.state(ComponentRef::SmsReceiver), Some(false));
        assert_eq!(toggle.state(ComponentRef::RespondViaMessageService), None);
        assert_eq!(toggle.calls().len(), 2);
    }
}
