// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single new-message notification shown in the secondary context.
//!
//! One notifier instance owns the `(tag, id)` pair. Posting replaces the
//! current notification; cancelling removes it. Both run under the same lock,
//! so a post and a cancel never interleave.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ferry_config::model::NotificationConfig;
use ferry_core::traits::NotificationManager;
use ferry_core::types::{NotificationSpec, Priority};
use tracing::{debug, info, warn};

use crate::metrics;

/// Whether the notifier's notification is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryNotificationState {
    Absent,
    Showing,
}

/// Posts and cancels the secondary-context new-message notification.
pub struct SecondaryContextNotifier {
    manager: Arc<dyn NotificationManager>,
    tag: String,
    id: i32,
    spec: NotificationSpec,
    state: Mutex<SecondaryNotificationState>,
}

impl SecondaryContextNotifier {
    /// Build a notifier for `package_name` from the notification config.
    pub fn new(
        config: &NotificationConfig,
        package_name: &str,
        manager: Arc<dyn NotificationManager>,
    ) -> Self {
        let spec = NotificationSpec {
            channel_id: config.channel_id.clone(),
            title: config.title.clone(),
            ticker: config.ticker.clone(),
            big_text: config.title.clone(),
            small_icon: config.small_icon.clone(),
            // High priority makes the platform show a heads-up; without it
            // the ticker is not displayed.
            priority: Priority::High,
            default_lights: true,
            default_vibrate: true,
            content_action: format!("{package_name}.action.SECONDARY_USER_NEW_MESSAGE"),
        };

        Self {
            manager,
            tag: config.tag_for(package_name),
            id: config.id,
            spec,
            state: Mutex::new(SecondaryNotificationState::Absent),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// The notification posted on every call to [`Self::post_new_message_notification`].
    pub fn spec(&self) -> &NotificationSpec {
        &self.spec
    }

    pub fn state(&self) -> SecondaryNotificationState {
        *self.lock_state()
    }

    /// Show (or replace) the new-message notification.
    ///
    /// Delivery failures are logged and swallowed; the only effect is that
    /// the user does not see the notification.
    pub fn post_new_message_notification(&self) {
        let mut state = self.lock_state();
        match self.manager.post(&self.tag, self.id, &self.spec) {
            Ok(()) => {
                if *state == SecondaryNotificationState::Showing {
                    debug!(tag = %self.tag, id = self.id, "replacing new-message notification");
                } else {
                    info!(tag = %self.tag, id = self.id, "posted new-message notification");
                }
                *state = SecondaryNotificationState::Showing;
                metrics::record_notification("post", true);
            }
            Err(e) => {
                warn!(tag = %self.tag, id = self.id, error = %e, "new-message notification not posted");
                metrics::record_notification("post", false);
            }
        }
    }

    /// Remove the notification if it is showing.
    pub fn cancel_notification(&self) {
        let mut state = self.lock_state();
        match self.manager.cancel(&self.tag, self.id) {
            Ok(()) => {
                debug!(tag = %self.tag, id = self.id, "cancelled new-message notification");
                *state = SecondaryNotificationState::Absent;
                metrics::record_notification("cancel", true);
            }
            Err(e) => {
                warn!(tag = %self.tag, id = self.id, error = %e, "new-message notification not cancelled");
                metrics::record_notification("cancel", false);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SecondaryNotificationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use ferry_test_utils::InMemoryNotificationManager;

    use super::*;

    fn notifier() -> (SecondaryContextNotifier, Arc<InMemoryNotificationManager>) {
        let manager = Arc::new(InMemoryNotificationManager::new());
        let notifier = SecondaryContextNotifier::new(
            &NotificationConfig::default(),
            "org.ferry.messaging",
            manager.clone(),
        );
        (notifier, manager)
    }

    #[test]
    fn starts_absent() {
        let (notifier, manager) = notifier();
        assert_eq!(notifier.state(), SecondaryNotificationState::Absent);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn tag_is_package_plus_suffix() {
        let (notifier, _) = notifier();
        assert_eq!(notifier.tag(), "org.ferry.messaging:secondaryuser");
        assert_eq!(notifier.id(), 5);
    }

    #[test]
    fn repeated_posts_replace_instead_of_accumulating() {
        let (notifier, manager) = notifier();
        notifier.post_new_message_notification();
        notifier.post_new_message_notification();

        assert_eq!(notifier.state(), SecondaryNotificationState::Showing);
        assert_eq!(manager.post_count(), 2);
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn cancel_after_posts_leaves_nothing() {
        let (notifier, manager) = notifier();
        for _ in 0..3 {
            notifier.post_new_message_notification();
        }
        notifier.cancel_notification();

        assert_eq!(notifier.state(), SecondaryNotificationState::Absent);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn cancel_when_absent_is_a_no_op() {
        let (notifier, manager) = notifier();
        notifier.cancel_notification();
        assert_eq!(notifier.state(), SecondaryNotificationState::Absent);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn posted_spec_is_high_priority_with_defaults() {
        let (notifier, manager) = notifier();
        notifier.post_new_message_notification();

        let spec = manager
            .active(notifier.tag(), notifier.id())
            .expect("notification showing");
        assert_eq!(spec.priority, Priority::High);
        assert!(spec.default_lights);
        assert!(spec.default_vibrate);
        assert_eq!(spec.big_text, spec.title);
    }

    #[test]
    fn failed_post_is_absorbed() {
        let (notifier, manager) = notifier();
        manager.set_failing(true);
        notifier.post_new_message_notification();

        assert_eq!(notifier.state(), SecondaryNotificationState::Absent);
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn failed_cancel_keeps_showing_state() {
        let (notifier, manager) = notifier();
        notifier.post_new_message_notification();
        manager.set_failing(true);
        notifier.cancel_notification();

        assert_eq!(notifier.state(), SecondaryNotificationState::Showing);
    }

    #[test]
    fn concurrent_posts_and_cancels_end_consistent() {
        let (notifier, manager) = notifier();
        let notifier = Arc::new(notifier);

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let notifier = Arc::clone(&notifier);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        if i % 2 == 0 {
                            notifier.post_new_message_notification();
                        } else {
                            notifier.cancel_notification();
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let showing = manager.active_count() == 1;
        assert!(manager.active_count() <= 1);
        assert_eq!(
            notifier.state() == SecondaryNotificationState::Showing,
            showing
        );
    }
}
