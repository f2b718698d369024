// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opt-in suppression of redelivered inbound events.
//!
//! The platform may redeliver an identical event. When enabled, the guard
//! remembers a content key per dispatched message for a bounded window and
//! rejects a second dispatch of the same key inside that window.
//!
//! A key is recorded when the message is dispatched, not when the pipeline
//! finishes. The receiver calls [`RedeliveryGuard::forget`] when the pipeline
//! run fails, so a redelivery of a message that was never stored goes through.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use ferry_config::model::RedeliveryConfig;
use ferry_core::types::NormalizedMessage;
use sha2::{Digest, Sha256};

/// Remembers recently admitted message keys.
pub struct RedeliveryGuard {
    window: Duration,
    capacity: usize,
    admitted: Mutex<Admitted>,
}

#[derive(Default)]
struct Admitted {
    order: VecDeque<(String, Instant)>,
    keys: HashSet<String>,
}

impl RedeliveryGuard {
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            admitted: Mutex::new(Admitted::default()),
        }
    }

    /// Build a guard from config, or `None` when redelivery suppression is off.
    pub fn from_config(config: &RedeliveryConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(Duration::from_secs(config.window_secs), config.capacity))
    }

    /// Record `message` and report whether it is the first sighting in the window.
    pub fn admit(&self, message: &NormalizedMessage) -> bool {
        self.admit_key(&redelivery_key(message))
    }

    /// Like [`Self::admit`] for a key already computed with [`redelivery_key`].
    pub fn admit_key(&self, key: &str) -> bool {
        self.admit_key_at(key, Instant::now())
    }

    /// Drop `key` so its next sighting is admitted again.
    pub fn forget(&self, key: &str) {
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        if admitted.keys.remove(key) {
            admitted.order.retain(|(k, _)| k != key);
        }
    }

    #[cfg(test)]
    fn admit_at(&self, message: &NormalizedMessage, now: Instant) -> bool {
        self.admit_key_at(&redelivery_key(message), now)
    }

    fn admit_key_at(&self, key: &str, now: Instant) -> bool {
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);

        while let Some((_, at)) = admitted.order.front() {
            if now.saturating_duration_since(*at) < self.window {
                break;
            }
            if let Some((expired, _)) = admitted.order.pop_front() {
                admitted.keys.remove(&expired);
            }
        }

        if admitted.keys.contains(key) {
            return false;
        }

        while admitted.order.len() >= self.capacity {
            if let Some((evicted, _)) = admitted.order.pop_front() {
                admitted.keys.remove(&evicted);
            }
        }

        admitted.keys.insert(key.to_string());
        admitted.order.push_back((key.to_string(), now));
        true
    }

    /// Number of keys currently remembered.
    pub fn len(&self) -> usize {
        self.admitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Content key of a message: SHA-256 over subscriber, sender, body, and sent time.
///
/// The receive time is left out because it falls back to "now" when the
/// event has no timestamp, and would differ between redeliveries.
pub fn redelivery_key(message: &NormalizedMessage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message.subscriber.as_raw().to_be_bytes());
    hasher.update([0u8]);
    hasher.update(message.address.as_deref().unwrap_or_default().as_bytes());
    hasher.update([0u8]);
    hasher.update(message.body.as_bytes());
    hasher.update([0u8]);
    hasher.update(message.date_sent_ms.unwrap_or(-1).to_be_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use ferry_core::types::{DeliveryClass, ErrorCode, SubscriberId};

    use super::*;

    fn message(body: &str, date_ms: i64) -> NormalizedMessage {
        NormalizedMessage {
            address: Some("+15550100".into()),
            body: body.into(),
            date_ms,
            date_sent_ms: Some(1_000),
            read: false,
            seen: false,
            subscriber: SubscriberId::Specified(0),
            error_code: ErrorCode::NONE,
            delivery_class: DeliveryClass::Standard,
            protocol: 0,
            reply_path_present: false,
            service_center: None,
            subject: None,
        }
    }

    #[test]
    fn disabled_config_builds_no_guard() {
        assert!(RedeliveryGuard::from_config(&RedeliveryConfig::default()).is_none());
    }

    #[test]
    fn key_ignores_receive_time() {
        assert_eq!(
            redelivery_key(&message("hi", 1)),
            redelivery_key(&message("hi", 2))
        );
        assert_ne!(
            redelivery_key(&message("hi", 1)),
            redelivery_key(&message("ho", 1))
        );
    }

    #[test]
    fn key_separates_subscribers() {
        let mut other = message("hi", 1);
        other.subscriber = SubscriberId::Specified(1);
        assert_ne!(redelivery_key(&message("hi", 1)), redelivery_key(&other));
    }

    #[test]
    fn second_sighting_in_window_is_rejected() {
        let guard = RedeliveryGuard::new(Duration::from_secs(60), 8);
        let now = Instant::now();
        assert!(guard.admit_at(&message("hi", 1), now));
        assert!(!guard.admit_at(&message("hi", 1), now + Duration::from_secs(10)));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn sighting_after_window_is_admitted() {
        let guard = RedeliveryGuard::new(Duration::from_secs(60), 8);
        let now = Instant::now();
        assert!(guard.admit_at(&message("hi", 1), now));
        assert!(guard.admit_at(&message("hi", 1), now + Duration::from_secs(61)));
    }

    #[test]
    fn capacity_evicts_oldest_key() {
        let guard = RedeliveryGuard::new(Duration::from_secs(60), 2);
        let now = Instant::now();
        assert!(guard.admit_at(&message("a", 1), now));
        assert!(guard.admit_at(&message("b", 1), now));
        assert!(guard.admit_at(&message("c", 1), now));
        assert_eq!(guard.len(), 2);
        // "a" was evicted, so it is admitted again.
        assert!(guard.admit_at(&message("a", 1), now));
        assert!(!guard.admit_at(&message("c", 1), now));
    }

    #[test]
    fn forgotten_key_is_admitted_again() {
        let guard = RedeliveryGuard::new(Duration::from_secs(60), 8);
        let key = redelivery_key(&message("hi", 1));
        assert!(guard.admit_key(&key));
        assert!(!guard.admit_key(&key));

        guard.forget(&key);
        assert!(guard.is_empty());
        assert!(guard.admit_key(&key));
    }

    #[test]
    fn forgetting_unknown_key_is_harmless() {
        let guard = RedeliveryGuard::new(Duration::from_secs(60), 8);
        assert!(guard.admit(&message("a", 1)));
        guard.forget("not-a-key");
        assert_eq!(guard.len(), 1);
    }
}
