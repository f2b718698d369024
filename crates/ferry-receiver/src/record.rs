// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembly of the single normalized record for an admitted event.

use ferry_core::types::{DeliveryClass, ErrorCode, NormalizedMessage, SubscriberId};

use crate::extractor::AdmittedFragments;

/// Merge all fragments of one event into one record.
///
/// Sender, protocol, service centre, subject, and timestamps come from the
/// first fragment. The record always starts unread and unseen; downstream
/// bookkeeping owns the authoritative seen-state.
pub fn assemble(
    fragments: &AdmittedFragments<'_>,
    subscriber: SubscriberId,
    error_code: ErrorCode,
    delivery_class: DeliveryClass,
    now_ms: i64,
) -> NormalizedMessage {
    let first = fragments.first();

    NormalizedMessage {
        address: first.originating_address.clone(),
        body: merge_bodies(fragments),
        date_ms: first.timestamp_ms.unwrap_or(now_ms),
        date_sent_ms: first.timestamp_ms,
        read: false,
        seen: false,
        subscriber,
        error_code,
        delivery_class,
        protocol: first.protocol_identifier,
        reply_path_present: first.reply_path_present,
        service_center: first.service_center.clone(),
        subject: first
            .pseudo_subject
            .as_ref()
            .filter(|s| !s.is_empty())
            .cloned(),
    }
}

/// Concatenate fragment bodies in arrival order.
///
/// A lone fragment has its form feeds turned into newlines; some carriers
/// send `\f` as a line separator in single-part messages.
pub fn merge_bodies(fragments: &AdmittedFragments<'_>) -> String {
    match fragments.all() {
        [only] => only.body.replace('\u{000C}', "\n"),
        all => all.iter().map(|f| f.body.as_str()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use ferry_core::types::{ACTION_SMS_RECEIVED, Fragment, InboundEvent};

    use super::*;
    use crate::extractor;

    fn event(bodies: &[&str]) -> InboundEvent {
        let fragments = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| Fragment {
                originating_address: Some(format!("+1555010{i}")),
                body: body.to_string(),
                protocol_identifier: i as i32,
                ..Fragment::default()
            })
            .collect();
        InboundEvent::new(ACTION_SMS_RECEIVED, fragments)
    }

    #[test]
    fn multipart_bodies_concatenate_in_order() {
        let event = event(&["Hello, ", "wor", "ld"]);
        let admitted = extractor::extract(&event).unwrap();
        assert_eq!(merge_bodies(&admitted), "Hello, world");
    }

    #[test]
    fn single_part_form_feeds_become_newlines() {
        let event = event(&["line one\u{000C}line two"]);
        let admitted = extractor::extract(&event).unwrap();
        assert_eq!(merge_bodies(&admitted), "line one\nline two");
    }

    #[test]
    fn multipart_form_feeds_are_kept() {
        let event = event(&["a\u{000C}", "b"]);
        let admitted = extractor::extract(&event).unwrap();
        assert_eq!(merge_bodies(&admitted), "a\u{000C}b");
    }

    #[test]
    fn header_fields_come_from_first_fragment() {
        let event = event(&["x", "y"]);
        let admitted = extractor::extract(&event).unwrap();
        let message = assemble(
            &admitted,
            SubscriberId::Specified(2),
            ErrorCode(7),
            DeliveryClass::Standard,
            42,
        );
        assert_eq!(message.address.as_deref(), Some("+15550100"));
        assert_eq!(message.protocol, 0);
        assert_eq!(message.subscriber, SubscriberId::Specified(2));
        assert_eq!(message.error_code, ErrorCode(7));
    }

    #[test]
    fn missing_timestamp_falls_back_to_now() {
        let event = event(&["x"]);
        let admitted = extractor::extract(&event).unwrap();
        let message = assemble(
            &admitted,
            SubscriberId::Unspecified,
            ErrorCode::NONE,
            DeliveryClass::Standard,
            1_234,
        );
        assert_eq!(message.date_ms, 1_234);
        assert_eq!(message.date_sent_ms, None);
        assert!(!message.read);
        assert!(!message.seen);
    }

    #[test]
    fn fragment_timestamp_wins_and_empty_subject_dropped() {
        let mut event = event(&["x"]);
        if let Some(fragments) = event.fragments.as_mut() {
            fragments[0].timestamp_ms = Some(1_700_000_000_000);
            fragments[0].pseudo_subject = Some(String::new());
        }
        let admitted = extractor::extract(&event).unwrap();
        let message = assemble(
            &admitted,
            SubscriberId::Unspecified,
            ErrorCode::NONE,
            DeliveryClass::Standard,
            5,
        );
        assert_eq!(message.date_ms, 1_700_000_000_000);
        assert_eq!(message.date_sent_ms, Some(1_700_000_000_000));
        assert_eq!(message.subject, None);
    }
}
