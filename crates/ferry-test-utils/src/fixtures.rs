// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for fragments and inbound events.

use ferry_core::types::{ACTION_SMS_RECEIVED, EventExtras, Fragment, InboundEvent, MessageClass};

/// A standard-class fragment from a fixed sender with no timestamp.
pub fn fragment(body: &str) -> Fragment {
    Fragment {
        originating_address: Some("+15550100".to_string()),
        body: body.to_string(),
        timestamp_ms: None,
        message_class: MessageClass::Unknown,
        service_center: Some("+15550999".to_string()),
        protocol_identifier: 0,
        reply_path_present: false,
        pseudo_subject: None,
    }
}

/// A fragment with an explicit message class.
pub fn fragment_with_class(body: &str, class: MessageClass) -> Fragment {
    Fragment {
        message_class: class,
        ..fragment(body)
    }
}

/// An SMS_RECEIVED event with the given fragments and no extras.
pub fn sms_event(fragments: Vec<Fragment>) -> InboundEvent {
    InboundEvent::new(ACTION_SMS_RECEIVED, fragments)
}

/// An SMS_RECEIVED event carrying routing and error extras.
pub fn sms_event_with_extras(
    fragments: Vec<Fragment>,
    subscription: Option<i32>,
    error_code: Option<i32>,
) -> InboundEvent {
    InboundEvent {
        extras: EventExtras {
            error_code,
            subscription,
        },
        ..sms_event(fragments)
    }
}

/// An event with the fragment list absent altogether.
pub fn event_without_fragments(action: &str) -> InboundEvent {
    InboundEvent {
        action: action.to_string(),
        fragments: None,
        extras: EventExtras::default(),
    }
}
