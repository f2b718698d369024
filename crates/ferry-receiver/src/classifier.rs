// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery-class classification.

use ferry_core::types::{DeliveryClass, Fragment, MessageClass};

/// Classify an event by its first fragment.
///
/// Class 0 (flash) messages are transient; every other class, including an
/// unknown one, is standard.
pub fn classify(first: &Fragment) -> DeliveryClass {
    match first.message_class {
        MessageClass::Class0 => DeliveryClass::TransientClass0,
        MessageClass::Unknown
        | MessageClass::Class1
        | MessageClass::Class2
        | MessageClass::Class3 => DeliveryClass::Standard,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn class_strategy() -> impl Strategy<Value = MessageClass> {
        prop_oneof![
            Just(MessageClass::Unknown),
            Just(MessageClass::Class0),
            Just(MessageClass::Class1),
            Just(MessageClass::Class2),
            Just(MessageClass::Class3),
        ]
    }

    #[test]
    fn class_zero_is_transient() {
        let fragment = Fragment {
            message_class: MessageClass::Class0,
            ..Fragment::default()
        };
        assert_eq!(classify(&fragment), DeliveryClass::TransientClass0);
    }

    #[test]
    fn unknown_class_is_standard() {
        assert_eq!(classify(&Fragment::default()), DeliveryClass::Standard);
    }

    proptest! {
        #[test]
        fn only_class_zero_is_transient(class in class_strategy(), body in ".{0,40}") {
            let fragment = Fragment { message_class: class, body, ..Fragment::default() };
            let transient = classify(&fragment) == DeliveryClass::TransientClass0;
            prop_assert_eq!(transient, class == MessageClass::Class0);
        }
    }
}
