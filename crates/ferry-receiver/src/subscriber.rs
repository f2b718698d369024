// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscriber resolution from the event's routing hint.

use ferry_core::types::SubscriberId;

/// Map a routing hint to a subscriber.
///
/// Absent and negative hints collapse to [`SubscriberId::Unspecified`];
/// every non-negative hint passes through unchanged.
pub fn resolve(hint: Option<i32>) -> SubscriberId {
    match hint.map(u32::try_from) {
        Some(Ok(id)) => SubscriberId::Specified(id),
        Some(Err(_)) | None => SubscriberId::Unspecified,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn absent_hint_is_unspecified() {
        assert_eq!(resolve(None), SubscriberId::Unspecified);
    }

    #[test]
    fn zero_is_a_real_subscriber() {
        assert_eq!(resolve(Some(0)), SubscriberId::Specified(0));
    }

    #[test]
    fn largest_hint_is_a_real_subscriber() {
        assert_eq!(resolve(Some(i32::MAX)), SubscriberId::Specified(2_147_483_647));
        assert_eq!(resolve(Some(i32::MAX)).as_raw(), i64::from(i32::MAX));
    }

    proptest! {
        #[test]
        fn negative_hints_collapse_to_sentinel(hint in i32::MIN..0) {
            prop_assert_eq!(resolve(Some(hint)), SubscriberId::Unspecified);
            prop_assert_eq!(resolve(Some(hint)).as_raw(), -1);
        }

        #[test]
        fn non_negative_hints_pass_through(hint in 0..=i32::MAX) {
            prop_assert_eq!(resolve(Some(hint)).as_raw(), i64::from(hint));
        }
    }
}
