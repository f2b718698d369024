// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Ferry message ingestion pipeline.
//!
//! This crate provides the data model of inbound events and normalized
//! messages, the boundary traits for every platform collaborator, and the
//! error types shared across the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ConfigResolutionError, FerryError};
pub use types::{
    ContextMode, DeliveryClass, ErrorCode, Fragment, InboundEvent, MessageClass,
    NormalizedMessage, SubscriberId,
};

pub use traits::{
    ApnResolver, ComponentToggle, ContextModeProvider, MessagePipeline, NotificationManager,
    TransientPresenter,
};

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedContext(bool);

    impl ContextModeProvider for FixedContext {
        fn is_secondary_execution_context(&self) -> bool {
            self.0
        }

        fn is_messaging_enabled_for_this_context(&self) -> bool {
            true
        }
    }

    #[test]
    fn current_mode_follows_secondary_flag() {
        assert_eq!(FixedContext(true).current_mode(), ContextMode::Secondary);
        assert_eq!(FixedContext(false).current_mode(), ContextMode::Primary);
    }

    #[test]
    fn all_traits_are_object_safe() {
        fn _context(_: &dyn ContextModeProvider) {}
        fn _presenter(_: &dyn TransientPresenter) {}
        fn _pipeline(_: &dyn MessagePipeline) {}
        fn _notifications(_: &dyn NotificationManager) {}
        fn _components(_: &dyn ComponentToggle) {}
        fn _apn(_: &dyn ApnResolver) {}
    }
}
