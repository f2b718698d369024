// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incoming message ingestion for Ferry.
//!
//! This crate provides:
//! - [`extractor`], [`subscriber`], [`classifier`], [`record`]: pure stages
//!   that admit an event, resolve its subscriber, classify it, and merge its
//!   fragments into one [`NormalizedMessage`](ferry_core::NormalizedMessage)
//! - [`ActionDispatcher`]: fire-and-forget hand-off to the durable pipeline
//! - [`SecondaryContextNotifier`]: the replaceable new-message notification
//! - [`RedeliveryGuard`]: opt-in suppression of redelivered events
//! - [`IngestionReceiver`]: the entry point tying the stages together
//! - [`ConfiguredApnResolver`]: config-backed APN lookup

pub mod apn;
pub mod classifier;
pub mod dispatcher;
pub mod extractor;
pub mod metrics;
pub mod notifier;
pub mod receiver;
pub mod record;
pub mod redelivery;
pub mod subscriber;

pub use apn::{ConfiguredApnResolver, require_apn};
pub use dispatcher::{ActionDispatcher, DispatchHandle};
pub use notifier::{SecondaryContextNotifier, SecondaryNotificationState};
pub use receiver::{EventOutcome, IngestOutcome, IngestionReceiver, Platform, is_receiver_enabled};
pub use redelivery::RedeliveryGuard;
