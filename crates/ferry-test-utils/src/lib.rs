// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Ferry.
//!
//! Provides recording mocks for every platform collaborator and fixtures
//! for building inbound events, so pipeline tests run without a device.
//!
//! # Components
//!
//! - [`MockContext`] - switchable primary/secondary context with query counting
//! - [`RecordingPresenter`] - captures transient presentations
//! - [`RecordingPipeline`] - captures dispatched messages, optionally failing or slow
//! - [`InMemoryNotificationManager`] - keyed notification table
//! - [`InMemoryComponentToggle`] - component enablement table

pub mod fixtures;
pub mod mock_pipeline;
pub mod mock_platform;

pub use mock_pipeline::RecordingPipeline;
pub use mock_platform::{
    InMemoryComponentToggle, InMemoryNotificationManager, MockContext, RecordingPresenter,
};
