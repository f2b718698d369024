// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary traits for the platform collaborators the pipeline talks to.
//!
//! Everything the receiver touches outside its own logic goes through one of
//! these traits, so each collaborator can be swapped for a recording mock.

pub mod apn;
pub mod component;
pub mod context;
pub mod notification;
pub mod pipeline;
pub mod presenter;

pub use apn::ApnResolver;
pub use component::ComponentToggle;
pub use context::ContextModeProvider;
pub use notification::NotificationManager;
pub use pipeline::MessagePipeline;
pub use presenter::TransientPresenter;
