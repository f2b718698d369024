// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission gate for inbound events.
//!
//! Every later stage works on [`AdmittedFragments`], which cannot be empty.

use ferry_core::types::{Fragment, InboundEvent};

/// The non-empty, ordered fragment sequence of one admitted event.
#[derive(Debug, Clone, Copy)]
pub struct AdmittedFragments<'a> {
    first: &'a Fragment,
    all: &'a [Fragment],
}

impl<'a> AdmittedFragments<'a> {
    /// The fragment that decides classification, timestamp, and sender.
    pub fn first(&self) -> &'a Fragment {
        self.first
    }

    /// All fragments in arrival order, including the first.
    pub fn all(&self) -> &'a [Fragment] {
        self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Extract the usable fragments of `event`.
///
/// Returns `None` when the fragment list is absent or empty. Pure: the same
/// event always yields the same answer.
pub fn extract(event: &InboundEvent) -> Option<AdmittedFragments<'_>> {
    let all = event.fragments.as_deref()?;
    let (first, _) = all.split_first()?;
    Some(AdmittedFragments { first, all })
}

/// Whether `event` should be ignored because it carries nothing to process.
pub fn should_ignore(event: &InboundEvent) -> bool {
    extract(event).is_none()
}
