// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`Affix`](crate::Affix) lifecycle calls.

use alloc::string::String;
use core::fmt;

/// Lifecycle errors. None of them leave listeners behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AffixError {
    /// The container identifier did not resolve to an element.
    ///
    /// The affix stays mounted but detached and unfixed until a resolvable
    /// target is set.
    TargetNotFound {
        /// The identifier that was looked up.
        id: String,
    },
    /// [`Affix::mount`](crate::Affix::mount) was called on a mounted affix.
    AlreadyMounted,
}

impl fmt::Display for AffixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound { id } => {
                write!(f, "affix target `{id}` does not resolve to an element")
            }
            Self::AlreadyMounted => f.write_str("affix is already mounted"),
        }
    }
}

impl core::error::Error for AffixError {}
