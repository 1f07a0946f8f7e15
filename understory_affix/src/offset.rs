// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset configuration and pinning mode resolution.
//!
//! An affix pins against the top edge, the bottom edge, or both. Which edges
//! are active is derived from which offsets are configured:
//!
//! - `offset_top` set: top mode.
//! - `offset_bottom` set: bottom mode.
//! - both set: both modes; the top rule is evaluated first.
//! - neither set: top mode with an offset of `0`.
//!
//! The deprecated `offset` value only fills in an unset `offset_top`.
//!
//! ```
//! use understory_affix::OffsetMode;
//!
//! let mode = OffsetMode::resolve(None, None, None);
//! assert_eq!(mode.top(), Some(0.0));
//! assert_eq!(mode.bottom(), None);
//!
//! let mode = OffsetMode::resolve(None, Some(8.0), Some(20.0));
//! assert_eq!(mode.top(), Some(20.0));
//! assert_eq!(mode.bottom(), Some(8.0));
//! ```

/// Resolved pinning offsets.
///
/// An edge is active when its offset is `Some`. A resolved mode always has
/// at least one active edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OffsetMode {
    top: Option<f64>,
    bottom: Option<f64>,
}

impl Default for OffsetMode {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl OffsetMode {
    /// Resolves the active edges from the configured offsets.
    ///
    /// `legacy_offset` is the deprecated alias for `offset_top` and is only
    /// consulted when `offset_top` is `None`.
    #[must_use]
    pub fn resolve(
        offset_top: Option<f64>,
        offset_bottom: Option<f64>,
        legacy_offset: Option<f64>,
    ) -> Self {
        let top = offset_top.or(legacy_offset);
        match (top, offset_bottom) {
            (None, None) => Self {
                top: Some(0.0),
                bottom: None,
            },
            (top, bottom) => Self { top, bottom },
        }
    }

    /// Offset from the container's top edge, if top mode is active.
    #[must_use]
    pub fn top(&self) -> Option<f64> {
        self.top
    }

    /// Offset from the container's bottom edge, if bottom mode is active.
    #[must_use]
    pub fn bottom(&self) -> Option<f64> {
        self.bottom
    }

    /// Returns `true` if the element may pin to the top edge.
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.top.is_some()
    }

    /// Returns `true` if the element may pin to the bottom edge.
    #[must_use]
    pub fn is_bottom(&self) -> bool {
        self.bottom.is_some()
    }
}
