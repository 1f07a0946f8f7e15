// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position tracker: decide whether the element is pinned, and where.
//!
//! [`evaluate`] is a pure function of the resolved [`OffsetMode`] and one set of
//! [`Measurements`]. Rules are checked in order and the first match wins:
//!
//! 1. Top mode and `scroll_top > element_top - offset_top`: [`AffixState::FixedTop`].
//! 2. Bottom mode and
//!    `scroll_top < element_top + element_height + offset_bottom - container_height`:
//!    [`AffixState::FixedBottom`].
//! 3. Otherwise: [`AffixState::Unfixed`].
//!
//! Both comparisons are strict, so sitting exactly on a boundary leaves the
//! element in flow.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_affix::{AffixState, Measurements, OffsetMode, evaluate};
//!
//! let mode = OffsetMode::resolve(Some(10.0), None, None);
//! let mut m = Measurements {
//!     element_offset: Point::new(0.0, 100.0),
//!     element_height: 40.0,
//!     wrapper_size: Size::new(300.0, 40.0),
//!     container_height: 600.0,
//!     viewport_height: 600.0,
//!     container_is_window: true,
//!     ..Measurements::default()
//! };
//!
//! m.scroll_top = 90.0;
//! assert_eq!(evaluate(mode, &m).state, AffixState::Unfixed);
//!
//! m.scroll_top = 91.0;
//! let placement = evaluate(mode, &m);
//! assert_eq!(placement.state, AffixState::FixedTop);
//! assert_eq!(placement.affix.unwrap().top(), Some(10.0));
//! ```

use crate::offset::OffsetMode;
use crate::style::{AffixStyle, Anchor, PlaceholderStyle};
use crate::viewport::Measurements;

/// Pinning state of an affix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AffixState {
    /// In normal flow.
    #[default]
    Unfixed,
    /// Pinned at the top offset.
    FixedTop,
    /// Pinned at the bottom offset.
    FixedBottom,
}

impl AffixState {
    /// Returns `true` for either fixed state.
    #[must_use]
    pub fn is_fixed(self) -> bool {
        !matches!(self, Self::Unfixed)
    }
}

/// Result of one evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Computed state.
    pub state: AffixState,
    /// Style for the fixed node; `None` while unfixed.
    pub affix: Option<AffixStyle>,
    /// Style for the wrapper; `None` while unfixed.
    pub placeholder: Option<PlaceholderStyle>,
}

impl Placement {
    /// The unfixed placement: both records cleared.
    #[must_use]
    pub const fn unfixed() -> Self {
        Self {
            state: AffixState::Unfixed,
            affix: None,
            placeholder: None,
        }
    }

    fn fixed(state: AffixState, anchor: Anchor, m: &Measurements) -> Self {
        Self {
            state,
            affix: Some(AffixStyle {
                anchor,
                left: m.container_rect.left + m.element_offset.x,
                width: m.wrapper_size.width,
            }),
            placeholder: Some(PlaceholderStyle {
                width: m.wrapper_size.width,
                height: m.wrapper_size.height,
            }),
        }
    }
}

/// Computes the placement for one set of measurements.
#[must_use]
pub fn evaluate(mode: OffsetMode, m: &Measurements) -> Placement {
    if let Some(offset_top) = mode.top()
        && m.scroll_top > m.element_offset.y - offset_top
    {
        let top = m.container_rect.top + offset_top;
        return Placement::fixed(AffixState::FixedTop, Anchor::Top(top), m);
    }

    if let Some(offset_bottom) = mode.bottom()
        && m.scroll_top < m.element_offset.y + m.element_height + offset_bottom - m.container_height
    {
        let bottom = m.container_bottom_gap() + offset_bottom;
        return Placement::fixed(AffixState::FixedBottom, Anchor::Bottom(bottom), m);
    }

    Placement::unfixed()
}
