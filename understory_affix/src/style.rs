// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style records and the equality-gated publisher.
//!
//! When affixed, the inner node gets an [`AffixStyle`] (`position: fixed` plus
//! one anchored edge, `left` and `width`) and the wrapper gets a
//! [`PlaceholderStyle`] that keeps the wrapper's box so surrounding content does
//! not reflow. Both are `None` while unfixed.
//!
//! [`StylePublisher`] holds the last published pair and only reports a change
//! when a record differs structurally from the previous one.
//!
//! ```
//! use understory_affix::{AffixStyle, Anchor};
//!
//! let style = AffixStyle {
//!     anchor: Anchor::Top(10.0),
//!     left: 24.0,
//!     width: 320.0,
//! };
//! assert_eq!(
//!     style.to_string(),
//!     "position: fixed; top: 10px; left: 24px; width: 320px"
//! );
//! ```

use core::fmt;

use crate::tracker::Placement;

/// The edge a fixed node is anchored to, with its distance in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Distance from the top of the window.
    Top(f64),
    /// Distance from the bottom of the window.
    Bottom(f64),
}

/// Style of the inner node while affixed. Position is always `fixed`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffixStyle {
    /// Anchored edge.
    pub anchor: Anchor,
    /// Distance from the left of the window.
    pub left: f64,
    /// Width of the fixed node.
    pub width: f64,
}

impl AffixStyle {
    /// The `top` declaration, if anchored to the top.
    #[must_use]
    pub fn top(&self) -> Option<f64> {
        match self.anchor {
            Anchor::Top(top) => Some(top),
            Anchor::Bottom(_) => None,
        }
    }

    /// The `bottom` declaration, if anchored to the bottom.
    #[must_use]
    pub fn bottom(&self) -> Option<f64> {
        match self.anchor {
            Anchor::Bottom(bottom) => Some(bottom),
            Anchor::Top(_) => None,
        }
    }
}

impl fmt::Display for AffixStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("position: fixed; ")?;
        match self.anchor {
            Anchor::Top(top) => write!(f, "top: {top}px; ")?,
            Anchor::Bottom(bottom) => write!(f, "bottom: {bottom}px; ")?,
        }
        write!(f, "left: {}px; width: {}px", self.left, self.width)
    }
}

/// Style of the wrapper while affixed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaceholderStyle {
    /// Reserved width.
    pub width: f64,
    /// Reserved height.
    pub height: f64,
}

impl fmt::Display for PlaceholderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "width: {}px; height: {}px", self.width, self.height)
    }
}

/// What a call to [`StylePublisher::publish`] changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Published {
    /// The affix style differs from the previous one.
    pub affix_changed: bool,
    /// The placeholder style differs from the previous one.
    pub placeholder_changed: bool,
    /// `Some(affixed)` when the element crossed between unfixed and fixed.
    pub affixed: Option<bool>,
}

impl Published {
    /// Returns `true` if either record changed.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.affix_changed || self.placeholder_changed
    }
}

/// Holds the last published style pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePublisher {
    affix: Option<AffixStyle>,
    placeholder: Option<PlaceholderStyle>,
}

impl StylePublisher {
    /// Creates a publisher with nothing published (unfixed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently published affix style.
    #[must_use]
    pub fn affix(&self) -> Option<&AffixStyle> {
        self.affix.as_ref()
    }

    /// Currently published placeholder style.
    #[must_use]
    pub fn placeholder(&self) -> Option<&PlaceholderStyle> {
        self.placeholder.as_ref()
    }

    /// Publishes the records of a placement.
    ///
    /// A record equal to the current one is left untouched. An affixed edge is
    /// only reported when the affix style itself changed between `None` and
    /// `Some`; moving from top to bottom anchoring is not an edge.
    pub fn publish(&mut self, placement: &Placement) -> Published {
        let mut published = Published::default();

        if placement.affix != self.affix {
            let was_affixed = self.affix.is_some();
            self.affix = placement.affix;
            published.affix_changed = true;
            if was_affixed != self.affix.is_some() {
                published.affixed = Some(!was_affixed);
            }
        }

        if placement.placeholder != self.placeholder {
            self.placeholder = placement.placeholder;
            published.placeholder_changed = true;
        }

        published
    }

    /// Clears both records, reporting an edge if the element was affixed.
    pub fn clear(&mut self) -> Published {
        self.publish(&Placement::unfixed())
    }
}
