// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The affix component: props, lifecycle and change notification.
//!
//! ## Usage
//!
//! 1) Build [`AffixProps`] and create an [`Affix`], optionally with an
//!    [`on_change`](Affix::on_change) callback.
//! 2) Call [`Affix::mount`] with the host and the two rendered nodes. This
//!    subscribes to the container and evaluates once.
//! 3) Whenever the host delivers a subscribed scroll or resize notification,
//!    call [`Affix::update_position`].
//! 4) Read [`Affix::render`] to style the nodes.
//! 5) Call [`Affix::unmount`] to release the listeners.
//!
//! Changing the container with [`Affix::set_target`] (or [`Affix::set_props`])
//! moves the listeners and re-evaluates immediately.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use understory_affix::{Affix, AffixNodes, AffixProps, AffixState, HeadlessViewport};
//!
//! let mut host = HeadlessViewport::new(800.0, 600.0);
//! let wrapper = host.add_node(None, Rect::new(0.0, 100.0, 300.0, 140.0));
//! let fixed = host.add_node(None, Rect::new(0.0, 100.0, 300.0, 140.0));
//!
//! let mut affix = Affix::new(AffixProps::new().offset_top(10.0));
//! affix.mount(&mut host, AffixNodes { wrapper, fixed }).unwrap();
//! assert_eq!(affix.state(), AffixState::Unfixed);
//!
//! host.scroll_window_to(91.0);
//! affix.update_position(&host);
//! assert_eq!(affix.state(), AffixState::FixedTop);
//! assert_eq!(affix.affix_style().and_then(|s| s.top()), Some(10.0));
//!
//! affix.unmount(&mut host);
//! assert_eq!(host.listener_count(), 0);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::AffixError;
use crate::offset::OffsetMode;
use crate::render::{FixedNode, RenderedAffix, WrapperNode};
use crate::style::{AffixStyle, PlaceholderStyle, Published, StylePublisher};
use crate::subscription::{EventRegistry, Subscriptions};
use crate::tracker::{AffixState, Placement, evaluate};
use crate::viewport::{AffixNodes, Measurements, ScrollTarget};

/// Marker class applied to the fixed node while affixed, unless overridden.
pub const DEFAULT_CLASS_NAME: &str = "understory-affix";

/// Configuration of an [`Affix`].
///
/// `offset_top`, `offset_bottom` and `target` configure the affix itself and
/// are never forwarded. Attributes added with [`attribute`](Self::attribute)
/// are forwarded to the wrapper node unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct AffixProps {
    offset_top: Option<f64>,
    offset_bottom: Option<f64>,
    legacy_offset: Option<f64>,
    target: Option<String>,
    class_name: String,
    attributes: Vec<(String, String)>,
}

impl Default for AffixProps {
    fn default() -> Self {
        Self {
            offset_top: None,
            offset_bottom: None,
            legacy_offset: None,
            target: None,
            class_name: String::from(DEFAULT_CLASS_NAME),
            attributes: Vec::new(),
        }
    }
}

impl AffixProps {
    /// Props with no offsets (pins at the top with offset `0`) and the window
    /// as container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin when the element reaches `offset` pixels from the container's top.
    #[must_use]
    pub fn offset_top(mut self, offset: f64) -> Self {
        self.offset_top = Some(offset);
        self
    }

    /// Pin when the element reaches `offset` pixels from the container's bottom.
    #[must_use]
    pub fn offset_bottom(mut self, offset: f64) -> Self {
        self.offset_bottom = Some(offset);
        self
    }

    /// Old name of [`offset_top`](Self::offset_top).
    ///
    /// Still honored when `offset_top` is unset. Mounting an affix with this
    /// set logs a warning once.
    #[deprecated(note = "use `offset_top` instead")]
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.legacy_offset = Some(offset);
        self
    }

    /// Measure against the element with this identifier instead of the window.
    #[must_use]
    pub fn target(mut self, id: impl Into<String>) -> Self {
        self.target = Some(id.into());
        self
    }

    /// Marker class applied to the fixed node while affixed.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Adds an attribute forwarded to the wrapper node.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Configured container identifier; `None` is the window.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Resolved pinning offsets.
    #[must_use]
    pub fn offset_mode(&self) -> OffsetMode {
        OffsetMode::resolve(self.offset_top, self.offset_bottom, self.legacy_offset)
    }

    /// Returns `true` if the deprecated `offset` was set.
    #[must_use]
    pub fn uses_legacy_offset(&self) -> bool {
        self.legacy_offset.is_some()
    }

    /// Attributes forwarded to the wrapper node.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

/// Pins a pair of host nodes to the top or bottom of a scroll container.
///
/// The affix does not own its host. Every lifecycle call borrows it, so one
/// host can drive any number of affixes.
pub struct Affix<R: EventRegistry> {
    props: AffixProps,
    nodes: Option<AffixNodes<R::Element>>,
    target: Option<ScrollTarget<R::Element>>,
    subscriptions: Subscriptions<R::Subscription>,
    publisher: StylePublisher,
    state: AffixState,
    on_change: Box<dyn FnMut(bool)>,
    legacy_offset_reported: bool,
}

impl<R: EventRegistry> fmt::Debug for Affix<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Affix")
            .field("props", &self.props)
            .field("nodes", &self.nodes)
            .field("target", &self.target)
            .field("subscriptions", &self.subscriptions)
            .field("publisher", &self.publisher)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: EventRegistry> Affix<R> {
    /// Creates an unmounted affix.
    #[must_use]
    pub fn new(props: AffixProps) -> Self {
        Self {
            props,
            nodes: None,
            target: None,
            subscriptions: Subscriptions::new(),
            publisher: StylePublisher::new(),
            state: AffixState::Unfixed,
            on_change: Box::new(|_| {}),
            legacy_offset_reported: false,
        }
    }

    /// Sets the callback invoked with the new status whenever the element
    /// becomes affixed or is released.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Box::new(callback);
        self
    }

    /// Current props.
    #[must_use]
    pub fn props(&self) -> &AffixProps {
        &self.props
    }

    /// Current pinning state.
    #[must_use]
    pub fn state(&self) -> AffixState {
        self.state
    }

    /// Returns `true` while pinned to either edge.
    #[must_use]
    pub fn is_affixed(&self) -> bool {
        self.publisher.affix().is_some()
    }

    /// Returns `true` between [`mount`](Self::mount) and [`unmount`](Self::unmount).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.nodes.is_some()
    }

    /// Resolved container, if mounted and attached.
    #[must_use]
    pub fn target(&self) -> Option<&ScrollTarget<R::Element>> {
        self.target.as_ref()
    }

    /// Number of listeners currently held.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Style of the fixed node; `None` while unfixed.
    #[must_use]
    pub fn affix_style(&self) -> Option<&AffixStyle> {
        self.publisher.affix()
    }

    /// Style of the wrapper node; `None` while unfixed.
    #[must_use]
    pub fn placeholder_style(&self) -> Option<&PlaceholderStyle> {
        self.publisher.placeholder()
    }

    /// Attaches to the host and evaluates once.
    ///
    /// If the configured target does not resolve, the affix is still mounted
    /// but holds no listeners until [`set_target`](Self::set_target) succeeds.
    pub fn mount(
        &mut self,
        host: &mut R,
        nodes: AffixNodes<R::Element>,
    ) -> Result<(), AffixError> {
        if self.nodes.is_some() {
            return Err(AffixError::AlreadyMounted);
        }
        self.report_legacy_offset();
        self.nodes = Some(nodes);
        self.connect(host)
    }

    /// Releases every listener and forgets the nodes.
    ///
    /// The change callback is not invoked.
    pub fn unmount(&mut self, host: &mut R) {
        self.subscriptions.release(host);
        self.nodes = None;
        self.target = None;
        self.publisher = StylePublisher::new();
        self.state = AffixState::Unfixed;
    }

    /// Changes the container.
    ///
    /// When mounted and the identifier differs, listeners move to the new
    /// container and the position is re-evaluated without waiting for a scroll.
    /// A detached affix retries resolution even for an unchanged identifier.
    pub fn set_target(
        &mut self,
        host: &mut R,
        target: Option<String>,
    ) -> Result<(), AffixError> {
        if self.props.target == target && (self.nodes.is_none() || self.target.is_some()) {
            return Ok(());
        }
        tracing::debug!(
            from = self.props.target.as_deref(),
            to = target.as_deref(),
            "affix target changed"
        );
        self.props.target = target;
        if self.nodes.is_none() {
            return Ok(());
        }
        self.subscriptions.release(host);
        self.connect(host)
    }

    /// Replaces the props.
    ///
    /// Only a change of target re-attaches and re-evaluates; other changes
    /// apply from the next [`update_position`](Self::update_position).
    pub fn set_props(&mut self, host: &mut R, mut props: AffixProps) -> Result<(), AffixError> {
        let target = props.target.take();
        props.target = self.props.target.take();
        self.props = props;
        self.set_target(host, target)
    }

    /// Re-evaluates the position against the host.
    ///
    /// Hosts call this for every subscribed scroll or resize notification. It
    /// is a no-op while unmounted or detached.
    pub fn update_position(&mut self, host: &R) -> Published {
        let (Some(nodes), Some(target)) = (&self.nodes, &self.target) else {
            return Published::default();
        };
        let measurements = Measurements::measure(host, target, nodes);
        let placement = evaluate(self.props.offset_mode(), &measurements);
        tracing::trace!(
            scroll_top = measurements.scroll_top,
            element_top = measurements.element_offset.y,
            state = ?placement.state,
            "affix evaluated"
        );
        self.apply(&placement)
    }

    /// Describes the nodes to render.
    #[must_use]
    pub fn render(&self) -> RenderedAffix<'_> {
        let affix = self.publisher.affix();
        RenderedAffix {
            wrapper: WrapperNode {
                attributes: self.props.attributes(),
                style: self.publisher.placeholder(),
            },
            fixed: FixedNode {
                class_name: affix.map(|_| self.props.class_name.as_str()),
                style: affix,
            },
        }
    }

    fn connect(&mut self, host: &mut R) -> Result<(), AffixError> {
        let id = self.props.target.as_deref();
        let Some(target) = ScrollTarget::resolve(&*host, id) else {
            let id = String::from(id.unwrap_or_default());
            tracing::debug!(id = %id, "affix target not found");
            self.target = None;
            self.apply(&Placement::unfixed());
            return Err(AffixError::TargetNotFound { id });
        };
        self.subscriptions.attach(host, &target);
        self.target = Some(target);
        self.update_position(host);
        Ok(())
    }

    fn apply(&mut self, placement: &Placement) -> Published {
        self.state = placement.state;
        let published = self.publisher.publish(placement);
        if let Some(affixed) = published.affixed {
            tracing::debug!(affixed, state = ?placement.state, "affix status changed");
            (self.on_change)(affixed);
        }
        published
    }

    fn report_legacy_offset(&mut self) {
        if self.props.uses_legacy_offset() && !self.legacy_offset_reported {
            self.legacy_offset_reported = true;
            tracing::warn!("`offset` prop of Affix is deprecated, use `offset_top` instead");
        }
    }
}
