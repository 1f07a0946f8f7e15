// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport capability and per-evaluation measurements.
//!
//! The affix never touches a document directly. Hosts implement
//! [`ViewportProvider`] to expose scroll offsets, bounding boxes and sizes, and
//! [`Measurements::measure`] turns those primitives into the inputs of one
//! [`evaluate`](crate::evaluate) call.
//!
//! All rectangles are in viewport (client) coordinates, as a bounding-box query
//! would report them. Scroll offsets are in document units.

use core::fmt::Debug;

use kurbo::{Point, Rect, Size, Vec2};

/// Read-only access to the geometry of a host viewport.
///
/// Implementations wrap whatever the host uses as its document (a browser DOM,
/// a retained widget tree, an in-memory model such as
/// [`HeadlessViewport`](crate::HeadlessViewport)).
pub trait ViewportProvider {
    /// Handle to an element in the host's document.
    type Element: Clone + PartialEq + Debug;

    /// Looks up an element by its identifier.
    fn find_element(&self, id: &str) -> Option<Self::Element>;

    /// Scroll offset of the window.
    ///
    /// Returns `None` when the host cannot report a numeric value, in which
    /// case [`document_scroll`](Self::document_scroll) is used instead.
    fn window_scroll(&self) -> Option<Vec2>;

    /// Scroll offset of the document root element.
    fn document_scroll(&self) -> Vec2;

    /// Scroll offset of a scrollable element.
    fn element_scroll(&self, element: &Self::Element) -> Vec2;

    /// Bounding box of an element in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Visible inner height of a scrollable element, excluding borders and
    /// scrollbars.
    fn client_height(&self, element: &Self::Element) -> f64;

    /// Rendered size of an element, including borders.
    fn offset_size(&self, element: &Self::Element) -> Size;

    /// Inner size of the window.
    fn inner_size(&self) -> Size;

    /// Width of the document body's left and top borders.
    fn body_client_origin(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// The scroll container an affix is measured against.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget<E> {
    /// The whole window.
    Window,
    /// A scrollable element.
    Element(E),
}

impl<E: Clone + PartialEq + Debug> ScrollTarget<E> {
    /// Resolves an optional container identifier.
    ///
    /// `None` or an empty identifier selects the window. An identifier that
    /// does not resolve yields `None`.
    pub fn resolve<P>(host: &P, id: Option<&str>) -> Option<Self>
    where
        P: ViewportProvider<Element = E> + ?Sized,
    {
        match id.filter(|id| !id.is_empty()) {
            None => Some(Self::Window),
            Some(id) => host.find_element(id).map(Self::Element),
        }
    }

    /// Returns `true` if this target is the window.
    #[must_use]
    pub fn is_window(&self) -> bool {
        matches!(self, Self::Window)
    }

    /// Current scroll offset of the container.
    ///
    /// For the window this falls back to the document root's offset when the
    /// primary read is not numeric.
    pub fn scroll_offset<P>(&self, host: &P) -> Vec2
    where
        P: ViewportProvider<Element = E> + ?Sized,
    {
        match self {
            Self::Window => host
                .window_scroll()
                .unwrap_or_else(|| host.document_scroll()),
            Self::Element(element) => host.element_scroll(element),
        }
    }

    /// Bounding box of the container.
    ///
    /// The window has no box of its own and reports all zeroes.
    pub fn container_rect<P>(&self, host: &P) -> ContainerRect
    where
        P: ViewportProvider<Element = E> + ?Sized,
    {
        match self {
            Self::Window => ContainerRect::default(),
            Self::Element(element) => ContainerRect::from(host.bounding_rect(element)),
        }
    }

    /// Visible height of the container.
    pub fn inner_height<P>(&self, host: &P) -> f64
    where
        P: ViewportProvider<Element = E> + ?Sized,
    {
        match self {
            Self::Window => host.inner_size().height,
            Self::Element(element) => host.client_height(element),
        }
    }
}

/// The edges of a container's bounding box that the tracker reads.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContainerRect {
    /// Top edge in viewport coordinates.
    pub top: f64,
    /// Left edge in viewport coordinates.
    pub left: f64,
    /// Bottom edge in viewport coordinates.
    pub bottom: f64,
}

impl From<Rect> for ContainerRect {
    fn from(rect: Rect) -> Self {
        Self {
            top: rect.y0,
            left: rect.x0,
            bottom: rect.y1,
        }
    }
}

/// The two host nodes an affix renders.
#[derive(Clone, Debug, PartialEq)]
pub struct AffixNodes<E> {
    /// Outer node that stays in flow and carries the placeholder size.
    pub wrapper: E,
    /// Inner node that becomes fixed.
    pub fixed: E,
}

/// Inputs for one evaluation of the tracker.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurements {
    /// Vertical scroll offset of the container.
    pub scroll_top: f64,
    /// Offset of the wrapper relative to the container's scrolled content.
    pub element_offset: Point,
    /// Rendered height of the fixed node.
    pub element_height: f64,
    /// Rendered size of the wrapper.
    pub wrapper_size: Size,
    /// Visible height of the container.
    pub container_height: f64,
    /// Bounding box of the container.
    pub container_rect: ContainerRect,
    /// Height of the window.
    pub viewport_height: f64,
    /// Whether the container is the window.
    pub container_is_window: bool,
}

impl Measurements {
    /// Collects the inputs for one evaluation from a host.
    pub fn measure<P>(
        host: &P,
        target: &ScrollTarget<P::Element>,
        nodes: &AffixNodes<P::Element>,
    ) -> Self
    where
        P: ViewportProvider + ?Sized,
    {
        let scroll = target.scroll_offset(host);
        let container_rect = target.container_rect(host);
        let element_rect = host.bounding_rect(&nodes.wrapper);
        let border = host.body_client_origin();

        let element_offset = Point::new(
            element_rect.x0 - container_rect.left + scroll.x - border.x,
            element_rect.y0 - container_rect.top + scroll.y - border.y,
        );

        Self {
            scroll_top: scroll.y,
            element_offset,
            element_height: host.offset_size(&nodes.fixed).height,
            wrapper_size: host.offset_size(&nodes.wrapper),
            container_height: target.inner_height(host),
            container_rect,
            viewport_height: host.inner_size().height,
            container_is_window: target.is_window(),
        }
    }

    /// Distance from the container's bottom edge to the bottom of the window.
    ///
    /// This is `0` for the window. For an element it is measured against the
    /// window height, not the element's own scroll metrics.
    #[must_use]
    pub fn container_bottom_gap(&self) -> f64 {
        if self.container_is_window {
            0.0
        } else {
            self.viewport_height - self.container_rect.bottom
        }
    }
}
