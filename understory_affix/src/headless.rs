// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host for driving an affix without a real document.
//!
//! [`HeadlessViewport`] models a window with a flat set of boxes. Each box has a
//! layout rectangle in the content coordinates of its scroll parent (or of the
//! document for top-level boxes) and its own scroll offset. Bounding boxes are
//! derived by walking up the scroll parents and subtracting their scroll
//! offsets, then the window's.
//!
//! It implements both [`ViewportProvider`] and [`EventRegistry`], so it can be
//! used in tests, benchmarks and headless hosts.
//!
//! ```
//! use kurbo::Rect;
//! use understory_affix::{HeadlessViewport, ViewportProvider};
//!
//! let mut host = HeadlessViewport::new(800.0, 600.0);
//! let node = host.add_node(None, Rect::new(0.0, 100.0, 300.0, 140.0));
//!
//! host.scroll_window_to(60.0);
//! assert_eq!(host.bounding_rect(&node).y0, 40.0);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Rect, Size, Vec2};

use crate::subscription::{EventKind, EventRegistry};
use crate::viewport::{ScrollTarget, ViewportProvider};

/// Identifier of a box in a [`HeadlessViewport`].
///
/// Ids are indices into the viewport's box list, so every box added gets a
/// distinct id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    const fn index(self) -> usize {
        self.0
    }
}

/// Identifier of a listener registered on a [`HeadlessViewport`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    layout: Rect,
    scroll: Vec2,
    client_height: Option<f64>,
}

#[derive(Clone, Debug)]
struct Listener {
    id: ListenerId,
    target: ScrollTarget<NodeId>,
    kind: EventKind,
}

/// A window with boxes, scroll offsets and a listener table.
#[derive(Clone, Debug)]
pub struct HeadlessViewport {
    inner_size: Size,
    window_scroll: Option<Vec2>,
    document_scroll: Vec2,
    body_border: Vec2,
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl HeadlessViewport {
    /// Creates an empty window with the given inner size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            inner_size: Size::new(width, height),
            window_scroll: Some(Vec2::ZERO),
            document_scroll: Vec2::ZERO,
            body_border: Vec2::ZERO,
            nodes: Vec::new(),
            names: HashMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Adds a box.
    ///
    /// `layout` is in the content coordinates of `parent`, or of the document
    /// when `parent` is `None`.
    pub fn add_node(&mut self, parent: Option<NodeId>, layout: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            layout,
            scroll: Vec2::ZERO,
            client_height: None,
        });
        id
    }

    /// Makes a box findable by identifier, replacing any previous owner of `name`.
    pub fn name_node(&mut self, node: NodeId, name: impl Into<String>) {
        self.names.insert(name.into(), node);
    }

    /// Moves or resizes a box.
    pub fn set_layout(&mut self, node: NodeId, layout: Rect) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.layout = layout;
        }
    }

    /// Overrides the visible inner height of a box (defaults to its layout height).
    pub fn set_client_height(&mut self, node: NodeId, height: f64) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.client_height = Some(height);
        }
    }

    /// Sets the vertical scroll offset of a box.
    pub fn scroll_to(&mut self, node: NodeId, y: f64) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.scroll.y = y;
        }
    }

    /// Sets the vertical scroll offset of the window.
    pub fn scroll_window_to(&mut self, y: f64) {
        let x = self.effective_window_scroll().x;
        self.window_scroll = Some(Vec2::new(x, y));
        self.document_scroll = Vec2::new(x, y);
    }

    /// Sets what the window reports as its own scroll offset.
    ///
    /// `None` emulates an engine without a numeric window offset; reads then fall
    /// back to the document root.
    pub fn set_window_scroll(&mut self, scroll: Option<Vec2>) {
        self.window_scroll = scroll;
    }

    /// Sets the scroll offset of the document root.
    pub fn set_document_scroll(&mut self, scroll: Vec2) {
        self.document_scroll = scroll;
    }

    /// Sets the width of the body's left and top borders.
    pub fn set_body_border(&mut self, border: Vec2) {
        self.body_border = border;
    }

    /// Resizes the window.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.inner_size = Size::new(width, height);
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if a listener for `kind` is registered on `target`.
    #[must_use]
    pub fn is_listening(&self, target: &ScrollTarget<NodeId>, kind: EventKind) -> bool {
        self.listeners
            .iter()
            .any(|l| &l.target == target && l.kind == kind)
    }

    fn effective_window_scroll(&self) -> Vec2 {
        self.window_scroll.unwrap_or(self.document_scroll)
    }
}

impl ViewportProvider for HeadlessViewport {
    type Element = NodeId;

    fn find_element(&self, id: &str) -> Option<NodeId> {
        self.names.get(id).copied()
    }

    fn window_scroll(&self) -> Option<Vec2> {
        self.window_scroll
    }

    fn document_scroll(&self) -> Vec2 {
        self.document_scroll
    }

    fn element_scroll(&self, element: &NodeId) -> Vec2 {
        self.nodes
            .get(element.index())
            .map_or(Vec2::ZERO, |n| n.scroll)
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        let Some(node) = self.nodes.get(element.index()) else {
            return Rect::ZERO;
        };
        let mut rect = node.layout;
        let mut parent = node.parent;
        // Parents are always inserted before their children, so this terminates.
        while let Some(id) = parent {
            let Some(p) = self.nodes.get(id.index()) else {
                break;
            };
            rect = rect + (p.layout.origin().to_vec2() - p.scroll);
            parent = p.parent;
        }
        rect - self.effective_window_scroll()
    }

    fn client_height(&self, element: &NodeId) -> f64 {
        self.nodes
            .get(element.index())
            .map_or(0.0, |n| n.client_height.unwrap_or(n.layout.height()))
    }

    fn offset_size(&self, element: &NodeId) -> Size {
        self.nodes
            .get(element.index())
            .map_or(Size::ZERO, |n| n.layout.size())
    }

    fn inner_size(&self) -> Size {
        self.inner_size
    }

    fn body_client_origin(&self) -> Vec2 {
        self.body_border
    }
}

impl EventRegistry for HeadlessViewport {
    type Subscription = ListenerId;

    fn subscribe(&mut self, target: &ScrollTarget<NodeId>, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target: target.clone(),
            kind,
        });
        id
    }

    fn unsubscribe(&mut self, subscription: ListenerId) {
        self.listeners.retain(|l| l.id != subscription);
    }
}
