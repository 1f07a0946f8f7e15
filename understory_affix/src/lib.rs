// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_affix --heading-base-level=0

//! Understory Affix: pin an element to a scroll container's edge.
//!
//! An affix watches an element inside a scroll container (the window, or an
//! element found by identifier). Once scrolling carries the element past a
//! configured offset from the container's top, the element becomes
//! `position: fixed` at that offset; scrolling back releases it. A bottom offset
//! works the same way for the container's bottom edge.
//!
//! The crate is headless. It does not own a document, a renderer, or an event
//! loop. Hosts provide:
//!
//! - [`ViewportProvider`]: scroll offsets, bounding boxes and sizes.
//! - [`EventRegistry`]: adding and removing scroll/resize listeners.
//!
//! and in return get:
//!
//! - [`Affix`]: the component. Mount it, call [`Affix::update_position`] on
//!   every subscribed notification, read [`Affix::render`], unmount it.
//! - [`evaluate`]: the pure tracker behind it, for hosts that manage their own
//!   lifecycle.
//! - [`StylePublisher`]: the equality gate that suppresses redundant updates and
//!   turns placements into affixed/released edges.
//!
//! [`HeadlessViewport`] implements both host traits in memory and is what the
//! tests, benches and demos drive.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_affix::{Affix, AffixNodes, AffixProps, HeadlessViewport};
//!
//! let mut host = HeadlessViewport::new(1024.0, 768.0);
//! let wrapper = host.add_node(None, Rect::new(0.0, 100.0, 240.0, 148.0));
//! let fixed = host.add_node(None, Rect::new(0.0, 100.0, 240.0, 148.0));
//!
//! let affixed = Rc::new(Cell::new(false));
//! let seen = affixed.clone();
//! let mut affix = Affix::new(AffixProps::new().offset_top(10.0))
//!     .on_change(move |on| seen.set(on));
//! affix.mount(&mut host, AffixNodes { wrapper, fixed }).unwrap();
//!
//! host.scroll_window_to(95.0);
//! affix.update_position(&host);
//! assert!(affixed.get());
//!
//! let mut html = String::new();
//! affix.render().write_markup(&mut html, "menu").unwrap();
//! assert!(html.contains("position: fixed; top: 10px"));
//!
//! host.scroll_window_to(80.0);
//! affix.update_position(&host);
//! assert!(!affixed.get());
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` and installs no subscriber. Use of the
//! deprecated `offset` prop is reported with `warn!` once per affix; status
//! edges and listener changes are logged at `debug`, evaluations at `trace`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod affix;
mod error;
mod headless;
mod offset;
mod render;
mod style;
mod subscription;
mod tracker;
mod viewport;

pub use affix::{Affix, AffixProps, DEFAULT_CLASS_NAME};
pub use error::AffixError;
pub use headless::{HeadlessViewport, ListenerId, NodeId};
pub use offset::OffsetMode;
pub use render::{FixedNode, RenderedAffix, WrapperNode};
pub use style::{AffixStyle, Anchor, PlaceholderStyle, Published, StylePublisher};
pub use subscription::{EventKind, EventRegistry, Subscriptions};
pub use tracker::{AffixState, Placement, evaluate};
pub use viewport::{AffixNodes, ContainerRect, Measurements, ScrollTarget, ViewportProvider};
