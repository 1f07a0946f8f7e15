// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios for `understory_affix`.
//!
//! These drive an `Affix` against `HeadlessViewport` the way a host would:
//! mutate scroll state, then deliver the notification by calling
//! `update_position`.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use kurbo::{Rect, Vec2};
use tracing_subscriber::fmt::MakeWriter;
use understory_affix::{
    Affix, AffixNodes, AffixProps, AffixState, Anchor, EventKind, HeadlessViewport, NodeId,
    ScrollTarget,
};

type Log = Rc<RefCell<Vec<bool>>>;

fn recording(props: AffixProps) -> (Affix<HeadlessViewport>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let affix = Affix::new(props).on_change(move |affixed| sink.borrow_mut().push(affixed));
    (affix, log)
}

/// A window with the watched element 100px down the page.
fn window_page() -> (HeadlessViewport, AffixNodes<NodeId>) {
    let mut host = HeadlessViewport::new(1024.0, 768.0);
    let wrapper = host.add_node(None, Rect::new(0.0, 100.0, 320.0, 140.0));
    let fixed = host.add_node(None, Rect::new(0.0, 100.0, 320.0, 140.0));
    (host, AffixNodes { wrapper, fixed })
}

/// A 300px tall scroll pane at y = 100 holding the watched element 250px down
/// its content.
fn pane_page() -> (HeadlessViewport, NodeId, AffixNodes<NodeId>) {
    let mut host = HeadlessViewport::new(1024.0, 768.0);
    let pane = host.add_node(None, Rect::new(0.0, 100.0, 400.0, 400.0));
    host.name_node(pane, "pane");
    let wrapper = host.add_node(Some(pane), Rect::new(10.0, 250.0, 210.0, 290.0));
    let fixed = host.add_node(Some(pane), Rect::new(10.0, 250.0, 210.0, 290.0));
    (host, pane, AffixNodes { wrapper, fixed })
}

#[test]
fn window_scroll_past_top_offset() {
    let (mut host, nodes) = window_page();
    let (mut affix, log) = recording(AffixProps::new().offset_top(10.0));
    affix.mount(&mut host, nodes).unwrap();

    // Pinned once scroll_top > element_top - offset_top, i.e. past 90.
    host.scroll_window_to(95.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);

    host.scroll_window_to(91.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
    assert_eq!(affix.affix_style().map(|s| s.anchor), Some(Anchor::Top(10.0)));

    host.scroll_window_to(90.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);

    host.scroll_window_to(80.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);
    assert!(affix.affix_style().is_none());
    assert!(affix.placeholder_style().is_none());

    assert_eq!(*log.borrow(), [true, false]);
}

#[test]
fn scrolling_down_from_rest_pins_and_releases() {
    let (mut host, nodes) = window_page();
    let (mut affix, log) = recording(AffixProps::new().offset_top(10.0));
    affix.mount(&mut host, nodes).unwrap();

    for (y, expected) in [
        (89.0, AffixState::Unfixed),
        (91.0, AffixState::FixedTop),
        (80.0, AffixState::Unfixed),
    ] {
        host.scroll_window_to(y);
        affix.update_position(&host);
        assert_eq!(affix.state(), expected, "scroll_top = {y}");
    }

    assert_eq!(*log.borrow(), [true, false]);
}

#[test]
fn no_offsets_behaves_like_top_zero() {
    let (mut host, nodes) = window_page();
    let mut affix = Affix::new(AffixProps::new());
    affix.mount(&mut host, nodes).unwrap();

    host.scroll_window_to(100.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);

    host.scroll_window_to(100.5);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
    assert_eq!(affix.affix_style().and_then(|s| s.top()), Some(0.0));
}

#[test]
fn bottom_offset_pins_until_element_is_visible() {
    let mut host = HeadlessViewport::new(1024.0, 768.0);
    let wrapper = host.add_node(None, Rect::new(0.0, 1500.0, 320.0, 1540.0));
    let fixed = host.add_node(None, Rect::new(0.0, 1500.0, 320.0, 1540.0));
    let (mut affix, log) = recording(AffixProps::new().offset_bottom(16.0));
    affix.mount(&mut host, AffixNodes { wrapper, fixed }).unwrap();

    // Threshold: 1500 + 40 + 16 - 768 = 788.
    assert_eq!(affix.state(), AffixState::FixedBottom);
    assert_eq!(affix.affix_style().and_then(|s| s.bottom()), Some(16.0));

    host.scroll_window_to(787.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedBottom);

    host.scroll_window_to(788.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);

    assert_eq!(*log.borrow(), [true, false]);
}

#[test]
fn pane_container_measures_against_pane() {
    let (mut host, pane, nodes) = pane_page();
    let mut affix = Affix::new(AffixProps::new().offset_top(20.0).target("pane"));
    affix.mount(&mut host, nodes).unwrap();
    assert_eq!(affix.listener_count(), 4);
    assert!(host.is_listening(&ScrollTarget::Element(pane), EventKind::Scroll));
    assert!(host.is_listening(&ScrollTarget::Window, EventKind::Resize));

    host.scroll_to(pane, 230.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);

    host.scroll_to(pane, 231.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
    let style = affix.affix_style().copied().unwrap();
    assert_eq!(style.anchor, Anchor::Top(120.0));
    assert_eq!(style.left, 10.0);
    assert_eq!(style.width, 200.0);
}

#[test]
fn pane_bottom_offset_is_measured_from_window_bottom() {
    let (mut host, _, nodes) = pane_page();
    host.set_layout(nodes.wrapper, Rect::new(10.0, 900.0, 210.0, 940.0));
    host.set_layout(nodes.fixed, Rect::new(10.0, 900.0, 210.0, 940.0));

    let mut affix = Affix::new(AffixProps::new().offset_bottom(4.0).target("pane"));
    affix.mount(&mut host, nodes).unwrap();

    assert_eq!(affix.state(), AffixState::FixedBottom);
    // Pane bottom edge sits at 400; the window is 768 tall.
    assert_eq!(
        affix.affix_style().map(|s| s.anchor),
        Some(Anchor::Bottom(768.0 - 400.0 + 4.0))
    );
}

#[test]
fn target_change_reevaluates_without_scroll() {
    let (mut host, pane, nodes) = pane_page();
    host.scroll_to(pane, 300.0);

    let (mut affix, log) = recording(AffixProps::new().offset_top(20.0));
    affix.mount(&mut host, nodes).unwrap();
    assert_eq!(affix.state(), AffixState::Unfixed);

    affix
        .set_target(&mut host, Some(String::from("pane")))
        .unwrap();
    assert_eq!(affix.state(), AffixState::FixedTop);
    assert_eq!(*log.borrow(), [true]);
    assert_eq!(host.listener_count(), 4);

    affix.set_target(&mut host, None).unwrap();
    assert_eq!(affix.state(), AffixState::Unfixed);
    assert_eq!(*log.borrow(), [true, false]);
    assert_eq!(host.listener_count(), 2);
    assert!(!host.is_listening(&ScrollTarget::Element(pane), EventKind::Scroll));
}

#[test]
fn same_target_is_not_reattached() {
    let (mut host, _, nodes) = pane_page();
    let mut affix = Affix::new(AffixProps::new().target("pane"));
    affix.mount(&mut host, nodes).unwrap();

    affix
        .set_target(&mut host, Some(String::from("pane")))
        .unwrap();
    assert_eq!(host.listener_count(), 4);
}

#[test]
fn detached_affix_recovers_when_same_target_appears() {
    let mut host = HeadlessViewport::new(1024.0, 768.0);
    let pane = host.add_node(None, Rect::new(0.0, 100.0, 400.0, 400.0));
    let wrapper = host.add_node(Some(pane), Rect::new(10.0, 250.0, 210.0, 290.0));
    let fixed = host.add_node(Some(pane), Rect::new(10.0, 250.0, 210.0, 290.0));
    host.scroll_to(pane, 300.0);

    let (mut affix, log) = recording(AffixProps::new().offset_top(20.0).target("pane"));
    assert!(affix.mount(&mut host, AffixNodes { wrapper, fixed }).is_err());
    assert_eq!(host.listener_count(), 0);
    assert!(affix.target().is_none());

    host.name_node(pane, "pane");
    affix
        .set_target(&mut host, Some(String::from("pane")))
        .unwrap();
    assert_eq!(host.listener_count(), 4);
    assert_eq!(affix.target(), Some(&ScrollTarget::Element(pane)));
    assert_eq!(affix.state(), AffixState::FixedTop);
    assert_eq!(*log.borrow(), [true]);
}

#[test]
fn empty_target_means_window() {
    let (mut host, nodes) = window_page();
    let mut affix = Affix::new(AffixProps::new().offset_top(10.0).target(""));
    affix.mount(&mut host, nodes).unwrap();
    assert_eq!(affix.target(), Some(&ScrollTarget::Window));
    assert_eq!(host.listener_count(), 2);

    host.scroll_window_to(95.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
}

#[test]
fn window_scroll_falls_back_to_document_root() {
    let (mut host, nodes) = window_page();
    let mut affix = Affix::new(AffixProps::new().offset_top(10.0));
    affix.mount(&mut host, nodes).unwrap();

    host.set_window_scroll(None);
    host.set_document_scroll(Vec2::new(0.0, 120.0));
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
}

#[test]
fn forwarded_attributes_reach_the_wrapper() {
    let (mut host, nodes) = window_page();
    let mut affix = Affix::new(
        AffixProps::new()
            .offset_top(0.0)
            .class_name("pinned")
            .attribute("id", "nav")
            .attribute("data-role", "toolbar"),
    );
    affix.mount(&mut host, nodes).unwrap();
    host.scroll_window_to(400.0);
    affix.update_position(&host);

    let mut html = String::new();
    affix.render().write_markup(&mut html, "links").unwrap();
    assert_eq!(
        html,
        "<div id=\"nav\" data-role=\"toolbar\" style=\"width: 320px; height: 40px\">\
         <div class=\"pinned\" style=\"position: fixed; top: 0px; left: 0px; width: 320px\">\
         links</div></div>"
    );
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
#[expect(deprecated, reason = "exercises the deprecated `offset` alias")]
fn legacy_offset_is_honored_and_warned_once() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let (mut host, pane, nodes) = pane_page();
        let mut affix = Affix::new(AffixProps::new().offset(20.0));
        affix.mount(&mut host, nodes.clone()).unwrap();
        assert_eq!(affix.props().offset_mode().top(), Some(20.0));

        affix
            .set_target(&mut host, Some(String::from("pane")))
            .unwrap();
        host.scroll_to(pane, 231.0);
        affix.update_position(&host);
        assert_eq!(affix.affix_style().and_then(|s| s.top()), Some(120.0));

        affix.unmount(&mut host);
        affix.mount(&mut host, nodes).unwrap();
    });

    let text = captured.text();
    assert_eq!(text.matches("deprecated").count(), 1, "{text}");
    assert!(text.contains("WARN"), "{text}");
}

#[test]
#[expect(deprecated, reason = "exercises the deprecated `offset` alias")]
fn explicit_offset_top_wins_over_legacy_offset() {
    let (mut host, nodes) = window_page();
    let mut affix = Affix::new(AffixProps::new().offset(20.0).offset_top(5.0));
    affix.mount(&mut host, nodes).unwrap();

    host.scroll_window_to(90.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::Unfixed);

    host.scroll_window_to(96.0);
    affix.update_position(&host);
    assert_eq!(affix.state(), AffixState::FixedTop);
    assert_eq!(affix.affix_style().and_then(|s| s.top()), Some(5.0));
}
