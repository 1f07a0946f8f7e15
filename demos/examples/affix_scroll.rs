// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affix scroll trace.
//!
//! Drive two affixes over a headless page: a toolbar pinned to the top of the
//! window, and a footer pinned to the bottom of a scroll pane. Each step prints
//! the states and the rendered toolbar markup.
//!
//! Run:
//! - `cargo run -p understory_affix_demos --example affix_scroll`

use kurbo::Rect;
use understory_affix::{Affix, AffixNodes, AffixProps, HeadlessViewport};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let mut host = HeadlessViewport::new(1024.0, 600.0);

    // Toolbar 120px down the page.
    let toolbar = AffixNodes {
        wrapper: host.add_node(None, Rect::new(0.0, 120.0, 1024.0, 168.0)),
        fixed: host.add_node(None, Rect::new(0.0, 120.0, 1024.0, 168.0)),
    };

    // A 400px pane with a footer deep inside its content.
    let pane = host.add_node(None, Rect::new(200.0, 180.0, 800.0, 580.0));
    host.name_node(pane, "pane");
    let footer = AffixNodes {
        wrapper: host.add_node(Some(pane), Rect::new(0.0, 900.0, 600.0, 940.0)),
        fixed: host.add_node(Some(pane), Rect::new(0.0, 900.0, 600.0, 940.0)),
    };

    let mut toolbar_affix = Affix::new(
        AffixProps::new()
            .offset_top(0.0)
            .attribute("id", "toolbar"),
    )
    .on_change(|affixed| println!("  toolbar affixed: {affixed}"));
    let mut footer_affix = Affix::new(AffixProps::new().offset_bottom(12.0).target("pane"))
        .on_change(|affixed| println!("  footer affixed: {affixed}"));

    if let Err(err) = toolbar_affix.mount(&mut host, toolbar) {
        eprintln!("toolbar: {err}");
        return;
    }
    if let Err(err) = footer_affix.mount(&mut host, footer) {
        eprintln!("footer: {err}");
        return;
    }

    for (window_y, pane_y) in [(0.0, 0.0), (80.0, 200.0), (160.0, 520.0), (40.0, 560.0)] {
        println!("window scroll {window_y}, pane scroll {pane_y}");
        host.scroll_window_to(window_y);
        host.scroll_to(pane, pane_y);
        toolbar_affix.update_position(&host);
        footer_affix.update_position(&host);

        let mut html = String::new();
        if toolbar_affix.render().write_markup(&mut html, "menu").is_ok() {
            println!("  toolbar: {:?} {html}", toolbar_affix.state());
        }
        println!(
            "  footer: {:?} {}",
            footer_affix.state(),
            footer_affix
                .affix_style()
                .map(ToString::to_string)
                .unwrap_or_default()
        );
    }

    toolbar_affix.unmount(&mut host);
    footer_affix.unmount(&mut host);
    println!("listeners left: {}", host.listener_count());
}
