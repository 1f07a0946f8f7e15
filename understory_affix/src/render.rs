// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered output of an affix.
//!
//! An affix renders as two nested nodes:
//!
//! - the wrapper, which stays in flow, carries every forwarded attribute and the
//!   placeholder size while affixed;
//! - the fixed node, which carries the marker class and the fixed-position style
//!   while affixed, and wraps the caller's content.
//!
//! [`RenderedAffix`] borrows from the [`Affix`](crate::Affix) and is meant to be
//! translated into the host's own node types. [`RenderedAffix::write_markup`]
//! produces HTML for hosts that render to strings.

use alloc::string::String;
use core::fmt;

use crate::style::{AffixStyle, PlaceholderStyle};

/// Outer node description.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WrapperNode<'a> {
    /// Attributes forwarded unchanged from the props.
    pub attributes: &'a [(String, String)],
    /// Placeholder style; `None` while unfixed.
    pub style: Option<&'a PlaceholderStyle>,
}

impl WrapperNode<'_> {
    /// Looks up a forwarded attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Inner node description.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedNode<'a> {
    /// Marker class; only present while affixed.
    pub class_name: Option<&'a str>,
    /// Fixed-position style; `None` while unfixed.
    pub style: Option<&'a AffixStyle>,
}

/// The two nodes an affix renders.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderedAffix<'a> {
    /// Outer node.
    pub wrapper: WrapperNode<'a>,
    /// Inner node.
    pub fixed: FixedNode<'a>,
}

impl RenderedAffix<'_> {
    /// Writes both nodes as HTML around already-rendered `children`.
    ///
    /// Attribute values are escaped; `children` is written verbatim.
    pub fn write_markup(&self, out: &mut impl fmt::Write, children: &str) -> fmt::Result {
        out.write_str("<div")?;
        for (name, value) in self.wrapper.attributes {
            write!(out, " {name}=\"")?;
            write_escaped(out, value)?;
            out.write_char('"')?;
        }
        if let Some(style) = self.wrapper.style {
            write!(out, " style=\"{style}\"")?;
        }
        out.write_str("><div")?;
        if let Some(class_name) = self.fixed.class_name {
            out.write_str(" class=\"")?;
            write_escaped(out, class_name)?;
            out.write_char('"')?;
        }
        if let Some(style) = self.fixed.style {
            write!(out, " style=\"{style}\"")?;
        }
        write!(out, ">{children}</div></div>")
    }
}

fn write_escaped(out: &mut impl fmt::Write, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '"' => out.write_str("&quot;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}
