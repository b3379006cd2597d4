//! Deferred footnote section assembly.
//!
//! Footnote definitions are collected during the main pass and emitted once,
//! in encounter order, as a trailing section. Anchor ids must mirror the
//! reference anchors bit-exact for cross-linking:
//! `user-content-fn-<id>` on the body, `user-content-fnref-<id>` on the
//! in-text reference, and `footnote-label` on the section heading.

use crate::output::{Element, FOOTNOTES_SECTION_CLASS, OutputNode};

/// Anchor id of the footnote section heading, referenced by every footnote
/// reference's `aria-describedby`.
pub const FOOTNOTE_LABEL_ID: &str = "footnote-label";

pub(crate) fn footnote_anchor(id: u64) -> String {
    format!("user-content-fn-{id}")
}

pub(crate) fn backref_anchor(id: u64) -> String {
    format!("user-content-fnref-{id}")
}

/// Build one footnote body item from its rendered children, appending the
/// back-reference link pointing at the footnote's first in-text reference.
pub(crate) fn body_item(id: u64, mut rendered: Vec<OutputNode>) -> Element {
    let backref = Element::new("a")
        .with_attr("href", format!("#{}", backref_anchor(id)))
        .with_attr("aria-label", "Back to content")
        .with_class("footnote-backref")
        .with_text("\u{21a9}");

    // The back link goes inside the body's last top-level child when that
    // child can hold children; otherwise it becomes a trailing sibling.
    match rendered.last_mut() {
        Some(OutputNode::Element(last)) if last.supports_children() => {
            last.children.push(backref.into());
        }
        _ => rendered.push(backref.into()),
    }

    Element::new("li")
        .with_attr("id", footnote_anchor(id))
        .with_children(rendered)
}

/// Wrap the footnote body items in the labeled trailing section. The list is
/// enumerated by encounter order, not by numeric id value.
pub(crate) fn section(items: Vec<Element>) -> Element {
    let list = Element::new("ol")
        .with_children(items.into_iter().map(OutputNode::Element).collect());
    Element::new("section")
        .with_class(FOOTNOTES_SECTION_CLASS)
        .with_children(vec![
            Element::new("h2")
                .with_attr("id", FOOTNOTE_LABEL_ID)
                .with_text("Footnotes")
                .into(),
            list.into(),
        ])
}
