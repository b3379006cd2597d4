//! Output tree produced by the interpreter.
//!
//! The output tree is isomorphic in branching structure to the input render
//! tree except where a kind inserts a sibling marker or elides itself. Nodes
//! are plain data so the host can mount them into whatever visual surface it
//! uses; [`Element::write_html`] exists for tests and debugging.

use std::fmt::Write;

/// Class applied to task-list `<li>` items.
pub const TASK_LIST_ITEM_CLASS: &str = "task-list-item";
/// Class wrapping a non-current search match span.
pub const SEARCH_MATCH_CLASS: &str = "search-match";
/// Class wrapping the currently focused search match span.
pub const SEARCH_MATCH_CURRENT_CLASS: &str = "search-match-current";
/// Class wrapping the first node of a non-current match span.
pub const SEARCH_MATCH_START_CLASS: &str = "search-match-start";
/// Class wrapping the first node of the currently focused match span.
pub const SEARCH_MATCH_CURRENT_START_CLASS: &str = "search-match-current-start";
/// Class on the trailing footnote section.
pub const FOOTNOTES_SECTION_CLASS: &str = "footnotes";
/// Class on inert last-modified marker nodes.
pub const LAST_MODIFIED_CLASS: &str = "last-modified-marker";
/// Attribute on marker nodes carrying the stamped [`MarkerId`] index, so a
/// handle resolves to its node by identity rather than document position.
///
/// [`MarkerId`]: crate::MarkerId
pub const LAST_MODIFIED_ATTR: &str = "data-marker-id";

/// One node of the output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputNode {
    /// Plain text content.
    Text(String),
    /// A structured element with attributes and children.
    Element(Element),
    /// Pre-escaped markup injected as-is. Relative-path references inside the
    /// markup are not rewritten against the document base path; this is an
    /// accepted limitation of the passthrough kind.
    Raw(String),
}

impl OutputNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

impl From<Element> for OutputNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A structured output element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    /// Attributes in insertion order. An empty value renders as a bare
    /// boolean attribute (`disabled`, `checked`).
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<OutputNode>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self { tag, attrs: Vec::new(), children: Vec::new() }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Append a class, merging with any class attribute already present.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if let Some((_, existing)) = self.attrs.iter_mut().find(|(name, _)| *name == "class") {
            existing.push(' ');
            existing.push_str(class);
        } else {
            self.attrs.push(("class", class.to_owned()));
        }
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<OutputNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_children(vec![OutputNode::text(content)])
    }

    /// Whether this element can hold nested children.
    #[must_use]
    pub fn supports_children(&self) -> bool {
        !matches!(self.tag, "img" | "br" | "hr" | "input")
    }

    /// Serialize this element as HTML into `out`.
    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() {
                write!(out, " {name}").unwrap();
            } else {
                write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
            }
        }
        out.push('>');
        if !self.supports_children() {
            return;
        }
        for child in &self.children {
            match child {
                OutputNode::Text(text) => out.push_str(&escape_html(text)),
                OutputNode::Element(element) => element.write_html(out),
                OutputNode::Raw(raw) => out.push_str(raw),
            }
        }
        write!(out, "</{}>", self.tag).unwrap();
    }
}

/// Escape text for safe inclusion in HTML content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
