//! The render-tree interpreter.
//!
//! A depth-first, partially asynchronous tree-to-tree pass: each input
//! element maps to an output node of the corresponding kind, while four
//! pieces of session state (table alignment, footnote collection, match
//! counting, last-modified tracking) are threaded through the walk.
//!
//! Sibling subtrees render with fan-out/join semantics: their futures are
//! created in input order and joined before parent assembly, and results are
//! reassembled strictly by position, so output order always matches input
//! order regardless of which collaborator calls resolve first. Suspension
//! happens only at collaborator boundaries (fences, math); there is no
//! parallelism, only overlapping of suspension latency.

use std::cell::RefCell;

use futures::future::{LocalBoxFuture, join_all};
use mp_tree::RenderTreeElem;

use crate::fence::{
    FenceInfo, FenceRenderer, MathDisplay, MathRenderer, NullFenceRenderer, NullMathRenderer,
};
use crate::footnotes::{self, FOOTNOTE_LABEL_ID};
use crate::output::{
    Element, LAST_MODIFIED_ATTR, LAST_MODIFIED_CLASS, OutputNode, SEARCH_MATCH_CLASS,
    SEARCH_MATCH_CURRENT_CLASS, SEARCH_MATCH_CURRENT_START_CLASS, SEARCH_MATCH_START_CLASS,
    TASK_LIST_ITEM_CLASS,
};
use crate::state::{MarkerId, SessionState};

/// Result of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome {
    /// Top-level output nodes, in input order, with the footnote section
    /// appended when any definitions were collected.
    pub nodes: Vec<OutputNode>,
    /// Number of distinct search match spans seen during the pass.
    pub match_count: usize,
    /// Handle to the most recently created last-modified marker, if any.
    pub last_modified: Option<MarkerId>,
}

/// What a single element contributed to its parent's child list.
enum Rendered {
    /// No output (footnote definitions, unknown kinds).
    Nothing,
    One(OutputNode),
    /// A marker sibling inserted immediately before the node itself.
    Marked { marker: OutputNode, node: OutputNode },
}

impl Rendered {
    fn append_to(self, out: &mut Vec<OutputNode>) {
        match self {
            Self::Nothing => {}
            Self::One(node) => out.push(node),
            Self::Marked { marker, node } => {
                out.push(marker);
                out.push(node);
            }
        }
    }
}

/// One-shot interpreter session.
///
/// Owns all tracker state for a single pass and is consumed by
/// [`render`](Self::render). Nothing survives across passes except what the
/// caller extracts from the [`RenderOutcome`] and whatever identity the
/// injected collaborators keep for themselves.
pub struct RenderSession<'a, F: FenceRenderer, M: MathRenderer> {
    fences: &'a F,
    math: &'a M,
    state: RefCell<SessionState>,
}

impl<'a, F: FenceRenderer, M: MathRenderer> RenderSession<'a, F, M> {
    #[must_use]
    pub fn new(fences: &'a F, math: &'a M) -> Self {
        Self { fences, math, state: RefCell::new(SessionState::default()) }
    }

    /// Render a full tree, producing the output nodes plus the session's
    /// accumulated match count and last-modified handle.
    ///
    /// The footnote section is rendered strictly after the entire main tree:
    /// collection is a side effect of the main pass and the collector is
    /// drained only once the main fan-out has fully joined.
    pub async fn render(self, tree: &[RenderTreeElem]) -> RenderOutcome {
        let mut nodes = self.render_siblings(tree).await;

        let defs = self.state.borrow_mut().footnotes.drain();
        if !defs.is_empty() {
            let mut items = Vec::with_capacity(defs.len());
            for def in &defs {
                let rendered = self.render_siblings(&def.children).await;
                items.push(footnotes::body_item(def.id, rendered));
            }
            nodes.push(footnotes::section(items).into());
        }

        let state = self.state.into_inner();
        RenderOutcome {
            nodes,
            match_count: state.match_count,
            last_modified: state.last_modified,
        }
    }

    /// Fan out over siblings and join, reassembling by position.
    async fn render_siblings(&self, elems: &[RenderTreeElem]) -> Vec<OutputNode> {
        let branches = elems
            .iter()
            .enumerate()
            .map(|(position, elem)| self.render_elem(elem, position));
        let mut out = Vec::with_capacity(elems.len());
        for rendered in join_all(branches).await {
            rendered.append_to(&mut out);
        }
        out
    }

    async fn container(&self, tag: &'static str, children: &[RenderTreeElem]) -> Element {
        Element::new(tag).with_children(self.render_siblings(children).await)
    }

    /// Create a marker node and point the session handle at it.
    ///
    /// The node is stamped with its handle index: a branch suspended at a
    /// collaborator creates its marker only when the collaborator resolves,
    /// so creation order can differ from document order and the handle must
    /// resolve by identity, not by position.
    fn marker(&self) -> OutputNode {
        let id = self.state.borrow_mut().new_marker();
        Element::new("span")
            .with_class(LAST_MODIFIED_CLASS)
            .with_attr(LAST_MODIFIED_ATTR, id.index().to_string())
            .into()
    }

    async fn match_span(&self, class: &str, children: &[RenderTreeElem]) -> Element {
        Element::new("span")
            .with_class(class)
            .with_children(self.render_siblings(children).await)
    }

    // Boxed for recursion. State is only touched between awaits, never across
    // them, so sibling branches may suspend independently while tracker
    // updates still happen in document order.
    #[allow(clippy::too_many_lines)]
    fn render_elem<'s>(
        &'s self,
        elem: &'s RenderTreeElem,
        position: usize,
    ) -> LocalBoxFuture<'s, Rendered> {
        Box::pin(async move {
            let node: OutputNode = match elem {
                RenderTreeElem::Text(text) => OutputNode::text(text.clone()),
                RenderTreeElem::Paragraph { children } => {
                    self.container("p", children).await.into()
                }
                RenderTreeElem::Heading { level, id, children } => {
                    let tag = match level {
                        1 => "h1",
                        2 => "h2",
                        3 => "h3",
                        4 => "h4",
                        5 => "h5",
                        _ => "h6",
                    };
                    let mut heading = self.container(tag, children).await;
                    if let Some(id) = id {
                        // Copied through verbatim; duplicate ids are the
                        // upstream parser's to resolve, not ours.
                        heading = heading.with_attr("id", id.clone());
                    }
                    heading.into()
                }
                RenderTreeElem::Link { href, title, auto, children } => {
                    let mut link = Element::new("a").with_attr("href", href.clone());
                    if !auto {
                        let tooltip = match title {
                            Some(title) if title != href => format!("\"{title}\" {href}"),
                            _ => href.clone(),
                        };
                        link = link.with_attr("title", tooltip);
                    }
                    link.with_children(self.render_siblings(children).await).into()
                }
                RenderTreeElem::Image { src, title, children } => {
                    let mut alt = String::new();
                    for child in children {
                        child.plain_text(&mut alt);
                    }
                    let mut image = Element::new("img").with_attr("src", src.clone());
                    if let Some(title) = title {
                        image = image.with_attr("title", title.clone());
                    }
                    image.with_attr("alt", alt).into()
                }
                RenderTreeElem::HardBreak => Element::new("br").into(),
                RenderTreeElem::Rule => Element::new("hr").into(),
                RenderTreeElem::Blockquote { children } => {
                    self.container("blockquote", children).await.into()
                }
                RenderTreeElem::Emphasis { children } => {
                    self.container("em", children).await.into()
                }
                RenderTreeElem::Strong { children } => {
                    self.container("strong", children).await.into()
                }
                RenderTreeElem::Strikethrough { children } => {
                    self.container("del", children).await.into()
                }
                RenderTreeElem::CodeFence { children } => {
                    return self.render_fence(children, position).await;
                }
                RenderTreeElem::Code { lang, children } => {
                    let mut code = self.container("code", children).await;
                    if let Some(lang) = lang {
                        code = code.with_class(&format!("language-{lang}"));
                    }
                    code.into()
                }
                RenderTreeElem::OrderedList { start, children } => {
                    let mut list = self.container("ol", children).await;
                    if let Some(start) = start {
                        list = list.with_attr("start", start.to_string());
                    }
                    list.into()
                }
                RenderTreeElem::UnorderedList { children } => {
                    self.container("ul", children).await.into()
                }
                RenderTreeElem::ListItem { children } => {
                    self.container("li", children).await.into()
                }
                RenderTreeElem::TaskListItem { children } => self
                    .container("li", children)
                    .await
                    .with_class(TASK_LIST_ITEM_CLASS)
                    .into(),
                RenderTreeElem::Checkbox { checked } => {
                    let mut checkbox = Element::new("input").with_attr("type", "checkbox");
                    if *checked {
                        checkbox = checkbox.with_attr("checked", "");
                    }
                    checkbox.with_attr("disabled", "").into()
                }
                RenderTreeElem::Emoji { name, children } => self
                    .container("span", children)
                    .await
                    .with_class("emoji")
                    .with_attr("aria-label", name.clone())
                    .into(),
                RenderTreeElem::Table { align, children } => {
                    self.state.borrow_mut().table.enter_table(align.clone());
                    self.container("table", children).await.into()
                }
                RenderTreeElem::TableHead { children } => {
                    self.container("thead", children).await.into()
                }
                RenderTreeElem::TableBody { children } => {
                    self.container("tbody", children).await.into()
                }
                RenderTreeElem::TableRow { children } => {
                    self.state.borrow_mut().table.enter_row();
                    self.container("tr", children).await.into()
                }
                RenderTreeElem::TableHeaderCell { children } => {
                    self.render_cell("th", children).await.into()
                }
                RenderTreeElem::TableDataCell { children } => {
                    self.render_cell("td", children).await.into()
                }
                RenderTreeElem::FootnoteRef { id } => {
                    let anchor = Element::new("a")
                        .with_attr("href", format!("#{}", footnotes::footnote_anchor(*id)))
                        .with_attr("id", footnotes::backref_anchor(*id))
                        .with_attr("aria-describedby", FOOTNOTE_LABEL_ID)
                        .with_text(id.to_string());
                    Element::new("sup").with_children(vec![anchor.into()]).into()
                }
                RenderTreeElem::FootnoteDef { id, children, .. } => {
                    // Never emitted inline; deferred to the trailing section.
                    self.state.borrow_mut().footnotes.collect(*id, children.clone());
                    return Rendered::Nothing;
                }
                RenderTreeElem::Math { expr, inline } => {
                    let display =
                        if *inline { MathDisplay::Inline } else { MathDisplay::Block };
                    match self.math.render(expr, display, position).await {
                        Some(node) => node,
                        None => {
                            tracing::warn!(
                                expr = %expr,
                                "math collaborator declined, falling back to plain code"
                            );
                            Element::new("code")
                                .with_class(display.class())
                                .with_text(expr.clone())
                                .into()
                        }
                    }
                }
                RenderTreeElem::RawHtml { raw } => OutputNode::Raw(raw.clone()),
                RenderTreeElem::Modified => self.marker(),
                RenderTreeElem::Match { children } => {
                    self.match_span(SEARCH_MATCH_CLASS, children).await.into()
                }
                RenderTreeElem::MatchCurrent { children } => {
                    self.match_span(SEARCH_MATCH_CURRENT_CLASS, children).await.into()
                }
                RenderTreeElem::MatchStart { children } => {
                    self.state.borrow_mut().match_count += 1;
                    self.match_span(SEARCH_MATCH_START_CLASS, children).await.into()
                }
                RenderTreeElem::MatchCurrentStart { children } => {
                    self.state.borrow_mut().match_count += 1;
                    self.match_span(SEARCH_MATCH_CURRENT_START_CLASS, children)
                        .await
                        .into()
                }
                RenderTreeElem::Unknown { kind, raw } => {
                    tracing::warn!(
                        kind = %kind,
                        raw = %raw,
                        "skipping unknown render tree node kind"
                    );
                    return Rendered::Nothing;
                }
            };
            Rendered::One(node)
        })
    }

    /// Consult the alignment tracker, then render the cell. The cursor
    /// advances for every cell, aligned or not.
    async fn render_cell(&self, tag: &'static str, children: &[RenderTreeElem]) -> Element {
        let align = {
            let mut state = self.state.borrow_mut();
            if !state.table.is_active() {
                tracing::debug!("table cell encountered outside any table context");
            }
            state.table.next_column_align()
        };
        let mut cell = self.container(tag, children).await;
        if let Some(direction) = align.direction() {
            cell = cell.with_attr("style", format!("text-align: {direction}"));
        }
        cell
    }

    /// Delegate a fence to the collaborator, falling back to a plain code
    /// block when it declines. A modified result gets a last-modified marker
    /// inserted immediately before the fence's own output.
    async fn render_fence(&self, children: &[RenderTreeElem], position: usize) -> Rendered {
        let info = fence_info(children);
        match self.fences.render(&info, position).await {
            Some(output) => {
                if output.modified {
                    Rendered::Marked { marker: self.marker(), node: output.node }
                } else {
                    Rendered::One(output.node)
                }
            }
            // Children render only when the fence actually falls back to
            // plain code: a replaced fence must not leak its children's
            // tracker side effects into the session.
            None => {
                let inner = self.render_siblings(children).await;
                Rendered::One(Element::new("pre").with_children(inner).into())
            }
        }
    }
}

/// Extract fence metadata: the language from the nested code child and the
/// source from the fence's flattened text content.
fn fence_info(children: &[RenderTreeElem]) -> FenceInfo {
    let lang = children.iter().find_map(|child| match child {
        RenderTreeElem::Code { lang, .. } => lang.clone(),
        _ => None,
    });
    let mut source = String::new();
    for child in children {
        child.plain_text(&mut source);
    }
    FenceInfo { lang, source }
}

/// Legacy synchronous variant: renders with the null collaborators, so every
/// fence takes the plain-code path and math falls back to plain code. With no
/// real suspension points the pass completes in a single poll.
#[must_use]
pub fn render_sync(tree: &[RenderTreeElem]) -> RenderOutcome {
    let session = RenderSession::new(&NullFenceRenderer, &NullMathRenderer);
    futures::executor::block_on(session.render(tree))
}
