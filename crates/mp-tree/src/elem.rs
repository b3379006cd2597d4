//! Typed render tree elements.

/// Per-column table alignment, declared once on the table element.
///
/// The wire encoding is `"left"` / `"center"` / `"right"`, with `null` for
/// columns that declare no alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
    /// No alignment declared for this column.
    #[default]
    None,
}

impl ColumnAlign {
    /// CSS `text-align` keyword for this alignment, if any.
    #[must_use]
    pub fn direction(self) -> Option<&'static str> {
        match self {
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
            Self::None => None,
        }
    }
}

/// One element of the render tree.
///
/// A leaf is a raw text scalar; every other variant corresponds to one node
/// kind of the closed wire vocabulary. [`Unknown`](Self::Unknown) captures
/// forward-incompatible discriminants so the interpreter can log and skip
/// them instead of failing the whole pass.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderTreeElem {
    /// Raw text leaf.
    Text(String),
    Paragraph {
        children: Vec<RenderTreeElem>,
    },
    /// Heading with level 1–6. The anchor id is copied through verbatim;
    /// duplicate ids are not deduplicated here or downstream.
    Heading {
        level: u8,
        id: Option<String>,
        children: Vec<RenderTreeElem>,
    },
    Link {
        href: String,
        title: Option<String>,
        /// True for auto-detected bare URLs, false for authored links.
        auto: bool,
        children: Vec<RenderTreeElem>,
    },
    Image {
        src: String,
        title: Option<String>,
        children: Vec<RenderTreeElem>,
    },
    HardBreak,
    Blockquote {
        children: Vec<RenderTreeElem>,
    },
    Emphasis {
        children: Vec<RenderTreeElem>,
    },
    Strong {
        children: Vec<RenderTreeElem>,
    },
    Strikethrough {
        children: Vec<RenderTreeElem>,
    },
    /// Code fence container (wire tag `pre`). Fence metadata lives on the
    /// nested [`Code`](Self::Code) child.
    CodeFence {
        children: Vec<RenderTreeElem>,
    },
    /// Inline or fenced code contents (wire tag `code`).
    Code {
        lang: Option<String>,
        children: Vec<RenderTreeElem>,
    },
    OrderedList {
        /// Explicit start number. The serializer omits it when it is 1.
        start: Option<u64>,
        children: Vec<RenderTreeElem>,
    },
    UnorderedList {
        children: Vec<RenderTreeElem>,
    },
    ListItem {
        children: Vec<RenderTreeElem>,
    },
    TaskListItem {
        children: Vec<RenderTreeElem>,
    },
    Checkbox {
        checked: bool,
    },
    Emoji {
        name: String,
        children: Vec<RenderTreeElem>,
    },
    Table {
        align: Vec<ColumnAlign>,
        children: Vec<RenderTreeElem>,
    },
    TableHead {
        children: Vec<RenderTreeElem>,
    },
    TableBody {
        children: Vec<RenderTreeElem>,
    },
    TableRow {
        children: Vec<RenderTreeElem>,
    },
    TableHeaderCell {
        children: Vec<RenderTreeElem>,
    },
    TableDataCell {
        children: Vec<RenderTreeElem>,
    },
    Rule,
    /// Footnote reference. The id is the encounter-order integer assigned by
    /// the upstream serializer.
    FootnoteRef {
        id: u64,
    },
    FootnoteDef {
        id: u64,
        name: Option<String>,
        children: Vec<RenderTreeElem>,
    },
    Math {
        expr: String,
        inline: bool,
    },
    /// Pre-escaped markup injected as-is.
    RawHtml {
        raw: String,
    },
    /// Explicit last-modified marker inserted by the upstream serializer.
    Modified,
    Match {
        children: Vec<RenderTreeElem>,
    },
    MatchCurrent {
        children: Vec<RenderTreeElem>,
    },
    /// First node of a match span; counted, unlike [`Match`](Self::Match).
    MatchStart {
        children: Vec<RenderTreeElem>,
    },
    MatchCurrentStart {
        children: Vec<RenderTreeElem>,
    },
    /// Forward-incompatible node kind, kept for diagnostics.
    Unknown {
        kind: String,
        raw: String,
    },
}

impl RenderTreeElem {
    /// Children of this element, empty for leaves and childless kinds.
    #[must_use]
    pub fn children(&self) -> &[RenderTreeElem] {
        match self {
            Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::Link { children, .. }
            | Self::Image { children, .. }
            | Self::Blockquote { children }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Strikethrough { children }
            | Self::CodeFence { children }
            | Self::Code { children, .. }
            | Self::OrderedList { children, .. }
            | Self::UnorderedList { children }
            | Self::ListItem { children }
            | Self::TaskListItem { children }
            | Self::Emoji { children, .. }
            | Self::Table { children, .. }
            | Self::TableHead { children }
            | Self::TableBody { children }
            | Self::TableRow { children }
            | Self::TableHeaderCell { children }
            | Self::TableDataCell { children }
            | Self::FootnoteDef { children, .. }
            | Self::Match { children }
            | Self::MatchCurrent { children }
            | Self::MatchStart { children }
            | Self::MatchCurrentStart { children } => children,
            _ => &[],
        }
    }

    /// Flatten all descendant text into `out`, depth-first, ignoring node
    /// boundaries. Used for image alt text and fence source extraction.
    pub fn plain_text(&self, out: &mut String) {
        if let Self::Text(text) = self {
            out.push_str(text);
        } else {
            for child in self.children() {
                child.plain_text(out);
            }
        }
    }
}
