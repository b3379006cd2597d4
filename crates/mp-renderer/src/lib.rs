//! Render-tree interpreter for markdown preview.
//!
//! This crate walks the typed render tree produced upstream (see `mp-tree`)
//! and compiles it into a presentable output tree, tracking the cross-cutting
//! concerns that are not local to any single node: table column alignment,
//! footnote collection with back-references, search match counting, and the
//! location of the most recently changed subtree.
//!
//! # Architecture
//!
//! The core is [`RenderSession`], a one-shot object owning a single pass's
//! tracker state. Fence and math rendering are injected capabilities
//! ([`FenceRenderer`] / [`MathRenderer`]) so the interpreter is unit-testable
//! without a real diagram or typesetting engine; collaborator identity is the
//! only state that may outlive a pass.
//!
//! # Example
//!
//! ```
//! use mp_renderer::{NullFenceRenderer, NullMathRenderer, RenderSession};
//! use mp_tree::parse_tree;
//!
//! let tree = parse_tree(r#"[{"t":"p","c":["Hello"]}]"#).unwrap();
//! let session = RenderSession::new(&NullFenceRenderer, &NullMathRenderer);
//! let outcome = futures::executor::block_on(session.render(&tree));
//! assert_eq!(outcome.match_count, 0);
//! ```

mod error;
mod fence;
mod footnotes;
mod interp;
mod output;
mod preview;
mod state;

pub use error::RenderError;
pub use fence::{
    FenceInfo, FenceOutput, FenceRenderer, MathDisplay, MathRenderer, NullFenceRenderer,
    NullMathRenderer,
};
pub use footnotes::FOOTNOTE_LABEL_ID;
pub use interp::{RenderOutcome, RenderSession, render_sync};
pub use output::{
    Element, FOOTNOTES_SECTION_CLASS, LAST_MODIFIED_ATTR, LAST_MODIFIED_CLASS, OutputNode,
    SEARCH_MATCH_CLASS,
    SEARCH_MATCH_CURRENT_CLASS, SEARCH_MATCH_CURRENT_START_CLASS, SEARCH_MATCH_START_CLASS,
    TASK_LIST_ITEM_CLASS, escape_html,
};
pub use preview::PreviewSurface;
pub use state::MarkerId;
