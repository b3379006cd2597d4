//! External collaborator contracts for fence and math rendering.
//!
//! The interpreter core never talks to a diagram or typesetting engine
//! directly: both are injected capabilities so the core is unit-testable with
//! stub collaborators. Collaborator identity (diagram counters, theme) is
//! owned by the caller and may be threaded across passes; that is the only
//! state intentionally allowed to outlive a single render session.

use futures::future::{LocalBoxFuture, ready};

use crate::output::OutputNode;

/// Metadata extracted from a code-fence container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceInfo {
    /// Fence language tag, if any.
    pub lang: Option<String>,
    /// Raw fence source, flattened from the fence's text content.
    pub source: String,
}

/// Result of a specialized fence render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceOutput {
    /// Rendered replacement for the fence.
    pub node: OutputNode,
    /// True when this render's content differs from a previously stable
    /// render of the same fence identity (drives the last-modified marker).
    pub modified: bool,
}

/// Renders code-fence content (diagrams, typeset sources).
///
/// Returning `None` means "no special handling": the interpreter falls back
/// to a plain code block. Implementations must not panic on malformed fence
/// content; any failure is expected to degrade to the `None` path.
pub trait FenceRenderer {
    /// Render one fence. `position` is the fence's sibling index, a hint for
    /// collaborators that keep per-position identity across passes.
    fn render<'a>(
        &'a self,
        fence: &'a FenceInfo,
        position: usize,
    ) -> LocalBoxFuture<'a, Option<FenceOutput>>;
}

/// Inline or block presentation for a math expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathDisplay {
    Inline,
    Block,
}

impl MathDisplay {
    /// Presentation class consumed by the external stylesheet.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Inline => "math-inline",
            Self::Block => "math-block",
        }
    }
}

/// Typesets a math expression.
///
/// `None` means the collaborator declined or failed; the interpreter degrades
/// to a plain code element carrying the presentation class.
pub trait MathRenderer {
    fn render<'a>(
        &'a self,
        expr: &'a str,
        display: MathDisplay,
        position: usize,
    ) -> LocalBoxFuture<'a, Option<OutputNode>>;
}

/// Fence collaborator that always declines, leaving every fence on the
/// plain-code path. Used by the legacy synchronous variant and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFenceRenderer;

impl FenceRenderer for NullFenceRenderer {
    fn render<'a>(
        &'a self,
        _fence: &'a FenceInfo,
        _position: usize,
    ) -> LocalBoxFuture<'a, Option<FenceOutput>> {
        Box::pin(ready(None))
    }
}

/// Math collaborator that always declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMathRenderer;

impl MathRenderer for NullMathRenderer {
    fn render<'a>(
        &'a self,
        _expr: &'a str,
        _display: MathDisplay,
        _position: usize,
    ) -> LocalBoxFuture<'a, Option<OutputNode>> {
        Box::pin(ready(None))
    }
}
