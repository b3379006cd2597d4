//! Thin mount harness for the host's visual surface.
//!
//! Physical mounting is the host's concern; this type only models the
//! boundary: a root element that output nodes are attached to, and the one
//! fatal failure of the whole pipeline (no root to attach to).

use crate::error::RenderError;
use crate::interp::RenderOutcome;
use crate::output::Element;

/// The mount point an output tree is attached to after a pass.
///
/// A new render invocation simply supersedes the previous one: mounting
/// replaces the root's children wholesale, and any in-flight suspensions of
/// an abandoned pass are the caller's to discard.
#[derive(Debug, Default)]
pub struct PreviewSurface {
    root: Option<Element>,
}

impl PreviewSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the root element output trees will be mounted into.
    pub fn attach(&mut self, root: Element) {
        self.root = Some(root);
    }

    /// Replace the mounted content with a pass's output.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoMountTarget`] when no root is attached; there is no
    /// degraded behavior for a missing mount point.
    pub fn mount(&mut self, outcome: RenderOutcome) -> Result<(), RenderError> {
        let root = self.root.as_mut().ok_or(RenderError::NoMountTarget)?;
        root.children = outcome.nodes;
        Ok(())
    }

    /// Currently mounted root, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::render_sync;
    use mp_tree::parse_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mount_without_root_is_fatal() {
        let outcome = render_sync(&[]);
        let mut surface = PreviewSurface::new();
        assert!(matches!(
            surface.mount(outcome),
            Err(RenderError::NoMountTarget)
        ));
    }

    #[test]
    fn test_mount_replaces_previous_content() {
        let mut surface = PreviewSurface::new();
        surface.attach(Element::new("article"));

        let first = parse_tree(r#"[{"t":"p","c":["one"]}]"#).unwrap();
        surface.mount(render_sync(&first)).unwrap();
        assert_eq!(surface.root().unwrap().children.len(), 1);

        let second = parse_tree(r#"[{"t":"p","c":["a"]},{"t":"p","c":["b"]}]"#).unwrap();
        surface.mount(render_sync(&second)).unwrap();
        assert_eq!(surface.root().unwrap().children.len(), 2);
    }
}
