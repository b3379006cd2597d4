//! Render invocation errors.
//!
//! Node-local failures (unknown kinds, collaborator declines, cells outside
//! table context) are contained and logged; they never surface here. Only
//! structural failures with no sensible degraded behavior become errors.

/// Fatal failure of a render invocation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The preview surface has nowhere to attach the output tree.
    #[error("no mount target is attached to the preview surface")]
    NoMountTarget,
}
