//! Render tree data model for markdown preview.
//!
//! The upstream parser serializes a parsed document as an ordered sequence of
//! elements, each either a text scalar or an object with a `t` discriminant
//! and, for container kinds, a `c` children sequence. This crate decodes that
//! wire shape into [`RenderTreeElem`], the typed intermediate representation
//! consumed by the `mp-renderer` interpreter.
//!
//! Decoding is deliberately forgiving: unknown discriminants are preserved as
//! [`RenderTreeElem::Unknown`] instead of failing, so the preview stays usable
//! against forward-incompatible or malformed trees.
//!
//! # Example
//!
//! ```
//! use mp_tree::{RenderTreeElem, parse_tree};
//!
//! let tree = parse_tree(r#"[{"t":"p","c":["Hello"]}]"#).unwrap();
//! assert!(matches!(tree[0], RenderTreeElem::Paragraph { .. }));
//! ```

mod elem;
mod wire;

pub use elem::{ColumnAlign, RenderTreeElem};
pub use wire::{WireError, elem_from_value, parse_tree};
