//! Structure-aware rewriting of a block's rendered inline content.
//!
//! [`classify`] reads the category of one rendered node, [`TreeRewriter`]
//! walks a block and swaps text nodes for emphasized marker fragments, and
//! [`revert`] undoes it. The live tree is only reached through
//! [`TextContainer`], with [`RenderTree`] as the in-memory implementation.

pub mod classify;
pub mod markers;
pub mod memory;
pub mod rewrite;
pub mod tree;

pub use classify::{InlineNode, SpanKind, classify};
pub use memory::{Markup, NodeId, RenderTree};
pub use rewrite::{RewriteOutcome, TreeRewriter, contains_marker, revert};
pub use tree::{ElementRef, NodeShape, TextContainer};
