use crate::emphasis::{BionicSettings, split};

use super::{
    classify::{InlineNode, classify},
    markers,
    tree::TextContainer,
};

/// What a block-level rewrite pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Text nodes replaced by marker fragments.
    Rewritten { fragments: usize },
    /// The block already carries markers; nothing was touched.
    AlreadyEmphasized,
    /// The block is no longer part of the document.
    Detached,
}

/// Applies bionic emphasis to rendered blocks in place.
#[derive(Debug, Clone, Copy)]
pub struct TreeRewriter {
    settings: BionicSettings,
}

impl TreeRewriter {
    pub fn new(settings: BionicSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> BionicSettings {
        self.settings
    }

    /// Rewrites the inline content of one rendered block.
    ///
    /// The block's first child holds the inline nodes. A block that already
    /// contains a marker is left alone, so repeated passes over unchanged
    /// content are harmless.
    pub fn rewrite_block<T: TextContainer>(&self, tree: &mut T, block: T::Node) -> RewriteOutcome {
        if !tree.is_attached(block) {
            log::debug!("skipping detached block {block:?}");
            return RewriteOutcome::Detached;
        }
        if contains_marker(tree, block) {
            return RewriteOutcome::AlreadyEmphasized;
        }

        let fragments = match tree.first_child(block) {
            Some(content) => tree
                .children(content)
                .into_iter()
                .map(|node| self.rewrite_node(tree, node))
                .sum(),
            None => 0,
        };
        RewriteOutcome::Rewritten { fragments }
    }

    /// Rewrites `node` and whatever text it wraps. Returns the number of
    /// text nodes replaced.
    pub fn rewrite_node<T: TextContainer>(&self, tree: &mut T, node: T::Node) -> usize {
        match classify(tree, node) {
            InlineNode::PlainText { node, content } => {
                usize::from(self.materialize(tree, node, &content))
            }
            InlineNode::BlockRefGroup { children } => children
                .into_iter()
                .map(|child| self.rewrite_node(tree, child))
                .sum(),
            InlineNode::Opaque => {
                log::debug!("leaving unrecognized node {node:?} untouched");
                0
            }
            wrapper => wrapper
                .single_child()
                .map_or(0, |child| self.rewrite_node(tree, child)),
        }
    }

    /// Replaces a text node with `<bionic><b>..</b>..</bionic>`.
    fn materialize<T: TextContainer>(&self, tree: &mut T, node: T::Node, content: &str) -> bool {
        if content.is_empty() {
            return false;
        }

        let fragment = split(content, self.settings);
        let marker = tree.create_element(markers::MARKER_TAG);
        for unit in &fragment.units {
            if !unit.bold.is_empty() {
                let bold = tree.create_element(markers::BOLD_TAG);
                let text = tree.create_text(&unit.bold);
                tree.append_child(bold, text);
                tree.append_child(marker, bold);
            }
            if !unit.plain.is_empty() {
                let text = tree.create_text(&unit.plain);
                tree.append_child(marker, text);
            }
        }
        tree.replace_child(node, marker)
    }
}

/// Whether any emphasis marker exists under `root`.
pub fn contains_marker<T: TextContainer>(tree: &T, root: T::Node) -> bool {
    !tree.find_by_tag(root, markers::MARKER_TAG).is_empty()
}

/// Replaces every marker under `root` with one plain text node holding the
/// marker's text, restoring the content as it was before rewriting.
///
/// Returns the number of markers removed.
pub fn revert<T: TextContainer>(tree: &mut T, root: T::Node) -> usize {
    if !tree.is_attached(root) {
        return 0;
    }

    let mut reverted = 0;
    for marker in tree.find_by_tag(root, markers::MARKER_TAG) {
        let original = tree.text_content(marker);
        let text = tree.create_text(&original);
        if tree.replace_child(marker, text) {
            reverted += 1;
        }
    }
    reverted
}
