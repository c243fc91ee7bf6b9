use super::{
    markers,
    tree::{ElementRef, NodeShape, TextContainer},
};

/// Inline style wrappers that hold exactly one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Highlight,
    Italic,
    Tag,
}

impl SpanKind {
    fn of(el: &ElementRef<'_>) -> Option<Self> {
        if el.has_class(markers::BOLD) {
            Some(SpanKind::Bold)
        } else if el.has_class(markers::HIGHLIGHT) {
            Some(SpanKind::Highlight)
        } else if el.has_class(markers::ITALICS) {
            Some(SpanKind::Italic)
        } else if el.has_class(markers::TAG_REF) {
            Some(SpanKind::Tag)
        } else {
            None
        }
    }
}

/// Structural category of one rendered inline node.
///
/// Every wrapper variant names the node(s) the rewriter descends into next;
/// `PlainText` is the only variant that gets transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode<N> {
    PlainText { node: N, content: String },
    StyledSpan { kind: SpanKind, child: N },
    /// Alias or block-reference host; `child` is either the alias text or the
    /// next wrapper down.
    PopoverWrapper { child: N },
    PageRefLink { child: N },
    PageRefBracketed { child: N },
    /// A block reference rendering several inline children of its own.
    BlockRefGroup { children: Vec<N> },
    QuoteWrapped { child: N },
    Opaque,
}

impl<N: Copy> InlineNode<N> {
    /// The single node to descend into, for the one-child wrapper variants.
    pub fn single_child(&self) -> Option<N> {
        match self {
            InlineNode::StyledSpan { child, .. }
            | InlineNode::PopoverWrapper { child }
            | InlineNode::PageRefLink { child }
            | InlineNode::PageRefBracketed { child }
            | InlineNode::QuoteWrapped { child } => Some(*child),
            InlineNode::PlainText { .. } | InlineNode::BlockRefGroup { .. } | InlineNode::Opaque => {
                None
            }
        }
    }
}

/// Reads the category of `node` without touching the tree.
pub fn classify<T: TextContainer>(tree: &T, node: T::Node) -> InlineNode<T::Node> {
    match tree.shape(node) {
        Some(NodeShape::Text(text)) => InlineNode::PlainText {
            node,
            content: text.to_string(),
        },
        Some(NodeShape::Element(el)) => classify_element(tree, node, &el),
        None => InlineNode::Opaque,
    }
}

fn classify_element<T: TextContainer>(
    tree: &T,
    node: T::Node,
    el: &ElementRef<'_>,
) -> InlineNode<T::Node> {
    if el.tag == markers::MARKER_TAG {
        return InlineNode::Opaque;
    }

    if let Some(kind) = SpanKind::of(el) {
        return unwrap_single_child(tree, node)
            .map_or(InlineNode::Opaque, |child| InlineNode::StyledSpan { kind, child });
    }

    if el.has_class(markers::POPOVER_WRAPPER) {
        return match unwrap_popover(tree, node) {
            Some(inner) if tree.is_text(inner) => InlineNode::PopoverWrapper { child: inner },
            Some(inner) => InlineNode::BlockRefGroup {
                children: unwrap_group(tree, inner),
            },
            None => InlineNode::Opaque,
        };
    }

    if el.has_class(markers::BLOCK_REF) {
        return unwrap_path(tree, node, &[0, 0])
            .map_or(InlineNode::Opaque, |child| InlineNode::PopoverWrapper { child });
    }

    classify_by_first_child(tree, node)
}

/// Unknown wrapper: the real category usually sits one level down.
fn classify_by_first_child<T: TextContainer>(tree: &T, node: T::Node) -> InlineNode<T::Node> {
    let Some(first) = tree.first_child(node) else {
        return InlineNode::Opaque;
    };

    if let Some(NodeShape::Element(first_el)) = tree.shape(first) {
        if first_el.has_class(markers::POPOVER_WRAPPER) {
            return InlineNode::PopoverWrapper { child: first };
        }
        if first_el.has_class(markers::PAGE_REF_LINK) {
            return unwrap_path(tree, node, &[0, 0])
                .map_or(InlineNode::Opaque, |child| InlineNode::PageRefLink { child });
        }
        if first_el.has_class(markers::PAGE_REF_BRACKETS) {
            return unwrap_bracketed(tree, node)
                .map_or(InlineNode::Opaque, |child| InlineNode::PageRefBracketed { child });
        }
    }

    if parent_is_quote(tree, node) {
        return InlineNode::QuoteWrapped { child: first };
    }
    InlineNode::Opaque
}

fn parent_is_quote<T: TextContainer>(tree: &T, node: T::Node) -> bool {
    tree.parent(node)
        .and_then(|parent| match tree.shape(parent) {
            Some(NodeShape::Element(el)) => Some(el.has_class(markers::BLOCK_QUOTE)),
            _ => None,
        })
        .unwrap_or(false)
}

/// Follows child indices from `node`, e.g. `[0, 0]` is the first grandchild.
pub fn unwrap_path<T: TextContainer>(tree: &T, node: T::Node, path: &[usize]) -> Option<T::Node> {
    path.iter()
        .try_fold(node, |current, &index| tree.child_at(current, index))
}

pub fn unwrap_single_child<T: TextContainer>(tree: &T, node: T::Node) -> Option<T::Node> {
    tree.first_child(node)
}

/// Popover wrapper → popover target → reference element → content.
pub fn unwrap_popover<T: TextContainer>(tree: &T, node: T::Node) -> Option<T::Node> {
    unwrap_path(tree, node, &[0, 0, 0])
}

/// `[[`, link, `]]`: the link text lives under the middle child.
pub fn unwrap_bracketed<T: TextContainer>(tree: &T, node: T::Node) -> Option<T::Node> {
    unwrap_path(tree, node, &[1, 0])
}

pub fn unwrap_group<T: TextContainer>(tree: &T, node: T::Node) -> Vec<T::Node> {
    tree.children(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Markup, NodeId, RenderTree};
    use pretty_assertions::assert_eq;

    fn build(markup: Markup) -> (RenderTree, NodeId) {
        let mut tree = RenderTree::new();
        let root = tree.root();
        let node = tree.insert(root, &markup);
        (tree, node)
    }

    fn text_of(tree: &RenderTree, node: NodeId) -> String {
        tree.text_content(node)
    }

    #[test]
    fn test_text_node_is_plain_text() {
        let mut tree = RenderTree::new();
        let root = tree.root();
        let node = tree.insert(root, &Markup::text("hello"));
        assert_eq!(
            classify(&tree, node),
            InlineNode::PlainText {
                node,
                content: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_styled_spans() {
        for (class, kind) in [
            ("rm-bold", SpanKind::Bold),
            ("rm-highlight", SpanKind::Highlight),
            ("rm-italics", SpanKind::Italic),
            ("rm-page-ref rm-page-ref--tag", SpanKind::Tag),
        ] {
            let (tree, node) = build(Markup::span(class, [Markup::text("x")]));
            match classify(&tree, node) {
                InlineNode::StyledSpan { kind: found, child } => {
                    assert_eq!(found, kind);
                    assert_eq!(text_of(&tree, child), "x");
                }
                other => panic!("expected styled span for {class}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_styled_span_is_opaque() {
        let (tree, node) = build(Markup::span("rm-bold", []));
        assert_eq!(classify(&tree, node), InlineNode::Opaque);
    }

    #[test]
    fn test_popover_with_text_is_alias() {
        let (tree, node) = build(Markup::span(
            "bp3-popover-wrapper",
            [Markup::span(
                "bp3-popover-target",
                [Markup::el("a", "rm-alias", [Markup::text("alias text")])],
            )],
        ));
        let InlineNode::PopoverWrapper { child } = classify(&tree, node) else {
            panic!("expected popover wrapper");
        };
        assert!(tree.is_text(child));
        assert_eq!(text_of(&tree, child), "alias text");
    }

    #[test]
    fn test_popover_with_elements_is_block_ref_group() {
        let (tree, node) = build(Markup::span(
            "bp3-popover-wrapper",
            [Markup::span(
                "bp3-popover-target",
                [Markup::span(
                    "rm-block-ref",
                    [Markup::span(
                        "",
                        [
                            Markup::text("ref "),
                            Markup::span("rm-bold", [Markup::text("bold")]),
                        ],
                    )],
                )],
            )],
        ));
        let InlineNode::BlockRefGroup { children } = classify(&tree, node) else {
            panic!("expected block ref group");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(text_of(&tree, children[0]), "ref ");
    }

    #[test]
    fn test_shallow_popover_is_opaque() {
        let (tree, node) = build(Markup::span("bp3-popover-wrapper", [Markup::text("x")]));
        assert_eq!(classify(&tree, node), InlineNode::Opaque);
    }

    #[test]
    fn test_nested_block_ref_descends_two_levels() {
        let (tree, node) = build(Markup::el(
            "div",
            "rm-block-ref dont-focus-block ",
            [Markup::span("", [Markup::text("nested")])],
        ));
        let InlineNode::PopoverWrapper { child } = classify(&tree, node) else {
            panic!("expected popover wrapper");
        };
        assert_eq!(text_of(&tree, child), "nested");
    }

    #[test]
    fn test_alias_one_level_down() {
        let (tree, node) = build(Markup::span(
            "",
            [Markup::span("bp3-popover-wrapper", [])],
        ));
        let InlineNode::PopoverWrapper { child } = classify(&tree, node) else {
            panic!("expected popover wrapper");
        };
        assert_eq!(tree.first_child(node), Some(child));
    }

    #[test]
    fn test_page_ref_link() {
        let (tree, node) = build(Markup::span(
            "",
            [Markup::span(
                "rm-page-ref rm-page-ref--link",
                [Markup::text("Page")],
            )],
        ));
        let InlineNode::PageRefLink { child } = classify(&tree, node) else {
            panic!("expected page ref link");
        };
        assert_eq!(text_of(&tree, child), "Page");
    }

    #[test]
    fn test_bracketed_page_ref_targets_middle_child() {
        let (tree, node) = build(Markup::span(
            "",
            [
                Markup::span("rm-page-ref__brackets", [Markup::text("[[")]),
                Markup::span("rm-page-ref rm-page-ref--link", [Markup::text("Page")]),
                Markup::span("rm-page-ref__brackets", [Markup::text("]]")]),
            ],
        ));
        let InlineNode::PageRefBracketed { child } = classify(&tree, node) else {
            panic!("expected bracketed page ref");
        };
        assert_eq!(text_of(&tree, child), "Page");
    }

    #[test]
    fn test_quote_child_only_inside_block_quote() {
        let (tree, quote) = build(Markup::el(
            "blockquote",
            "rm-bq",
            [Markup::span("", [Markup::text("quoted")])],
        ));
        let inner = tree.first_child(quote).unwrap();
        let InlineNode::QuoteWrapped { child } = classify(&tree, inner) else {
            panic!("expected quote wrapped");
        };
        assert_eq!(text_of(&tree, child), "quoted");

        let (tree, plain) = build(Markup::span("", [Markup::text("not quoted")]));
        assert_eq!(classify(&tree, plain), InlineNode::Opaque);
    }

    #[test]
    fn test_unknown_shapes_are_opaque() {
        let (tree, childless) = build(Markup::el("img", "rm-inline-img", []));
        assert_eq!(classify(&tree, childless), InlineNode::Opaque);

        let (tree, marker) = build(Markup::el("bionic", "", [Markup::text("done")]));
        assert_eq!(classify(&tree, marker), InlineNode::Opaque);
    }

    #[test]
    fn test_unwrap_path_stops_on_missing_child() {
        let (tree, node) = build(Markup::span("", [Markup::span("", [])]));
        assert_eq!(unwrap_path(&tree, node, &[0, 0]), None);
        assert!(unwrap_path(&tree, node, &[0]).is_some());
        assert_eq!(unwrap_path(&tree, node, &[]), Some(node));
    }
}
