use std::fmt::Debug;

/// What a node looks like from the outside: either text, or an element with
/// a tag and a class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
}

/// Borrowed view of an element's structural markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef<'a> {
    pub tag: &'a str,
    pub class: &'a str,
}

impl ElementRef<'_> {
    /// True when `name` is one of the whitespace-separated class tokens.
    pub fn has_class(&self, name: &str) -> bool {
        self.class.split_ascii_whitespace().any(|token| token == name)
    }
}

/// The live render tree the rewriter reads and mutates in place.
///
/// Implementations wrap whatever the host renders into (a browser DOM, a
/// terminal widget tree, the in-memory [`RenderTree`](super::RenderTree)).
/// Handles may outlive the node they point at; every read on a stale handle
/// answers "nothing there" rather than failing.
pub trait TextContainer {
    type Node: Copy + Eq + Debug;

    /// Shape of `node`, or `None` if the handle no longer resolves.
    fn shape(&self, node: Self::Node) -> Option<NodeShape<'_>>;

    /// Children of `node` in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` is still reachable from the document root.
    fn is_attached(&self, node: Self::Node) -> bool;

    fn create_text(&mut self, text: &str) -> Self::Node;

    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Puts `new` where `old` was. Returns false if `old` has no parent.
    fn replace_child(&mut self, old: Self::Node, new: Self::Node) -> bool;

    fn child_at(&self, node: Self::Node, index: usize) -> Option<Self::Node> {
        self.children(node).get(index).copied()
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        self.child_at(node, 0)
    }

    fn is_text(&self, node: Self::Node) -> bool {
        matches!(self.shape(node), Some(NodeShape::Text(_)))
    }

    /// Concatenated text of `node` and all its descendants.
    fn text_content(&self, node: Self::Node) -> String {
        let mut out = String::new();
        collect_text(self, node, &mut out);
        out
    }

    /// Descendants of `root` (not `root` itself) whose tag is `tag`, in
    /// document order. Matches are not searched further.
    fn find_by_tag(&self, root: Self::Node, tag: &str) -> Vec<Self::Node> {
        let mut found = Vec::new();
        for child in self.children(root) {
            collect_by_tag(self, child, tag, &mut found);
        }
        found
    }
}

fn collect_text<T: TextContainer + ?Sized>(tree: &T, node: T::Node, out: &mut String) {
    match tree.shape(node) {
        Some(NodeShape::Text(text)) => out.push_str(text),
        Some(NodeShape::Element(_)) => {
            for child in tree.children(node) {
                collect_text(tree, child, out);
            }
        }
        None => {}
    }
}

fn collect_by_tag<T: TextContainer + ?Sized>(
    tree: &T,
    node: T::Node,
    tag: &str,
    found: &mut Vec<T::Node>,
) {
    if let Some(NodeShape::Element(el)) = tree.shape(node) {
        if el.tag == tag {
            found.push(node);
            return;
        }
        for child in tree.children(node) {
            collect_by_tag(tree, child, tag, found);
        }
    }
}
