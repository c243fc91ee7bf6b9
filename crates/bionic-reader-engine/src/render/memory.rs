use super::tree::{ElementRef, NodeShape, TextContainer};

/// Handle into a [`RenderTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Text(String),
    Element { tag: String, class: String },
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Declarative description of a subtree, used to build a [`RenderTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Text(String),
    Element {
        tag: String,
        class: String,
        children: Vec<Markup>,
    },
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    pub fn el(
        tag: impl Into<String>,
        class: impl Into<String>,
        children: impl IntoIterator<Item = Markup>,
    ) -> Self {
        Markup::Element {
            tag: tag.into(),
            class: class.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn span(class: impl Into<String>, children: impl IntoIterator<Item = Markup>) -> Self {
        Self::el("span", class, children)
    }
}

/// Arena-backed render tree.
///
/// Nodes are never freed; replaced or detached nodes simply stop being
/// reachable from the root, which is what [`TextContainer::is_attached`]
/// reports.
#[derive(Debug, Clone)]
pub struct RenderTree {
    nodes: Vec<Slot>,
    root: NodeId,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree {
    pub fn new() -> Self {
        let root = Slot {
            data: NodeData::Element {
                tag: "div".to_string(),
                class: "roam-app".to_string(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Builds `markup` and appends it under `parent`.
    pub fn insert(&mut self, parent: NodeId, markup: &Markup) -> NodeId {
        let node = self.build(markup);
        self.append_child(parent, node);
        node
    }

    fn build(&mut self, markup: &Markup) -> NodeId {
        match markup {
            Markup::Text(text) => self.create_text(text),
            Markup::Element {
                tag,
                class,
                children,
            } => {
                let node = self.alloc(NodeData::Element {
                    tag: tag.clone(),
                    class: class.clone(),
                });
                for child in children {
                    let child = self.build(child);
                    self.append_child(node, child);
                }
                node
            }
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Slot {
            data,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Unhooks `node` from its parent, as when the host re-renders a block.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get(node.0).and_then(|slot| slot.parent) {
            self.nodes[parent.0].children.retain(|&child| child != node);
            self.nodes[node.0].parent = None;
        }
    }

    /// Finds descendants of `root` carrying class `name`, in document order.
    pub fn find_by_class(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(NodeShape::Element(el)) = self.shape(node)
                && el.has_class(name)
            {
                found.push(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        found
    }

    /// Serializes `node` and its subtree as HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serializes the children of `node` as HTML.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(slot) = self.nodes.get(node.0) else {
            return;
        };
        match &slot.data {
            NodeData::Text(text) => out.push_str(&html_escape::encode_text(text)),
            NodeData::Element { tag, class } => {
                out.push('<');
                out.push_str(tag);
                if !class.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(class));
                    out.push('"');
                }
                out.push('>');
                for &child in &slot.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

impl TextContainer for RenderTree {
    type Node = NodeId;

    fn shape(&self, node: NodeId) -> Option<NodeShape<'_>> {
        self.nodes.get(node.0).map(|slot| match &slot.data {
            NodeData::Text(text) => NodeShape::Text(text),
            NodeData::Element { tag, class } => NodeShape::Element(ElementRef { tag, class }),
        })
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|slot| slot.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|slot| slot.parent)
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element {
            tag: tag.to_string(),
            class: String::new(),
        })
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(old) else {
            return false;
        };
        if new.0 >= self.nodes.len() {
            return false;
        }
        self.detach(new);
        let siblings = &mut self.nodes[parent.0].children;
        let Some(position) = siblings.iter().position(|&child| child == old) else {
            return false;
        };
        siblings[position] = new;
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
        true
    }
}
