use crate::layout::{AccessibilityNode, CellRect, LayoutElement, ScreenRect};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct UiNode {
    pub name: String,
    pub bounds: Option<ScreenRect>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// In-memory accessibility tree, stored as an arena.
#[derive(Debug, Clone, Default)]
pub struct UiTree {
    nodes: Vec<UiNode>,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, bounds: Option<ScreenRect>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(UiNode {
            name: name.to_string(),
            bounds,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` to `parent`'s children and records the back link.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    pub fn node(&self, id: NodeId) -> &UiNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn handle(&self, id: NodeId) -> TreeNode<'_> {
        TreeNode { tree: self, id }
    }
}

/// Borrowed handle into a [`UiTree`]; nothing to release.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    tree: &'a UiTree,
    id: NodeId,
}

impl TreeNode<'_> {
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl AccessibilityNode for TreeNode<'_> {
    fn child_count(&self) -> usize {
        self.tree.node(self.id).children.len()
    }

    fn bounds_in_screen(&self) -> Option<ScreenRect> {
        self.tree.node(self.id).bounds
    }

    fn parent(&self) -> Option<Self> {
        self.tree.node(self.id).parent.map(|id| TreeNode {
            tree: self.tree,
            id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScreenElement {
    pub id: String,
    pub node: Option<NodeId>,
    pub text: Vec<String>,
    pub location: Option<CellRect>,
}

impl ScreenElement {
    pub fn new(id: &str, node: Option<NodeId>, text: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            node,
            text: text.iter().map(|line| line.to_string()).collect(),
            location: None,
        }
    }
}

/// A UI tree together with the elements to place on the display.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub tree: UiTree,
    pub elements: Vec<ScreenElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs every element with the tree so it can be laid out.
    pub fn bind(&mut self) -> Vec<SceneElement<'_>> {
        let tree = &self.tree;
        self.elements
            .iter_mut()
            .map(|element| SceneElement { tree, element })
            .collect()
    }
}

pub struct SceneElement<'a> {
    tree: &'a UiTree,
    element: &'a mut ScreenElement,
}

impl<'a> LayoutElement for SceneElement<'a> {
    type Node = TreeNode<'a>;

    fn text_lines(&self) -> &[String] {
        &self.element.text
    }

    fn accessibility_node(&self) -> Option<Self::Node> {
        self.element.node.map(|id| self.tree.handle(id))
    }

    fn set_location(&mut self, location: Option<CellRect>) {
        self.element.location = location;
    }
}
