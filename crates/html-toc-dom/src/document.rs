use std::fmt::Debug;
use std::hash::Hash;

use crate::dom::Dom;
use crate::node::NodeId;

/// Minimal document surface consumed by the TOC builder: element traversal,
/// attribute access, and just enough mutation to write a list of links.
pub trait DocumentTree {
    type Node: Copy + Eq + Hash + Debug;

    /// Every element in document order.
    fn elements(&self) -> Vec<Self::Node>;

    /// Lower-cased tag name, `None` for non-element nodes.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn text_content(&self, node: Self::Node) -> String;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// True when the source markup for `node` was broken in a way that makes
    /// it unsafe to treat as a heading.
    fn is_malformed(&self, _node: Self::Node) -> bool {
        false
    }

    /// True when `node` sits somewhere below `ancestor`.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    fn create_element(&mut self, tag_name: &str) -> Self::Node;

    fn create_text(&mut self, text: &str) -> Self::Node;

    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    fn clear_children(&mut self, node: Self::Node);
}

impl DocumentTree for Dom {
    type Node = NodeId;

    fn elements(&self) -> Vec<NodeId> {
        Dom::elements(self)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        Dom::tag_name(self, node)
    }

    fn text_content(&self, node: NodeId) -> String {
        Dom::text_content(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        Dom::attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        Dom::set_attribute(self, node, name, value)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        Dom::element_by_id(self, id)
    }

    fn is_malformed(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.is_malformed())
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.is_descendant_of(node, ancestor)
    }

    fn create_element(&mut self, tag_name: &str) -> NodeId {
        Dom::create_element(self, tag_name)
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        Dom::create_text(self, text)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Dom::append_child(self, parent, child)
    }

    fn clear_children(&mut self, node: NodeId) {
        Dom::clear_children(self, node)
    }
}
