use crate::node::{Element, Node, NodeId, NodeKind};

/// Arena-backed HTML document. Nodes are never freed; detached nodes simply
/// stop being reachable from the root.
#[derive(Clone, Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Empty document containing only the root node.
    pub fn new() -> Self {
        Dom {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn kind_mut(&mut self, node: NodeId) -> &mut NodeKind {
        &mut self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Every node below `node` in document (pre-)order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            kind,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    /// Create a detached element; attach it with [`Dom::append_child`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_node(None, NodeKind::Element(Element::generated(tag_name)))
    }

    /// Create a detached text node holding `text`, escaped for markup.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(None, NodeKind::Text(html_escape::encode_text(text).into_owned()))
    }

    /// Move `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(previous) = self.nodes[child.0].parent.take() {
            self.nodes[previous.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::name)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|element| element.attribute(name))
    }

    /// Set an attribute on an element; ignored for other node kinds.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.set_attribute(name, value);
        }
    }

    /// Decoded character data below `node`; comments are skipped.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let NodeKind::Text(raw) = self.kind(node) {
            out.push_str(&html_escape::decode_html_entities(raw));
            return out;
        }
        for id in self.descendants(node) {
            if let NodeKind::Text(raw) = self.kind(id) {
                out.push_str(&html_escape::decode_html_entities(raw));
            }
        }
        out
    }

    /// All elements reachable from the root, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.element(*id).is_some())
            .collect()
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|node| self.attribute(*node, "id") == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_child_moves_nodes_between_parents() {
        let mut dom = Dom::new();
        let first = dom.create_element("div");
        let second = dom.create_element("div");
        let item = dom.create_element("span");
        dom.append_child(dom.root(), first);
        dom.append_child(dom.root(), second);
        dom.append_child(first, item);
        dom.append_child(second, item);

        assert!(dom.children(first).is_empty());
        assert_eq!(dom.children(second), &[item]);
        assert_eq!(dom.parent(item), Some(second));
        assert!(dom.is_descendant_of(item, dom.root()));
    }

    #[test]
    fn created_text_is_escaped_and_decodes_back() {
        let mut dom = Dom::new();
        let text = dom.create_text("Q&A <draft>");
        assert!(matches!(dom.kind(text), NodeKind::Text(raw) if raw == "Q&amp;A &lt;draft&gt;"));
        assert_eq!(dom.text_content(text), "Q&A <draft>");
    }

    #[test]
    fn cleared_children_are_unreachable() {
        let mut dom = Dom::new();
        let list = dom.create_element("ul");
        let item = dom.create_element("li");
        dom.append_child(dom.root(), list);
        dom.append_child(list, item);
        dom.clear_children(list);

        assert_eq!(dom.elements(), vec![list]);
        assert_eq!(dom.parent(item), None);
    }
}
