use crate::dom::Dom;
use crate::node::{Element, EndTag, NodeId, NodeKind};

impl Dom {
    /// Serialise the whole document back to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Serialise the children of `node`, the equivalent of `innerHTML`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            NodeKind::Document => {
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text(raw) | NodeKind::Comment(raw) | NodeKind::Raw(raw) => {
                out.push_str(raw);
            }
            NodeKind::Element(element) => {
                write_start_tag(element, out);
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
                match &element.end_tag {
                    EndTag::Implied => {}
                    EndTag::Source(raw) => out.push_str(raw),
                    EndTag::Generated => {
                        out.push_str("</");
                        out.push_str(&element.name);
                        out.push('>');
                    }
                }
            }
        }
    }
}

fn write_start_tag(element: &Element, out: &mut String) {
    if let Some(source) = &element.source_start_tag {
        out.push_str(source);
        return;
    }

    out.push('<');
    out.push_str(&element.name);
    for attribute in &element.attributes {
        out.push(' ');
        out.push_str(&attribute.name);
        if let Some(value) = &attribute.value {
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
    }
    out.push('>');
}
