//! Lenient HTML tree builder.
//!
//! The parser never fails: anything it cannot interpret is kept as text or as
//! a verbatim [`NodeKind::Raw`] node, so serialising an untouched tree gives
//! back the input byte for byte.

use crate::dom::Dom;
use crate::node::{heading_level, Attribute, Element, EndTag, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Start tags that implicitly close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

impl Dom {
    /// Parse `input` into a document tree.
    pub fn parse(input: &str) -> Dom {
        TreeBuilder::new(input).run()
    }
}

struct TreeBuilder<'a> {
    input: &'a str,
    pos: usize,
    dom: Dom,
    open: Vec<NodeId>,
}

struct StartTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
    len: usize,
}

struct EndTagToken {
    name: String,
    len: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a str) -> Self {
        TreeBuilder {
            input,
            pos: 0,
            dom: Dom::new(),
            open: Vec::new(),
        }
    }

    fn run(mut self) -> Dom {
        let input = self.input;
        while self.pos < input.len() {
            let rest = &input[self.pos..];

            if rest.starts_with("<!--") {
                let len = rest[4..]
                    .find("-->")
                    .map(|idx| idx + 4 + 3)
                    .unwrap_or(rest.len());
                self.append(NodeKind::Comment(rest[..len].to_owned()));
                self.pos += len;
            } else if rest.starts_with("</") {
                match parse_end_tag(rest) {
                    Some(token) => {
                        let raw = &rest[..token.len];
                        self.handle_end_tag(&token.name, raw);
                        self.pos += token.len;
                    }
                    None => self.consume_text(1),
                }
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                let len = rest.find('>').map(|idx| idx + 1).unwrap_or(rest.len());
                self.append(NodeKind::Raw(rest[..len].to_owned()));
                self.pos += len;
            } else if rest.starts_with('<') {
                match parse_start_tag(rest) {
                    Some(tag) => {
                        let raw = rest[..tag.len].to_owned();
                        self.pos += tag.len;
                        self.handle_start_tag(tag, raw);
                    }
                    None => self.consume_text(1),
                }
            } else {
                let len = rest.find('<').unwrap_or(rest.len());
                self.consume_text(len);
            }
        }

        self.dom
    }

    fn current_parent(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.dom.root())
    }

    fn append(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.current_parent();
        self.dom.push_node(Some(parent), kind)
    }

    /// Append `len` bytes of input as text, merging with a preceding text node.
    fn consume_text(&mut self, len: usize) {
        let input = self.input;
        let text = &input[self.pos..self.pos + len];
        self.pos += len;

        let parent = self.current_parent();
        if let Some(&last) = self.dom.children(parent).last() {
            if let NodeKind::Text(existing) = self.dom.kind_mut(last) {
                existing.push_str(text);
                return;
            }
        }
        self.dom.push_node(Some(parent), NodeKind::Text(text.to_owned()));
    }

    fn open_name(&self, node: NodeId) -> &str {
        self.dom.tag_name(node).unwrap_or_default()
    }

    fn handle_start_tag(&mut self, tag: StartTag, raw: String) {
        self.close_implied_by(&tag.name);

        let is_void = VOID_ELEMENTS.contains(&tag.name.as_str());
        let element = Element {
            name: tag.name.clone(),
            attributes: tag.attributes,
            source_start_tag: Some(raw),
            end_tag: EndTag::Implied,
            malformed: false,
        };
        let node = self.append(NodeKind::Element(element));

        if is_void || tag.self_closing {
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            self.open.push(node);
            let input = self.input;
            let rest = &input[self.pos..];
            let len = find_raw_text_end(rest, &tag.name).unwrap_or(rest.len());
            if len > 0 {
                self.consume_text(len);
            }
            return;
        }

        self.open.push(node);
    }

    fn close_implied_by(&mut self, name: &str) {
        match name {
            "li" => self.close_within_list("li", &["ul", "ol"]),
            "dt" | "dd" => {
                self.close_within_list("dt", &["dl"]);
                self.close_within_list("dd", &["dl"]);
            }
            _ => {}
        }

        if heading_level(name).is_some() {
            self.close_unterminated_heading();
        }

        if CLOSES_PARAGRAPH.contains(&name) {
            if let Some(&top) = self.open.last() {
                if self.open_name(top) == "p" {
                    self.open.pop();
                }
            }
        }
    }

    /// A heading start tag ends any heading still open; the unterminated one
    /// has no matching pair and is flagged malformed.
    fn close_unterminated_heading(&mut self) {
        let nearest_heading = self
            .open
            .iter()
            .rposition(|node| heading_level(self.open_name(*node)).is_some());
        if let Some(idx) = nearest_heading {
            if let Some(element) = self.dom.element_mut(self.open[idx]) {
                element.malformed = true;
            }
            self.open.truncate(idx);
        }
    }

    /// Close an open `target` element unless a list `boundary` sits above it.
    fn close_within_list(&mut self, target: &str, boundary: &[&str]) {
        let position = self.open.iter().rposition(|node| {
            let name = self.open_name(*node);
            name == target || boundary.contains(&name)
        });
        if let Some(idx) = position {
            if self.open_name(self.open[idx]) == target {
                self.open.truncate(idx);
            }
        }
    }

    fn handle_end_tag(&mut self, name: &str, raw: &str) {
        if heading_level(name).is_some() {
            let nearest_heading = self
                .open
                .iter()
                .rposition(|node| heading_level(self.open_name(*node)).is_some());
            if let Some(idx) = nearest_heading {
                let node = self.open[idx];
                if self.open_name(node) != name {
                    if let Some(element) = self.dom.element_mut(node) {
                        element.malformed = true;
                        element.end_tag = EndTag::Source(raw.to_owned());
                    }
                    self.open.truncate(idx);
                    return;
                }
            }
        }

        let position = self
            .open
            .iter()
            .rposition(|node| self.open_name(*node) == name);

        match position {
            Some(idx) => {
                let node = self.open[idx];
                if let Some(element) = self.dom.element_mut(node) {
                    element.end_tag = EndTag::Source(raw.to_owned());
                }
                self.open.truncate(idx);
            }
            None => {
                self.append(NodeKind::Raw(raw.to_owned()));
            }
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == ':' || ch == '_'
}

fn parse_end_tag(rest: &str) -> Option<EndTagToken> {
    let after = &rest[2..];
    let first = after.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    let name_len = after
        .find(|ch: char| !is_name_char(ch))
        .unwrap_or(after.len());
    let name = after[..name_len].to_ascii_lowercase();
    let close = after[name_len..].find('>')?;
    Some(EndTagToken {
        name,
        len: 2 + name_len + close + 1,
    })
}

fn parse_start_tag(rest: &str) -> Option<StartTag> {
    let after = &rest[1..];
    let first = after.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let name_len = after
        .find(|ch: char| !is_name_char(ch))
        .unwrap_or(after.len());
    let name = after[..name_len].to_ascii_lowercase();
    let mut cursor = 1 + name_len;
    let mut attributes = Vec::new();

    loop {
        cursor += leading_whitespace(&rest[cursor..]);
        let remaining = &rest[cursor..];
        if remaining.is_empty() {
            return None;
        }
        if remaining.starts_with("/>") {
            return Some(StartTag {
                name,
                attributes,
                self_closing: true,
                len: cursor + 2,
            });
        }
        if remaining.starts_with('>') {
            return Some(StartTag {
                name,
                attributes,
                self_closing: false,
                len: cursor + 1,
            });
        }

        let attr_len = remaining
            .find(|ch: char| ch.is_whitespace() || ch == '/' || ch == '>' || ch == '=')
            .unwrap_or(remaining.len());
        if attr_len == 0 {
            // Stray '/' or '=' inside the tag.
            cursor += 1;
            continue;
        }
        let attr_name = remaining[..attr_len].to_ascii_lowercase();
        cursor += attr_len;

        let ws = leading_whitespace(&rest[cursor..]);
        if !rest[cursor + ws..].starts_with('=') {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        cursor += ws + 1;
        cursor += leading_whitespace(&rest[cursor..]);

        let value_src = &rest[cursor..];
        let quote = value_src.chars().next()?;
        let (raw_value, consumed) = if quote == '"' || quote == '\'' {
            let end = value_src[1..].find(quote)?;
            (&value_src[1..1 + end], end + 2)
        } else {
            let end = value_src
                .find(|ch: char| ch.is_whitespace() || ch == '>')
                .unwrap_or(value_src.len());
            (&value_src[..end], end)
        };
        cursor += consumed;
        attributes.push(Attribute {
            name: attr_name,
            value: Some(html_escape::decode_html_entities(raw_value).into_owned()),
        });
    }
}

fn leading_whitespace(text: &str) -> usize {
    text.find(|ch: char| !ch.is_whitespace())
        .unwrap_or(text.len())
}

/// Byte offset of the `</name` that ends a raw text element.
fn find_raw_text_end(rest: &str, name: &str) -> Option<usize> {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    let mut from = 0;
    while let Some(idx) = lower[from..].find(&needle) {
        let at = from + idx;
        let after = &lower[at + needle.len()..];
        if after.is_empty() || after.starts_with(|ch: char| ch.is_whitespace() || ch == '>') {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}
