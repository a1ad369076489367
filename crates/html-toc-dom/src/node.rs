/// Index of a node inside a [`Dom`](crate::Dom) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Debug)]
pub enum NodeKind {
    Document,
    Element(Element),
    /// Character data exactly as it appeared in the source (still escaped).
    Text(String),
    /// Full comment markup including the `<!--` and `-->` delimiters.
    Comment(String),
    /// Markup kept verbatim: doctype, processing instructions, stray end tags.
    Raw(String),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Decoded value; `None` for bare attributes such as `hidden`.
    pub value: Option<String>,
}

/// How an element's end tag is written back out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EndTag {
    /// No end tag: void element, implied close, or end of input.
    Implied,
    /// The end tag text as found in the source.
    Source(String),
    /// Created programmatically; serialised as `</name>`.
    Generated,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    /// Start tag as written in the source. Dropped once an attribute changes
    /// in a way that cannot be spliced into it.
    pub(crate) source_start_tag: Option<String>,
    pub(crate) end_tag: EndTag,
    pub(crate) malformed: bool,
}

impl Element {
    pub(crate) fn generated(name: &str) -> Self {
        Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            source_start_tag: None,
            end_tag: EndTag::Generated,
            malformed: false,
        }
    }

    /// Lower-cased tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_deref().unwrap_or(""))
    }

    /// True for heading elements whose end tag named a different heading
    /// level, e.g. `<h2>Text</h3>`.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Heading level for `h1`..`h6`.
    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.name)
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(existing) = self.attributes.iter_mut().find(|attr| attr.name == name) {
            if existing.value.as_deref() == Some(value) {
                return;
            }
            existing.value = Some(value.to_owned());
            self.source_start_tag = None;
            return;
        }

        if let Some(source) = self.source_start_tag.as_mut() {
            // Tag names are ASCII, so the name length is also its byte length.
            let insert_at = 1 + self.name.len();
            let fragment = format!(
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            );
            source.insert_str(insert_at, &fragment);
        }
        self.attributes.insert(
            0,
            Attribute {
                name,
                value: Some(value.to_owned()),
            },
        );
    }
}

pub(crate) fn heading_level(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    match bytes {
        [b'h' | b'H', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}
