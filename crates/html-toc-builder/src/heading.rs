use html_toc_dom::DocumentTree;
use log::debug;

/// A heading as seen by the TOC algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingNode {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Text content with runs of whitespace collapsed to single spaces.
    pub text: String,
    /// Identifier attribute; filled in by the builder when missing.
    pub id: Option<String>,
}

impl HeadingNode {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        HeadingNode {
            level,
            text: text.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A heading paired with the document node it was read from.
#[derive(Clone, Debug)]
pub struct LocatedHeading<N> {
    pub node: N,
    pub heading: HeadingNode,
}

/// Level of an `h1`..`h6` tag name.
pub fn heading_level(tag_name: &str) -> Option<u8> {
    match tag_name.as_bytes() {
        [b'h' | b'H', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Collect headings in document order.
///
/// Headings whose markup was malformed are skipped, as are headings that sit
/// inside `container`, so a previously rendered TOC never feeds back into the
/// next one.
pub fn scan_headings<D: DocumentTree>(
    document: &D,
    container: Option<D::Node>,
) -> Vec<LocatedHeading<D::Node>> {
    let mut headings = Vec::new();
    for node in document.elements() {
        let Some(level) = document.tag_name(node).and_then(heading_level) else {
            continue;
        };

        if document.is_malformed(node) {
            debug!("skipping malformed h{level} heading {node:?}");
            continue;
        }
        if container.is_some_and(|container| document.contains(container, node)) {
            continue;
        }

        let text = normalize_text(&document.text_content(node));
        let id = document
            .attribute(node, "id")
            .filter(|id| !id.is_empty())
            .map(str::to_owned);

        headings.push(LocatedHeading {
            node,
            heading: HeadingNode { level, text, id },
        });
    }
    headings
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
