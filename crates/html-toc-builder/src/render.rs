use html_toc_config::ListTag;
use html_toc_dom::DocumentTree;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::tree::{TocEntry, TocTree};

/// Characters escaped inside the fragment of a generated `href`.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// `href` value pointing at `anchor` within the same document.
pub fn fragment_href(anchor: &str) -> String {
    format!("#{}", utf8_percent_encode(anchor, FRAGMENT))
}

/// Replace the children of `container` with nested lists of links.
pub fn render_into<D: DocumentTree>(
    document: &mut D,
    container: D::Node,
    tree: &TocTree,
    list_tag: ListTag,
) {
    document.clear_children(container);
    if tree.is_empty() {
        return;
    }
    let list = render_list(document, &tree.entries, list_tag);
    document.append_child(container, list);
}

fn render_list<D: DocumentTree>(
    document: &mut D,
    entries: &[TocEntry],
    list_tag: ListTag,
) -> D::Node {
    let list = document.create_element(list_tag.as_str());
    for entry in entries {
        let item = document.create_element("li");

        let link = document.create_element("a");
        document.set_attribute(link, "href", &fragment_href(&entry.anchor));
        let label = document.create_text(&entry.label);
        document.append_child(link, label);
        document.append_child(item, link);

        if !entry.children.is_empty() {
            let nested = render_list(document, &entry.children, list_tag);
            document.append_child(item, nested);
        }
        document.append_child(list, item);
    }
    list
}
