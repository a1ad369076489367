//! In-memory HTML document tree for html-toc.
//!
//! [`Dom::parse`] builds an arena tree from markup without ever failing, and
//! [`Dom::to_html`] writes it back. Nodes that were not touched keep their
//! exact source text, so a parse/serialise round trip is lossless and only the
//! elements the TOC builder mutates change on disk.

mod document;
mod dom;
mod node;
mod parser;
mod serialize;

pub use document::DocumentTree;
pub use dom::Dom;
pub use node::{Attribute, Element, NodeId, NodeKind};
