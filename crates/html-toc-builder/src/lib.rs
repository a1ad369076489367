//! Table-of-contents builder for HTML documents.
//!
//! The builder scans a [`DocumentTree`](html_toc_dom::DocumentTree) for `h1`..`h6`
//! elements, nests them by level into a [`TocTree`], gives headings without an
//! `id` one derived from their text, and renders the tree as nested lists of
//! `#anchor` links inside the container element.
//!
//! ```
//! use html_toc_builder::{RunOutcome, TocBuilder};
//! use html_toc_config::TocSettings;
//! use html_toc_dom::Dom;
//!
//! let mut dom = Dom::parse(r#"<div id="toc"></div><h2>Intro</h2><h3>Background</h3>"#);
//! let mut builder = TocBuilder::new(TocSettings::default());
//! assert!(matches!(builder.run(&mut dom), RunOutcome::Applied(_)));
//! assert_eq!(
//!     dom.to_html(),
//!     concat!(
//!         r##"<div id="toc"><ul><li><a href="#Intro">Intro</a>"##,
//!         r##"<ul><li><a href="#Background">Background</a></li></ul></li></ul></div>"##,
//!         r#"<h2 id="Intro">Intro</h2><h3 id="Background">Background</h3>"#,
//!     )
//! );
//! ```

mod anchor;
mod builder;
mod heading;
mod ready;
mod render;
mod tree;

pub use anchor::{derive_anchor, AnchorRegistry, FALLBACK_ANCHOR};
pub use builder::{RunOutcome, SkipReason, TocBuilder};
pub use heading::{heading_level, scan_headings, HeadingNode, LocatedHeading};
pub use ready::{DocumentReady, Loaded};
pub use render::{fragment_href, render_into};
pub use tree::{build_tree, qualifies, TocEntry, TocTree};
