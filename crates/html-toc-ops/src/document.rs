use std::fs;
use std::path::PathBuf;

use html_toc_builder::{Loaded, RunOutcome, TocBuilder, TocTree};
use html_toc_dom::Dom;

use crate::paths::absolutize;
use crate::{OperationError, Operations};

/// Where a single document comes from.
#[derive(Clone, Debug)]
pub enum DocumentSource {
    /// Read from disk; relative paths resolve against the working directory.
    Path(PathBuf),
    /// Markup already in memory, e.g. read from stdin.
    Inline(String),
}

#[derive(Clone, Debug)]
pub struct RenderOutcome {
    pub html: String,
    pub result: RunOutcome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutlineFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Clone, Debug)]
pub struct OutlineOutcome {
    pub tree: TocTree,
    pub rendered: String,
}

impl Operations {
    /// Run the builder over one document and return the rewritten markup.
    pub fn render(&self, source: DocumentSource) -> Result<RenderOutcome, OperationError> {
        let contents = self.read_source(source)?;
        let mut host = Loaded::new(Dom::parse(&contents));
        let mut builder = TocBuilder::new(self.config().toc.clone());
        let result = builder
            .attach(&mut host)
            .ok_or_else(|| OperationError::InvalidInput("document never became ready".into()))?;
        Ok(RenderOutcome {
            html: host.into_inner().to_html(),
            result,
        })
    }

    /// Compute the TOC of one document without rewriting it.
    pub fn outline(
        &self,
        source: DocumentSource,
        format: OutlineFormat,
    ) -> Result<OutlineOutcome, OperationError> {
        let contents = self.read_source(source)?;
        let dom = Dom::parse(&contents);
        let tree = TocBuilder::new(self.config().toc.clone()).plan(&dom);
        let rendered = match format {
            OutlineFormat::Plain => render_plain(&tree),
            OutlineFormat::Json => serde_json::to_string_pretty(&tree)
                .map_err(|err| OperationError::InvalidInput(err.to_string()))?,
        };
        Ok(OutlineOutcome { tree, rendered })
    }

    fn read_source(&self, source: DocumentSource) -> Result<String, OperationError> {
        match source {
            DocumentSource::Inline(contents) => Ok(contents),
            DocumentSource::Path(path) => {
                let absolute = absolutize(&path, &self.config().sources.working_directory);
                fs::read_to_string(&absolute).map_err(|source| OperationError::Io {
                    path: absolute,
                    source,
                })
            }
        }
    }
}

fn render_plain(tree: &TocTree) -> String {
    let mut out = String::new();
    for (depth, entry) in tree.walk() {
        out.push_str(&"  ".repeat(depth - 1));
        out.push_str(&format!("- {} (#{})\n", entry.label, entry.anchor));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_toc_builder::TocEntry;

    #[test]
    fn plain_outline_indents_by_depth() {
        let tree = TocTree {
            entries: vec![
                TocEntry::new("Intro", "Intro", 2)
                    .with_children(vec![TocEntry::new("Background", "Background", 3)]),
                TocEntry::new("Usage", "Usage", 2),
            ],
        };
        assert_eq!(
            render_plain(&tree),
            "- Intro (#Intro)\n  - Background (#Background)\n- Usage (#Usage)\n"
        );
    }
}
