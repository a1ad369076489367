use html_toc_config::TocSettings;
use html_toc_dom::DocumentTree;
use log::debug;

use crate::anchor::AnchorRegistry;
use crate::heading::{scan_headings, HeadingNode};
use crate::ready::DocumentReady;
use crate::render::render_into;
use crate::tree::{build_tree, TocTree};

/// Result of one builder run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Identifiers were assigned and the container now holds `tree`.
    Applied(TocTree),
    /// Nothing in the document was changed.
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No element carries the configured container id.
    NoContainer,
    /// No heading qualified for the table of contents.
    NoHeadings,
    /// This builder already ran once.
    AlreadyRan,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::NoContainer => "no TOC container",
            SkipReason::NoHeadings => "no qualifying headings",
            SkipReason::AlreadyRan => "already ran",
        };
        f.write_str(text)
    }
}

/// Builds the table of contents for one document.
#[derive(Clone, Debug)]
pub struct TocBuilder {
    settings: TocSettings,
    has_run: bool,
}

impl TocBuilder {
    pub fn new(settings: TocSettings) -> Self {
        TocBuilder {
            settings,
            has_run: false,
        }
    }

    pub fn settings(&self) -> &TocSettings {
        &self.settings
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Register with `host` and run once it reports the document ready.
    ///
    /// Returns `None` when the host never signalled.
    pub fn attach<R: DocumentReady>(&mut self, host: &mut R) -> Option<RunOutcome> {
        let mut outcome = None;
        host.on_ready(&mut |document| {
            outcome = Some(self.run(document));
        });
        outcome
    }

    /// Compute the tree the next run would render, without touching the
    /// document.
    pub fn plan<D: DocumentTree>(&self, document: &D) -> TocTree {
        let container = document.element_by_id(&self.settings.container_id);
        let mut headings: Vec<HeadingNode> = scan_headings(document, container)
            .into_iter()
            .map(|located| located.heading)
            .collect();
        let mut registry = existing_ids(document);
        build_tree(&mut headings, &self.settings, &mut registry)
    }

    /// Assign missing heading identifiers and render the TOC into the
    /// container. Only the first call on a builder does any work.
    pub fn run<D: DocumentTree>(&mut self, document: &mut D) -> RunOutcome {
        if self.has_run {
            debug!("toc builder already ran; ignoring");
            return RunOutcome::Skipped(SkipReason::AlreadyRan);
        }
        self.has_run = true;

        let Some(container) = document.element_by_id(&self.settings.container_id) else {
            debug!(
                "no element with id {:?}; leaving document untouched",
                self.settings.container_id
            );
            return RunOutcome::Skipped(SkipReason::NoContainer);
        };

        let located = scan_headings(document, Some(container));
        let mut headings: Vec<HeadingNode> =
            located.iter().map(|entry| entry.heading.clone()).collect();
        let mut registry = existing_ids(document);
        let tree = build_tree(&mut headings, &self.settings, &mut registry);

        if tree.is_empty() {
            debug!("no qualifying headings; leaving document untouched");
            return RunOutcome::Skipped(SkipReason::NoHeadings);
        }

        for (entry, heading) in located.iter().zip(&headings) {
            if entry.heading.id.is_none() {
                if let Some(id) = &heading.id {
                    document.set_attribute(entry.node, "id", id);
                }
            }
        }

        render_into(document, container, &tree, self.settings.list_tag);
        RunOutcome::Applied(tree)
    }
}

fn existing_ids<D: DocumentTree>(document: &D) -> AnchorRegistry {
    document
        .elements()
        .into_iter()
        .filter_map(|node| document.attribute(node, "id"))
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ready::Loaded;
    use html_toc_dom::Dom;

    struct NeverReady(Dom);

    impl DocumentReady for NeverReady {
        type Document = Dom;

        fn on_ready(&mut self, _callback: &mut dyn FnMut(&mut Dom)) {}
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut dom = Dom::parse("<div id=\"toc\"></div><h2>One</h2>");
        let mut builder = TocBuilder::new(TocSettings::default());

        assert!(matches!(builder.run(&mut dom), RunOutcome::Applied(_)));
        let after_first = dom.to_html();
        assert_eq!(
            builder.run(&mut dom),
            RunOutcome::Skipped(SkipReason::AlreadyRan)
        );
        assert_eq!(dom.to_html(), after_first);
    }

    #[test]
    fn attach_runs_when_the_host_signals() {
        let mut host = Loaded::new(Dom::parse("<div id=\"toc\"></div><h2>One</h2>"));
        let mut builder = TocBuilder::new(TocSettings::default());

        let outcome = builder.attach(&mut host).expect("host signalled");
        assert!(matches!(outcome, RunOutcome::Applied(tree) if tree.len() == 1));
        assert!(builder.has_run());
        assert!(host.document().to_html().contains("href=\"#One\""));
    }

    #[test]
    fn attach_without_signal_leaves_the_builder_unused() {
        let mut host = NeverReady(Dom::parse("<div id=\"toc\"></div><h2>One</h2>"));
        let mut builder = TocBuilder::new(TocSettings::default());

        assert_eq!(builder.attach(&mut host), None);
        assert!(!builder.has_run());
        assert_eq!(host.0.to_html(), "<div id=\"toc\"></div><h2>One</h2>");
    }

    #[test]
    fn plan_does_not_mutate() {
        let source = "<div id=\"toc\"></div><h2>Getting Started</h2>";
        let dom = Dom::parse(source);
        let builder = TocBuilder::new(TocSettings::default());

        let tree = builder.plan(&dom);
        assert_eq!(tree.entries[0].anchor, "Getting_Started");
        assert_eq!(dom.to_html(), source);
        assert!(!builder.has_run());
    }
}
