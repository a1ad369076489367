use html_toc_config::TocSettings;
use log::debug;
use serde::Serialize;

use crate::anchor::{derive_anchor, AnchorRegistry};
use crate::heading::HeadingNode;

/// One list item of the table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub label: String,
    pub anchor: String,
    /// Source heading level.
    pub level: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(label: impl Into<String>, anchor: impl Into<String>, level: u8) -> Self {
        TocEntry {
            label: label.into(),
            anchor: anchor.into(),
            level,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TocEntry>) -> Self {
        self.children = children;
        self
    }

    /// Number of entries in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TocEntry::len).sum::<usize>()
    }
}

/// Root sequence of the table of contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TocTree {
    pub entries: Vec<TocEntry>,
}

impl TocTree {
    /// Total number of entries at every depth.
    pub fn len(&self) -> usize {
        self.entries.iter().map(TocEntry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Depth of every entry in pre-order; root entries have depth 1.
    pub fn depths(&self) -> Vec<usize> {
        self.walk().into_iter().map(|(depth, _)| depth).collect()
    }

    /// Entries in pre-order, paired with their depth.
    pub fn walk(&self) -> Vec<(usize, &TocEntry)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&TocEntry, usize)> =
            self.entries.iter().rev().map(|entry| (entry, 1)).collect();
        while let Some((entry, depth)) = stack.pop() {
            out.push((depth, entry));
            stack.extend(entry.children.iter().rev().map(|child| (child, depth + 1)));
        }
        out
    }
}

/// Whether `heading` takes part in the table of contents.
pub fn qualifies(heading: &HeadingNode, settings: &TocSettings) -> bool {
    if !settings.accepts_level(heading.level) {
        return false;
    }
    if settings.is_excluded_label(&heading.text) {
        debug!("excluding heading labelled {:?}", heading.text);
        return false;
    }
    true
}

/// Nest qualifying headings into a tree.
///
/// Each heading closes every open entry at its own level or deeper and becomes
/// a child of the innermost entry left open, or a root entry when none is.
/// Headings without an identifier get one derived from their text, claimed
/// through `registry` and written back into the heading.
pub fn build_tree(
    headings: &mut [HeadingNode],
    settings: &TocSettings,
    registry: &mut AnchorRegistry,
) -> TocTree {
    let mut slots: Vec<TocEntry> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();
    let mut open: Vec<(u8, usize)> = Vec::new();

    for heading in headings.iter_mut() {
        if !qualifies(heading, settings) {
            continue;
        }

        let anchor = match &heading.id {
            Some(id) => id.clone(),
            None => {
                let anchor = registry.claim(&derive_anchor(&heading.text));
                heading.id = Some(anchor.clone());
                anchor
            }
        };

        while open.last().is_some_and(|(level, _)| *level >= heading.level) {
            open.pop();
        }

        let index = slots.len();
        parents.push(open.last().map(|(_, parent)| *parent));
        slots.push(TocEntry::new(heading.text.clone(), anchor, heading.level));
        open.push((heading.level, index));
    }

    // Parents always precede their children, so folding from the back moves
    // every finished subtree into a slot that is still in place.
    let mut entries = Vec::new();
    for index in (0..slots.len()).rev() {
        let entry = std::mem::take(&mut slots[index]);
        match parents[index] {
            Some(parent) => slots[parent].children.insert(0, entry),
            None => entries.insert(0, entry),
        }
    }

    TocTree { entries }
}
