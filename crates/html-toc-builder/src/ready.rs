use html_toc_dom::DocumentTree;

/// Host side of the "document ready" signal.
///
/// A host calls `callback` exactly once, when its document is available for
/// mutation. A host whose document never becomes available does not call it.
pub trait DocumentReady {
    type Document: DocumentTree;

    fn on_ready(&mut self, callback: &mut dyn FnMut(&mut Self::Document));
}

/// A host whose document is ready as soon as it is constructed, e.g. a file
/// that has already been read and parsed.
#[derive(Clone, Debug)]
pub struct Loaded<D> {
    document: D,
}

impl<D: DocumentTree> Loaded<D> {
    pub fn new(document: D) -> Self {
        Loaded { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_inner(self) -> D {
        self.document
    }
}

impl<D: DocumentTree> DocumentReady for Loaded<D> {
    type Document = D;

    fn on_ready(&mut self, callback: &mut dyn FnMut(&mut D)) {
        callback(&mut self.document);
    }
}
