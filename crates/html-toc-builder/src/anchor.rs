use std::collections::HashSet;

/// Identifier used when a heading's text yields no usable characters.
pub const FALLBACK_ANCHOR: &str = "section";

/// Derive an element identifier from heading text.
///
/// Whitespace and path separators become `_`; everything that is not
/// alphanumeric, `_` or `-` is dropped. Case is preserved, and feeding the
/// result back in returns it unchanged.
pub fn derive_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_whitespace() || ch == '/' || ch == '\\' {
            anchor.push('_');
        } else if ch.is_alphanumeric() || ch == '_' || ch == '-' {
            anchor.push(ch);
        }
    }

    if anchor.is_empty() {
        FALLBACK_ANCHOR.to_owned()
    } else {
        anchor
    }
}

/// Identifiers already claimed in one document.
#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    used: HashSet<String>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identifier that exists in the document and must not be reused.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_owned());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Claim `base`, or the first free `base_N` (N >= 2) when it is taken.
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_owned()) {
            return base.to_owned();
        }

        let mut counter = 2usize;
        loop {
            let candidate = format!("{base}_{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for AnchorRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = AnchorRegistry::new();
        for id in iter {
            registry.reserve(id.as_ref());
        }
        registry
    }
}
