//! Visitor dispatch over the element tree

use crate::document::Document;
use crate::element::ElementId;

/// Callback invoked once per element during a pre-order walk
///
/// Dispatched by [`Document::walk`] and [`Document::accept`]: the element
/// itself first, then each child subtree in child order.
pub trait Visitor {
    fn visit(&mut self, document: &Document, element: ElementId);
}

/// Visitor collecting the ids of elements with a given name
///
/// The stock visitor for by-name lookups over a subtree.
#[derive(Debug)]
pub struct NamedCollector<'a> {
    name: &'a str,
    matches: Vec<ElementId>,
}

impl<'a> NamedCollector<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            matches: Vec::new(),
        }
    }

    /// Collected matches, in visit (pre-) order
    pub fn into_matches(self) -> Vec<ElementId> {
        self.matches
    }
}

impl Visitor for NamedCollector<'_> {
    fn visit(&mut self, document: &Document, element: ElementId) {
        if document.get(element).is_some_and(|el| el.name() == self.name) {
            self.matches.push(element);
        }
    }
}
