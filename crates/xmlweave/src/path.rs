//! Simplified slash-path evaluation
//!
//! A path expression is a chain of literal tag names separated by `/`.
//! Each step is matched against the elements already in the working set;
//! matched elements are replaced by their children, so the final result is
//! the content *below* the last matched tag, never the matched tag itself.
//! No predicates, wildcards, or absolute/relative distinction.

use tracing::debug;

use crate::document::Document;
use crate::element::ElementId;
use crate::error::{Error, ErrorKind, Result};

/// Path evaluator over a document's tree
#[derive(Clone, Copy, Debug)]
pub struct PathQuery<'a> {
    document: &'a Document,
}

impl<'a> PathQuery<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Resolves `expression` against the document tree
    ///
    /// The working set starts as the root alone. Per step, the next
    /// working set is the concatenated children of every current element
    /// whose name equals the step, in working-set order; non-matching
    /// elements are dropped. A step matching nothing empties the set for
    /// all remaining steps. Duplicates are possible on overlapping sets.
    pub fn evaluate(&self, expression: &str) -> Result<Vec<ElementId>> {
        let root = self
            .document
            .root()
            .ok_or_else(|| Error::new(ErrorKind::MissingRoot))?;

        let mut elements = vec![root];
        for step in expression.split('/') {
            let mut next = Vec::new();
            for &id in &elements {
                if self.document.node(id).name() == step {
                    next.extend_from_slice(self.document.node(id).children());
                }
            }
            elements = next;
        }
        debug!(expression, matches = elements.len(), "evaluated path");
        Ok(elements)
    }

    /// Concatenated pretty-printed form of every match
    pub fn evaluate_to_string(&self, expression: &str) -> Result<String> {
        let matches = self.evaluate(expression)?;
        let mut out = String::new();
        for id in matches {
            out.push_str(&self.document.pretty_print_element(id));
        }
        Ok(out)
    }
}
