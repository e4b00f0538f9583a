//! XML document: element arena, structural navigation, global edits

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::error::{Error, ErrorKind, Result};
use crate::visit::{NamedCollector, Visitor};

/// XML document owning an arena of elements and an optional root
///
/// The document is the sole allocator of elements; every [`ElementId`]
/// passed to its methods must come from this document's
/// [`new_element`](Document::new_element). A document with no root is a
/// valid empty state: global operations fail with
/// [`ErrorKind::MissingRoot`] and [`pretty_print`](Document::pretty_print)
/// returns `""`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    nodes: Vec<Element>,
    root: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a detached element and returns its handle
    pub fn new_element(&mut self, name: impl Into<String>) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Element::new(name));
        id
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn set_root(&mut self, root: ElementId) {
        self.root = Some(root);
    }

    /// Number of elements allocated in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    // Handles are only minted by `new_element`, so in-document access is
    // always in bounds.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn node(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn node_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    /// Appends `child` to `parent`'s children and overwrites the child's
    /// parent back-reference unconditionally
    ///
    /// Re-parenting an already-attached child reassigns the back-reference
    /// but does not remove it from the old parent's child list; callers
    /// re-parenting must call [`remove_child`](Document::remove_child)
    /// first. Cycles are not guarded against.
    ///
    /// # Panics
    ///
    /// Panics if either handle was not created by this document.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Removes `child` from `parent`'s child list by handle equality;
    /// no-op if it is not a child
    ///
    /// The removed child's parent back-reference is left stale; only the
    /// direct link is cleared, never the descendants' ancestry chains.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this document.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        self.node_mut(parent).children.retain(|&c| c != child);
    }

    /// Chain of elements from the root down to `id`'s immediate parent,
    /// root first
    ///
    /// Walks parent links upward until an element with no parent is
    /// reached. An element that was never attached has an empty ancestry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this document.
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.node(ancestor).parent;
        }
        chain.reverse();
        chain
    }

    /// Every element below `id` in pre-order: each child's subtree is
    /// exhausted before the next sibling; `id` itself is excluded
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this document.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: ElementId, out: &mut Vec<ElementId>) {
        for &child in self.node(id).children() {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Visits `id` and then each child subtree, in child order
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this document.
    pub fn walk(&self, id: ElementId, visitor: &mut dyn Visitor) {
        visitor.visit(self, id);
        for &child in self.node(id).children() {
            self.walk(child, visitor);
        }
    }

    /// Pre-order visit of the whole tree, starting at the root
    pub fn accept(&self, visitor: &mut dyn Visitor) -> Result<()> {
        let root = self.require_root()?;
        self.walk(root, visitor);
        Ok(())
    }

    /// Adds `attr_name="attr_value"` to every descendant of the root named
    /// `element_name`; the root itself is not touched
    ///
    /// Matching zero elements is a legitimate no-op. Returns the number of
    /// elements changed.
    pub fn add_attributes_global(
        &mut self,
        element_name: &str,
        attr_name: &str,
        attr_value: &str,
    ) -> Result<usize> {
        let targets = self.descendants_named(element_name, false)?;
        for &id in &targets {
            self.node_mut(id).add_attribute(attr_name, attr_value);
        }
        debug!(
            element = element_name,
            attribute = attr_name,
            changed = targets.len(),
            "added attribute globally"
        );
        Ok(targets.len())
    }

    /// Renames, in place, the first attribute named `old` on every
    /// descendant of the root named `element_name`; elements with no such
    /// attribute are skipped
    ///
    /// Returns the number of elements changed.
    pub fn rename_attributes_global(
        &mut self,
        element_name: &str,
        old: &str,
        new: &str,
    ) -> Result<usize> {
        let targets = self.descendants_named(element_name, false)?;
        let mut changed = 0;
        for &id in &targets {
            if self.node_mut(id).rename_attribute(old, new) {
                changed += 1;
            }
        }
        debug!(
            element = element_name,
            old, new, changed, "renamed attribute globally"
        );
        Ok(changed)
    }

    /// Renames every element named `old_name`, the root included
    ///
    /// Idempotent: after one call no element is named `old_name`, so a
    /// second call matches nothing. Returns the number of elements
    /// changed.
    pub fn rename_elements_global(&mut self, old_name: &str, new_name: &str) -> Result<usize> {
        let targets = self.descendants_named(old_name, true)?;
        for &id in &targets {
            self.node_mut(id).rename(new_name);
        }
        debug!(
            old = old_name,
            new = new_name,
            changed = targets.len(),
            "renamed elements globally"
        );
        Ok(targets.len())
    }

    fn descendants_named(&self, name: &str, include_root: bool) -> Result<Vec<ElementId>> {
        let root = self.require_root()?;
        let mut collector = NamedCollector::new(name);
        self.walk(root, &mut collector);
        let mut targets = collector.into_matches();
        if !include_root {
            targets.retain(|&id| id != root);
        }
        Ok(targets)
    }

    fn require_root(&self) -> Result<ElementId> {
        self.root.ok_or_else(|| Error::new(ErrorKind::MissingRoot))
    }

    /// Serializes the whole tree, or returns `""` when no root is set
    pub fn pretty_print(&self) -> String {
        match self.root {
            Some(root) => self.pretty_print_element(root),
            None => String::new(),
        }
    }

    /// Tab-indented serialization of the subtree rooted at `id`
    ///
    /// An element with no children self-closes regardless of attribute
    /// count; an element with children opens, renders each child one tab
    /// level deeper, and closes on its own line.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this document.
    pub fn pretty_print_element(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.print_element(id, 0, &mut out);
        out
    }

    fn print_element(&self, id: ElementId, depth: usize, out: &mut String) {
        let element = self.node(id);
        let indent = "\t".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(element.name());
        for attr in element.attributes() {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(&attr.value));
            out.push('"');
        }
        if element.children().is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for &child in element.children() {
            self.print_element(child, depth + 1, out);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(element.name());
        out.push_str(">\n");
    }
}

fn escape_attribute(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
