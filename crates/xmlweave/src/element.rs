//! XML tree node types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name/value pair attached to an element
///
/// Values are already-rendered strings; names need not be unique within an
/// element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Handle to an element stored in a [`Document`](crate::Document) arena
///
/// Handles are minted by [`Document::new_element`](crate::Document::new_element)
/// and are only meaningful for the document that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Position of the element in its document arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element node: a name, ordered attributes, ordered child handles, and a
/// back-reference to the owning parent
///
/// Attribute and child order is insertion order and is preserved exactly in
/// serialization. Attribute-local operations live here; structural
/// operations that touch more than one node live on
/// [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) parent: Option<ElementId>,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the element in place
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Child handles in insertion order
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Owning parent, set by [`Document::add_child`](crate::Document::add_child)
    ///
    /// [`Document::remove_child`](crate::Document::remove_child) does not
    /// clear this; a detached element keeps its last parent handle.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Appends an attribute; existing attributes with the same name are kept
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(name, value));
    }

    /// Removes every attribute with the given name; no-op if none match
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|attr| attr.name != name);
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Value of the first attribute with the given name, or `""` if none
    /// exists
    ///
    /// An attribute explicitly holding an empty value is indistinguishable
    /// from a missing one here; use [`Element::has_attribute`] to tell them
    /// apart.
    pub fn attribute_value(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
            .unwrap_or_default()
    }

    /// Renames the first attribute named `old` in place, keeping its value
    /// and position; returns whether one was found
    pub fn rename_attribute(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.attributes.iter_mut().find(|attr| attr.name == old) {
            Some(attr) => {
                attr.name = new.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_attribute() {
        let mut element = Element::new("element");
        element.add_attribute("attribute", "value");
        assert_eq!(element.attributes().len(), 1);
        assert!(element.has_attribute("attribute"));
        assert!(!element.has_attribute("other"));
    }

    #[test]
    fn test_duplicate_attributes_coexist() {
        let mut element = Element::new("element");
        element.add_attribute("k", "first");
        element.add_attribute("k", "second");
        assert_eq!(element.attributes().len(), 2);
        // first match wins on lookup
        assert_eq!(element.attribute_value("k"), "first");
    }

    #[test]
    fn test_remove_attribute_removes_all_matches() {
        let mut element = Element::new("element");
        element.add_attribute("k", "first");
        element.add_attribute("other", "kept");
        element.add_attribute("k", "second");
        element.remove_attribute("k");
        assert_eq!(element.attributes().len(), 1);
        assert_eq!(element.attributes()[0].name, "other");
    }

    #[test]
    fn test_remove_missing_attribute_is_noop() {
        let mut element = Element::new("element");
        element.add_attribute("k", "v");
        element.remove_attribute("missing");
        assert_eq!(element.attributes().len(), 1);
    }

    #[test]
    fn test_attribute_value_missing_is_empty() {
        let mut element = Element::new("element");
        assert_eq!(element.attribute_value("k"), "");
        element.add_attribute("k", "");
        assert_eq!(element.attribute_value("k"), "");
        assert!(element.has_attribute("k"));
    }

    #[test]
    fn test_rename_attribute_first_match_only() {
        let mut element = Element::new("element");
        element.add_attribute("k", "first");
        element.add_attribute("k", "second");
        assert!(element.rename_attribute("k", "renamed"));
        assert_eq!(element.attributes()[0].name, "renamed");
        assert_eq!(element.attributes()[1].name, "k");
        assert!(!element.rename_attribute("missing", "whatever"));
    }

    #[test]
    fn test_rename_element() {
        let mut element = Element::new("old");
        element.rename("new");
        assert_eq!(element.name(), "new");
    }
}
