//! Descriptor-driven object-to-XML mapping
//!
//! A source type implements [`XmlSource`] to describe itself: an element
//! name plus one [`Field`] descriptor per field, in declaration order.
//! [`Mapper::map`] consumes the descriptors and builds the element tree,
//! recursing into nested objects. The source is never mutated.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::document::Document;
use crate::element::ElementId;
use crate::error::{Error, ErrorKind, Result};

/// Rendering policy for one field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderAs {
    /// Attribute on the element, named after the label (the default)
    #[default]
    Attribute,
    /// Child element: a nested object mapped recursively, or a collection
    /// wrapped under one intermediate element named after the field
    ChildElement,
    /// Attribute whose string value passes through a named transform
    NestedObject,
}

/// Value yielded by a field descriptor
pub enum FieldValue<'a> {
    /// Scalar, already rendered to its string representation
    Text(String),
    /// Nested mappable object
    Object(&'a dyn XmlSource),
    /// Collection of mappable objects
    List(Vec<&'a dyn XmlSource>),
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Object(object) => f
                .debug_tuple("Object")
                .field(&object.element_name())
                .finish(),
            Self::List(items) => f.debug_tuple("List").field(&items.len()).finish(),
        }
    }
}

/// One field descriptor: rendering policy plus the field's value
///
/// Constructed per field by an [`XmlSource`] implementation. The plain
/// [`Field::new`] constructor is the no-metadata default: an attribute
/// under the field's own name.
#[derive(Debug)]
pub struct Field<'a> {
    pub label: String,
    pub render_as: RenderAs,
    pub ignored: bool,
    /// Transform name looked up under [`RenderAs::NestedObject`]; `None`
    /// means identity
    pub transform: Option<String>,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// Descriptor with no explicit policy: rendered as an attribute
    pub fn new(label: impl Into<String>, value: FieldValue<'a>) -> Self {
        Self {
            label: label.into(),
            render_as: RenderAs::Attribute,
            ignored: false,
            transform: None,
            value,
        }
    }

    /// Attribute field holding an already-rendered scalar
    pub fn attribute(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(label, FieldValue::Text(text.into()))
    }

    /// Child-element field holding one nested object
    pub fn child(label: impl Into<String>, object: &'a dyn XmlSource) -> Self {
        Self {
            label: label.into(),
            render_as: RenderAs::ChildElement,
            ignored: false,
            transform: None,
            value: FieldValue::Object(object),
        }
    }

    /// Child-element field holding a collection; items are attached under
    /// one intermediate element named after the label
    pub fn children(label: impl Into<String>, items: Vec<&'a dyn XmlSource>) -> Self {
        Self {
            label: label.into(),
            render_as: RenderAs::ChildElement,
            ignored: false,
            transform: None,
            value: FieldValue::List(items),
        }
    }

    /// Attribute field whose value passes through the named transform
    pub fn transformed(
        label: impl Into<String>,
        text: impl Into<String>,
        transform: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            render_as: RenderAs::NestedObject,
            ignored: false,
            transform: Some(transform.into()),
            value: FieldValue::Text(text.into()),
        }
    }

    /// Marks the field as skipped by the mapper
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// Field-descriptor provider: the seam a mappable type implements
///
/// The mapper consumes this without knowing how descriptors are produced;
/// a hand-written implementation per type is the expected form.
pub trait XmlSource {
    /// Element name for this type: the type's own name or a configured
    /// override
    fn element_name(&self) -> &str;

    /// Field descriptors in declaration order
    fn fields(&self) -> Vec<Field<'_>>;
}

/// String transform applied to [`RenderAs::NestedObject`] values
pub type Transform = fn(&str) -> String;

fn identity(value: &str) -> String {
    value.to_owned()
}

fn percentage(value: &str) -> String {
    format!("{value}%")
}

/// Object-to-tree mapper with a named transform registry
///
/// Pre-seeded with `identity` and `percentage`. Mapping walks the source's
/// field descriptors in declaration order and builds the element tree
/// inside a [`Document`] arena.
#[derive(Clone, Debug)]
pub struct Mapper {
    transforms: IndexMap<String, Transform>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    pub fn new() -> Self {
        let mut transforms: IndexMap<String, Transform> = IndexMap::new();
        transforms.insert("identity".to_owned(), identity as Transform);
        transforms.insert("percentage".to_owned(), percentage as Transform);
        Self { transforms }
    }

    /// Registers `f` under `name`; an existing transform with the same
    /// name is replaced
    pub fn register_transform(&mut self, name: impl Into<String>, f: Transform) {
        self.transforms.insert(name.into(), f);
    }

    /// Registered transform names, in registration order
    pub fn transform_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.transforms.keys().map(String::as_str)
    }

    /// Maps `source` into `document` and returns the new subtree's root
    ///
    /// The subtree is left detached; callers attach it with
    /// [`Document::add_child`] or [`Document::set_root`]. Ignored fields
    /// are skipped entirely. A field whose value cannot be rendered under
    /// its declared policy fails with
    /// [`ErrorKind::UnmappableField`](crate::ErrorKind::UnmappableField);
    /// mapping stops at the offending field.
    ///
    /// Recursion is bounded by the depth of the object graph; cyclic
    /// graphs are not guarded against.
    pub fn map(&self, source: &dyn XmlSource, document: &mut Document) -> Result<ElementId> {
        let element = document.new_element(source.element_name());

        for field in source.fields() {
            if field.ignored {
                continue;
            }
            match field.render_as {
                RenderAs::Attribute => match field.value {
                    FieldValue::Text(text) => {
                        document.node_mut(element).add_attribute(field.label, text);
                    }
                    _ => {
                        return Err(unmappable(
                            source,
                            &field.label,
                            "attribute fields take scalar values",
                        ))
                    }
                },
                RenderAs::ChildElement => match field.value {
                    FieldValue::Object(object) => {
                        let child = self.map(object, document)?;
                        document.add_child(element, child);
                    }
                    FieldValue::List(items) => {
                        let wrapper = document.new_element(field.label);
                        for item in items {
                            let child = self.map(item, document)?;
                            document.add_child(wrapper, child);
                        }
                        document.add_child(element, wrapper);
                    }
                    FieldValue::Text(_) => {
                        return Err(unmappable(
                            source,
                            &field.label,
                            "child fields take nested objects",
                        ))
                    }
                },
                RenderAs::NestedObject => match field.value {
                    FieldValue::Text(text) => {
                        let name = field.transform.as_deref().unwrap_or("identity");
                        let transform = self.transforms.get(name).ok_or_else(|| {
                            Error::new(ErrorKind::UnknownTransform {
                                name: name.to_owned(),
                            })
                        })?;
                        document
                            .node_mut(element)
                            .add_attribute(field.label, transform(&text));
                    }
                    _ => {
                        return Err(unmappable(
                            source,
                            &field.label,
                            "transformed fields take scalar values",
                        ))
                    }
                },
            }
        }

        debug!(element = source.element_name(), "mapped object");
        Ok(element)
    }

    /// Maps `source` into a fresh document and installs it as the root
    pub fn map_to_document(&self, source: &dyn XmlSource) -> Result<Document> {
        let mut document = Document::new();
        let root = self.map(source, &mut document)?;
        document.set_root(root);
        Ok(document)
    }
}

fn unmappable(source: &dyn XmlSource, field: &str, reason: &str) -> Error {
    Error::with_message(
        ErrorKind::UnmappableField {
            type_name: source.element_name().to_owned(),
            field: field.to_owned(),
        },
        format!(
            "unmappable field `{field}` on `{}`: {reason}",
            source.element_name()
        ),
    )
}
