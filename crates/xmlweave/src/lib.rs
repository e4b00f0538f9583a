//! xmlweave - In-memory XML document model with a descriptor-driven
//! object-to-XML mapper
//!
//! # Quick Start
//!
//! ```
//! use xmlweave::Document;
//!
//! let mut document = Document::new();
//! let root = document.new_element("root");
//! let child = document.new_element("child");
//! document.add_child(root, child);
//! document.set_root(root);
//! assert_eq!(document.pretty_print(), "<root>\n\t<child/>\n</root>\n");
//! ```
//!
//! Mapping an object graph goes through the [`XmlSource`] seam:
//!
//! ```
//! use xmlweave::{Field, XmlSource};
//!
//! struct Sensor {
//!     id: String,
//! }
//!
//! impl XmlSource for Sensor {
//!     fn element_name(&self) -> &str {
//!         "sensor"
//!     }
//!
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::attribute("id", self.id.clone())]
//!     }
//! }
//!
//! # fn main() -> Result<(), xmlweave::Error> {
//! let sensor = Sensor { id: "s1".to_string() };
//! let document = xmlweave::to_document(&sensor)?;
//! assert_eq!(document.pretty_print(), "<sensor id=\"s1\"/>\n");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod element;
pub use element::{Attribute, Element, ElementId};

pub mod document;
pub use document::Document;

pub mod visit;
pub use visit::{NamedCollector, Visitor};

pub mod path;
pub use path::PathQuery;

pub mod map;
pub use map::{Field, FieldValue, Mapper, RenderAs, Transform, XmlSource};

/// Maps `source` into a fresh document with a default [`Mapper`]
pub fn to_document(source: &dyn XmlSource) -> Result<Document> {
    Mapper::new().map_to_document(source)
}

/// Evaluates a slash-path expression against `document`
pub fn query(document: &Document, expression: &str) -> Result<Vec<ElementId>> {
    PathQuery::new(document).evaluate(expression)
}
