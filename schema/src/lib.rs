//! Ontograph definition model encoded as typed Rust data.
//!
//! The `ontograph-schema` crate provides the immutable value types an
//! ontology is authored in — categories with ordered multiple-inheritance
//! parent lists, properties with a checked datatype vocabulary, and
//! subobjects — plus the pure overlap-promotion merge. It contains no
//! resolution or validation logic; that lives in `ontograph-engine`.
//!
//! # Entry Point
//!
//! ```
//! use ontograph_schema::{Category, Datatype, Property, SchemaSet};
//!
//! let mut set = SchemaSet::new();
//! set.add_property(Property::new("email", Datatype::Email));
//! let mut person = Category::new("Person");
//! person.optional_properties.insert("email".to_string());
//! set.add_category(person);
//! assert!(set.category("Person").is_some());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod model;

pub use model::{
    Category, Datatype, DisplayHint, DisplaySection, Promotion, Property, RenderStrategy,
    SchemaSet, Subobject,
};
