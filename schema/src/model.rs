//! Core definition model types.
//!
//! These types represent an ontology schema as typed Rust data: categories
//! connected by multiple inheritance, the properties they declare, and the
//! subobjects they embed. All instances are plain owned values; once a
//! definition has been placed in a [`SchemaSet`] it is treated as immutable,
//! and every merge-like operation returns a new value instead of mutating.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The datatype vocabulary for property values.
///
/// The vocabulary is open but checked: the named variants are the tags the
/// engine knows how to render and index, while [`Datatype::Other`] carries
/// any extension tag verbatim. An unknown tag is a validator *warning*, not
/// an error, so extended ontologies keep loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datatype {
    /// Free-form text.
    Text,
    /// Numeric value (integer or decimal).
    Number,
    /// Boolean flag.
    Boolean,
    /// Calendar date or timestamp.
    Date,
    /// Reference to another page/entity in the ontology.
    Page,
    /// External URL.
    Url,
    /// Email address.
    Email,
    /// Preformatted code text.
    Code,
    /// An extension tag outside the checked vocabulary.
    Other(String),
}

impl Datatype {
    /// Returns the canonical string tag for this datatype.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Datatype::Text => "text",
            Datatype::Number => "number",
            Datatype::Boolean => "boolean",
            Datatype::Date => "date",
            Datatype::Page => "page",
            Datatype::Url => "url",
            Datatype::Email => "email",
            Datatype::Code => "code",
            Datatype::Other(tag) => tag,
        }
    }

    /// Parses a string tag into a datatype.
    ///
    /// Tags outside the checked vocabulary become [`Datatype::Other`];
    /// parsing never fails.
    #[must_use]
    pub fn parse(tag: &str) -> Datatype {
        match tag {
            "text" => Datatype::Text,
            "number" => Datatype::Number,
            "boolean" => Datatype::Boolean,
            "date" => Datatype::Date,
            "page" => Datatype::Page,
            "url" => Datatype::Url,
            "email" => Datatype::Email,
            "code" => Datatype::Code,
            other => Datatype::Other(other.to_string()),
        }
    }

    /// Returns true if this tag belongs to the checked vocabulary.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Datatype::Other(_))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Datatype {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Datatype {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Datatype::parse(&tag))
    }
}

/// Built-in display-type tags for property rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayHint {
    /// Inline plain value.
    Plain,
    /// Bulleted list (multi-value properties).
    List,
    /// Tabular layout.
    Table,
    /// Hyperlinked value.
    Link,
}

impl DisplayHint {
    /// Returns the canonical string tag for this hint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayHint::Plain => "plain",
            DisplayHint::List => "list",
            DisplayHint::Table => "table",
            DisplayHint::Link => "link",
        }
    }
}

/// How a property value should be rendered, resolved by priority.
///
/// Derived from a [`Property`]'s display configuration; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy<'a> {
    /// An explicit template reference (highest priority).
    Template(&'a str),
    /// A pattern reference.
    Pattern(&'a str),
    /// A built-in display hint.
    Hint(DisplayHint),
    /// Default escaping (no display configuration at all).
    Escape,
}

/// A property definition.
///
/// Identified by its unique name; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Property {
    /// Unique property name.
    pub name: String,
    /// Datatype tag for values of this property.
    pub datatype: Datatype,
    /// Whether the property may carry multiple values.
    pub multi_valued: bool,
    /// Explicit template reference, if any (highest display priority).
    pub template: Option<String>,
    /// Pattern reference, if any.
    pub pattern: Option<String>,
    /// Built-in display hint, if any.
    pub display: Option<DisplayHint>,
}

impl Property {
    /// Creates a property with the given name and datatype and no display
    /// configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, datatype: Datatype) -> Self {
        Self {
            name: name.into(),
            datatype,
            multi_valued: false,
            template: None,
            pattern: None,
            display: None,
        }
    }

    /// Resolves the display configuration into a single strategy.
    ///
    /// Priority: explicit template > pattern reference > built-in hint >
    /// default escaping.
    #[must_use]
    pub fn render_strategy(&self) -> RenderStrategy<'_> {
        if let Some(template) = &self.template {
            RenderStrategy::Template(template)
        } else if let Some(pattern) = &self.pattern {
            RenderStrategy::Pattern(pattern)
        } else if let Some(hint) = self.display {
            RenderStrategy::Hint(hint)
        } else {
            RenderStrategy::Escape
        }
    }
}

/// A subobject definition: a named sub-entity with its own required and
/// optional property sets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subobject {
    /// Unique subobject name.
    pub name: String,
    /// Properties every instance of this subobject must carry.
    pub required_properties: BTreeSet<String>,
    /// Properties an instance may carry.
    pub optional_properties: BTreeSet<String>,
}

impl Subobject {
    /// Creates an empty subobject definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_properties: BTreeSet::new(),
            optional_properties: BTreeSet::new(),
        }
    }

    /// Returns a copy with required/optional overlaps promoted to required,
    /// together with the promoted names.
    ///
    /// A name authored in both sets is treated as required; the promotion is
    /// surfaced to the author as a warning, never an error.
    #[must_use]
    pub fn promote_overlaps(&self) -> (Subobject, Vec<String>) {
        let (required, optional, promoted) =
            promote(&self.required_properties, &self.optional_properties);
        (
            Subobject {
                name: self.name.clone(),
                required_properties: required,
                optional_properties: optional,
            },
            promoted,
        )
    }
}

/// A named, ordered display section within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySection {
    /// Section name (merge key across the inheritance chain).
    pub name: String,
    /// Ordered property names shown in this section.
    pub properties: Vec<String>,
}

/// A category definition.
///
/// Identified by its unique name. The parent list is ordered: the declared
/// order is preserved by inheritance linearization. Constructed once from
/// validated input and immutable thereafter; merging produces new instances.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category {
    /// Unique category name.
    pub name: String,
    /// Ordered parent category names (possibly empty).
    pub parents: Vec<String>,
    /// Properties this category itself requires.
    pub required_properties: BTreeSet<String>,
    /// Properties this category itself allows.
    pub optional_properties: BTreeSet<String>,
    /// Subobjects this category itself requires.
    pub required_subobjects: BTreeSet<String>,
    /// Subobjects this category itself allows.
    pub optional_subobjects: BTreeSet<String>,
    /// Ordered display sections declared by this category.
    pub sections: Vec<DisplaySection>,
}

impl Category {
    /// Creates an empty category definition with no parents.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            required_properties: BTreeSet::new(),
            optional_properties: BTreeSet::new(),
            required_subobjects: BTreeSet::new(),
            optional_subobjects: BTreeSet::new(),
            sections: Vec::new(),
        }
    }

    /// Returns a copy with required/optional overlaps promoted to required,
    /// together with the promoted names (properties first, then subobjects,
    /// each sorted).
    #[must_use]
    pub fn promote_overlaps(&self) -> (Category, Vec<String>) {
        let (req_props, opt_props, mut promoted) =
            promote(&self.required_properties, &self.optional_properties);
        let (req_subs, opt_subs, promoted_subs) =
            promote(&self.required_subobjects, &self.optional_subobjects);
        promoted.extend(promoted_subs);
        (
            Category {
                name: self.name.clone(),
                parents: self.parents.clone(),
                required_properties: req_props,
                optional_properties: opt_props,
                required_subobjects: req_subs,
                optional_subobjects: opt_subs,
                sections: self.sections.clone(),
            },
            promoted,
        )
    }
}

/// Moves every name present in both sets into the required set.
fn promote(
    required: &BTreeSet<String>,
    optional: &BTreeSet<String>,
) -> (BTreeSet<String>, BTreeSet<String>, Vec<String>) {
    let promoted: Vec<String> = required.intersection(optional).cloned().collect();
    let new_optional: BTreeSet<String> = optional.difference(required).cloned().collect();
    (required.clone(), new_optional, promoted)
}

/// A promotion performed while normalizing a definition set: `name` was
/// authored as both required and optional by `owner` and is now required.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Promotion {
    /// Name of the category or subobject that declared the overlap.
    pub owner: String,
    /// The promoted property or subobject name.
    pub name: String,
}

/// The full definition set: every category, property, and subobject keyed by
/// name.
///
/// Keys are held in `BTreeMap`s so every pass over the set iterates in a
/// fixed order and repeated runs on unchanged input produce identical
/// output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaSet {
    /// All category definitions, keyed by category name.
    pub categories: BTreeMap<String, Category>,
    /// All property definitions, keyed by property name.
    pub properties: BTreeMap<String, Property>,
    /// All subobject definitions, keyed by subobject name.
    pub subobjects: BTreeMap<String, Subobject>,
}

impl SchemaSet {
    /// Creates an empty definition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category definition, keyed by its name. Replaces any previous
    /// definition with the same name.
    pub fn add_category(&mut self, category: Category) {
        self.categories.insert(category.name.clone(), category);
    }

    /// Adds a property definition, keyed by its name.
    pub fn add_property(&mut self, property: Property) {
        self.properties.insert(property.name.clone(), property);
    }

    /// Adds a subobject definition, keyed by its name.
    pub fn add_subobject(&mut self, subobject: Subobject) {
        self.subobjects.insert(subobject.name.clone(), subobject);
    }

    /// Looks up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Looks up a subobject by name.
    #[must_use]
    pub fn subobject(&self, name: &str) -> Option<&Subobject> {
        self.subobjects.get(name)
    }

    /// Returns a normalized copy of the set with every category's and
    /// subobject's required/optional overlaps promoted to required, plus the
    /// list of promotions performed (in key order).
    ///
    /// Promotion is idempotent: normalizing a normalized set performs no
    /// further promotions.
    #[must_use]
    pub fn promote_overlaps(&self) -> (SchemaSet, Vec<Promotion>) {
        let mut promotions = Vec::new();
        let mut normalized = self.clone();
        for (name, category) in &self.categories {
            let (promoted_category, names) = category.promote_overlaps();
            normalized
                .categories
                .insert(name.clone(), promoted_category);
            promotions.extend(names.into_iter().map(|n| Promotion {
                owner: name.clone(),
                name: n,
            }));
        }
        for (name, subobject) in &self.subobjects {
            let (promoted_subobject, names) = subobject.promote_overlaps();
            normalized
                .subobjects
                .insert(name.clone(), promoted_subobject);
            promotions.extend(names.into_iter().map(|n| Promotion {
                owner: name.clone(),
                name: n,
            }));
        }
        (normalized, promotions)
    }
}
