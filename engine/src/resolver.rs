//! Inheritance resolution: ancestor linearization and effective categories.
//!
//! Multiple inheritance is resolved with a C3-style linearization: the
//! ancestor order of a category is the category itself followed by the merge
//! of its parents' linearizations and the declared parent list, repeatedly
//! taking the first head that appears in no remaining tail. The result is
//! deterministic, lists a category before all of its ancestors, and
//! preserves every declared parent order — or fails with a
//! [`StructuralError::LinearizationConflict`] when no such order exists.
//!
//! The graph is an explicit name-keyed adjacency structure (the
//! [`SchemaSet`]), never live object links, so shared mutable state cannot
//! introduce accidental cycles.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::debug;

use ontograph_schema::{Category, SchemaSet};

use crate::error::StructuralError;

/// A property or subobject as seen through a whole ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveMember {
    /// Final classification after monotonic promotion: once any category in
    /// the chain requires the member, every descendant sees it required.
    pub required: bool,
    /// The most distant ancestor that first declared the member.
    pub declared_by: String,
}

/// A display section after merging across the ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveSection {
    /// Section name (the merge key).
    pub name: String,
    /// Ordered property names: inherited entries first, child additions after.
    pub properties: Vec<String>,
    /// The closest category in the chain that contributed to this section.
    pub owner: String,
}

/// The fully merged view of a category.
///
/// Derived and non-persisted: produced fresh on every resolution call, so
/// callers that need it repeatedly should cache it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveCategory {
    /// The resolved category name.
    pub name: String,
    /// Ancestor order, closest-first, starting with the category itself.
    pub linearization: Vec<String>,
    /// Every property in the chain with its final classification.
    pub properties: BTreeMap<String, EffectiveMember>,
    /// Every subobject in the chain with its final classification.
    pub subobjects: BTreeMap<String, EffectiveMember>,
    /// Display sections, inherited sections before child-introduced ones.
    pub sections: Vec<EffectiveSection>,
}

impl EffectiveCategory {
    /// Returns true if the named property is required in the merged view.
    #[must_use]
    pub fn requires_property(&self, name: &str) -> bool {
        self.properties.get(name).is_some_and(|m| m.required)
    }

    /// Returns true if the named subobject is required in the merged view.
    #[must_use]
    pub fn requires_subobject(&self, name: &str) -> bool {
        self.subobjects.get(name).is_some_and(|m| m.required)
    }
}

/// Resolves ancestor linearizations and effective categories over one
/// definition set.
///
/// Linearizations are memoized per instance. The cache is only valid for
/// the borrowed set: when the underlying definitions change, construct a new
/// resolver (or call [`Resolver::clear_cache`]) — a stale entry is a
/// correctness bug, not a performance detail.
pub struct Resolver<'a> {
    set: &'a SchemaSet,
    cache: RefCell<HashMap<String, Vec<String>>>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the given definition set.
    #[must_use]
    pub fn new(set: &'a SchemaSet) -> Self {
        Self {
            set,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Drops all memoized linearizations.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Computes the ancestor linearization of `name`, closest-first.
    ///
    /// The returned order starts with `name` itself, lists every category
    /// before its own ancestors, and preserves each category's declared
    /// parent order.
    ///
    /// # Errors
    ///
    /// - [`StructuralError::UnknownCategory`] if `name` is not defined.
    /// - [`StructuralError::DanglingParent`] if any category in the chain
    ///   names an undefined parent.
    /// - [`StructuralError::Cycle`] if the chain reaches back to a category
    ///   already on the path.
    /// - [`StructuralError::LinearizationConflict`] if the declared parent
    ///   orders contradict each other.
    pub fn linearize(&self, name: &str) -> Result<Vec<String>, StructuralError> {
        let mut visiting = Vec::new();
        let order = self.linearize_inner(name, &mut visiting)?;
        debug!(category = name, depth = order.len(), "linearized ancestors");
        Ok(order)
    }

    fn linearize_inner(
        &self,
        name: &str,
        visiting: &mut Vec<String>,
    ) -> Result<Vec<String>, StructuralError> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(cached.clone());
        }
        if let Some(pos) = visiting.iter().position(|v| v == name) {
            let mut path: Vec<String> = visiting[pos..].to_vec();
            path.push(name.to_string());
            return Err(StructuralError::Cycle { path });
        }
        let category = self
            .set
            .category(name)
            .ok_or_else(|| StructuralError::UnknownCategory {
                name: name.to_string(),
            })?;

        visiting.push(name.to_string());
        let result = self.merge_parents(category, visiting);
        visiting.pop();

        let order = result?;
        // Only successful linearizations are cached; failures must be
        // re-reported on every call.
        self.cache
            .borrow_mut()
            .insert(name.to_string(), order.clone());
        Ok(order)
    }

    /// `L(C) = C + merge(L(P1) .. L(Pn), [P1 .. Pn])`.
    fn merge_parents(
        &self,
        category: &Category,
        visiting: &mut Vec<String>,
    ) -> Result<Vec<String>, StructuralError> {
        let mut lists: Vec<VecDeque<String>> = Vec::with_capacity(category.parents.len() + 1);
        for parent in &category.parents {
            if self.set.category(parent).is_none() {
                return Err(StructuralError::DanglingParent {
                    category: category.name.clone(),
                    parent: parent.clone(),
                });
            }
            lists.push(self.linearize_inner(parent, visiting)?.into());
        }
        if !category.parents.is_empty() {
            lists.push(category.parents.iter().cloned().collect());
        }

        let mut order = vec![category.name.clone()];
        order.extend(c3_merge(lists).map_err(|remaining| {
            StructuralError::LinearizationConflict {
                category: category.name.clone(),
                remaining,
            }
        })?);
        Ok(order)
    }

    /// Produces the fully merged view of `name`.
    ///
    /// Walks the linearization from the most distant ancestor down to the
    /// category itself. Required/optional sets merge by union with monotonic
    /// promotion; a category's own required/optional overlap is promoted to
    /// required before merging. Sections merge by name, inherited entries
    /// first, with the closest contributor recorded as owner.
    ///
    /// Resolution either fully succeeds or reports failure for this name
    /// alone; no partial view is ever returned.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Resolver::linearize`].
    pub fn effective(&self, name: &str) -> Result<EffectiveCategory, StructuralError> {
        let linearization = self.linearize(name)?;

        let mut properties: BTreeMap<String, EffectiveMember> = BTreeMap::new();
        let mut subobjects: BTreeMap<String, EffectiveMember> = BTreeMap::new();
        let mut sections: Vec<EffectiveSection> = Vec::new();

        for ancestor in linearization.iter().rev() {
            let Some(declared) = self.set.category(ancestor) else {
                // Unreachable: linearize verified every name in the chain.
                continue;
            };
            let (category, _) = declared.promote_overlaps();
            merge_members(&mut properties, &category.required_properties, ancestor, true);
            merge_members(&mut properties, &category.optional_properties, ancestor, false);
            merge_members(&mut subobjects, &category.required_subobjects, ancestor, true);
            merge_members(&mut subobjects, &category.optional_subobjects, ancestor, false);
            merge_sections(&mut sections, &category, ancestor);
        }

        debug!(
            category = name,
            properties = properties.len(),
            subobjects = subobjects.len(),
            "built effective category"
        );
        Ok(EffectiveCategory {
            name: name.to_string(),
            linearization,
            properties,
            subobjects,
            sections,
        })
    }
}

/// Unions `names` into `members` with monotonic promotion: the first (most
/// distant) declarer is recorded for provenance, and a `required` declaration
/// anywhere promotes the member for every later (closer) category.
fn merge_members(
    members: &mut BTreeMap<String, EffectiveMember>,
    names: &std::collections::BTreeSet<String>,
    declared_by: &str,
    required: bool,
) {
    for name in names {
        match members.get_mut(name) {
            Some(member) => {
                if required {
                    member.required = true;
                }
            }
            None => {
                members.insert(
                    name.clone(),
                    EffectiveMember {
                        required,
                        declared_by: declared_by.to_string(),
                    },
                );
            }
        }
    }
}

/// Merges one category's sections into the accumulated section list.
///
/// A same-name section appends properties not already present (inherited
/// first, child additions after) and transfers ownership to the contributing
/// category; a new-name section is appended after the inherited ones.
fn merge_sections(sections: &mut Vec<EffectiveSection>, category: &Category, owner: &str) {
    for section in &category.sections {
        if let Some(existing) = sections.iter_mut().find(|s| s.name == section.name) {
            for property in &section.properties {
                if !existing.properties.contains(property) {
                    existing.properties.push(property.clone());
                }
            }
            existing.owner = owner.to_string();
        } else {
            sections.push(EffectiveSection {
                name: section.name.clone(),
                properties: section.properties.clone(),
                owner: owner.to_string(),
            });
        }
    }
}

/// C3 merge: repeatedly take the first head that appears in no remaining
/// tail. On conflict, returns the stuck heads as the error value.
fn c3_merge(mut lists: Vec<VecDeque<String>>) -> Result<Vec<String>, Vec<String>> {
    let mut merged = Vec::new();
    loop {
        lists.retain(|l| !l.is_empty());
        if lists.is_empty() {
            return Ok(merged);
        }

        let candidate = lists
            .iter()
            .map(|l| &l[0])
            .find(|head| {
                lists
                    .iter()
                    .all(|l| !l.iter().skip(1).any(|n| &n == head))
            })
            .cloned();

        match candidate {
            Some(head) => {
                for list in &mut lists {
                    if list.front() == Some(&head) {
                        list.pop_front();
                    }
                }
                merged.push(head);
            }
            None => {
                let mut remaining: Vec<String> =
                    lists.iter().filter_map(|l| l.front().cloned()).collect();
                remaining.dedup();
                return Err(remaining);
            }
        }
    }
}
