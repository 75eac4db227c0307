//! Dependency ordering: parents before children, reproducibly.
//!
//! Consumers that must apply category definitions one at a time (batch
//! importers, diff tooling) need a sequence in which every category appears
//! after all of its parents. Ties between independent subtrees break stably
//! by name, so repeated runs on unchanged input produce identical output.
//!
//! Cycle detection here is deliberately independent of the validator's:
//! either entry point may be invoked on its own and both must refuse a
//! cyclic graph.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use ontograph_schema::SchemaSet;

use crate::error::StructuralError;

/// Returns every category name ordered so that parents precede children.
///
/// # Errors
///
/// - [`StructuralError::DanglingParent`] if a category names an undefined
///   parent.
/// - [`StructuralError::Cycle`] if the parent graph is cyclic; the error
///   carries one concrete cycle path.
pub fn application_order(set: &SchemaSet) -> Result<Vec<String>, StructuralError> {
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (name, category) in &set.categories {
        in_degree.entry(name).or_insert(0);
        for parent in &category.parents {
            if set.category(parent).is_none() {
                return Err(StructuralError::DanglingParent {
                    category: name.clone(),
                    parent: parent.clone(),
                });
            }
            *in_degree.entry(name).or_insert(0) += 1;
            children.entry(parent).or_default().push(name);
        }
    }

    // Kahn's algorithm with a name-ordered ready set for stable ties.
    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut order: Vec<String> = Vec::with_capacity(set.categories.len());

    while let Some(name) = ready.pop_first() {
        order.push(name.to_string());
        if let Some(dependents) = children.get(name) {
            for &child in dependents {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(child);
                    }
                }
            }
        }
    }

    if order.len() < set.categories.len() {
        let emitted: BTreeSet<&str> = order.iter().map(String::as_str).collect();
        return Err(StructuralError::Cycle {
            path: find_cycle(set, &emitted),
        });
    }

    debug!(categories = order.len(), "computed application order");
    Ok(order)
}

/// Recovers one concrete cycle among the categories Kahn's algorithm could
/// not emit. Starts from the name-least stuck category so the reported path
/// is deterministic.
fn find_cycle(set: &SchemaSet, emitted: &BTreeSet<&str>) -> Vec<String> {
    let stuck: BTreeSet<&str> = set
        .categories
        .keys()
        .map(String::as_str)
        .filter(|n| !emitted.contains(n))
        .collect();

    let mut path: Vec<&str> = Vec::new();
    let mut current = match stuck.iter().next() {
        Some(&name) => name,
        None => return Vec::new(),
    };
    loop {
        if let Some(pos) = path.iter().position(|&n| n == current) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|n| n.to_string()).collect();
            cycle.push(current.to_string());
            return cycle;
        }
        path.push(current);
        // Every stuck category has at least one stuck parent.
        current = match set
            .category(current)
            .and_then(|c| c.parents.iter().find(|p| stuck.contains(p.as_str())))
        {
            Some(parent) => parent.as_str(),
            None => return path.iter().map(|n| n.to_string()).collect(),
        };
    }
}
