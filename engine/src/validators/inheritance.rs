//! Inheritance structure checks: dangling parents, cycles, linearization
//! conflicts.

use ontograph_schema::SchemaSet;

use crate::error::StructuralError;
use crate::report::{Finding, ValidationReport};
use crate::resolver::Resolver;

/// Validates the inheritance structure of every category.
///
/// Each distinct structural defect is reported once: a cycle touching three
/// categories produces one finding carrying the full cycle path, not three,
/// and a dangling parent deep in a chain is not re-reported for every
/// descendant that inherits through it.
pub fn validate(set: &SchemaSet, resolver: &Resolver<'_>) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen: Vec<StructuralError> = Vec::new();

    for name in set.categories.keys() {
        let Err(error) = resolver.linearize(name) else {
            continue;
        };
        let error = canonicalize(error);
        if seen.contains(&error) {
            continue;
        }
        let check = match &error {
            StructuralError::Cycle { .. } => "inheritance/cycle",
            StructuralError::DanglingParent { .. } => "inheritance/dangling-parent",
            StructuralError::LinearizationConflict { .. } => "inheritance/linearization",
            StructuralError::UnknownCategory { .. } => "inheritance/unknown",
        };
        report.push(Finding::structural(check, &error));
        seen.push(error);
    }

    report
}

/// Rotates a cycle path so it starts at its name-least member, making the
/// same cycle identical no matter which category it was discovered from.
fn canonicalize(error: StructuralError) -> StructuralError {
    let StructuralError::Cycle { mut path } = error else {
        return error;
    };
    path.pop(); // drop the repeated closing name
    let min_index = path
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i);
    if let Some(i) = min_index {
        path.rotate_left(i);
    }
    if let Some(first) = path.first().cloned() {
        path.push(first);
    }
    StructuralError::Cycle { path }
}
