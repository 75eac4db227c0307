//! Structural error taxonomy.
//!
//! Structural errors are always blocking: any operation that depends on a
//! clean resolution (effective-category construction, ordered application,
//! artifact generation) must stop on one. Advisory findings — overlap
//! promotions, naming deviations — are never errors; they are reported as
//! warnings in a [`ValidationReport`](crate::report::ValidationReport).

use thiserror::Error;

/// A blocking structural defect in the definition set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The requested category does not exist in the definition set.
    #[error("unknown category `{name}`")]
    UnknownCategory {
        /// The missing category name.
        name: String,
    },

    /// A category names a parent that does not exist in the definition set.
    #[error("category `{category}` names unknown parent `{parent}`")]
    DanglingParent {
        /// The category with the bad reference.
        category: String,
        /// The missing parent name.
        parent: String,
    },

    /// A category is its own transitive ancestor.
    ///
    /// The path starts and ends at the same category, e.g. `A -> B -> A`.
    #[error("circular inheritance: {}", path.join(" -> "))]
    Cycle {
        /// The full cycle path, first category repeated at the end.
        path: Vec<String>,
    },

    /// No ancestor order satisfies every declared parent order.
    #[error(
        "cannot linearize ancestors of `{category}`: parent orders conflict among {remaining:?}"
    )]
    LinearizationConflict {
        /// The category whose linearization failed.
        category: String,
        /// Heads of the merge lists that could not be consumed.
        remaining: Vec<String>,
    },
}

impl StructuralError {
    /// Names of the entities this error is about, for finding construction.
    #[must_use]
    pub fn subjects(&self) -> Vec<String> {
        match self {
            StructuralError::UnknownCategory { name } => vec![name.clone()],
            StructuralError::DanglingParent { category, parent } => {
                vec![category.clone(), parent.clone()]
            }
            StructuralError::Cycle { path } => {
                let mut names = path.clone();
                names.pop(); // last entry repeats the first
                names
            }
            StructuralError::LinearizationConflict { category, .. } => vec![category.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display_joins_path() {
        let err = StructuralError::Cycle {
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        };
        assert_eq!(err.to_string(), "circular inheritance: A -> B -> A");
        assert_eq!(err.subjects(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn dangling_parent_names_both_sides() {
        let err = StructuralError::DanglingParent {
            category: "Faculty".to_string(),
            parent: "Pers0n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "category `Faculty` names unknown parent `Pers0n`"
        );
    }
}
