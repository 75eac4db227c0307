//! Ontograph resolution engine.
//!
//! This crate turns a set of independently authored, possibly conflicting
//! category definitions (an [`ontograph_schema::SchemaSet`]) into a single
//! deterministic, validated, dependency-ordered view:
//!
//! - [`Resolver`] linearizes multiple inheritance (C3-style) and produces
//!   fully merged [`EffectiveCategory`] views with provenance.
//! - [`validate`] runs every structural and semantic check in one pass and
//!   returns severity-classified findings plus the overlap-promoted set.
//! - [`application_order`] sorts categories so parents precede children,
//!   with stable ties for reproducible batch application.
//! - [`StateTracker`] classifies generated artifacts by content digest so
//!   regeneration can detect external edits before overwriting them.
//!
//! The engine is synchronous, performs no I/O, and receives every input as
//! an explicit parameter. Given the same definition set, every operation
//! returns identical results.
//!
//! # Entry Point
//!
//! ```
//! use ontograph_engine::{validate, Resolver};
//! use ontograph_schema::{Category, SchemaSet};
//!
//! let mut set = SchemaSet::new();
//! set.add_category(Category::new("Person"));
//! let outcome = validate(&set);
//! assert!(!outcome.report.has_errors());
//!
//! let resolver = Resolver::new(&set);
//! let person = resolver.effective("Person")?;
//! assert_eq!(person.linearization, ["Person"]);
//! # Ok::<(), ontograph_engine::StructuralError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod order;
pub mod report;
pub mod resolver;
pub mod state;
pub mod validators;

pub use error::StructuralError;
pub use order::application_order;
pub use report::{Finding, Severity, ValidationReport};
pub use resolver::{EffectiveCategory, EffectiveMember, EffectiveSection, Resolver};
pub use state::{hash_content, ArtifactRecord, ArtifactStatus, StateTracker};

use ontograph_schema::SchemaSet;
use tracing::debug;

/// The result of one validation pass over a definition set.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// All findings, errors and warnings interleaved in check order.
    pub report: ValidationReport,
    /// The set with every required/optional overlap promoted to required,
    /// so downstream consumers see consistent required sets.
    pub normalized: SchemaSet,
}

impl ValidationOutcome {
    /// Errors only, for operations that must gate on correctness without
    /// blocking on style warnings. A read of the same pass as
    /// [`ValidationOutcome::report`], never a second computation.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.report.errors()
    }
}

/// Runs every check over the definition set and returns the combined
/// findings plus the normalized (overlap-promoted) set.
///
/// The pass never stops at the first problem: every check runs over the
/// whole set, so one report covers everything an author needs to fix.
/// Checks run in this order:
///
/// 1. Inheritance structure (cycles, dangling parents, linearization
///    conflicts)
/// 2. References and declarations (unknown names, overlaps, datatype tags)
/// 3. Naming conventions
#[must_use]
pub fn validate(set: &SchemaSet) -> ValidationOutcome {
    let resolver = Resolver::new(set);
    let (normalized, promotions) = set.promote_overlaps();

    let mut report = ValidationReport::new();
    report.extend(validators::inheritance::validate(set, &resolver));
    report.extend(validators::references::validate(set, &promotions));
    report.extend(validators::naming::validate(set));

    debug!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated definition set"
    );
    ValidationOutcome { report, normalized }
}
