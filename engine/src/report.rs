//! Validation report types: findings, severity levels, and aggregation.
//!
//! Findings are data, never control flow: the validator always finishes its
//! pass and hands the whole report back, so a caller can surface warnings to
//! an author while refusing to proceed past errors.

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;

/// Severity level of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking: the definition set must not be applied as-is.
    Error,
    /// Advisory: auto-corrected or stylistic; never gates execution.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Short identifier of the check that produced this finding
    /// (e.g. `"inheritance/cycle"`).
    pub check: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable message describing the problem.
    pub message: String,
    /// Names of the offending entities.
    pub subjects: Vec<String>,
}

impl Finding {
    /// Creates an error finding.
    pub fn error(
        check: impl Into<String>,
        message: impl Into<String>,
        subjects: Vec<String>,
    ) -> Self {
        Self {
            check: check.into(),
            severity: Severity::Error,
            message: message.into(),
            subjects,
        }
    }

    /// Creates a warning finding.
    pub fn warning(
        check: impl Into<String>,
        message: impl Into<String>,
        subjects: Vec<String>,
    ) -> Self {
        Self {
            check: check.into(),
            severity: Severity::Warning,
            message: message.into(),
            subjects,
        }
    }

    /// Creates an error finding from a structural error.
    #[must_use]
    pub fn structural(check: impl Into<String>, error: &StructuralError) -> Self {
        Finding::error(check, error.to_string(), error.subjects())
    }

    /// Returns true if this finding is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordered findings from one validation pass over a definition set.
///
/// Both the combined view and the errors-only view read the same underlying
/// list; the checks run exactly once per pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding to this report.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extends this report with findings from another report.
    pub fn extend(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    /// All findings, in the order the checks produced them.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Errors only, for operations that gate on correctness but should not
    /// block on style warnings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    /// Warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_error())
    }

    /// Returns the count of error findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns the count of warning findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Returns true if the report contains at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }
}
