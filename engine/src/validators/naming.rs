//! Naming-convention checks.
//!
//! Categories and subobjects are expected in UpperCamelCase, properties in
//! lowerCamelCase. Deviations are warnings carrying a mechanically re-cased
//! suggestion; they never block validation.

use regex::Regex;

use ontograph_schema::SchemaSet;

use crate::report::{Finding, ValidationReport};

const UPPER_CAMEL: &str = "^[A-Z][A-Za-z0-9]*$";
const LOWER_CAMEL: &str = "^[a-z][A-Za-z0-9]*$";

/// Validates naming conventions across categories, subobjects, and
/// properties.
pub fn validate(set: &SchemaSet) -> ValidationReport {
    let mut report = ValidationReport::new();
    let (Ok(upper), Ok(lower)) = (Regex::new(UPPER_CAMEL), Regex::new(LOWER_CAMEL)) else {
        return report;
    };

    for name in set.categories.keys() {
        check(&mut report, &upper, "category", name, true);
    }
    for name in set.subobjects.keys() {
        check(&mut report, &upper, "subobject", name, true);
    }
    for name in set.properties.keys() {
        check(&mut report, &lower, "property", name, false);
    }

    report
}

fn check(
    report: &mut ValidationReport,
    convention: &Regex,
    kind: &str,
    name: &str,
    upper_first: bool,
) {
    if convention.is_match(name) {
        return;
    }
    let expected = if upper_first {
        "UpperCamelCase"
    } else {
        "lowerCamelCase"
    };
    let suggestion = recase(name, upper_first);
    let message = if suggestion != name && convention.is_match(&suggestion) {
        format!("{kind} name `{name}` is not {expected}; consider `{suggestion}`")
    } else {
        format!("{kind} name `{name}` is not {expected}")
    };
    report.push(Finding::warning(
        format!("naming/{kind}"),
        message,
        vec![name.to_string()],
    ));
}

/// Mechanically re-cases a name: separators start a new word, words are
/// capitalized, and the leading character is lowered for lowerCamelCase.
fn recase(name: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() {
            word_start = true;
            continue;
        }
        if word_start {
            if out.is_empty() && !upper_first {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}
