//! Reference and declaration checks: unknown property/subobject references,
//! required/optional overlaps, unknown datatype tags.

use ontograph_schema::{Promotion, SchemaSet};

use crate::report::{Finding, ValidationReport};

/// Validates every name reference and declaration in the set.
///
/// Unknown references are errors; overlaps and unknown datatype tags are
/// warnings. `promotions` comes from the surrounding pass's single
/// normalization of the set, so the warnings describe exactly the
/// corrections applied — the warning exists to surface the correction to
/// the author, not to gate execution.
pub fn validate(set: &SchemaSet, promotions: &[Promotion]) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (name, category) in &set.categories {
        for property in category
            .required_properties
            .iter()
            .chain(&category.optional_properties)
        {
            if set.property(property).is_none() {
                report.push(Finding::error(
                    "references/property",
                    format!("category `{name}` references unknown property `{property}`"),
                    vec![name.clone(), property.clone()],
                ));
            }
        }
        for subobject in category
            .required_subobjects
            .iter()
            .chain(&category.optional_subobjects)
        {
            if set.subobject(subobject).is_none() {
                report.push(Finding::error(
                    "references/subobject",
                    format!("category `{name}` references unknown subobject `{subobject}`"),
                    vec![name.clone(), subobject.clone()],
                ));
            }
        }
        for section in &category.sections {
            for property in &section.properties {
                if set.property(property).is_none() {
                    report.push(Finding::error(
                        "references/section",
                        format!(
                            "section `{}` of category `{name}` references unknown property `{property}`",
                            section.name
                        ),
                        vec![name.clone(), property.clone()],
                    ));
                }
            }
        }
    }

    for (name, subobject) in &set.subobjects {
        for property in subobject
            .required_properties
            .iter()
            .chain(&subobject.optional_properties)
        {
            if set.property(property).is_none() {
                report.push(Finding::error(
                    "references/property",
                    format!("subobject `{name}` references unknown property `{property}`"),
                    vec![name.clone(), property.clone()],
                ));
            }
        }
    }

    for promotion in promotions {
        let kind = if set.categories.contains_key(&promotion.owner) {
            "category"
        } else {
            "subobject"
        };
        report.push(Finding::warning(
            "references/overlap",
            format!(
                "{kind} `{}` declares `{}` as both required and optional; \
                 promoted to required",
                promotion.owner, promotion.name
            ),
            vec![promotion.owner.clone(), promotion.name.clone()],
        ));
    }

    for (name, property) in &set.properties {
        if !property.datatype.is_known() {
            report.push(Finding::warning(
                "references/datatype",
                format!(
                    "property `{name}` uses datatype tag `{}` outside the checked vocabulary",
                    property.datatype.as_str()
                ),
                vec![name.clone()],
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontograph_schema::{Category, Datatype, DisplaySection, Property, Subobject};

    #[test]
    fn unknown_property_reference_is_an_error() {
        let mut set = SchemaSet::new();
        let mut person = Category::new("Person");
        person.required_properties.insert("email".to_string());
        set.add_category(person);

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.findings()[0].check, "references/property");
        assert_eq!(
            report.findings()[0].subjects,
            vec!["Person".to_string(), "email".to_string()]
        );
    }

    #[test]
    fn unknown_subobject_reference_is_an_error() {
        let mut set = SchemaSet::new();
        let mut person = Category::new("Person");
        person.optional_subobjects.insert("Address".to_string());
        set.add_category(person);

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.findings()[0].check, "references/subobject");
    }

    #[test]
    fn section_reference_to_unknown_property_is_an_error() {
        let mut set = SchemaSet::new();
        let mut person = Category::new("Person");
        person.sections.push(DisplaySection {
            name: "Contact".to_string(),
            properties: vec!["email".to_string()],
        });
        set.add_category(person);

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.findings()[0].check, "references/section");
    }

    #[test]
    fn overlap_is_a_warning_not_an_error() {
        let mut set = SchemaSet::new();
        set.add_property(Property::new("title", Datatype::Text));
        let mut x = Category::new("X");
        x.required_properties.insert("title".to_string());
        x.optional_properties.insert("title".to_string());
        set.add_category(x);

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        let finding = &report.findings()[0];
        assert_eq!(finding.check, "references/overlap");
        assert!(finding.message.contains("promoted to required"));
    }

    #[test]
    fn subobject_overlap_also_warns() {
        let mut set = SchemaSet::new();
        set.add_property(Property::new("street", Datatype::Text));
        let mut address = Subobject::new("Address");
        address.required_properties.insert("street".to_string());
        address.optional_properties.insert("street".to_string());
        set.add_subobject(address);

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn unknown_datatype_tag_is_a_warning() {
        let mut set = SchemaSet::new();
        set.add_property(Property::new(
            "location",
            Datatype::Other("geo-coordinate".to_string()),
        ));

        let report = validate(&set, &set.promote_overlaps().1);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.findings()[0].check, "references/datatype");
    }

    #[test]
    fn consistent_set_is_clean() {
        let mut set = SchemaSet::new();
        set.add_property(Property::new("email", Datatype::Email));
        let mut person = Category::new("Person");
        person.optional_properties.insert("email".to_string());
        set.add_category(person);

        assert!(validate(&set, &set.promote_overlaps().1).findings().is_empty());
    }
}
