//! End-to-end scenarios over the full engine surface: validation,
//! resolution, ordering, and state tracking together.

use ontograph_engine::{
    application_order, validate, ArtifactStatus, Resolver, StateTracker, StructuralError,
};
use ontograph_schema::{Category, Datatype, Property, SchemaSet, Subobject};

fn university_set() -> SchemaSet {
    let mut set = SchemaSet::new();
    set.add_property(Property::new("name", Datatype::Text));
    set.add_property(Property::new("email", Datatype::Email));
    set.add_property(Property::new("courses", Datatype::Page));

    let mut person = Category::new("Person");
    person.required_properties.insert("name".to_string());
    person.optional_properties.insert("email".to_string());
    set.add_category(person);

    let mut faculty = Category::new("Faculty");
    faculty.parents.push("Person".to_string());
    faculty.required_properties.insert("email".to_string());
    faculty.optional_properties.insert("courses".to_string());
    set.add_category(faculty);

    set
}

#[test]
fn faculty_promotes_inherited_email_without_overlap_warning() {
    let set = university_set();

    // The promotion happens across categories, not within one, so the
    // validator reports nothing.
    let outcome = validate(&set);
    assert!(!outcome.report.has_errors());
    assert_eq!(outcome.report.warning_count(), 0);

    let resolver = Resolver::new(&set);
    let faculty = resolver.effective("Faculty").unwrap();
    assert!(faculty.requires_property("email"));
    assert!(faculty.requires_property("name"));
    assert!(!faculty.requires_property("courses"));

    let person = resolver.effective("Person").unwrap();
    assert!(!person.requires_property("email"));
}

#[test]
fn own_overlap_yields_one_warning_and_required_effective_member() {
    let mut set = SchemaSet::new();
    set.add_property(Property::new("title", Datatype::Text));
    let mut x = Category::new("X");
    x.required_properties.insert("title".to_string());
    x.optional_properties.insert("title".to_string());
    set.add_category(x);

    let outcome = validate(&set);
    assert_eq!(outcome.report.error_count(), 0);
    assert_eq!(outcome.report.warning_count(), 1);
    let warning = &outcome.report.findings()[0];
    assert!(warning.message.contains("promoted to required"));

    let resolver = Resolver::new(&set);
    assert!(resolver.effective("X").unwrap().requires_property("title"));
}

#[test]
fn two_node_cycle_caught_by_validator_and_orderer() {
    let mut set = SchemaSet::new();
    let mut a = Category::new("A");
    a.parents.push("B".to_string());
    set.add_category(a);
    let mut b = Category::new("B");
    b.parents.push("A".to_string());
    set.add_category(b);

    let outcome = validate(&set);
    assert_eq!(outcome.report.error_count(), 1);
    assert!(outcome.report.findings()[0]
        .message
        .contains("A -> B -> A"));

    match application_order(&set) {
        Err(StructuralError::Cycle { path }) => assert_eq!(path, ["A", "B", "A"]),
        other => panic!("expected cycle from orderer, got {other:?}"),
    }
}

#[test]
fn dangling_parent_identifies_category_and_missing_name() {
    let mut set = SchemaSet::new();
    let mut faculty = Category::new("Faculty");
    faculty.parents.push("Person".to_string());
    set.add_category(faculty);

    let outcome = validate(&set);
    let errors: Vec<_> = outcome.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].subjects,
        vec!["Faculty".to_string(), "Person".to_string()]
    );
}

#[test]
fn structural_error_blocks_resolution_but_not_siblings() {
    let mut set = university_set();
    let mut broken = Category::new("Broken");
    broken.parents.push("Nowhere".to_string());
    set.add_category(broken);

    let resolver = Resolver::new(&set);
    // The broken category fails by itself...
    assert!(resolver.effective("Broken").is_err());
    // ...while its siblings resolve untouched.
    assert!(resolver.effective("Faculty").is_ok());
}

#[test]
fn generation_pipeline_orders_validates_and_tracks() {
    let mut set = university_set();
    set.add_property(Property::new("street", Datatype::Text));
    let mut address = Subobject::new("Address");
    address.optional_properties.insert("street".to_string());
    set.add_subobject(address);

    let outcome = validate(&set);
    assert!(!outcome.report.has_errors());

    let order = application_order(&outcome.normalized).unwrap();
    let person_pos = order.iter().position(|n| n == "Person").unwrap();
    let faculty_pos = order.iter().position(|n| n == "Faculty").unwrap();
    assert!(person_pos < faculty_pos);

    let resolver = Resolver::new(&outcome.normalized);
    let mut tracker = StateTracker::new();
    for name in &order {
        let effective = resolver.effective(name).unwrap();
        // Stand-in for a real artifact generator: serialize the view.
        let artifact = format!("{effective:?}");
        tracker.record(format!("Category:{name}"), artifact.as_bytes());
        assert_eq!(
            tracker.classify(&format!("Category:{name}"), artifact.as_bytes()),
            ArtifactStatus::Unchanged
        );
    }

    // A human edit is flagged before regeneration would clobber it.
    assert_eq!(
        tracker.classify("Category:Person", b"manually rewritten page"),
        ArtifactStatus::ChangedExternally
    );
}

#[test]
fn repeated_runs_on_unchanged_input_are_identical() {
    let set = university_set();

    let order_a = application_order(&set).unwrap();
    let order_b = application_order(&set).unwrap();
    assert_eq!(order_a, order_b);

    let outcome_a = validate(&set);
    let outcome_b = validate(&set);
    assert_eq!(outcome_a.report, outcome_b.report);

    let resolver_a = Resolver::new(&set);
    let resolver_b = Resolver::new(&set);
    assert_eq!(
        resolver_a.effective("Faculty").unwrap(),
        resolver_b.effective("Faculty").unwrap()
    );
}
