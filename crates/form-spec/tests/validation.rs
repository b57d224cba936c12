use serde_json::{Value, json};

use form_spec::document::{DocumentFormat, parse_str};
use form_spec::{
    FormSpec, PayloadExclusivity, ValidationOptions, ValidationReport, Validator, Violation,
    ViolationCategory, ViolationKind, validate,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "site_inspection.json" => include_str!("fixtures/site_inspection.json"),
        "site_inspection.yaml" => include_str!("fixtures/site_inspection.yaml"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn make_form(widgets: Vec<Value>) -> FormSpec {
    serde_json::from_value(json!({
        "id": "simple",
        "title": "Simple",
        "version": "1.0.0",
        "pages": [{
            "id": "p1",
            "title": "Page one",
            "sections": [{ "id": "s1", "title": "Section one", "widgets": widgets }]
        }]
    }))
    .expect("form should deserialize")
}

fn expect_violations(form: &FormSpec) -> Vec<Violation> {
    validate(form).expect_err("form should be rejected")
}

#[test]
fn site_inspection_fixture_is_accepted() {
    let form: FormSpec =
        serde_json::from_str(fixture("site_inspection.json")).expect("deserialize");
    let valid = validate(&form).unwrap_or_else(|violations| panic!("{violations:#?}"));
    assert_eq!(valid.id, "site-inspection");
    assert_eq!(valid.form().widgets().count(), 12);
}

#[test]
fn yaml_fixture_is_accepted() {
    let form = parse_str(DocumentFormat::Yaml, fixture("site_inspection.yaml")).expect("decode");
    assert!(validate(&form).is_ok());
}

#[test]
fn validation_is_repeatable() {
    let form: FormSpec =
        serde_json::from_str(fixture("site_inspection.json")).expect("deserialize");
    let before = form.clone();
    let validator = Validator::default();
    assert!(validator.validate(&form).is_ok());
    assert!(validator.validate(&form).is_ok());
    assert_eq!(form, before);

    let broken = make_form(vec![json!({ "id": "Bad Id", "type": "notes", "notes": {} })]);
    assert_eq!(validator.report(&broken), validator.report(&broken));
}

#[test]
fn every_independent_defect_is_reported() {
    let form = make_form(vec![
        json!({ "id": "Q1", "type": "field", "field": {} }),
        json!({ "id": "notes", "type": "notes", "notes": { "content": "" } }),
        json!({ "id": "when", "type": "time_picker", "time_picker": { "step_minutes": 90 } }),
    ]);
    let violations = expect_violations(&form);
    let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "pages[0].sections[0].widgets[0].id",
            "pages[0].sections[0].widgets[1].notes.content",
            "pages[0].sections[0].widgets[2].time_picker.step_minutes",
        ]
    );
    let categories: Vec<_> = violations.iter().map(Violation::category).collect();
    assert_eq!(
        categories,
        vec![
            ViolationCategory::Pattern,
            ViolationCategory::Structural,
            ViolationCategory::Domain,
        ]
    );
}

#[test]
fn form_level_defects_are_reported_alongside_widget_defects() {
    let form: FormSpec = serde_json::from_value(json!({
        "id": "",
        "title": " ",
        "version": "1",
        "locales": ["english"],
        "storage": { "table_name": "Submissions" },
        "pages": [
            { "id": "p1", "title": "One" },
            { "id": "p1", "title": "Two", "sections": [
                { "id": "s1", "title": "A" },
                { "id": "s1", "title": "B", "widgets": [] }
            ]}
        ]
    }))
    .expect("deserialize");

    let violations = expect_violations(&form);
    let summary: Vec<_> = violations
        .iter()
        .map(|v| (v.path.as_str(), v.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("id", ViolationKind::MissingField),
            ("title", ViolationKind::MissingField),
            ("locales[0]", ViolationKind::PatternMismatch),
            ("storage.table_name", ViolationKind::PatternMismatch),
            ("pages[0].sections", ViolationKind::MissingField),
            ("pages[1].id", ViolationKind::DuplicateIdentifier),
            ("pages[1].sections[0].widgets", ViolationKind::MissingField),
            ("pages[1].sections[1].id", ViolationKind::DuplicateIdentifier),
        ]
    );
}

#[test]
fn form_without_pages_is_rejected() {
    let form: FormSpec = serde_json::from_value(json!({
        "id": "empty",
        "title": "Empty",
        "version": "1"
    }))
    .expect("deserialize");
    let violations = expect_violations(&form);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "pages");
    assert_eq!(violations[0].kind, ViolationKind::EmptyCollection);
}

#[test]
fn widget_ids_are_unique_across_sections() {
    let form: FormSpec = serde_json::from_value(json!({
        "id": "dupes",
        "title": "Dupes",
        "version": "1",
        "pages": [{
            "id": "p1",
            "title": "Page",
            "sections": [
                { "id": "s1", "title": "First", "widgets": [
                    { "id": "q1", "type": "field", "field": {} }
                ]},
                { "id": "s2", "title": "Second", "widgets": [
                    { "id": "q1", "type": "field", "field": {} }
                ]}
            ]
        }]
    }))
    .expect("deserialize");

    let violations = expect_violations(&form);
    assert_eq!(violations.len(), 1, "{violations:#?}");
    assert_eq!(violations[0].kind, ViolationKind::DuplicateIdentifier);
    assert!(violations[0].message.contains("'q1'"));
    assert_eq!(violations[0].path, "pages[0].sections[1].widgets[0].id");
}

#[test]
fn checkbox_group_selection_bounds() {
    let checkbox = |min: i64, max: i64| {
        make_form(vec![json!({
            "id": "pick",
            "type": "checkbox_group",
            "checkbox_group": {
                "min_selections": min,
                "max_selections": max,
                "options": [
                    { "value": "a", "label": "A" },
                    { "value": "b", "label": "B" }
                ]
            }
        })])
    };

    let violations = expect_violations(&checkbox(2, 1));
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].path,
        "pages[0].sections[0].widgets[0].checkbox_group.max_selections"
    );
    assert_eq!(violations[0].category(), ViolationCategory::Domain);

    assert!(validate(&checkbox(1, 2)).is_ok());
}

#[test]
fn time_picker_time_bounds() {
    let picker = |payload: Value| {
        make_form(vec![json!({ "id": "when", "type": "time_picker", "time_picker": payload })])
    };

    let violations = expect_violations(&picker(json!({ "min_time": "25:00" })));
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].path,
        "pages[0].sections[0].widgets[0].time_picker.min_time"
    );
    assert_eq!(violations[0].kind, ViolationKind::PatternMismatch);

    assert!(validate(&picker(json!({ "min_time": "09:00", "max_time": "17:00" }))).is_ok());
}

#[test]
fn deep_checklist_defect_points_at_the_deepest_item() {
    let form = make_form(vec![json!({
        "id": "steps",
        "type": "hierarchical_checklist",
        "hierarchical_checklist": {
            "items": [{
                "key": "one",
                "label": "One",
                "children": [{
                    "key": "two",
                    "label": "Two",
                    "children": [{ "key": "Three!", "label": "Three" }]
                }]
            }]
        }
    })]);

    let violations = expect_violations(&form);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].path,
        "pages[0].sections[0].widgets[0].hierarchical_checklist.items[0].children[0].children[0].key"
    );
}

#[test]
fn checklist_nesting_ceiling_is_configurable() {
    let mut item = json!({ "key": "leaf", "label": "Leaf" });
    for level in 0..10 {
        item = json!({ "key": format!("level-{level}"), "label": "Level", "children": [item] });
    }
    let form = make_form(vec![json!({
        "id": "deep",
        "type": "hierarchical_checklist",
        "hierarchical_checklist": { "items": [item] }
    })]);

    assert!(validate(&form).is_ok());

    let shallow = Validator::new(ValidationOptions {
        max_nesting_depth: 4,
        ..ValidationOptions::default()
    });
    let violations = shallow.validate(&form).expect_err("too deep");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::NestingTooDeep);
    assert_eq!(violations[0].category(), ViolationCategory::RecursionLimit);
    assert!(violations[0].path.ends_with("children[0].children[0].children"));
}

#[test]
fn table_without_payload_is_one_structural_defect() {
    let violations = expect_violations(&make_form(vec![json!({ "id": "t", "type": "table" })]));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::MissingPayload);
    assert_eq!(violations[0].path, "pages[0].sections[0].widgets[0].table");
    assert!(violations[0].message.contains("'table'"));

    let violations = expect_violations(&make_form(vec![json!({
        "id": "t",
        "type": "table",
        "table": { "columns": [] }
    })]));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::EmptyCollection);
    assert_eq!(
        violations[0].path,
        "pages[0].sections[0].widgets[0].table.columns"
    );
}

#[test]
fn unknown_and_missing_discriminators() {
    let form = make_form(vec![
        json!({ "id": "a", "type": "slider", "slider": { "min": 0 } }),
        json!({ "id": "b", "field": {} }),
    ]);
    let violations = expect_violations(&form);
    let summary: Vec<_> = violations
        .iter()
        .map(|v| (v.path.as_str(), v.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "pages[0].sections[0].widgets[0].type",
                ViolationKind::UnknownWidgetType
            ),
            ("pages[0].sections[0].widgets[1].type", ViolationKind::MissingField),
            (
                "pages[0].sections[0].widgets[1].field",
                ViolationKind::UnexpectedPayload
            ),
        ]
    );
}

#[test]
fn foreign_payloads_are_rejected_in_strict_mode() {
    let form = make_form(vec![json!({
        "id": "name",
        "type": "field",
        "field": {},
        "table": { "columns": [] }
    })]);

    let violations = expect_violations(&form);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::UnexpectedPayload);
    assert_eq!(violations[0].path, "pages[0].sections[0].widgets[0].table");
}

#[test]
fn foreign_payloads_are_ignored_in_lenient_mode() {
    let form = make_form(vec![json!({
        "id": "name",
        "type": "field",
        "field": {},
        "table": { "columns": [] }
    })]);

    let lenient = Validator::new(ValidationOptions {
        payload_exclusivity: PayloadExclusivity::Lenient,
        ..ValidationOptions::default()
    });
    let valid = lenient.validate(&form).expect("lenient mode accepts");
    assert_eq!(valid.pages.len(), 1);
}

#[test]
fn foreign_payloads_do_not_survive_reserialisation() {
    let form = make_form(vec![json!({
        "id": "name",
        "type": "field",
        "field": {},
        "table": { "columns": [] }
    })]);
    let encoded = serde_json::to_value(&form).expect("encode");
    let widget = &encoded["pages"][0]["sections"][0]["widgets"][0];
    assert_eq!(widget["type"], "field");
    assert!(widget.get("field").is_some());
    assert!(widget.get("table").is_none());
}

#[test]
fn report_serialises_violations() {
    let form = make_form(vec![json!({
        "id": "sig",
        "type": "signature",
        "signature": { "signature_width": 2000 }
    })]);
    let report = Validator::default().report(&form);
    assert!(!report.valid);

    let value = serde_json::to_value(&report).expect("encode");
    assert_eq!(value["valid"], false);
    assert_eq!(
        value["violations"][0]["path"],
        "pages[0].sections[0].widgets[0].signature.signature_width"
    );
    assert_eq!(value["violations"][0]["kind"], "out_of_range");

    let decoded: ValidationReport = serde_json::from_value(value).expect("decode");
    assert_eq!(decoded, report);
}

#[test]
fn options_deserialise_with_defaults() {
    let options: ValidationOptions = serde_json::from_value(json!({})).expect("decode");
    assert_eq!(options, ValidationOptions::default());

    let options: ValidationOptions =
        serde_json::from_value(json!({ "max_nesting_depth": 3, "payload_exclusivity": "lenient" }))
            .expect("decode");
    assert_eq!(options.max_nesting_depth, 3);
    assert_eq!(options.payload_exclusivity, PayloadExclusivity::Lenient);

    let validator = Validator::new(options.clone());
    assert_eq!(validator.options(), &options);
    assert_eq!(Validator::default().options(), &ValidationOptions::default());
}
