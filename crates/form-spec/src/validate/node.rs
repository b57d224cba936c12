//! Node-local rules for forms, pages, sections and widgets.

use std::collections::HashSet;

use tracing::trace;

use crate::ident::{is_valid_identifier, is_valid_locale};
use crate::spec::form::{FormSpec, PageSpec, SectionSpec};
use crate::spec::widget::{WidgetBody, WidgetPayload, WidgetSpec};
use crate::validate::payload::{self, check_not_blank};
use crate::validate::{PayloadExclusivity, ValidationOptions};
use crate::violation::{FieldPath, Violation, ViolationKind};

/// A widget identifier and where it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOccurrence<'a> {
    pub id: &'a str,
    pub path: FieldPath,
}

/// Violations found by the node walk, plus every widget identifier it
/// passed in document order.
#[derive(Debug, Default)]
pub struct FormWalk<'a> {
    pub violations: Vec<Violation>,
    pub widget_ids: Vec<WidgetOccurrence<'a>>,
}

pub fn validate_form<'a>(form: &'a FormSpec, options: &ValidationOptions) -> FormWalk<'a> {
    let root = FieldPath::root();
    let mut violations = Vec::new();
    let mut widget_ids = Vec::new();

    check_identifier(&form.id, &root.field("id"), "form id", &mut violations);
    check_not_blank(&form.title, &root.field("title"), "form title", &mut violations);
    check_not_blank(
        &form.version,
        &root.field("version"),
        "form version",
        &mut violations,
    );

    if let Some(locales) = &form.locales {
        for (index, locale) in locales.iter().enumerate() {
            if !is_valid_locale(locale) {
                violations.push(Violation::new(
                    &root.item("locales", index),
                    ViolationKind::PatternMismatch,
                    format!("locale '{locale}' must look like 'en' or 'en-US'"),
                ));
            }
        }
    }

    if let Some(storage) = &form.storage
        && let Some(table_name) = &storage.table_name
    {
        check_identifier(
            table_name,
            &root.field("storage").field("table_name"),
            "storage table name",
            &mut violations,
        );
    }

    if form.pages.is_empty() {
        violations.push(Violation::new(
            &root.field("pages"),
            ViolationKind::EmptyCollection,
            "form must contain at least one page",
        ));
    }

    let mut seen = HashSet::new();
    for (index, page) in form.pages.iter().enumerate() {
        let page_path = root.item("pages", index);
        check_sibling_unique(
            &page.id,
            &page_path.field("id"),
            "page id",
            &mut seen,
            &mut violations,
        );
        violations.extend(validate_page(page, &page_path, options, &mut widget_ids));
    }

    FormWalk {
        violations,
        widget_ids,
    }
}

pub fn validate_page<'a>(
    page: &'a PageSpec,
    path: &FieldPath,
    options: &ValidationOptions,
    widget_ids: &mut Vec<WidgetOccurrence<'a>>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_identifier(&page.id, &path.field("id"), "page id", &mut violations);
    check_not_blank(&page.title, &path.field("title"), "page title", &mut violations);

    let Some(sections) = &page.sections else {
        violations.push(Violation::new(
            &path.field("sections"),
            ViolationKind::MissingField,
            "page must declare a sections list",
        ));
        return violations;
    };

    let mut seen = HashSet::new();
    for (index, section) in sections.iter().enumerate() {
        let section_path = path.item("sections", index);
        check_sibling_unique(
            &section.id,
            &section_path.field("id"),
            "section id",
            &mut seen,
            &mut violations,
        );
        violations.extend(validate_section(
            section,
            &section_path,
            options,
            widget_ids,
        ));
    }

    violations
}

/// Validates the section's widgets and records their identifiers.
pub fn validate_section<'a>(
    section: &'a SectionSpec,
    path: &FieldPath,
    options: &ValidationOptions,
    widget_ids: &mut Vec<WidgetOccurrence<'a>>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_identifier(&section.id, &path.field("id"), "section id", &mut violations);
    check_not_blank(
        &section.title,
        &path.field("title"),
        "section title",
        &mut violations,
    );

    match &section.widgets {
        Some(widgets) => {
            for (index, widget) in widgets.iter().enumerate() {
                let widget_path = path.item("widgets", index);
                widget_ids.push(WidgetOccurrence {
                    id: &widget.id,
                    path: widget_path.field("id"),
                });
                violations.extend(validate_widget(widget, &widget_path, options));
            }
        }
        None => violations.push(Violation::new(
            &path.field("widgets"),
            ViolationKind::MissingField,
            "section must declare a widgets list",
        )),
    }

    violations
}

/// Checks the widget itself, then dispatches to the payload validator for
/// its discriminator.
pub fn validate_widget(
    widget: &WidgetSpec,
    path: &FieldPath,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_identifier(&widget.id, &path.field("id"), "widget id", &mut violations);

    match &widget.body {
        WidgetBody::Payload(payload) => {
            trace!(widget = %widget.id, kind = %payload.kind(), "validating widget payload");
            violations.extend(validate_payload(payload, path, options));
        }
        WidgetBody::Missing(kind) => violations.push(Violation::new(
            &path.field(kind.as_str()),
            ViolationKind::MissingPayload,
            format!("missing required payload for type '{kind}'"),
        )),
        WidgetBody::Unknown(raw) if raw.is_empty() => violations.push(Violation::new(
            &path.field("type"),
            ViolationKind::MissingField,
            "widget type must not be empty",
        )),
        WidgetBody::Unknown(raw) => violations.push(Violation::new(
            &path.field("type"),
            ViolationKind::UnknownWidgetType,
            format!("unknown widget type '{raw}'"),
        )),
    }

    if options.payload_exclusivity == PayloadExclusivity::Strict {
        for foreign in &widget.foreign_payloads {
            violations.push(Violation::new(
                &path.field(foreign.as_str()),
                ViolationKind::UnexpectedPayload,
                format!(
                    "payload '{foreign}' does not match widget type '{}'",
                    widget.body.discriminator()
                ),
            ));
        }
    }

    violations
}

fn validate_payload(
    widget_payload: &WidgetPayload,
    widget_path: &FieldPath,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let path = widget_path.field(widget_payload.kind().as_str());
    match widget_payload {
        WidgetPayload::Field(p) => payload::validate_field(p, &path),
        WidgetPayload::Group(p) => payload::validate_group(p, &path),
        WidgetPayload::Table(p) => payload::validate_table(p, &path),
        WidgetPayload::Grid(p) => payload::validate_grid(p, &path),
        WidgetPayload::Checklist(p) => payload::validate_checklist(p, &path),
        WidgetPayload::FormHeader(p) => payload::validate_form_header(p, &path),
        WidgetPayload::Signature(p) => payload::validate_signature(p, &path),
        WidgetPayload::Notes(p) => payload::validate_notes(p, &path),
        WidgetPayload::HierarchicalChecklist(p) => {
            payload::validate_hierarchical_checklist(p, &path, options.max_nesting_depth)
        }
        WidgetPayload::RadioGroup(p) => payload::validate_radio_group(p, &path),
        WidgetPayload::CheckboxGroup(p) => payload::validate_checkbox_group(p, &path),
        WidgetPayload::TimePicker(p) => payload::validate_time_picker(p, &path),
    }
}

fn check_identifier(value: &str, path: &FieldPath, what: &str, violations: &mut Vec<Violation>) {
    if value.is_empty() {
        violations.push(Violation::new(
            path,
            ViolationKind::MissingField,
            format!("{what} must not be empty"),
        ));
    } else if !is_valid_identifier(value) {
        violations.push(Violation::new(
            path,
            ViolationKind::PatternMismatch,
            format!("{what} '{value}' must match ^[a-z0-9_-]+$"),
        ));
    }
}

fn check_sibling_unique<'a>(
    value: &'a str,
    path: &FieldPath,
    what: &str,
    seen: &mut HashSet<&'a str>,
    violations: &mut Vec<Violation>,
) {
    if !value.is_empty() && !seen.insert(value) {
        violations.push(Violation::new(
            path,
            ViolationKind::DuplicateIdentifier,
            format!("{what} '{value}' is used more than once"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::payload::{NotesPayload, TimePickerPayload};
    use serde_json::json;

    fn form_with(widgets: Vec<Vec<WidgetSpec>>) -> FormSpec {
        let mut form: FormSpec = serde_json::from_value(json!({
            "id": "audit",
            "title": "Audit",
            "version": "1",
            "pages": [{ "id": "p1", "title": "Page", "sections": [] }]
        }))
        .expect("form");
        let sections = form.pages[0].sections.get_or_insert_with(Vec::new);
        for (index, widgets) in widgets.into_iter().enumerate() {
            sections.push(SectionSpec {
                id: format!("s{index}"),
                title: "Section".into(),
                widgets: Some(widgets),
            });
        }
        form
    }

    fn notes(id: &str) -> WidgetSpec {
        WidgetSpec::new(
            id,
            WidgetPayload::Notes(NotesPayload {
                content: "Read before starting".into(),
                style: "info".into(),
            }),
        )
    }

    #[test]
    fn walk_records_widget_ids_in_document_order() {
        let form = form_with(vec![
            vec![
                notes("intro"),
                WidgetSpec::new(
                    "start",
                    WidgetPayload::TimePicker(TimePickerPayload::default()),
                ),
            ],
            vec![notes("outro")],
        ]);
        let walk = validate_form(&form, &ValidationOptions::default());
        assert!(walk.violations.is_empty(), "{:?}", walk.violations);

        let recorded: Vec<_> = walk
            .widget_ids
            .iter()
            .map(|occurrence| (occurrence.id, occurrence.path.as_str()))
            .collect();
        assert_eq!(
            recorded,
            vec![
                ("intro", "pages[0].sections[0].widgets[0].id"),
                ("start", "pages[0].sections[0].widgets[1].id"),
                ("outro", "pages[0].sections[1].widgets[0].id"),
            ]
        );
    }

    #[test]
    fn walk_records_widgets_whose_own_checks_fail() {
        let mut broken = notes("Not An Id");
        broken.body = WidgetBody::Unknown("slider".into());
        let form = form_with(vec![vec![broken]]);

        let walk = validate_form(&form, &ValidationOptions::default());
        assert_eq!(walk.widget_ids.len(), 1);
        assert_eq!(walk.widget_ids[0].id, "Not An Id");
        let kinds: Vec<_> = walk.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::PatternMismatch,
                ViolationKind::UnknownWidgetType
            ]
        );
    }

    #[test]
    fn sections_without_widget_lists_record_nothing() {
        let mut form = form_with(vec![vec![]]);
        if let Some(sections) = form.pages[0].sections.as_mut() {
            sections[0].widgets = None;
        }
        let walk = validate_form(&form, &ValidationOptions::default());
        assert!(walk.widget_ids.is_empty());
        assert_eq!(walk.violations.len(), 1);
        assert_eq!(walk.violations[0].path, "pages[0].sections[0].widgets");
        assert_eq!(walk.violations[0].kind, ViolationKind::MissingField);
    }
}
