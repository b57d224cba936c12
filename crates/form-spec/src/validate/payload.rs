//! Per-kind payload rules.
//!
//! Each validator looks only at its own payload and reports against the path
//! of that payload. None of them know about the surrounding form.

use std::collections::HashSet;

use regex::Regex;
use tracing::warn;

use crate::ident::{is_valid_identifier, is_valid_time, is_valid_time_with_seconds};
use crate::spec::payload::*;
use crate::violation::{FieldPath, Violation, ViolationKind};

pub const FIELD_TYPES: &[&str] = &[
    "text", "textarea", "number", "integer", "decimal", "date", "datetime", "time", "email",
    "phone", "select", "boolean",
];
pub const GROUP_LAYOUTS: &[&str] = &["vertical", "horizontal", "grid"];
pub const NOTES_STYLES: &[&str] = &["info", "warning", "note", "instruction"];
pub const RADIO_ORIENTATIONS: &[&str] = &["horizontal", "vertical"];
pub const CHECKBOX_ORIENTATIONS: &[&str] = &["horizontal", "vertical", "grid"];
pub const TIME_FORMATS: &[&str] = &["12h", "24h"];
pub const NUMBERING_STYLES: &[&str] = &["decimal", "alpha", "roman", "none"];
pub const CHECKLIST_ITEM_TYPES: &[&str] = &["checkbox", "text", "select", "radio"];
pub const SIGNATURE_TYPES: &[&str] = &["draw", "upload", "both"];

const HEADER_TEXT_MAX: usize = 200;
const HEADER_URL_MAX: usize = 2048;

pub fn validate_field(payload: &FieldPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_one_of(
        &payload.field_type,
        FIELD_TYPES,
        &path.field("field_type"),
        "field type",
        &mut violations,
    );

    if let (Some(min), Some(max)) = (payload.min, payload.max)
        && min > max
    {
        violations.push(Violation::new(
            &path.field("max"),
            ViolationKind::OutOfRange,
            format!("max ({max}) must not be less than min ({min})"),
        ));
    }

    let min_length_ok = check_non_negative(
        payload.min_length,
        &path.field("min_length"),
        &mut violations,
    );
    let max_length_ok = check_non_negative(
        payload.max_length,
        &path.field("max_length"),
        &mut violations,
    );
    if min_length_ok
        && max_length_ok
        && let (Some(min_length), Some(max_length)) = (payload.min_length, payload.max_length)
        && min_length > max_length
    {
        violations.push(Violation::new(
            &path.field("max_length"),
            ViolationKind::OutOfRange,
            format!("max_length ({max_length}) must not be less than min_length ({min_length})"),
        ));
    }

    if let Some(pattern) = &payload.pattern
        && let Err(err) = Regex::new(pattern)
    {
        violations.push(Violation::new(
            &path.field("pattern"),
            ViolationKind::PatternMismatch,
            format!("pattern is not a valid regular expression: {err}"),
        ));
    }

    if payload.field_type == "select" && payload.options.is_empty() {
        violations.push(Violation::new(
            &path.field("options"),
            ViolationKind::EmptyCollection,
            "select fields must offer at least one option",
        ));
    }

    violations
}

pub fn validate_group(payload: &GroupPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_one_of(
        &payload.layout,
        GROUP_LAYOUTS,
        &path.field("layout"),
        "group layout",
        &mut violations,
    );

    let mut seen = HashSet::new();
    for (index, field) in payload.fields.iter().enumerate() {
        let field_path = path.item("fields", index);
        check_local_identifier(
            &field.id,
            &field_path.field("id"),
            "group field id",
            &mut seen,
            &mut violations,
        );
        violations.extend(validate_field(&field.field, &field_path));
    }

    violations
}

pub fn validate_table(payload: &TablePayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payload.columns.is_empty() {
        violations.push(Violation::new(
            &path.field("columns"),
            ViolationKind::EmptyCollection,
            "table must define at least one column",
        ));
    }

    let mut seen = HashSet::new();
    for (index, column) in payload.columns.iter().enumerate() {
        let column_path = path.item("columns", index);
        check_local_identifier(
            &column.id,
            &column_path.field("id"),
            "column id",
            &mut seen,
            &mut violations,
        );
        check_not_blank(
            &column.label,
            &column_path.field("label"),
            "column label",
            &mut violations,
        );
        check_one_of(
            &column.field_type,
            FIELD_TYPES,
            &column_path.field("field_type"),
            "column field type",
            &mut violations,
        );
    }

    let min_ok = check_non_negative(payload.min_rows, &path.field("min_rows"), &mut violations);
    let max_ok = match payload.max_rows {
        Some(max_rows) if max_rows < 1 => {
            violations.push(Violation::new(
                &path.field("max_rows"),
                ViolationKind::OutOfRange,
                format!("max_rows must be at least 1, got {max_rows}"),
            ));
            false
        }
        _ => true,
    };
    if min_ok
        && max_ok
        && let (Some(min_rows), Some(max_rows)) = (payload.min_rows, payload.max_rows)
        && min_rows > max_rows
    {
        violations.push(Violation::new(
            &path.field("max_rows"),
            ViolationKind::OutOfRange,
            format!("max_rows ({max_rows}) must not be less than min_rows ({min_rows})"),
        ));
    }

    violations
}

pub fn validate_grid(payload: &GridPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut seen_rows = HashSet::new();
    for (index, row) in payload.rows.iter().enumerate() {
        let row_path = path.item("rows", index);
        check_local_identifier(
            &row.id,
            &row_path.field("id"),
            "row id",
            &mut seen_rows,
            &mut violations,
        );
        check_not_blank(&row.label, &row_path.field("label"), "row label", &mut violations);
    }

    let mut seen_columns = HashSet::new();
    for (index, column) in payload.columns.iter().enumerate() {
        let column_path = path.item("columns", index);
        check_local_identifier(
            &column.id,
            &column_path.field("id"),
            "column id",
            &mut seen_columns,
            &mut violations,
        );
        check_not_blank(
            &column.label,
            &column_path.field("label"),
            "column label",
            &mut violations,
        );
        check_one_of(
            &column.field_type,
            FIELD_TYPES,
            &column_path.field("field_type"),
            "column field type",
            &mut violations,
        );
    }

    violations
}

pub fn validate_checklist(payload: &ChecklistPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payload.items.is_empty() {
        violations.push(Violation::new(
            &path.field("items"),
            ViolationKind::EmptyCollection,
            "checklist must contain at least one item",
        ));
    }

    let mut seen = HashSet::new();
    for (index, item) in payload.items.iter().enumerate() {
        let item_path = path.item("items", index);
        check_local_identifier(
            &item.key,
            &item_path.field("key"),
            "item key",
            &mut seen,
            &mut violations,
        );
        check_not_blank(&item.label, &item_path.field("label"), "item label", &mut violations);
    }

    violations
}

pub fn validate_form_header(payload: &FormHeaderPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    let texts = [
        ("title", &payload.title),
        ("subtitle", &payload.subtitle),
        ("document_number", &payload.document_number),
        ("revision", &payload.revision),
        ("effective_date", &payload.effective_date),
    ];
    for (name, value) in texts {
        check_max_chars(value.as_deref(), HEADER_TEXT_MAX, &path.field(name), &mut violations);
    }
    check_max_chars(
        payload.logo_url.as_deref(),
        HEADER_URL_MAX,
        &path.field("logo_url"),
        &mut violations,
    );

    violations
}

pub fn validate_signature(payload: &SignaturePayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_range(
        payload.signature_width,
        1,
        1000,
        &path.field("signature_width"),
        &mut violations,
    );
    check_range(
        payload.signature_height,
        1,
        500,
        &path.field("signature_height"),
        &mut violations,
    );
    check_one_of(
        &payload.signature_type,
        SIGNATURE_TYPES,
        &path.field("signature_type"),
        "signature type",
        &mut violations,
    );

    violations
}

pub fn validate_notes(payload: &NotesPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_not_blank(
        &payload.content,
        &path.field("content"),
        "notes content",
        &mut violations,
    );
    check_one_of(
        &payload.style,
        NOTES_STYLES,
        &path.field("style"),
        "notes style",
        &mut violations,
    );

    violations
}

/// Validates a hierarchical checklist, descending at most `max_depth` levels.
///
/// Top-level items sit at depth 1. A child list below the ceiling is reported
/// once as `nesting_too_deep` and not inspected further.
pub fn validate_hierarchical_checklist(
    payload: &HierarchicalChecklistPayload,
    path: &FieldPath,
    max_depth: usize,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payload.items.is_empty() {
        violations.push(Violation::new(
            &path.field("items"),
            ViolationKind::EmptyCollection,
            "hierarchical checklist must contain at least one item",
        ));
    }
    check_one_of(
        &payload.numbering_style,
        NUMBERING_STYLES,
        &path.field("numbering_style"),
        "numbering style",
        &mut violations,
    );
    check_range(
        payload.indent_size,
        0,
        100,
        &path.field("indent_size"),
        &mut violations,
    );

    let mut seen = HashSet::new();
    validate_checklist_items(
        &payload.items,
        &path.field("items"),
        1,
        max_depth,
        &mut seen,
        &mut violations,
    );

    violations
}

fn validate_checklist_items<'a>(
    items: &'a [HierarchicalChecklistItem],
    path: &FieldPath,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<&'a str>,
    violations: &mut Vec<Violation>,
) {
    if items.is_empty() {
        return;
    }
    if depth > max_depth {
        warn!(path = %path, max_depth, "checklist nesting ceiling reached");
        violations.push(Violation::new(
            path,
            ViolationKind::NestingTooDeep,
            format!("checklist items nest deeper than {max_depth} levels"),
        ));
        return;
    }

    for (index, item) in items.iter().enumerate() {
        let item_path = path.index(index);
        check_local_identifier(
            &item.key,
            &item_path.field("key"),
            "item key",
            seen,
            violations,
        );
        check_not_blank(&item.label, &item_path.field("label"), "item label", violations);
        check_one_of(
            &item.item_type,
            CHECKLIST_ITEM_TYPES,
            &item_path.field("type"),
            "item type",
            violations,
        );
        validate_checklist_items(
            &item.children,
            &item_path.field("children"),
            depth + 1,
            max_depth,
            seen,
            violations,
        );
    }
}

pub fn validate_radio_group(payload: &RadioGroupPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_options(&payload.options, &path.field("options"), &mut violations);
    check_one_of(
        &payload.orientation,
        RADIO_ORIENTATIONS,
        &path.field("orientation"),
        "orientation",
        &mut violations,
    );
    if let Some(default_value) = &payload.default_value
        && !payload
            .options
            .iter()
            .any(|option| &option.value == default_value)
    {
        violations.push(Violation::new(
            &path.field("default_value"),
            ViolationKind::InvalidOption,
            format!("default value '{default_value}' is not one of the options"),
        ));
    }

    violations
}

pub fn validate_checkbox_group(
    payload: &CheckboxGroupPayload,
    path: &FieldPath,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_options(&payload.options, &path.field("options"), &mut violations);
    check_one_of(
        &payload.orientation,
        CHECKBOX_ORIENTATIONS,
        &path.field("orientation"),
        "orientation",
        &mut violations,
    );

    let min_ok = check_non_negative(
        payload.min_selections,
        &path.field("min_selections"),
        &mut violations,
    );
    if let Some(max_selections) = payload.max_selections {
        let max_path = path.field("max_selections");
        if max_selections < 1 {
            violations.push(Violation::new(
                &max_path,
                ViolationKind::OutOfRange,
                format!("max_selections must be at least 1, got {max_selections}"),
            ));
        } else if min_ok
            && let Some(min_selections) = payload.min_selections
            && max_selections < min_selections
        {
            violations.push(Violation::new(
                &max_path,
                ViolationKind::OutOfRange,
                format!(
                    "max_selections ({max_selections}) must not be less than min_selections ({min_selections})"
                ),
            ));
        }
    }

    check_range(
        payload.grid_columns,
        1,
        6,
        &path.field("grid_columns"),
        &mut violations,
    );

    violations
}

pub fn validate_time_picker(payload: &TimePickerPayload, path: &FieldPath) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_one_of(
        &payload.format,
        TIME_FORMATS,
        &path.field("format"),
        "time format",
        &mut violations,
    );
    check_range(
        payload.step_minutes,
        1,
        60,
        &path.field("step_minutes"),
        &mut violations,
    );

    let min_ok = check_time(
        payload.min_time.as_deref(),
        is_valid_time,
        "HH:MM",
        &path.field("min_time"),
        &mut violations,
    );
    let max_ok = check_time(
        payload.max_time.as_deref(),
        is_valid_time,
        "HH:MM",
        &path.field("max_time"),
        &mut violations,
    );
    check_time(
        payload.default_time.as_deref(),
        is_valid_time_with_seconds,
        "HH:MM or HH:MM:SS",
        &path.field("default_time"),
        &mut violations,
    );

    // Zero-padded HH:MM strings order the same way as the times they name.
    if min_ok
        && max_ok
        && let (Some(min_time), Some(max_time)) = (&payload.min_time, &payload.max_time)
        && min_time > max_time
    {
        violations.push(Violation::new(
            &path.field("max_time"),
            ViolationKind::OutOfRange,
            format!("max_time ({max_time}) is earlier than min_time ({min_time})"),
        ));
    }

    violations
}

fn check_options(options: &[ChoiceOption], path: &FieldPath, violations: &mut Vec<Violation>) {
    if options.is_empty() {
        violations.push(Violation::new(
            path,
            ViolationKind::EmptyCollection,
            "at least one option is required",
        ));
    }

    let mut seen = HashSet::new();
    for (index, option) in options.iter().enumerate() {
        let option_path = path.index(index);
        if option.value.trim().is_empty() {
            violations.push(Violation::new(
                &option_path.field("value"),
                ViolationKind::MissingField,
                "option value must not be empty",
            ));
        } else if !seen.insert(option.value.as_str()) {
            violations.push(Violation::new(
                &option_path.field("value"),
                ViolationKind::DuplicateIdentifier,
                format!("option value '{}' is used more than once", option.value),
            ));
        }
        check_not_blank(
            &option.label,
            &option_path.field("label"),
            "option label",
            violations,
        );
    }
}

/// Checks an identifier that must be unique among its siblings.
fn check_local_identifier<'a>(
    value: &'a str,
    path: &FieldPath,
    what: &str,
    seen: &mut HashSet<&'a str>,
    violations: &mut Vec<Violation>,
) {
    if value.is_empty() {
        violations.push(Violation::new(
            path,
            ViolationKind::MissingField,
            format!("{what} must not be empty"),
        ));
        return;
    }
    if !is_valid_identifier(value) {
        violations.push(Violation::new(
            path,
            ViolationKind::PatternMismatch,
            format!("{what} '{value}' must match ^[a-z0-9_-]+$"),
        ));
    }
    if !seen.insert(value) {
        violations.push(Violation::new(
            path,
            ViolationKind::DuplicateIdentifier,
            format!("{what} '{value}' is used more than once"),
        ));
    }
}

pub(crate) fn check_not_blank(
    value: &str,
    path: &FieldPath,
    what: &str,
    violations: &mut Vec<Violation>,
) {
    if value.trim().is_empty() {
        violations.push(Violation::new(
            path,
            ViolationKind::MissingField,
            format!("{what} must not be empty"),
        ));
    }
}

fn check_one_of(
    value: &str,
    allowed: &[&str],
    path: &FieldPath,
    what: &str,
    violations: &mut Vec<Violation>,
) {
    if !allowed.contains(&value) {
        violations.push(Violation::new(
            path,
            ViolationKind::InvalidOption,
            format!("{what} '{value}' must be one of: {}", allowed.join(", ")),
        ));
    }
}

fn check_range(value: i64, min: i64, max: i64, path: &FieldPath, violations: &mut Vec<Violation>) {
    if !(min..=max).contains(&value) {
        violations.push(Violation::new(
            path,
            ViolationKind::OutOfRange,
            format!("value {value} must be between {min} and {max}"),
        ));
    }
}

/// Returns false when a present value is negative.
fn check_non_negative(value: Option<i64>, path: &FieldPath, violations: &mut Vec<Violation>) -> bool {
    match value {
        Some(value) if value < 0 => {
            violations.push(Violation::new(
                path,
                ViolationKind::OutOfRange,
                format!("value {value} must not be negative"),
            ));
            false
        }
        _ => true,
    }
}

fn check_max_chars(
    value: Option<&str>,
    limit: usize,
    path: &FieldPath,
    violations: &mut Vec<Violation>,
) {
    if let Some(value) = value
        && value.chars().count() > limit
    {
        violations.push(Violation::new(
            path,
            ViolationKind::OutOfRange,
            format!("must be at most {limit} characters"),
        ));
    }
}

/// Returns true when the value is absent or well-formed.
fn check_time(
    value: Option<&str>,
    is_valid: fn(&str) -> bool,
    expected: &str,
    path: &FieldPath,
    violations: &mut Vec<Violation>,
) -> bool {
    match value {
        Some(value) if !is_valid(value) => {
            violations.push(Violation::new(
                path,
                ViolationKind::PatternMismatch,
                format!("time '{value}' must be a 24-hour {expected} value"),
            ));
            false
        }
        _ => true,
    }
}
