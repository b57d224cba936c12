//! Kind-specific widget payloads.
//!
//! Enumerated settings are kept as strings and counts as signed integers so
//! that out-of-domain values reach the validator instead of failing decode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_field_type() -> String {
    "text".into()
}

fn default_true() -> bool {
    true
}

/// A single data-entry input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldPayload {
    #[serde(default = "default_field_type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Default for FieldPayload {
    fn default() -> Self {
        FieldPayload {
            field_type: default_field_type(),
            label: None,
            required: false,
            placeholder: None,
            default_value: None,
            unit: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            options: Vec::new(),
        }
    }
}

fn default_group_layout() -> String {
    "vertical".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupField {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub field: FieldPayload,
}

/// Several fields laid out together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GroupPayload {
    #[serde(default = "default_group_layout")]
    pub layout: String,
    #[serde(default)]
    pub fields: Vec<GroupField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableColumn {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

/// Repeating rows with a fixed set of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TablePayload {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<i64>,
    #[serde(default = "default_true")]
    pub allow_add_rows: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridColumn {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_field_type")]
    pub field_type: String,
}

/// Fixed rows crossed with fixed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridPayload {
    #[serde(default)]
    pub rows: Vec<GridRow>,
    #[serde(default)]
    pub columns: Vec<GridColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistItem {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
}

/// Flat list of items to tick off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistPayload {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

/// Document header block printed above the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct FormHeaderPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

fn default_signature_width() -> i64 {
    400
}

fn default_signature_height() -> i64 {
    150
}

fn default_signature_type() -> String {
    "draw".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SignaturePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_signature_width")]
    pub signature_width: i64,
    #[serde(default = "default_signature_height")]
    pub signature_height: i64,
    #[serde(default = "default_signature_type")]
    pub signature_type: String,
    #[serde(default)]
    pub require_date: bool,
}

impl Default for SignaturePayload {
    fn default() -> Self {
        SignaturePayload {
            label: None,
            signature_width: default_signature_width(),
            signature_height: default_signature_height(),
            signature_type: default_signature_type(),
            require_date: false,
        }
    }
}

fn default_notes_style() -> String {
    "info".into()
}

/// Free text shown to the person filling in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NotesPayload {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_notes_style")]
    pub style: String,
}

fn default_numbering_style() -> String {
    "decimal".into()
}

fn default_indent_size() -> i64 {
    20
}

fn default_item_type() -> String {
    "checkbox".into()
}

/// Checklist whose items may nest to any depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HierarchicalChecklistPayload {
    #[serde(default)]
    pub items: Vec<HierarchicalChecklistItem>,
    #[serde(default = "default_numbering_style")]
    pub numbering_style: String,
    #[serde(default = "default_indent_size")]
    pub indent_size: i64,
    #[serde(default = "default_true")]
    pub show_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HierarchicalChecklistItem {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchicalChecklistItem>,
}

impl HierarchicalChecklistItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        HierarchicalChecklistItem {
            key: key.into(),
            label: label.into(),
            item_type: default_item_type(),
            required: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<HierarchicalChecklistItem>) -> Self {
        self.children = children;
        self
    }
}

/// One selectable value of a radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        ChoiceOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn default_orientation() -> String {
    "vertical".into()
}

fn default_grid_columns() -> i64 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RadioGroupPayload {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckboxGroupPayload {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<i64>,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: i64,
}

fn default_time_format() -> String {
    "24h".into()
}

fn default_step_minutes() -> i64 {
    15
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimePickerPayload {
    #[serde(default = "default_time_format")]
    pub format: String,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_time: Option<String>,
}

impl Default for TimePickerPayload {
    fn default() -> Self {
        TimePickerPayload {
            format: default_time_format(),
            step_minutes: default_step_minutes(),
            min_time: None,
            max_time: None,
            default_time: None,
        }
    }
}
