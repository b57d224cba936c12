use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::spec::payload::*;

/// Discriminator values accepted in a widget's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Field,
    Group,
    Table,
    Grid,
    Checklist,
    FormHeader,
    Signature,
    Notes,
    HierarchicalChecklist,
    RadioGroup,
    CheckboxGroup,
    TimePicker,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 12] = [
        WidgetKind::Field,
        WidgetKind::Group,
        WidgetKind::Table,
        WidgetKind::Grid,
        WidgetKind::Checklist,
        WidgetKind::FormHeader,
        WidgetKind::Signature,
        WidgetKind::Notes,
        WidgetKind::HierarchicalChecklist,
        WidgetKind::RadioGroup,
        WidgetKind::CheckboxGroup,
        WidgetKind::TimePicker,
    ];

    /// Wire name of the discriminator, which is also the payload key.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Field => "field",
            WidgetKind::Group => "group",
            WidgetKind::Table => "table",
            WidgetKind::Grid => "grid",
            WidgetKind::Checklist => "checklist",
            WidgetKind::FormHeader => "form_header",
            WidgetKind::Signature => "signature",
            WidgetKind::Notes => "notes",
            WidgetKind::HierarchicalChecklist => "hierarchical_checklist",
            WidgetKind::RadioGroup => "radio_group",
            WidgetKind::CheckboxGroup => "checkbox_group",
            WidgetKind::TimePicker => "time_picker",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific data attached to a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetPayload {
    Field(FieldPayload),
    Group(GroupPayload),
    Table(TablePayload),
    Grid(GridPayload),
    Checklist(ChecklistPayload),
    FormHeader(FormHeaderPayload),
    Signature(SignaturePayload),
    Notes(NotesPayload),
    HierarchicalChecklist(HierarchicalChecklistPayload),
    RadioGroup(RadioGroupPayload),
    CheckboxGroup(CheckboxGroupPayload),
    TimePicker(TimePickerPayload),
}

impl WidgetPayload {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetPayload::Field(_) => WidgetKind::Field,
            WidgetPayload::Group(_) => WidgetKind::Group,
            WidgetPayload::Table(_) => WidgetKind::Table,
            WidgetPayload::Grid(_) => WidgetKind::Grid,
            WidgetPayload::Checklist(_) => WidgetKind::Checklist,
            WidgetPayload::FormHeader(_) => WidgetKind::FormHeader,
            WidgetPayload::Signature(_) => WidgetKind::Signature,
            WidgetPayload::Notes(_) => WidgetKind::Notes,
            WidgetPayload::HierarchicalChecklist(_) => WidgetKind::HierarchicalChecklist,
            WidgetPayload::RadioGroup(_) => WidgetKind::RadioGroup,
            WidgetPayload::CheckboxGroup(_) => WidgetKind::CheckboxGroup,
            WidgetPayload::TimePicker(_) => WidgetKind::TimePicker,
        }
    }
}

/// What a widget's discriminator resolved to when the document was decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetBody {
    /// Known discriminator carrying its payload.
    Payload(WidgetPayload),
    /// Known discriminator whose payload key was absent.
    Missing(WidgetKind),
    /// Unrecognised discriminator, kept verbatim. Empty when `type` was absent.
    Unknown(String),
}

impl WidgetBody {
    /// Raw discriminator as it appeared in the document.
    pub fn discriminator(&self) -> &str {
        match self {
            WidgetBody::Payload(payload) => payload.kind().as_str(),
            WidgetBody::Missing(kind) => kind.as_str(),
            WidgetBody::Unknown(raw) => raw,
        }
    }

    pub fn payload(&self) -> Option<&WidgetPayload> {
        match self {
            WidgetBody::Payload(payload) => Some(payload),
            _ => None,
        }
    }
}

/// A single interactive element of a section.
///
/// The body holds at most one payload, tagged by its discriminator. Payload
/// keys in the source document that did not match the discriminator are
/// remembered in `foreign_payloads` and dropped from the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireWidget", into = "WireWidget")]
pub struct WidgetSpec {
    pub id: String,
    pub title: Option<String>,
    pub help: Option<String>,
    pub visible_if: Option<String>,
    pub body: WidgetBody,
    pub foreign_payloads: Vec<WidgetKind>,
}

impl WidgetSpec {
    pub fn new(id: impl Into<String>, payload: WidgetPayload) -> Self {
        WidgetSpec {
            id: id.into(),
            title: None,
            help: None,
            visible_if: None,
            body: WidgetBody::Payload(payload),
            foreign_payloads: Vec::new(),
        }
    }

    pub fn kind(&self) -> Option<WidgetKind> {
        match &self.body {
            WidgetBody::Payload(payload) => Some(payload.kind()),
            WidgetBody::Missing(kind) => Some(*kind),
            WidgetBody::Unknown(_) => None,
        }
    }
}

impl JsonSchema for WidgetSpec {
    fn schema_name() -> Cow<'static, str> {
        "WidgetSpec".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        WireWidget::json_schema(generator)
    }
}

/// Wire shape of a widget: a discriminator plus one optional slot per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
struct WireWidget {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visible_if: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<FieldPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<GroupPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table: Option<TablePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid: Option<GridPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checklist: Option<ChecklistPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form_header: Option<FormHeaderPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<SignaturePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<NotesPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hierarchical_checklist: Option<HierarchicalChecklistPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radio_group: Option<RadioGroupPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checkbox_group: Option<CheckboxGroupPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_picker: Option<TimePickerPayload>,
}

impl From<WireWidget> for WidgetSpec {
    fn from(wire: WireWidget) -> Self {
        let kind = WidgetKind::parse(&wire.kind);
        let slots = [
            wire.field.map(WidgetPayload::Field),
            wire.group.map(WidgetPayload::Group),
            wire.table.map(WidgetPayload::Table),
            wire.grid.map(WidgetPayload::Grid),
            wire.checklist.map(WidgetPayload::Checklist),
            wire.form_header.map(WidgetPayload::FormHeader),
            wire.signature.map(WidgetPayload::Signature),
            wire.notes.map(WidgetPayload::Notes),
            wire.hierarchical_checklist
                .map(WidgetPayload::HierarchicalChecklist),
            wire.radio_group.map(WidgetPayload::RadioGroup),
            wire.checkbox_group.map(WidgetPayload::CheckboxGroup),
            wire.time_picker.map(WidgetPayload::TimePicker),
        ];

        let mut selected = None;
        let mut foreign_payloads = Vec::new();
        for payload in slots.into_iter().flatten() {
            if Some(payload.kind()) == kind {
                selected = Some(payload);
            } else {
                foreign_payloads.push(payload.kind());
            }
        }

        let body = match (kind, selected) {
            (Some(_), Some(payload)) => WidgetBody::Payload(payload),
            (Some(kind), None) => WidgetBody::Missing(kind),
            (None, _) => WidgetBody::Unknown(wire.kind),
        };

        WidgetSpec {
            id: wire.id,
            title: wire.title,
            help: wire.help,
            visible_if: wire.visible_if,
            body,
            foreign_payloads,
        }
    }
}

impl From<WidgetSpec> for WireWidget {
    fn from(widget: WidgetSpec) -> Self {
        let mut wire = WireWidget {
            id: widget.id,
            kind: widget.body.discriminator().to_string(),
            title: widget.title,
            help: widget.help,
            visible_if: widget.visible_if,
            ..WireWidget::default()
        };
        if let WidgetBody::Payload(payload) = widget.body {
            match payload {
                WidgetPayload::Field(p) => wire.field = Some(p),
                WidgetPayload::Group(p) => wire.group = Some(p),
                WidgetPayload::Table(p) => wire.table = Some(p),
                WidgetPayload::Grid(p) => wire.grid = Some(p),
                WidgetPayload::Checklist(p) => wire.checklist = Some(p),
                WidgetPayload::FormHeader(p) => wire.form_header = Some(p),
                WidgetPayload::Signature(p) => wire.signature = Some(p),
                WidgetPayload::Notes(p) => wire.notes = Some(p),
                WidgetPayload::HierarchicalChecklist(p) => wire.hierarchical_checklist = Some(p),
                WidgetPayload::RadioGroup(p) => wire.radio_group = Some(p),
                WidgetPayload::CheckboxGroup(p) => wire.checkbox_group = Some(p),
                WidgetPayload::TimePicker(p) => wire.time_picker = Some(p),
            }
        }
        wire
    }
}
