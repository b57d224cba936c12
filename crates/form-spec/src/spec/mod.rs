pub mod form;
pub mod payload;
pub mod widget;

pub use form::{FormOptions, FormSpec, PageSpec, SectionSpec, StorageConfig};
pub use payload::{
    CheckboxGroupPayload, ChecklistItem, ChecklistPayload, ChoiceOption, FieldPayload,
    FormHeaderPayload, GridColumn, GridPayload, GridRow, GroupField, GroupPayload,
    HierarchicalChecklistItem, HierarchicalChecklistPayload, NotesPayload, RadioGroupPayload,
    SignaturePayload, TableColumn, TablePayload, TimePickerPayload,
};
pub use widget::{WidgetBody, WidgetKind, WidgetPayload, WidgetSpec};
