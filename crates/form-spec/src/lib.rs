#![allow(missing_docs)]

pub mod document;
pub mod ident;
pub mod schema;
pub mod spec;
pub mod validate;
pub mod violation;

pub use document::{DocumentError, DocumentFormat};
pub use ident::is_valid_identifier;
pub use schema::document_schema;
pub use spec::{
    FormSpec, PageSpec, SectionSpec, WidgetBody, WidgetKind, WidgetPayload, WidgetSpec,
};
pub use validate::{
    PayloadExclusivity, ValidForm, ValidationOptions, ValidationReport, Validator, validate,
};
pub use violation::{FieldPath, Violation, ViolationCategory, ViolationKind};
