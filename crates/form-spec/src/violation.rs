use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Broad classes of defects a document can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    Structural,
    Pattern,
    Domain,
    CrossReference,
    RecursionLimit,
}

/// Machine-readable reason attached to each violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required value is absent or blank.
    MissingField,
    /// The widget discriminator names no known kind.
    UnknownWidgetType,
    /// The widget discriminator is known but its payload is absent.
    MissingPayload,
    /// A payload is present under a key other than the discriminator.
    UnexpectedPayload,
    /// A collection that must hold at least one element is empty.
    EmptyCollection,
    PatternMismatch,
    OutOfRange,
    InvalidOption,
    DuplicateIdentifier,
    NestingTooDeep,
}

impl ViolationKind {
    pub fn category(&self) -> ViolationCategory {
        match self {
            ViolationKind::MissingField
            | ViolationKind::UnknownWidgetType
            | ViolationKind::MissingPayload
            | ViolationKind::UnexpectedPayload
            | ViolationKind::EmptyCollection => ViolationCategory::Structural,
            ViolationKind::PatternMismatch => ViolationCategory::Pattern,
            ViolationKind::OutOfRange | ViolationKind::InvalidOption => ViolationCategory::Domain,
            ViolationKind::DuplicateIdentifier => ViolationCategory::CrossReference,
            ViolationKind::NestingTooDeep => ViolationCategory::RecursionLimit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::UnknownWidgetType => "unknown_widget_type",
            ViolationKind::MissingPayload => "missing_payload",
            ViolationKind::UnexpectedPayload => "unexpected_payload",
            ViolationKind::EmptyCollection => "empty_collection",
            ViolationKind::PatternMismatch => "pattern_mismatch",
            ViolationKind::OutOfRange => "out_of_range",
            ViolationKind::InvalidOption => "invalid_option",
            ViolationKind::DuplicateIdentifier => "duplicate_identifier",
            ViolationKind::NestingTooDeep => "nesting_too_deep",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dot/bracket path from the form root, e.g. `pages[0].sections[1].id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(String::new())
    }

    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            FieldPath(name.to_string())
        } else {
            FieldPath(format!("{}.{}", self.0, name))
        }
    }

    pub fn index(&self, index: usize) -> Self {
        FieldPath(format!("{}[{}]", self.0, index))
    }

    /// Shorthand for `field(name).index(index)`.
    pub fn item(&self, name: &str, index: usize) -> Self {
        self.field(name).index(index)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single defect found while validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(path: &FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Violation {
            path: path.as_str().to_string(),
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ViolationCategory {
        self.kind.category()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.path, self.message, self.kind)
    }
}
