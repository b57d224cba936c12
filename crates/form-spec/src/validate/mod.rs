//! Form definition validation.
//!
//! The engine runs the node validators over the whole tree, then checks
//! document-wide widget identifier uniqueness, and returns every violation
//! found. It never modifies the document.

pub mod node;
pub mod payload;
pub mod uniqueness;

use std::ops::Deref;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spec::form::FormSpec;
use crate::violation::Violation;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Whether payloads under keys other than the discriminator are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayloadExclusivity {
    #[default]
    Strict,
    Lenient,
}

/// Knobs for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationOptions {
    /// Deepest hierarchical checklist level inspected; top-level items are level 1.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    #[serde(default)]
    pub payload_exclusivity: PayloadExclusivity,
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            payload_exclusivity: PayloadExclusivity::Strict,
        }
    }
}

/// A form definition that passed validation.
///
/// Only [`Validator::validate`] creates one. It borrows the document it
/// checked and derefs to it.
#[derive(Debug, Clone, Copy)]
pub struct ValidForm<'a> {
    form: &'a FormSpec,
}

impl<'a> ValidForm<'a> {
    pub fn form(&self) -> &'a FormSpec {
        self.form
    }
}

impl Deref for ValidForm<'_> {
    type Target = FormSpec;

    fn deref(&self) -> &FormSpec {
        self.form
    }
}

/// Serialisable outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl From<Result<ValidForm<'_>, Vec<Violation>>> for ValidationReport {
    fn from(result: Result<ValidForm<'_>, Vec<Violation>>) -> Self {
        match result {
            Ok(_) => ValidationReport {
                valid: true,
                violations: Vec::new(),
            },
            Err(violations) => ValidationReport {
                valid: false,
                violations,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Validator { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates `form`, returning either the accepted document or every
    /// violation found, in document order followed by duplicate identifiers.
    pub fn validate<'a>(&self, form: &'a FormSpec) -> Result<ValidForm<'a>, Vec<Violation>> {
        let node::FormWalk {
            mut violations,
            widget_ids,
        } = node::validate_form(form, &self.options);
        violations.extend(uniqueness::check_unique_widget_ids(&widget_ids));

        debug!(
            form = %form.id,
            widgets = widget_ids.len(),
            violations = violations.len(),
            "validated form definition"
        );

        if violations.is_empty() {
            Ok(ValidForm { form })
        } else {
            Err(violations)
        }
    }

    pub fn report(&self, form: &FormSpec) -> ValidationReport {
        self.validate(form).into()
    }
}

/// Validates with [`ValidationOptions::default`].
pub fn validate(form: &FormSpec) -> Result<ValidForm<'_>, Vec<Violation>> {
    Validator::default().validate(form)
}
