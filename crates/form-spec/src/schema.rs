use schemars::schema_for;
use serde_json::Value;

use crate::spec::form::FormSpec;

/// JSON Schema describing the wire shape of a form document.
pub fn document_schema() -> Value {
    schema_for!(FormSpec).to_value()
}
