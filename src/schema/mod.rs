//! Dynamic entity schemas: field kinds, widget dispatch and record validation.
//!
//! Schemas come from the backend as JSON, e.g.
//!
//! ```json
//! {
//!   "name": "incident",
//!   "fields": [
//!     {"name": "title", "type": "string", "required": true},
//!     {"name": "severity", "type": "enum", "options": ["low", "high"], "required": true},
//!     {"name": "location", "type": "location"},
//!     {"name": "site", "type": "reference", "entity": "zone"}
//!   ]
//! }
//! ```

mod validate;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use validate::{FieldViolation, ViolationKind};

use crate::error::SchemaError;

/// Kind of value a field holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Enum { options: Vec<String> },
    Location,
    Reference { entity: String },
    Composite { fields: Vec<FieldSchema> },
}

impl FieldKind {
    /// UI control used to edit a field of this kind
    pub fn widget(&self) -> &'static str {
        match self {
            FieldKind::String => "text_input",
            FieldKind::Number => "number_input",
            FieldKind::Boolean => "checkbox",
            FieldKind::Enum { .. } => "select",
            FieldKind::Location => "map_picker",
            FieldKind::Reference { .. } => "entity_picker",
            FieldKind::Composite { .. } => "fieldset",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Location => "location",
            FieldKind::Reference { .. } => "reference",
            FieldKind::Composite { .. } => "composite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(flatten)]
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Label shown next to the widget, falling back to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Field layout of one custom entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl EntitySchema {
    /// Name of the first top-level location field, if any
    pub fn location_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| matches!(f.kind, FieldKind::Location))
            .map(|f| f.name.as_str())
    }

    /// Every violation in `record`; empty when the record is acceptable
    pub fn validate(&self, record: &Map<String, Value>) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        validate::validate_fields(&self.fields, record, "", &mut violations);
        violations
    }

    /// Like [`EntitySchema::validate`], as a `Result`
    pub fn check(&self, record: &Map<String, Value>) -> Result<(), SchemaError> {
        let violations = self.validate(record);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid {
                entity: self.name.clone(),
                violations,
            })
        }
    }
}
