//! Message definitions.
//!
//! A message becomes one table in the generated schema; its fields are either
//! typed by a scalar/array token or by a reference to an enum.

/// Message definition.
#[derive(Debug, Clone)]
pub struct MessageDef {
    /// Message name.
    pub name: String,
    /// Numeric message id.
    pub id: u32,
    /// Description.
    pub description: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    /// Creates a new message definition.
    #[must_use]
    pub fn new(name: String, id: u32) -> Self {
        Self {
            name,
            id,
            description: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field to the message.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }
}

/// Field definition within a message.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    pub kind: FieldKind,
    /// Text content, written as a comment above the field.
    pub comment: Option<String>,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: String, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            comment: None,
        }
    }
}

/// How a field is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw `type` token, e.g. `uint16_t` or `float32_t[4]`.
    Scalar(String),
    /// Name of a referenced enum.
    Enum(String),
}
