//! Message table generation.

use super::comment_block;
use super::types::translate_field_type;
use crate::context::DefaultValueMap;
use crate::error::CodegenError;
use fbsgen_schema::{FieldDef, FieldKind, MessageDef, SourceUnit};

/// Generator for message tables.
pub struct MessageGenerator<'a> {
    unit: &'a SourceUnit,
    defaults: &'a DefaultValueMap,
}

impl<'a> MessageGenerator<'a> {
    /// Creates a new message generator over a merged default map.
    #[must_use]
    pub fn new(unit: &'a SourceUnit, defaults: &'a DefaultValueMap) -> Self {
        Self { unit, defaults }
    }

    /// Generates all message tables.
    ///
    /// # Errors
    /// Fails on the first field whose type cannot be translated or whose
    /// enum has no default.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        for msg in &self.unit.messages {
            output.push_str(&self.generate_table(msg)?);
        }

        Ok(output)
    }

    /// Generates one table.
    fn generate_table(&self, msg: &MessageDef) -> Result<String, CodegenError> {
        let mut output = String::new();

        if let Some(description) = &msg.description {
            output.push_str(&comment_block("", description));
        }

        output.push_str(&format!("table {} {{\n", msg.name));
        output.push_str(&format!("   _id:uint = {};\n", msg.id));
        output.push('\n');

        for field in &msg.fields {
            output.push_str(&self.generate_field(msg, field)?);
        }

        output.push_str("}\n\n");
        Ok(output)
    }

    /// Generates one field line and its comment.
    fn generate_field(&self, msg: &MessageDef, field: &FieldDef) -> Result<String, CodegenError> {
        let mut output = String::new();

        if let Some(comment) = &field.comment {
            output.push_str(&comment_block("   ", comment));
        }

        match &field.kind {
            FieldKind::Scalar(token) => {
                let fbs_type = translate_field_type(token, &field.name)?;
                output.push_str(&format!("   {}:{};\n", field.name, fbs_type));
            }
            FieldKind::Enum(enum_name) => {
                let default = self.defaults.get(enum_name).ok_or_else(|| {
                    CodegenError::MissingEnumDefault {
                        enum_name: enum_name.clone(),
                        field: field.name.clone(),
                        message: msg.name.clone(),
                    }
                })?;
                output.push_str(&format!("   {}:{} = {};\n", field.name, enum_name, default));
            }
        }

        Ok(output)
    }
}
