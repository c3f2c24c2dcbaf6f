//! Command table generation.
//!
//! Enum entries that carry `<param>` children are emitted as tables, one
//! `float` field per parameter.

use super::comment_block;
use crate::naming::param_field_name;
use fbsgen_schema::{CommandParam, EnumEntry, SourceUnit};

/// Generator for command tables.
pub struct CommandGenerator<'a> {
    unit: &'a SourceUnit,
}

impl<'a> CommandGenerator<'a> {
    /// Creates a new command generator.
    #[must_use]
    pub fn new(unit: &'a SourceUnit) -> Self {
        Self { unit }
    }

    /// Generates a table for every command-oriented entry of the unit.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for entry in self.unit.commands() {
            tracing::info!("Generating the command {}", entry.name);
            output.push_str(&self.generate_command(entry));
        }

        output
    }

    /// Generates one command table.
    fn generate_command(&self, entry: &EnumEntry) -> String {
        let mut output = String::new();

        if let Some(description) = &entry.description {
            output.push_str(&comment_block("", description));
        }

        output.push_str(&format!("table {} {{\n", entry.name));
        for param in &entry.params {
            output.push_str(&self.generate_param(param));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the metadata comments and field line of one parameter.
    fn generate_param(&self, param: &CommandParam) -> String {
        let mut output = String::new();

        if let Some(description) = &param.description {
            output.push_str(&comment_block("   ", description));
        }
        let metadata = [
            ("minValue", &param.min_value),
            ("maxValue", &param.max_value),
            ("increment", &param.increment),
            ("units", &param.units),
        ];
        for (key, value) in metadata {
            if let Some(value) = value {
                output.push_str(&format!("   // {key}: {value}\n"));
            }
        }

        let name = param_field_name(param.label.as_deref(), param.index);
        output.push_str(&format!("   {name}:float;\n"));

        output
    }
}
