//! Enum declaration generation.

use super::comment_block;
use super::types::infer_storage_type;
use crate::context::DefaultValueMap;
use fbsgen_schema::{EnumDef, SourceUnit};

/// Generator for enum declarations.
pub struct EnumGenerator<'a> {
    unit: &'a SourceUnit,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(unit: &'a SourceUnit) -> Self {
        Self { unit }
    }

    /// Generates every enum of the unit, recording each default entry.
    pub fn generate(&self, defaults: &mut DefaultValueMap) -> String {
        let mut output = String::new();

        for enum_def in &self.unit.enums {
            output.push_str(&self.generate_enum(enum_def, defaults));
        }

        output
    }

    /// Generates one enum declaration.
    ///
    /// Command-oriented entries are left out; an enum with no plain entries
    /// produces nothing and records no default.
    pub fn generate_enum(&self, enum_def: &EnumDef, defaults: &mut DefaultValueMap) -> String {
        let (Some((min, max)), Some(default_entry)) =
            (enum_def.value_range(), enum_def.default_entry())
        else {
            tracing::debug!(
                "Enum {} in {} has no plain entries, skipping declaration",
                enum_def.name,
                self.unit.name
            );
            return String::new();
        };

        let mut output = String::new();
        let storage = infer_storage_type(min, max);

        if let Some(description) = &enum_def.description {
            output.push_str(&comment_block("", description));
        }

        output.push_str(&format!("enum {} : {}\n{{\n", enum_def.name, storage));
        let entries: Vec<String> = enum_def
            .plain_entries()
            .map(|entry| format!("   {}={}", entry.name, entry.value))
            .collect();
        output.push_str(&entries.join(",\n"));
        output.push_str("\n}\n\n\n");

        tracing::debug!(
            "Enum {} : {} (default {})",
            enum_def.name,
            storage,
            default_entry.name
        );
        defaults.insert(enum_def.name.clone(), default_entry.name.clone());

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbsgen_schema::parse_protocol;

    fn unit(xml: &str) -> SourceUnit {
        parse_protocol(xml, "test").expect("Failed to parse")
    }

    #[test]
    fn test_generate_enum() {
        let unit = unit(
            r#"<root><enum name="Status">
                <description>Outcome</description>
                <entry name="OK" value="0"/>
                <entry name="FAIL" value="1"/>
            </enum></root>"#,
        );
        let mut defaults = DefaultValueMap::new();
        let output = EnumGenerator::new(&unit).generate(&mut defaults);

        assert_eq!(
            output,
            "// Outcome\nenum Status : ubyte\n{\n   OK=0,\n   FAIL=1\n}\n\n\n"
        );
        assert_eq!(defaults.get("Status"), Some("OK"));
    }

    #[test]
    fn test_entries_keep_declaration_order() {
        let unit = unit(
            r#"<root><enum name="Level">
                <entry name="HIGH" value="300"/>
                <entry name="LOW" value="200"/>
                <entry name="MID" value="250"/>
            </enum></root>"#,
        );
        let mut defaults = DefaultValueMap::new();
        let output = EnumGenerator::new(&unit).generate(&mut defaults);

        let pairs: Vec<(String, i64)> = output
            .lines()
            .filter_map(|line| line.trim().trim_end_matches(',').split_once('='))
            .map(|(name, value)| (name.to_string(), value.parse().unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("HIGH".to_string(), 300),
                ("LOW".to_string(), 200),
                ("MID".to_string(), 250)
            ]
        );
        assert!(output.contains("enum Level : ushort"));
        assert_eq!(defaults.get("Level"), Some("LOW"));
    }

    #[test]
    fn test_negative_values() {
        let unit = unit(
            r#"<root><enum name="Delta">
                <entry name="UP" value="1"/>
                <entry name="DOWN" value="-1"/>
            </enum></root>"#,
        );
        let mut defaults = DefaultValueMap::new();
        let output = EnumGenerator::new(&unit).generate(&mut defaults);

        assert!(output.contains("enum Delta : byte"));
        assert!(output.contains("   DOWN=-1"));
        assert_eq!(defaults.get("Delta"), Some("DOWN"));
    }

    #[test]
    fn test_multiline_description() {
        let unit = unit(
            r#"<root><enum name="E">
                <description>first
second</description>
                <entry name="A" value="0"/>
            </enum></root>"#,
        );
        let mut defaults = DefaultValueMap::new();
        let output = EnumGenerator::new(&unit).generate(&mut defaults);
        assert!(output.starts_with("// first\n//second\nenum E : ubyte\n"));
    }

    #[test]
    fn test_command_entries_are_excluded() {
        let unit = unit(
            r#"<root><enum name="Cmd">
                <entry name="TAKEOFF" value="22"><param index="1" label="Pitch"/></entry>
                <entry name="NONE" value="500"/>
            </enum>
            <enum name="OnlyCommands">
                <entry name="LAND" value="21"><param index="1"/></entry>
            </enum></root>"#,
        );
        let mut defaults = DefaultValueMap::new();
        let output = EnumGenerator::new(&unit).generate(&mut defaults);

        assert!(output.contains("enum Cmd : ushort"));
        assert!(!output.contains("TAKEOFF"));
        assert!(!output.contains("OnlyCommands"));
        assert_eq!(defaults.get("Cmd"), Some("NONE"));
        assert_eq!(defaults.get("OnlyCommands"), None);
    }
}
