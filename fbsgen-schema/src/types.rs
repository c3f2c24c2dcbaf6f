//! Protocol type definitions.
//!
//! This module contains the data structures representing one parsed protocol
//! file: its includes, enums (with optional command parameters) and messages.

use crate::messages::MessageDef;

/// One parsed input file.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    /// Stable unit name (file name without the `.xml` extension).
    pub name: String,
    /// Included unit names, in declaration order, without the `.xml` suffix.
    pub includes: Vec<String>,
    /// Enum definitions in document order.
    pub enums: Vec<EnumDef>,
    /// Message definitions in document order.
    pub messages: Vec<MessageDef>,
}

impl SourceUnit {
    /// Creates a new empty unit.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Records an include reference, stripping a trailing `.xml`.
    pub fn add_include(&mut self, reference: &str) {
        let reference = reference.trim();
        let name = reference.strip_suffix(".xml").unwrap_or(reference);
        self.includes.push(name.to_string());
    }

    /// Adds an enum definition.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.enums.push(enum_def);
    }

    /// Adds a message definition.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.push(message);
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Iterates over every command-oriented entry of every enum.
    pub fn commands(&self) -> impl Iterator<Item = &EnumEntry> {
        self.enums.iter().flat_map(|e| e.commands())
    }
}

/// Enum definition.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Entries in declaration order.
    pub entries: Vec<EnumEntry>,
    /// Free-text description.
    pub description: Option<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
            description: None,
        }
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: EnumEntry) {
        self.entries.push(entry);
    }

    /// Entries emitted as plain enum values.
    pub fn plain_entries(&self) -> impl Iterator<Item = &EnumEntry> {
        self.entries.iter().filter(|e| !e.is_command())
    }

    /// Entries carrying parameters, emitted as tables.
    pub fn commands(&self) -> impl Iterator<Item = &EnumEntry> {
        self.entries.iter().filter(|e| e.is_command())
    }

    /// Returns `(min, max)` over the plain entry values.
    #[must_use]
    pub fn value_range(&self) -> Option<(i64, i64)> {
        self.plain_entries().fold(None, |range, entry| match range {
            None => Some((entry.value, entry.value)),
            Some((min, max)) => Some((min.min(entry.value), max.max(entry.value))),
        })
    }

    /// Returns the plain entry with the smallest value.
    ///
    /// On ties the first entry in declaration order wins.
    #[must_use]
    pub fn default_entry(&self) -> Option<&EnumEntry> {
        self.plain_entries().fold(None, |best: Option<&EnumEntry>, entry| match best {
            Some(b) if b.value <= entry.value => Some(b),
            _ => Some(entry),
        })
    }
}

/// Enum entry.
#[derive(Debug, Clone)]
pub struct EnumEntry {
    /// Entry name.
    pub name: String,
    /// Integer value.
    pub value: i64,
    /// Description.
    pub description: Option<String>,
    /// Command parameters (empty for a plain value).
    pub params: Vec<CommandParam>,
}

impl EnumEntry {
    /// Creates a new plain entry.
    #[must_use]
    pub fn new(name: String, value: i64) -> Self {
        Self {
            name,
            value,
            description: None,
            params: Vec::new(),
        }
    }

    /// Returns true if this entry owns parameters.
    #[must_use]
    pub fn is_command(&self) -> bool {
        !self.params.is_empty()
    }
}

/// Parameter of a command-oriented entry.
#[derive(Debug, Clone, Default)]
pub struct CommandParam {
    /// Parameter index.
    pub index: u32,
    /// Human-readable label.
    pub label: Option<String>,
    /// Minimum value.
    pub min_value: Option<String>,
    /// Maximum value.
    pub max_value: Option<String>,
    /// Increment.
    pub increment: Option<String>,
    /// Units.
    pub units: Option<String>,
    /// Text content.
    pub description: Option<String>,
}

impl CommandParam {
    /// Creates a parameter with only an index.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// Native fixed-width scalar names accepted in `field/@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
}

impl NativeType {
    /// Parses a native type token such as `uint16_t`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "int8_t" => Some(Self::Int8),
            "uint8_t" => Some(Self::Uint8),
            "int16_t" => Some(Self::Int16),
            "uint16_t" => Some(Self::Uint16),
            "int32_t" => Some(Self::Int32),
            "uint32_t" => Some(Self::Uint32),
            "int64_t" => Some(Self::Int64),
            "uint64_t" => Some(Self::Uint64),
            "float32_t" => Some(Self::Float32),
            "float64_t" => Some(Self::Float64),
            _ => None,
        }
    }

    /// Returns the FlatBuffers scalar token.
    #[must_use]
    pub const fn fbs_name(&self) -> &'static str {
        match self {
            Self::Int8 => "byte",
            Self::Uint8 => "ubyte",
            Self::Int16 => "short",
            Self::Uint16 => "ushort",
            Self::Int32 => "int",
            Self::Uint32 => "uint",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float32 => "float",
            Self::Float64 => "float64",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, value: i64) -> EnumEntry {
        EnumEntry::new(name.to_string(), value)
    }

    #[test]
    fn test_native_type_mapping() {
        assert_eq!(NativeType::from_token("uint8_t"), Some(NativeType::Uint8));
        assert_eq!(NativeType::Uint8.fbs_name(), "ubyte");
        assert_eq!(NativeType::Int32.fbs_name(), "int");
        assert_eq!(NativeType::Float64.fbs_name(), "float64");
        assert_eq!(NativeType::from_token("uint8"), None);
    }

    #[test]
    fn test_default_entry_is_minimum() {
        let mut e = EnumDef::new("Mode".to_string());
        e.add_entry(entry("B", 3));
        e.add_entry(entry("A", -2));
        e.add_entry(entry("C", 9));
        assert_eq!(e.default_entry().map(|d| d.name.as_str()), Some("A"));
        assert_eq!(e.value_range(), Some((-2, 9)));
    }

    #[test]
    fn test_default_entry_tie_first_wins() {
        let mut e = EnumDef::new("Dup".to_string());
        e.add_entry(entry("FIRST", 0));
        e.add_entry(entry("SECOND", 0));
        assert_eq!(e.default_entry().map(|d| d.name.as_str()), Some("FIRST"));
    }

    #[test]
    fn test_commands_excluded_from_range() {
        let mut e = EnumDef::new("Cmd".to_string());
        e.add_entry(entry("NOOP", 5));
        let mut takeoff = entry("TAKEOFF", 1);
        takeoff.params.push(CommandParam::new(1));
        e.add_entry(takeoff);

        assert_eq!(e.value_range(), Some((5, 5)));
        assert_eq!(e.default_entry().map(|d| d.name.as_str()), Some("NOOP"));
        assert_eq!(e.commands().count(), 1);
    }

    #[test]
    fn test_empty_enum_has_no_default() {
        let e = EnumDef::new("Empty".to_string());
        assert!(e.default_entry().is_none());
        assert!(e.value_range().is_none());
    }

    #[test]
    fn test_add_include_strips_suffix() {
        let mut unit = SourceUnit::new("telemetry");
        unit.add_include(" common.xml ");
        unit.add_include("other");
        assert_eq!(unit.includes, vec!["common", "other"]);
    }
}
