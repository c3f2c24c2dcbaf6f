//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fbsgen::prelude::*;
//! ```

// Schema types
pub use fbsgen_schema::{
    CommandParam, EnumDef, EnumEntry, FieldDef, FieldKind, MessageDef, ParseError, SourceUnit,
    parse_protocol, parse_protocol_file,
};

// Codegen types
pub use fbsgen_codegen::{
    CodegenError, DefaultValueMap, GenerationContext, GenerationReport, Generator, GeneratorConfig,
    StorageType, infer_storage_type,
};
