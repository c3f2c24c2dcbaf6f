//! # fbsgen Codegen
//!
//! FlatBuffers schema generation from XML protocol definitions.
//!
//! This crate provides:
//! - Enum storage-type inference and scalar type translation
//! - Enum, message and command table generation
//! - Include resolution and cross-file enum default propagation
//! - The two-pass directory pipeline

pub mod context;
pub mod error;
pub mod fbs;
pub mod generator;
pub mod naming;

pub use context::{DefaultValueMap, GenerationContext};
pub use error::CodegenError;
pub use fbs::{
    CommandGenerator, EnumGenerator, IncludeResolver, MessageGenerator, StorageType,
    infer_storage_type, translate_field_type,
};
pub use generator::{DEFAULT_NAMESPACE, GenerationReport, Generator, GeneratorConfig};
pub use naming::{param_field_name, to_lower_camel_case};

/// Generates one `.fbs` file per `.xml` file of `input_dir` into `output_dir`.
///
/// # Arguments
/// * `input_dir` - Directory of XML protocol definitions
/// * `output_dir` - Directory receiving the generated schema files
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, default lookup or writing fails.
pub fn generate_dir(
    input_dir: &std::path::Path,
    output_dir: &std::path::Path,
) -> Result<GenerationReport, CodegenError> {
    Generator::new(GeneratorConfig::new(input_dir, output_dir)).run()
}
