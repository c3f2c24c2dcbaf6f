//! FlatBuffers schema text generation modules.

pub mod commands;
pub mod enums;
pub mod includes;
pub mod messages;
pub mod types;

pub use commands::CommandGenerator;
pub use enums::EnumGenerator;
pub use includes::IncludeResolver;
pub use messages::MessageGenerator;
pub use types::{StorageType, infer_storage_type, translate_field_type};

/// Renders free text as a `//` comment block at the given indent.
///
/// Internal newlines become comment continuations.
pub(crate) fn comment_block(indent: &str, text: &str) -> String {
    format!("{indent}// {}\n", text.replace('\n', &format!("\n{indent}//")))
}
