//! # fbsgen Schema
//!
//! XML protocol-definition parser and model types.
//!
//! This crate provides:
//! - Streaming XML parsing of `<include>`, `<enum>`, `<entry>`/`<param>` and
//!   `<messages>/<message>`/`<field>` elements
//! - Model types for parsed units, enums, commands and messages
//! - The native scalar vocabulary (`uint8_t`, `float32_t`, ...)

pub mod error;
pub mod messages;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use messages::{FieldDef, FieldKind, MessageDef};
pub use parser::{parse_protocol, parse_protocol_file};
pub use types::{CommandParam, EnumDef, EnumEntry, NativeType, SourceUnit};
