//! # fbsgen
//!
//! Translate a directory of XML protocol definitions into FlatBuffers schema
//! (`.fbs`) files.
//!
//! ## Features
//!
//! - **Enum storage inference** - The narrowest integer type is picked from each
//!   enum's value range
//! - **Cross-file defaults** - Enum defaults propagate through `<include>` chains
//!   into the tables that reference them
//! - **Command tables** - Enum entries carrying `<param>` children become tables
//!
//! ## Quick Start
//!
//! ```ignore
//! use fbsgen::prelude::*;
//!
//! let config = GeneratorConfig::new("definitions", "generated");
//! let report = Generator::new(config).run()?;
//! println!("wrote {} files", report.outputs.len());
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - XML parsing and protocol model types
//! - [`codegen`] - Schema generation and the two-pass pipeline

pub mod prelude;

/// XML parsing and protocol model types.
pub mod schema {
    pub use fbsgen_schema::*;
}

/// Schema generation and the two-pass pipeline.
pub mod codegen {
    pub use fbsgen_codegen::*;
}
