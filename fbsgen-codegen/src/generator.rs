//! Two-pass generation pipeline.
//!
//! The preparation pass parses every input file, writes its include and
//! namespace header plus its enum declarations, and records includes and enum
//! defaults in a [`GenerationContext`]. The conversion pass re-parses every
//! file and appends message and command tables using the merged defaults of
//! the file's include closure. Preparation always completes for the whole
//! input set before conversion starts.

use crate::context::GenerationContext;
use crate::error::CodegenError;
use crate::fbs::{CommandGenerator, EnumGenerator, IncludeResolver, MessageGenerator};
use fbsgen_schema::parse_protocol_file;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Namespace declared at the top of every generated file.
pub const DEFAULT_NAMESPACE: &str = "uav4pi";

/// Input and output locations for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding the `.xml` protocol definitions.
    pub input_dir: PathBuf,
    /// Directory receiving the `.fbs` files.
    pub output_dir: PathBuf,
    /// Namespace declared in every generated file.
    pub namespace: String,
}

impl GeneratorConfig {
    /// Creates a configuration with the default namespace.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Generated `.fbs` files, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Drives both generation passes over an input directory.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Lists the `.xml` files of the input directory, sorted by name.
    ///
    /// # Errors
    /// Returns an IO error if the directory cannot be read.
    pub fn input_files(&self) -> Result<Vec<PathBuf>, CodegenError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Returns the output path for a unit.
    #[must_use]
    pub fn output_path(&self, unit_name: &str) -> PathBuf {
        self.config.output_dir.join(format!("{unit_name}.fbs"))
    }

    /// Runs both passes.
    ///
    /// # Errors
    /// Any parse, lookup or IO error aborts the whole run.
    pub fn run(&self) -> Result<GenerationReport, CodegenError> {
        tracing::info!("Starting the XML conversion");
        std::fs::create_dir_all(&self.config.output_dir)?;

        let files = self.input_files()?;
        let mut context = GenerationContext::new();

        self.prepare(&files, &mut context)?;
        let outputs = self.convert(&files, &context)?;

        tracing::info!("Generated {} schema file(s)", outputs.len());
        Ok(GenerationReport { outputs })
    }

    /// Preparation pass: headers, enums, includes and defaults.
    ///
    /// # Errors
    /// Returns the first parse or IO error.
    pub fn prepare(
        &self,
        files: &[PathBuf],
        context: &mut GenerationContext,
    ) -> Result<(), CodegenError> {
        for path in files {
            let unit = parse_protocol_file(path)?;
            tracing::info!("Preparing {}", unit.name);

            let resolver = IncludeResolver::new(&unit);
            let mut file = File::create(self.output_path(&unit.name))?;
            file.write_all(resolver.generate(&self.config.namespace).as_bytes())?;

            let enums = EnumGenerator::new(&unit).generate(context.defaults_mut(&unit.name));
            file.write_all(enums.as_bytes())?;

            context.record_includes(&unit.name, resolver.includes());
        }
        Ok(())
    }

    /// Conversion pass: message and command tables.
    ///
    /// # Errors
    /// Returns the first parse, type, missing-default or IO error.
    pub fn convert(
        &self,
        files: &[PathBuf],
        context: &GenerationContext,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let mut outputs = Vec::with_capacity(files.len());

        for path in files {
            let unit = parse_protocol_file(path)?;
            let defaults = context.merged_defaults(&unit.name);
            tracing::info!("Converting {}", display_name(path));

            let mut tables = MessageGenerator::new(&unit, &defaults).generate()?;
            tables.push_str(&CommandGenerator::new(&unit).generate());

            let output = self.output_path(&unit.name);
            let mut file = OpenOptions::new().append(true).open(&output)?;
            file.write_all(tables.as_bytes())?;
            outputs.push(output);
        }

        Ok(outputs)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
