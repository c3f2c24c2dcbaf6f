//! Include resolution and file header generation.

use fbsgen_schema::SourceUnit;

/// Resolves a unit's `<include>` references and renders the file header.
pub struct IncludeResolver<'a> {
    unit: &'a SourceUnit,
}

impl<'a> IncludeResolver<'a> {
    /// Creates a new include resolver.
    #[must_use]
    pub fn new(unit: &'a SourceUnit) -> Self {
        Self { unit }
    }

    /// Returns the included unit names in declaration order.
    #[must_use]
    pub fn includes(&self) -> Vec<String> {
        self.unit.includes.clone()
    }

    /// Generates the include directives followed by the namespace declaration.
    #[must_use]
    pub fn generate(&self, namespace: &str) -> String {
        let mut output = String::new();

        for include in &self.unit.includes {
            output.push_str(&format!("include \"{include}.fbs\";\n"));
        }
        output.push_str(&format!("\n\nnamespace {namespace};\n\n"));

        output
    }
}
