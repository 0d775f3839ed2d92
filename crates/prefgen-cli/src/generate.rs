//! Rust source generation

use anyhow::{Context, Result};
use prefgen_codegen::GenerateFileError;
use std::path::Path;

/// Generate the accessors declared in `input` and write them to `output`.
///
/// Nothing is written if the declaration has errors; every diagnostic is
/// printed to stderr instead.
pub fn run(input: &Path, output: &Path, format: bool) -> Result<()> {
    match prefgen_codegen::generate_file(input, output, format) {
        Ok(()) => {
            println!("Generated {}", output.display());
            Ok(())
        }
        Err(GenerateFileError::Generation(failure)) => {
            for diagnostic in failure.diagnostics() {
                eprintln!("{diagnostic}");
            }
            anyhow::bail!(
                "{} has {} error(s), nothing written",
                input.display(),
                failure.error_count()
            )
        }
        Err(err) => Err(err).with_context(|| format!("Failed to generate {}", output.display())),
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
