//! prefgen-codegen - Typed preference accessors generated from a declaration source
//!
//! A single pass turns a TOML declaration source into Rust code:
//! - [`schema`] loads the source
//! - [`universe`], [`classify`] and [`resolve`] decide how each preference is persisted
//! - [`model`] validates names, defaults and accessors, reporting into [`Diagnostics`]
//! - [`emit`] writes the generated class if no error was reported
//!
//! # Example
//!
//! ```
//! let source = r#"
//! [preferences]
//! name = "AppPreferences"
//!
//! [[preferences.groups]]
//! name = "general"
//! prefix = "app_"
//! suffix = "_key"
//! preferences = [{ name = "count", type = "int" }]
//! "#;
//!
//! let tokens = prefgen_codegen::generate(source).unwrap();
//! let code = prefgen_codegen::format_tokens(&tokens).unwrap();
//! assert!(code.contains("pub(crate) fn count(&self) -> i32"));
//! ```

pub mod classify;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod model;
pub mod naming;
pub mod resolve;
pub mod schema;
pub mod types;
pub mod universe;
pub mod validate;

pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Location, Severity};
pub use error::{GenerateFileError, GenerationFailure, SchemaError};
pub use model::RootModel;
pub use schema::SchemaDocument;

use proc_macro2::TokenStream;
use std::path::Path;

/// Validate a declaration source and build its model.
///
/// The model is `None` if the source did not parse or the class name is
/// unusable. A model may be returned alongside errors; it must not be emitted
/// in that case.
pub fn analyze(source: &str) -> (Option<RootModel>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let document = match SchemaDocument::from_str(source) {
        Ok(document) => document,
        Err(err) => {
            diagnostics.report(&Location::source(), err.to_string());
            return (None, diagnostics);
        }
    };
    let model = model::root::build(&document, &mut diagnostics);
    (model, diagnostics)
}

/// Validate a declaration source without generating code.
pub fn check(source: &str) -> Diagnostics {
    let (_, diagnostics) = analyze(source);
    tracing::info!(
        diagnostics = diagnostics.len(),
        errors = diagnostics.error_count(),
        "declaration source checked"
    );
    diagnostics
}

/// Generate the preference class declared by `source`.
///
/// Fails with every collected diagnostic if any error was reported.
pub fn generate(source: &str) -> Result<TokenStream, GenerationFailure> {
    match analyze(source) {
        (Some(model), diagnostics) if !diagnostics.has_errors() => Ok(emit::emit(&model)),
        (_, diagnostics) => {
            tracing::info!(errors = diagnostics.error_count(), "generation failed");
            Err(GenerationFailure::new(diagnostics.into_vec()))
        }
    }
}

/// Pretty-print generated tokens as a source file.
pub fn format_tokens(tokens: &TokenStream) -> Result<String, syn::Error> {
    let file: syn::File = syn::parse2(tokens.clone())?;
    Ok(prettyplease::unparse(&file))
}

/// Generate from the declaration source at `input` and write the code to `output`.
///
/// With `format` the output is pretty-printed, otherwise it is the raw token
/// stream on a single line.
pub fn generate_file(input: &Path, output: &Path, format: bool) -> Result<(), GenerateFileError> {
    let source = std::fs::read_to_string(input).map_err(|source| GenerateFileError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let tokens = generate(&source)?;
    let code = if format {
        format_tokens(&tokens)?
    } else {
        format!("{tokens}\n")
    };

    std::fs::write(output, code).map_err(|source| GenerateFileError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(input = %input.display(), output = %output.display(), "generated preferences");
    Ok(())
}
