//! Declaration source validation

use anyhow::{Context, Result};
use prefgen_codegen::Diagnostics;
use std::path::Path;

/// Check the declaration source at `input` and print its diagnostics.
///
/// Fails if any error was reported, so the process exits non-zero.
pub fn run(input: &Path, json: bool) -> Result<()> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read declaration source: {}", input.display()))?;

    let diagnostics = prefgen_codegen::check(&source);
    if json {
        println!("{}", render_json(&diagnostics)?);
    } else {
        print!("{}", render_text(&diagnostics));
    }

    if diagnostics.has_errors() {
        anyhow::bail!(
            "{} has {} error(s)",
            input.display(),
            diagnostics.error_count()
        );
    }
    Ok(())
}

/// One line per diagnostic followed by a summary line.
pub fn render_text(diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics.iter() {
        out.push_str(&diagnostic.to_string());
        out.push('\n');
    }

    let errors = diagnostics.error_count();
    let warnings = diagnostics.len() - errors;
    if diagnostics.is_empty() {
        out.push_str("ok: no problems found\n");
    } else {
        out.push_str(&format!("{errors} error(s), {warnings} warning(s)\n"));
    }
    out
}

pub fn render_json(diagnostics: &Diagnostics) -> Result<String> {
    serde_json::to_string_pretty(diagnostics).context("Failed to serialize diagnostics")
}
