#![allow(non_snake_case)]

use super::*;

const VALID: &str = r#"
[preferences]
name = "AppPreferences"

[[preferences.groups]]
name = "general"
prefix = "app_"
preferences = [{ name = "count", type = "int", default = 3 }]
"#;

const INVALID: &str = r#"
[preferences]
name = "AppPreferences"

[[preferences.groups]]
name = "general"
preferences = [{ name = "count", type = "Integer" }]
"#;

#[test]
fn run___valid_source___writes_formatted_rust() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prefs.toml");
    let output = dir.path().join("prefs.rs");
    std::fs::write(&input, VALID).unwrap();

    run(&input, &output, true).unwrap();

    let code = std::fs::read_to_string(&output).unwrap();
    assert!(code.contains("pub(crate) struct AppPreferences"), "{code}");
    assert!(code.contains("pub(crate) fn count(&self) -> i32"), "{code}");
    assert!(code.lines().count() > 1);
}

#[test]
fn run___no_format___writes_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prefs.toml");
    let output = dir.path().join("prefs.rs");
    std::fs::write(&input, VALID).unwrap();

    run(&input, &output, false).unwrap();

    let code = std::fs::read_to_string(&output).unwrap();
    assert_eq!(code.lines().count(), 1);
}

#[test]
fn run___source_with_errors___writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prefs.toml");
    let output = dir.path().join("prefs.rs");
    std::fs::write(&input, INVALID).unwrap();

    let err = run(&input, &output, true).unwrap_err();

    assert!(err.to_string().ends_with("has 1 error(s), nothing written"), "{err}");
    assert!(!output.exists());
}

#[test]
fn run___missing_input___reports_output_context() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("prefs.rs");

    let err = run(&dir.path().join("missing.toml"), &output, true).unwrap_err();

    assert!(err.to_string().starts_with("Failed to generate"), "{err}");
    assert!(format!("{err:#}").contains("failed to read"), "{err:#}");
}
