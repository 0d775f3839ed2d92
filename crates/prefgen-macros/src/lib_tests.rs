#![allow(non_snake_case)]

use super::*;

const VALID: &str = r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "general"
preferences = [{ name = "count", type = "int" }]
"#;

fn lit(value: &str) -> LitStr {
    LitStr::new(value, Span::call_site())
}

// expand_source tests

#[test]
fn expand_source___valid_declaration___generates_class() {
    let tokens = expand_source(VALID, Span::call_site()).to_string();

    assert!(tokens.contains("struct Prefs"));
    assert!(!tokens.contains("compile_error"));
}

#[test]
fn expand_source___invalid_declaration___one_compile_error_per_error() {
    let source = r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "general"
preferences = [{ name = "1a", type = "int" }, { name = "b", type = "Nope" }]
"#;

    let tokens = expand_source(source, Span::call_site()).to_string();

    assert_eq!(tokens.matches("compile_error").count(), 2);
    assert!(tokens.contains("Illegal preference name: 1a"));
    assert!(tokens.contains("Unknown type: Nope"));
}

#[test]
fn expand_source___warnings_only___no_compile_error() {
    let source = "[preferences]\nname = \"Prefs\"\n\n[[preferences.groups]]\nname = \"empty\"\n";

    let tokens = expand_source(source, Span::call_site()).to_string();

    assert!(!tokens.contains("compile_error"));
}

// expand_file tests

#[test]
fn expand_file___missing_file___reports_read_failure() {
    let tokens = expand_file(&lit("does/not/exist.toml"), Path::new("/nonexistent")).to_string();

    assert!(tokens.contains("compile_error"));
    assert!(tokens.contains("failed to read"));
}

#[test]
fn expand_file___fixture___tracks_file_with_include_str() {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let tokens = expand_file(&lit("tests/fixtures/general.toml"), manifest_dir).to_string();

    assert!(tokens.contains("include_str"));
    assert!(tokens.contains("general.toml"));
    assert!(tokens.contains("struct Prefs"));
}

#[test]
fn resolve_path___relative___joined_to_manifest_dir() {
    let path = resolve_path(Path::new("/work/app"), "prefs/app.toml");

    assert_eq!(path, PathBuf::from("/work/app/prefs/app.toml"));
}

#[test]
fn resolve_path___absolute___kept() {
    let path = resolve_path(Path::new("/work/app"), "/etc/prefs.toml");

    assert_eq!(path, PathBuf::from("/etc/prefs.toml"));
}

// PreferenceEnum derive tests

#[test]
fn expand_preference_enum___unit_enum___implements_trait() {
    let input: DeriveInput = syn::parse_quote! {
        enum Theme { Light, Dark }
    };

    let tokens = expand_preference_enum(&input).unwrap().to_string();

    assert!(tokens.contains("PreferenceEnum for Theme"));
    assert!(tokens.contains("\"Light\""));
    assert!(tokens.contains("\"Dark\""));
    assert!(tokens.contains("TYPE_NAME"));
}

#[test]
fn expand_preference_enum___rename___uses_persisted_name() {
    let input: DeriveInput = syn::parse_quote! {
        #[preference(type_name = "ColorTheme")]
        enum Theme {
            Light,
            #[preference(rename = "night")]
            Dark,
        }
    };

    let tokens = expand_preference_enum(&input).unwrap().to_string();

    assert!(tokens.contains("\"night\""));
    assert!(!tokens.contains("\"Dark\""));
    assert!(tokens.contains("\"ColorTheme\""));
}

#[test]
fn expand_preference_enum___custom_runtime___uses_path() {
    let input: DeriveInput = syn::parse_quote! {
        #[preference(runtime = "crate::rt")]
        enum Theme { Light }
    };

    let tokens = expand_preference_enum(&input).unwrap().to_string();

    assert!(tokens.contains("crate :: rt :: PreferenceEnum"));
}

#[test]
fn expand_preference_enum___duplicate_names___rejected() {
    let input: DeriveInput = syn::parse_quote! {
        enum Theme {
            Light,
            #[preference(rename = "Light")]
            Bright,
        }
    };

    let err = expand_preference_enum(&input).unwrap_err();

    assert!(err.to_string().contains("duplicate persisted name 'Light'"));
}

#[test]
fn expand_preference_enum___tuple_variant___rejected() {
    let input: DeriveInput = syn::parse_quote! {
        enum Theme { Custom(u32) }
    };

    assert!(expand_preference_enum(&input).is_err());
}

#[test]
fn expand_preference_enum___struct___rejected() {
    let input: DeriveInput = syn::parse_quote! {
        struct Theme;
    };

    assert!(expand_preference_enum(&input).is_err());
}
