#![allow(non_snake_case)]

use super::*;
use crate::diagnostics::Severity;

fn build_source(source: &str) -> (Option<RootModel>, Diagnostics) {
    let document = SchemaDocument::from_str(source).unwrap();
    let mut diagnostics = Diagnostics::new();
    let model = build(&document, &mut diagnostics);
    (model, diagnostics)
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}

const GENERAL: &str = r#"
[preferences]
name = "com.example.AppPreferences"

[[preferences.groups]]
name = "general"
prefix = "app_"
suffix = "_key"

[[preferences.groups.preferences]]
name = "count"
type = "int"
"#;

#[test]
fn build___qualified_name___splits_modules_and_class() {
    let (model, diagnostics) = build_source(GENERAL);

    let model = model.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(model.modules, ["com", "example"]);
    assert_eq!(model.class_name, "AppPreferences");
    assert_eq!(model.state_type_name(), "AppPreferencesState");
    assert_eq!(model.state_static_name(), "APP_PREFERENCES_STATE");
    assert_eq!(model.preference_count(), 1);
    assert!(!model.finalized);
    assert!(model.fluent && model.editor && model.emit_docs);
}

#[test]
fn build___default_runtime___prefgen_core_path() {
    let (model, _) = build_source(GENERAL);

    let runtime = model.unwrap().runtime;
    assert!(runtime.leading_colon.is_some());
    assert_eq!(runtime.segments.len(), 1);
    assert_eq!(runtime.segments[0].ident.to_string(), "prefgen_core");
}

#[test]
fn build___illegal_class_name___reports_and_returns_none() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "com..Prefs"
"#,
    );

    assert!(model.is_none());
    assert_eq!(messages(&diagnostics), ["Illegal preference class name: com..Prefs"]);
}

#[test]
fn build___reserved_module_segment___rejected() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "crate.Prefs"
"#,
    );

    assert!(model.is_none());
    assert!(diagnostics.has_errors());
}

#[test]
fn build___illegal_runtime_path___reported_at_generator() {
    let (model, diagnostics) = build_source(
        r#"
[generator]
runtime_crate = "not a path"

[preferences]
name = "Prefs"
"#,
    );

    assert!(model.is_none());
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.location, Location::generator());
    assert!(diagnostic.message.starts_with("Illegal runtime crate path not a path"));
}

#[test]
fn build___duplicate_group___reported() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "general"
preferences = [{ name = "a", type = "int" }]

[[preferences.groups]]
name = "general"
preferences = [{ name = "b", type = "int" }]
"#,
    );

    assert_eq!(model.unwrap().groups.len(), 1);
    assert_eq!(messages(&diagnostics), ["Duplicate preference group name: general"]);
}

#[test]
fn build___group_type_clashing_with_class___reported() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "General"

[[preferences.groups]]
name = "general"
preferences = [{ name = "a", type = "int" }]
"#,
    );

    assert!(model.unwrap().groups.is_empty());
    assert_eq!(
        messages(&diagnostics),
        ["Preference group general generates type General which already exists"]
    );
}

#[test]
fn build___group_named_clear___shadows_root_method() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "clear"
preferences = [{ name = "a", type = "int" }]
"#,
    );

    assert!(model.unwrap().groups.is_empty());
    assert!(diagnostics.has_errors());
}

#[test]
fn build___errors_in_several_groups___all_collected() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "first"
preferences = [{ name = "a", type = "Object" }, { name = "b", type = "int" }]

[[preferences.groups]]
name = "second"
prefix = "-"
preferences = [{ name = "c", type = "int" }]

[[preferences.groups]]
name = "third"
preferences = [{ name = "d", type = "Nope" }]
"#,
    );

    assert_eq!(model.unwrap().groups.len(), 2);
    assert_eq!(
        messages(&diagnostics),
        [
            "Unsupported preference type: Object",
            "Illegal preference group prefix: -",
            "Unknown type: Nope",
        ]
    );
}

#[test]
fn build___declared_types___feed_serializer_resolution() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "general"

[[preferences.groups.preferences]]
name = "theme"
type = "crate::Theme"

[[preferences.groups.preferences]]
name = "limit"
type = "crate::BigInteger"
serializer = "crate::BigIntegerSerializer"

[[types]]
name = "crate::Theme"
kind = "enum"

[[types]]
name = "crate::BigInteger"
supertypes = ["Number"]

[[types]]
name = "crate::BigIntegerSerializer"
supertypes = ["PreferenceSerializer<crate::BigInteger, String>"]
"#,
    );

    assert!(diagnostics.is_empty(), "{:?}", messages(&diagnostics));
    let group = &model.unwrap().groups[0];
    assert_eq!(group.preferences.len(), 2);
    assert!(group.preferences.iter().all(|p| p.binding.has_serializer()));
}

#[test]
fn build___unknown_supertype___reported_at_type() {
    let (_, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[types]]
name = "Thing"
supertypes = ["Missing"]
"#,
    );

    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.location, Location::type_decl(0, "Thing"));
    assert_eq!(diagnostic.message, "Unknown type: Missing");
}

#[test]
fn build___cyclic_types___reported() {
    let (_, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[types]]
name = "A"
supertypes = ["B"]

[[types]]
name = "B"
supertypes = ["A"]
"#,
    );

    assert_eq!(diagnostics.matching("Cyclic inheritance").count(), 2);
}

#[test]
fn build___builtin_redeclared___duplicate_reported() {
    let (_, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[types]]
name = "String"
"#,
    );

    assert_eq!(messages(&diagnostics), ["Duplicate type declaration: String"]);
}

#[test]
fn build___primitive_type_name___illegal() {
    let (_, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[types]]
name = "int"
"#,
    );

    assert_eq!(messages(&diagnostics), ["Illegal type name: int"]);
}

#[test]
fn build___unknown_resources_type___reported() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"
resources = "crate::R"
"#,
    );

    assert_eq!(model.unwrap().resources, None);
    assert_eq!(messages(&diagnostics), ["Unknown type: crate::R"]);
}

#[test]
fn build___empty_group___only_warning() {
    let (model, diagnostics) = build_source(
        r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "general"
"#,
    );

    assert_eq!(model.unwrap().groups.len(), 1);
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn build___groups_named_store_and_strings___accepted() {
    let source = r#"
[preferences]
name = "Prefs"

[[preferences.groups]]
name = "store"
preferences = [{ name = "count", type = "int" }]

[[preferences.groups]]
name = "strings"
preferences = [{ name = "label", type = "String" }]
"#;

    let (model, diagnostics) = build_source(source);

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let fields: Vec<String> = model
        .unwrap()
        .groups
        .iter()
        .map(|g| g.cell_field_name())
        .collect();
    assert_eq!(fields, ["store_group", "strings_group"]);
}

#[test]
fn build___non_xid_class_name___reports_and_returns_none() {
    let (model, diagnostics) = build_source(
        "
[preferences]
name = \"com.Prefs\u{b2}\"
",
    );

    assert!(model.is_none());
    assert_eq!(messages(&diagnostics), ["Illegal preference class name: com.Prefs\u{b2}"]);
}
