#![allow(non_snake_case)]

use super::*;
use crate::diagnostics::{Diagnostics, Severity};
use crate::resolve::{Construction, Strategy};
use crate::universe::{TypeDecl, TypeUniverse};
use test_case::test_case;

fn universe() -> TypeUniverse {
    let mut universe = TypeUniverse::with_builtins();
    universe.declare(TypeDecl::enumeration("Theme")).unwrap();
    universe
}

fn pref(name: &str, ty: &str) -> PreferenceSection {
    PreferenceSection {
        name: name.to_string(),
        ty: ty.to_string(),
        default: None,
        description: String::new(),
        serializer: None,
    }
}

fn build_one(decl: &PreferenceSection, fluent: bool) -> (Option<PreferenceModel>, Diagnostics) {
    let universe = universe();
    let mut diagnostics = Diagnostics::new();
    let mut ctx = BuildContext {
        universe: &universe,
        diagnostics: &mut diagnostics,
        fluent,
        editor: true,
    };
    let model = build(&mut ctx, 0, "app_", "_key", 0, decl);
    (model, diagnostics)
}

#[test]
fn build___int_without_default___zero_default_and_prefixed_key() {
    let (model, diagnostics) = build_one(&pref("count", "int"), true);

    let model = model.unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(model.key_resource, "app_count_key");
    assert_eq!(model.default, DefaultValue::Int(0));
    assert_eq!(model.binding.persisted_kind, PersistedKind::Int);
    assert_eq!(model.documentation, None);
}

#[test]
fn build___fluent___bare_getter_and_prefixed_setter() {
    let (model, _) = build_one(&pref("darkMode", "boolean"), true);

    let accessors = model.unwrap().accessors.unwrap();
    assert_eq!(accessors.getter, "dark_mode");
    assert_eq!(accessors.setter, "set_dark_mode");
    assert_eq!(accessors.editor_setter, "dark_mode");
}

#[test]
fn build___non_fluent_boolean___is_getter() {
    let (model, _) = build_one(&pref("darkMode", "boolean"), false);

    let accessors = model.unwrap().accessors.unwrap();
    assert_eq!(accessors.getter, "is_dark_mode");
    assert_eq!(accessors.editor_setter, "set_dark_mode");
}

#[test]
fn build___non_fluent_int___get_getter() {
    let (model, _) = build_one(&pref("count", "int"), false);

    assert_eq!(model.unwrap().accessors.unwrap().getter, "get_count");
}

#[test]
fn build___void___key_only() {
    let (model, diagnostics) = build_one(&pref("marker", "void"), true);

    let model = model.unwrap();
    assert!(diagnostics.is_empty());
    assert!(model.is_void());
    assert_eq!(model.accessors, None);
}

#[test]
fn build___void_with_default___warns_and_builds() {
    let mut decl = pref("marker", "void");
    decl.default = Some(toml::Value::String("x".to_string()));

    let (model, diagnostics) = build_one(&decl, true);

    assert!(model.unwrap().is_void());
    assert!(!diagnostics.has_errors());
    let warning = diagnostics.iter().next().unwrap();
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.message, "Default value of void preference marker has no effect");
}

#[test_case("a\u{b2}" ; "superscript two")]
#[test_case("a\u{24b6}" ; "circled letter")]
#[test_case("_" ; "underscore")]
#[test_case("Self" ; "reserved after snake case")]
fn build___unusable_name___illegal_preference_name(name: &str) {
    let (model, diagnostics) = build_one(&pref(name, "int"), true);

    assert!(model.is_none());
    let error = diagnostics.iter().next().unwrap();
    assert_eq!(error.message, format!("Illegal preference name: {name}"));
}

#[test]
fn build___description___documents_default() {
    let mut decl = pref("name", "String");
    decl.description = "Display name".to_string();
    decl.default = Some(toml::Value::String("anon".to_string()));

    let (model, _) = build_one(&decl, true);

    assert_eq!(
        model.unwrap().documentation.as_deref(),
        Some("Display name\n\n(default: \"anon\")")
    );
}

#[test]
fn build___enum___implicit_serializer_field() {
    let (model, _) = build_one(&pref("theme", "Theme"), true);

    let model = model.unwrap();
    assert_eq!(model.binding.strategy, Strategy::ImplicitEnum);
    assert!(matches!(
        model.binding.construction,
        Construction::ClassArgConstructor { .. }
    ));
    assert_eq!(model.serializer_field(), "theme_serializer");
}

#[test]
fn build___illegal_name___reports_and_drops() {
    let (model, diagnostics) = build_one(&pref("1count", "int"), true);

    assert!(model.is_none());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().message,
        "Illegal preference name: 1count"
    );
}

#[test]
fn build___reserved_word___rejected() {
    let (model, diagnostics) = build_one(&pref("match", "int"), true);

    assert!(model.is_none());
    assert!(diagnostics.has_errors());
}

#[test]
fn build___unknown_type___reports_unknown() {
    let (model, diagnostics) = build_one(&pref("size", "Dimension"), true);

    assert!(model.is_none());
    assert_eq!(
        diagnostics.iter().next().unwrap().message,
        "Unknown type: Dimension"
    );
}

#[test]
fn build___unparsable_type___reports() {
    let (model, diagnostics) = build_one(&pref("size", "Vec<"), true);

    assert!(model.is_none());
    assert!(diagnostics.has_errors());
}

#[test]
fn build___wrong_default___reports_invalid_default() {
    let mut decl = pref("count", "int");
    decl.default = Some(toml::Value::Boolean(true));

    let (model, diagnostics) = build_one(&decl, true);

    assert!(model.is_none());
    assert!(
        diagnostics.iter().next().unwrap().message.starts_with("Invalid default value")
    );
}

#[test]
fn build___diagnostic___located_at_preference() {
    let (_, diagnostics) = build_one(&pref("bad name", "int"), true);

    let location = &diagnostics.iter().next().unwrap().location;
    assert_eq!(location.to_string(), "preferences.groups[0].preferences[0] (bad name)");
}
