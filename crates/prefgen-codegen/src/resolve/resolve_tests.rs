#![allow(non_snake_case)]

use super::*;
use crate::types::{PrimitiveKind, TypeParam};
use crate::universe::TypeDecl;

fn ty(expr: &str) -> TypeRef {
    TypeRef::parse(expr).unwrap()
}

fn universe() -> TypeUniverse {
    let t = vec!["T".to_string()];
    let mut universe = TypeUniverse::with_builtins();
    universe.declare(TypeDecl::enumeration("Theme")).unwrap();
    universe.declare(TypeDecl::class("BigInteger").with_supertypes(vec![ty("Number")])).unwrap();
    universe.declare(TypeDecl::class("List").with_params(vec![TypeParam::unbounded("E")])).unwrap();
    universe
        .declare(
            TypeDecl::class("BigIntegerSerializer")
                .with_supertypes(vec![ty("PreferenceSerializer<BigInteger, String>")]),
        )
        .unwrap();
    universe
        .declare(
            TypeDecl::class("LengthSerializer")
                .with_supertypes(vec![ty("PreferenceSerializer<String, Integer>")]),
        )
        .unwrap();
    universe
        .declare(
            TypeDecl::class("NumberListSerializer")
                .with_params(vec![TypeParam::parse("T: Number").unwrap()])
                .with_supertypes(vec![
                    ty("PreferenceSerializer<List<T>, String>").with_variables(&t),
                ])
                .with_constructors(vec![vec![ty("Class<T>").with_variables(&t)]]),
        )
        .unwrap();
    universe
        .declare(
            TypeDecl::class("IntSetSerializer")
                .with_supertypes(vec![ty("PreferenceSerializer<Set<Integer>, Set<String>>")]),
        )
        .unwrap();
    universe
        .declare(
            TypeDecl::class("NoCtorSerializer")
                .with_supertypes(vec![ty("PreferenceSerializer<BigInteger, String>")])
                .with_constructors(vec![vec![ty("String")]]),
        )
        .unwrap();
    universe
        .declare(
            TypeDecl::class("ObjectSerializer")
                .with_supertypes(vec![ty("PreferenceSerializer<BigInteger, Object>")]),
        )
        .unwrap();
    universe
        .declare(TypeDecl::class("NotASerializer").with_supertypes(vec![ty("Number")]))
        .unwrap();
    universe
}

#[test]
fn resolve___plain_int___persists_as_int_without_serializer() {
    let binding = resolve(&universe(), "count", &ty("int"), None).unwrap();

    assert_eq!(binding.strategy, Strategy::Plain);
    assert_eq!(binding.persisted_kind, PersistedKind::Int);
    assert_eq!(binding.construction, Construction::None);
    assert!(!binding.has_serializer());
}

#[test]
fn resolve___plain_boolean___is_boolean() {
    let binding = resolve(&universe(), "enabled", &ty("boolean"), None).unwrap();

    assert!(binding.is_boolean());
}

#[test]
fn resolve___plain_void___persists_nothing() {
    let binding = resolve(&universe(), "marker", &ty("void"), None).unwrap();

    assert_eq!(binding.persisted_kind, PersistedKind::Void);
}

#[test]
fn resolve___plain_wrapper___is_unsupported() {
    let err = resolve(&universe(), "count", &ty("Integer"), None).unwrap_err();

    assert_eq!(err, "Unsupported preference type: Integer");
}

#[test]
fn resolve___plain_object___is_unsupported() {
    let err = resolve(&universe(), "thing", &ty("Object"), None).unwrap_err();

    assert_eq!(err, "Unsupported preference type: Object");
}

#[test]
fn resolve___enum_without_serializer___uses_enum_serializer_with_type_token() {
    let binding = resolve(&universe(), "theme", &ty("Theme"), None).unwrap();

    assert_eq!(binding.strategy, Strategy::ImplicitEnum);
    assert_eq!(binding.persisted_kind, PersistedKind::String);
    assert_eq!(binding.exposed_type, ty("Theme"));
    assert_eq!(
        binding.construction,
        Construction::ClassArgConstructor {
            serializer: ty("EnumSerializer<Theme>"),
            token: ty("Theme"),
        }
    );
}

#[test]
fn resolve___explicit_non_generic___uses_default_constructor() {
    let binding = resolve(
        &universe(),
        "big",
        &ty("BigInteger"),
        Some(&ty("BigIntegerSerializer")),
    )
    .unwrap();

    assert_eq!(binding.strategy, Strategy::Explicit);
    assert_eq!(binding.persisted_kind, PersistedKind::String);
    assert_eq!(
        binding.construction,
        Construction::DefaultConstructor(ty("BigIntegerSerializer"))
    );
}

#[test]
fn resolve___incompatible_serializer___names_serializer_type_and_preference() {
    let err = resolve(
        &universe(),
        "big",
        &ty("BigInteger"),
        Some(&ty("LengthSerializer")),
    )
    .unwrap_err();

    assert_eq!(
        err,
        "Incompatible serializer LengthSerializer for type BigInteger of preference big"
    );
}

#[test]
fn resolve___boxed_target___unboxes_persisted_type() {
    let binding = resolve(
        &universe(),
        "length",
        &ty("String"),
        Some(&ty("LengthSerializer")),
    )
    .unwrap();

    assert_eq!(binding.persisted_type, TypeRef::Primitive(PrimitiveKind::Int));
    assert_eq!(binding.persisted_kind, PersistedKind::Int);
}

#[test]
fn resolve___generic_serializer___substitutes_boxed_declared_type() {
    let binding = resolve(
        &universe(),
        "numbers",
        &ty("int"),
        Some(&ty("NumberListSerializer")),
    )
    .unwrap();

    assert_eq!(binding.exposed_type, ty("List<Integer>"));
    assert_eq!(binding.persisted_kind, PersistedKind::String);
    assert_eq!(
        binding.construction,
        Construction::ClassArgConstructor {
            serializer: ty("NumberListSerializer<Integer>"),
            token: ty("Integer"),
        }
    );
}

#[test]
fn resolve___generic_serializer_bound_violated___is_incompatible() {
    let err = resolve(
        &universe(),
        "flags",
        &ty("boolean"),
        Some(&ty("NumberListSerializer")),
    )
    .unwrap_err();

    assert!(
        err.starts_with("Incompatible serializer NumberListSerializer for type boolean of preference flags"),
        "{err}"
    );
    assert!(err.contains("Boolean does not satisfy bound T: Number"), "{err}");
}

#[test]
fn resolve___string_set_target___persists_string_set() {
    let binding = resolve(
        &universe(),
        "ids",
        &ty("Set<Integer>"),
        Some(&ty("IntSetSerializer")),
    )
    .unwrap();

    assert_eq!(binding.persisted_kind, PersistedKind::StringSet);
}

#[test]
fn resolve___not_a_serializer___cannot_identify_arguments() {
    let err = resolve(
        &universe(),
        "big",
        &ty("BigInteger"),
        Some(&ty("NotASerializer")),
    )
    .unwrap_err();

    assert_eq!(
        err,
        "Unable to identify type arguments of serializer NotASerializer for preference big"
    );
}

#[test]
fn resolve___missing_constructor___reports_serializer() {
    let err = resolve(
        &universe(),
        "big",
        &ty("BigInteger"),
        Some(&ty("NoCtorSerializer")),
    )
    .unwrap_err();

    assert_eq!(err, "No suitable constructor found for serializer NoCtorSerializer");
}

#[test]
fn resolve___unsupported_target___names_persisted_type() {
    let err = resolve(
        &universe(),
        "big",
        &ty("BigInteger"),
        Some(&ty("ObjectSerializer")),
    )
    .unwrap_err();

    assert_eq!(err, "Unsupported preference type: Object");
}

#[test]
fn resolve___unknown_serializer___reports_unknown_type() {
    let err = resolve(&universe(), "x", &ty("int"), Some(&ty("Missing"))).unwrap_err();

    assert_eq!(err, "Unknown type: Missing");
}
