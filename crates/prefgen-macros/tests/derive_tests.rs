#![allow(non_snake_case)]

use prefgen_core::{EnumSerializer, PreferenceEnum, PreferenceSerializer};
use prefgen_macros::PreferenceEnum;
use test_case::test_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PreferenceEnum)]
enum Mood {
    Happy,
    #[preference(rename = "blue")]
    Sad,
    Calm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PreferenceEnum)]
#[preference(type_name = "Traffic light")]
enum Signal {
    Red,
    Green,
}

#[test]
fn PreferenceEnum___variants___in_declaration_order() {
    assert_eq!(Mood::VARIANTS, &[Mood::Happy, Mood::Sad, Mood::Calm]);
}

#[test_case(Mood::Happy, "Happy" ; "plain name")]
#[test_case(Mood::Sad, "blue" ; "renamed")]
#[test_case(Mood::Calm, "Calm" ; "last variant")]
fn PreferenceEnum___name___persisted_name(mood: Mood, expected: &str) {
    assert_eq!(mood.name(), expected);
    assert_eq!(Mood::from_name(expected), Some(mood));
}

#[test]
fn PreferenceEnum___from_name___unknown_and_original_names_rejected() {
    assert_eq!(Mood::from_name("Sad"), None);
    assert_eq!(Mood::from_name("happy"), None);
}

#[test]
fn PreferenceEnum___type_name___defaults_to_ident_or_attribute() {
    assert_eq!(Mood::TYPE_NAME, "Mood");
    assert_eq!(Signal::TYPE_NAME, "Traffic light");
}

#[test]
fn EnumSerializer___derived_enum___roundtrips_and_names_type_in_errors() {
    let serializer = EnumSerializer::<Signal>::new();

    assert_eq!(
        serializer.serialize(Some(Signal::Green)).unwrap().as_deref(),
        Some("Green")
    );
    assert_eq!(
        serializer.deserialize(Some("Red".to_string())).unwrap(),
        Some(Signal::Red)
    );
    let err = serializer.deserialize(Some("Amber".to_string())).unwrap_err();
    assert_eq!(err.message(), "no variant of Traffic light named 'Amber'");
}
