#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(PrefError::AlreadyInitialized, 1, true)]
#[test_case(PrefError::NotInitialized, 2, true)]
#[test_case(PrefError::MissingResource("app_count_key".into()), 3, false)]
#[test_case(PrefError::Serialization(SerializationError::new("x")), 4, false)]
fn PrefError___variant___maps_to_code_and_state_class(
    error: PrefError,
    expected_code: u32,
    illegal_state: bool,
) {
    assert_eq!(error.error_code(), expected_code);
    assert_eq!(error.is_illegal_state(), illegal_state);
}

#[test_case(PrefError::MissingResource("app_count_key".into()), "app_count_key")]
#[test_case(PrefError::Serialization(SerializationError::new("bad digits")), "bad digits")]
fn PrefError___message_variants___preserve_details(error: PrefError, expected_part: &str) {
    let display = error.to_string();

    assert!(
        display.contains(expected_part),
        "Error message '{}' should contain '{}'",
        display,
        expected_part
    );
}
