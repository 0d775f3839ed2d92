//! Naming convention utilities for generated accessors.
//!
//! Preference and group names come straight from the declaration source and may
//! use any identifier style. Generated Rust items follow Rust conventions.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `darkMode` | [`to_snake_case`] | `dark_mode` |
//! | `user_settings` | [`to_pascal_case`] | `UserSettings` |
//! | `word` | [`capitalize`] | `Word` |

/// Convert camelCase or PascalCase to snake_case.
///
/// # Examples
///
/// ```
/// use prefgen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("darkMode"), "dark_mode");
/// assert_eq!(to_snake_case("HTTPPort"), "http_port");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, camelCase and already-capitalized input.
///
/// # Examples
///
/// ```
/// use prefgen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("general"), "General");
/// assert_eq!(to_pascal_case("user_settings"), "UserSettings");
/// assert_eq!(to_pascal_case("userSettings"), "UserSettings");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Name of the getter for a preference method name.
///
/// Fluent accessors use the bare name; otherwise boolean getters get an `is_`
/// prefix and all others a `get_` prefix.
pub fn getter_name(method: &str, is_bool: bool, fluent: bool) -> String {
    if fluent {
        method.to_string()
    } else if is_bool {
        format!("is_{method}")
    } else {
        format!("get_{method}")
    }
}

/// Name of the setter on a group accessor.
///
/// Rust has no overloading, so the setter always carries a `set_` prefix.
pub fn setter_name(method: &str) -> String {
    format!("set_{method}")
}

/// Name of the chainable setter on a group editor.
pub fn editor_setter_name(method: &str, fluent: bool) -> String {
    if fluent {
        method.to_string()
    } else {
        setter_name(method)
    }
}
