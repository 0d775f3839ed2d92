//! Identifier and literal validation
//!
//! Names in the declaration source end up as Rust identifiers, module names and
//! string literals in generated code. Everything here is a pure function.
//!
//! Identifier characters follow Rust's rules: `XID_Start` or `_` first, then
//! `XID_Continue`.

use unicode_ident::{is_xid_continue, is_xid_start};

/// Words that cannot be used as generated identifiers.
const RESERVED_WORDS: &[&str] = &[
    "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Whether `c` may start an identifier.
pub fn is_identifier_start(c: char) -> bool {
    is_xid_start(c) || c == '_'
}

/// Whether `c` may continue an identifier.
pub fn is_identifier_part(c: char) -> bool {
    is_xid_continue(c)
}

/// Whether `s` is a bare identifier: one start character followed by any
/// number of continuation characters.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => is_identifier_start(first) && chars.all(is_identifier_part),
        None => false,
    }
}

/// Whether `s` is a dot-separated list of identifiers.
pub fn is_qualified_name(s: &str) -> bool {
    s.split('.').all(is_identifier)
}

/// Whether `s` is empty or consists only of identifier continuation characters.
pub fn is_identifier_suffix(s: &str) -> bool {
    s.chars().all(is_identifier_part)
}

/// Whether `s` is a Rust keyword or otherwise unusable as an item name.
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

/// Whether `s` is an identifier that can name a generated item.
pub fn is_usable_identifier(s: &str) -> bool {
    is_identifier(s) && !is_reserved_word(s)
}

/// Quote and escape `s` as a string literal.
///
/// Backslashes, quotes and control characters are escaped; everything else is
/// copied verbatim.
pub fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
