//! Classification of persisted types
//!
//! | Type | Persisted kind | Store shape |
//! |------|----------------|-------------|
//! | `boolean` | [`PersistedKind::Boolean`] | bool |
//! | `byte` `char` `short` `int` | matching kind | 32-bit integer |
//! | `long` | [`PersistedKind::Long`] | 64-bit integer |
//! | `float` | [`PersistedKind::Float`] | 32-bit float |
//! | `double` | [`PersistedKind::Double`] | 64-bit integer (raw bits) |
//! | `String` | [`PersistedKind::String`] | string |
//! | `Set<String>`, raw `Set` | [`PersistedKind::StringSet`] | string set |
//! | `void` | [`PersistedKind::Void`] | nothing, key only |
//!
//! Anything else, including wrapper types and enums, cannot be persisted
//! directly and needs a serializer.

use crate::types::{PrimitiveKind, TypeRef};
use crate::universe::{SET, STRING};
use std::fmt;

/// Storage-native kind of a preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistedKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    StringSet,
    Void,
}

impl PersistedKind {
    /// Whether values of this kind are integers in the store.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            PersistedKind::Byte
                | PersistedKind::Char
                | PersistedKind::Short
                | PersistedKind::Int
                | PersistedKind::Long
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PersistedKind::Float | PersistedKind::Double)
    }

    /// Inclusive value range of integral kinds.
    pub fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            PersistedKind::Byte => Some((i8::MIN.into(), i8::MAX.into())),
            PersistedKind::Char => Some((u16::MIN.into(), u16::MAX.into())),
            PersistedKind::Short => Some((i16::MIN.into(), i16::MAX.into())),
            PersistedKind::Int => Some((i32::MIN.into(), i32::MAX.into())),
            PersistedKind::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl From<PrimitiveKind> for PersistedKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => PersistedKind::Boolean,
            PrimitiveKind::Byte => PersistedKind::Byte,
            PrimitiveKind::Char => PersistedKind::Char,
            PrimitiveKind::Short => PersistedKind::Short,
            PrimitiveKind::Int => PersistedKind::Int,
            PrimitiveKind::Long => PersistedKind::Long,
            PrimitiveKind::Float => PersistedKind::Float,
            PrimitiveKind::Double => PersistedKind::Double,
        }
    }
}

impl fmt::Display for PersistedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PersistedKind::Boolean => "boolean",
            PersistedKind::Byte => "byte",
            PersistedKind::Char => "char",
            PersistedKind::Short => "short",
            PersistedKind::Int => "int",
            PersistedKind::Long => "long",
            PersistedKind::Float => "float",
            PersistedKind::Double => "double",
            PersistedKind::String => "string",
            PersistedKind::StringSet => "string-set",
            PersistedKind::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// Persisted kind of `ty`, or `None` if it cannot be stored directly.
pub fn classify(ty: &TypeRef) -> Option<PersistedKind> {
    match ty {
        TypeRef::Primitive(kind) => Some((*kind).into()),
        TypeRef::Void => Some(PersistedKind::Void),
        TypeRef::Declared { name, args } if name == STRING && args.is_empty() => {
            Some(PersistedKind::String)
        }
        TypeRef::Declared { name, args } if name == SET => match args.as_slice() {
            [] => Some(PersistedKind::StringSet),
            [element] if element.has_erasure(STRING) && element.args().is_empty() => {
                Some(PersistedKind::StringSet)
            }
            _ => None,
        },
        _ => None,
    }
}
