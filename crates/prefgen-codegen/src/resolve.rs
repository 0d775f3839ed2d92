//! Serializer resolution
//!
//! For every preference this decides how values travel between the exposed
//! type and the store:
//!
//! 1. No serializer and a directly persistable type: stored as is.
//! 2. No serializer and an enum type: the built-in `EnumSerializer`.
//! 3. An explicit serializer: its `PreferenceSerializer<S, T>` instantiation is
//!    located in the type universe, checked for compatibility with the declared
//!    type, and its constructor shape decides how it is instantiated.

use crate::classify::{PersistedKind, classify};
use crate::types::TypeRef;
use crate::universe::{ConstructorShape, ENUM_SERIALIZER, TypeUniverse};
use std::fmt;

/// How the serializer instance is created by the generated accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construction {
    /// No serializer.
    None,
    /// `Default::default()`.
    DefaultConstructor(TypeRef),
    /// `FromTypeToken::from_type_token` with a token for `token`.
    ClassArgConstructor { serializer: TypeRef, token: TypeRef },
}

impl Construction {
    /// The serializer type, if any.
    pub fn serializer(&self) -> Option<&TypeRef> {
        match self {
            Construction::None => None,
            Construction::DefaultConstructor(serializer)
            | Construction::ClassArgConstructor { serializer, .. } => Some(serializer),
        }
    }
}

/// Which branch of resolution produced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Plain,
    ImplicitEnum,
    Explicit,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Plain => write!(f, "plain"),
            Strategy::ImplicitEnum => write!(f, "implicit-enum"),
            Strategy::Explicit => write!(f, "explicit"),
        }
    }
}

/// Resolved representation of one preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerBinding {
    /// Type as declared in the source.
    pub runtime_type: TypeRef,
    /// Type seen by callers of the generated accessor.
    pub exposed_type: TypeRef,
    /// Type handed to the store.
    pub persisted_type: TypeRef,
    pub persisted_kind: PersistedKind,
    pub construction: Construction,
    pub strategy: Strategy,
}

impl SerializerBinding {
    pub fn has_serializer(&self) -> bool {
        self.construction != Construction::None
    }

    /// Whether the exposed value is a primitive boolean.
    pub fn is_boolean(&self) -> bool {
        self.exposed_type == TypeRef::Primitive(crate::types::PrimitiveKind::Boolean)
    }
}

/// Decide the serialization strategy for one preference.
///
/// Every failure message names the preference.
pub fn resolve(
    universe: &TypeUniverse,
    preference: &str,
    declared: &TypeRef,
    serializer: Option<&TypeRef>,
) -> Result<SerializerBinding, String> {
    let (serializer, strategy) = match serializer {
        Some(serializer) => (serializer.clone(), Strategy::Explicit),
        None if universe.is_enum(declared) => {
            (TypeRef::named(ENUM_SERIALIZER), Strategy::ImplicitEnum)
        }
        None => {
            let kind = classify(declared)
                .ok_or_else(|| format!("Unsupported preference type: {declared}"))?;
            tracing::debug!(preference, %declared, %kind, "plain preference");
            return Ok(SerializerBinding {
                runtime_type: declared.clone(),
                exposed_type: declared.clone(),
                persisted_type: declared.clone(),
                persisted_kind: kind,
                construction: Construction::None,
                strategy: Strategy::Plain,
            });
        }
    };

    let boxed = universe.box_type(declared);
    let serializer_type = instantiate(universe, preference, declared, &boxed, &serializer)?;

    let unidentified = || {
        format!("Unable to identify type arguments of serializer {serializer_type} for preference {preference}")
    };
    let (source, target) = universe
        .find_serializer_arguments(&serializer_type)
        .ok_or_else(unidentified)?;
    if contains_variable(&source) || contains_variable(&target) {
        return Err(unidentified());
    }

    let generic = serializer_type != serializer;
    if !generic && !universe.is_subtype(&boxed, &source) {
        return Err(format!(
            "Incompatible serializer {serializer_type} for type {declared} of preference {preference}"
        ));
    }

    let persisted = universe.unbox_type(&target);
    let construction = match universe.constructor_shape(&serializer_type) {
        ConstructorShape::OneClassArg => Construction::ClassArgConstructor {
            serializer: serializer_type.clone(),
            token: boxed.clone(),
        },
        ConstructorShape::NoArgs => Construction::DefaultConstructor(serializer_type.clone()),
        ConstructorShape::Unsupported => {
            return Err(format!(
                "No suitable constructor found for serializer {serializer_type}"
            ));
        }
    };

    let kind = classify(&persisted)
        .ok_or_else(|| format!("Unsupported preference type: {persisted}"))?;

    tracing::debug!(
        preference,
        %strategy,
        serializer = %serializer_type,
        source = %source,
        %kind,
        construction = ?construction,
        "serializer resolved"
    );

    Ok(SerializerBinding {
        runtime_type: declared.clone(),
        exposed_type: universe.unbox_type(&source),
        persisted_type: persisted,
        persisted_kind: kind,
        construction,
        strategy,
    })
}

/// Fill the single type parameter of a raw generic serializer with the boxed
/// declared type, checking the parameter's bounds.
fn instantiate(
    universe: &TypeUniverse,
    preference: &str,
    declared: &TypeRef,
    boxed: &TypeRef,
    serializer: &TypeRef,
) -> Result<TypeRef, String> {
    let TypeRef::Declared { name, args } = serializer else {
        return Err(format!("Invalid serializer type {serializer} for preference {preference}"));
    };
    let decl = universe
        .get(name)
        .ok_or_else(|| format!("Unknown type: {name}"))?;

    match decl.params.as_slice() {
        [param] if args.is_empty() => {
            if !universe.satisfies_bounds(boxed, param) {
                return Err(format!(
                    "Incompatible serializer {serializer} for type {declared} of preference {preference}: {boxed} does not satisfy bound {param}"
                ));
            }
            Ok(TypeRef::generic(name.clone(), vec![boxed.clone()]))
        }
        _ => Ok(serializer.clone()),
    }
}

fn contains_variable(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Variable(_) => true,
        TypeRef::Declared { args, .. } => args.iter().any(contains_variable),
        _ => false,
    }
}

#[cfg(test)]
#[path = "resolve/resolve_tests.rs"]
mod resolve_tests;
