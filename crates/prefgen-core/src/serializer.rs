//! Serializer capability and the built-in enum serializer

use crate::SerializationError;
use std::fmt;
use std::marker::PhantomData;

/// Bidirectional converter between an exposed type and a persisted kind
///
/// `Target` must be one of the [`Persisted`](crate::Persisted) types; the
/// generated accessor reads a `Target` from the store and hands it to
/// [`deserialize`](Self::deserialize), and writes whatever
/// [`serialize`](Self::serialize) returns.
pub trait PreferenceSerializer {
    /// The type exposed by the generated accessor
    type Source;
    /// The persisted representation
    type Target;

    fn serialize(&self, value: Self::Source) -> Result<Self::Target, SerializationError>;

    fn deserialize(&self, value: Self::Target) -> Result<Self::Source, SerializationError>;
}

/// Zero-sized token naming a type, handed to serializers that need to know
/// which type they were instantiated for
pub struct TypeToken<T: ?Sized> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> TypeToken<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Name of the tokenized type
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: ?Sized> Clone for TypeToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for TypeToken<T> {}

impl<T: ?Sized> Default for TypeToken<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken<{}>", self.type_name())
    }
}

/// Construction from a [`TypeToken`]
///
/// Serializers declaring a `Class<T>` constructor in the type schema implement
/// this; serializers declaring a zero-argument constructor implement [`Default`].
pub trait FromTypeToken<T: ?Sized> {
    fn from_type_token(token: TypeToken<T>) -> Self;
}

/// Enum whose variants are persisted by name
///
/// Usually derived with `#[derive(PreferenceEnum)]`.
pub trait PreferenceEnum: Sized + 'static {
    /// Name of the enum type, used in error messages
    const TYPE_NAME: &'static str;

    /// Every variant, in declaration order
    const VARIANTS: &'static [Self];

    /// The persisted name of this variant
    fn name(&self) -> &'static str;

    /// Look a variant up by its persisted name
    fn from_name(name: &str) -> Option<Self>;
}

/// Built-in serializer persisting enum variants as their names
///
/// An absent value maps to an absent string and back. A stored name with no
/// matching variant yields a [`SerializationError`].
pub struct EnumSerializer<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E: PreferenceEnum> EnumSerializer<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E: PreferenceEnum> Default for EnumSerializer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EnumSerializer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumSerializer<{}>", std::any::type_name::<E>())
    }
}

impl<E: PreferenceEnum> FromTypeToken<E> for EnumSerializer<E> {
    fn from_type_token(_token: TypeToken<E>) -> Self {
        Self::new()
    }
}

impl<E: PreferenceEnum> PreferenceSerializer for EnumSerializer<E> {
    type Source = Option<E>;
    type Target = Option<String>;

    fn serialize(&self, value: Option<E>) -> Result<Option<String>, SerializationError> {
        Ok(value.map(|v| v.name().to_string()))
    }

    fn deserialize(&self, value: Option<String>) -> Result<Option<E>, SerializationError> {
        match value {
            None => Ok(None),
            Some(name) => E::from_name(&name)
                .map(Some)
                .ok_or_else(|| SerializationError::unknown_variant(E::TYPE_NAME, &name)),
        }
    }
}
