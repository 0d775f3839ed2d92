//! Type references as written in the declaration source.
//!
//! Type expressions are parsed with [`syn`], so they follow Rust path syntax:
//! `Name`, `crate::module::Name`, `Name<Arg, Other<Arg>>`, `()`.
//!
//! # Primitive names
//!
//! | Schema | Rust alias | Kind |
//! |--------|------------|------|
//! | `boolean` | `bool` | [`PrimitiveKind::Boolean`] |
//! | `byte` | `i8` | [`PrimitiveKind::Byte`] |
//! | `char` | `u16` | [`PrimitiveKind::Char`] |
//! | `short` | `i16` | [`PrimitiveKind::Short`] |
//! | `int` | `i32` | [`PrimitiveKind::Int`] |
//! | `long` | `i64` | [`PrimitiveKind::Long`] |
//! | `float` | `f32` | [`PrimitiveKind::Float`] |
//! | `double` | `f64` | [`PrimitiveKind::Double`] |
//! | `void` | `()` | [`TypeRef::Void`] |

use crate::SchemaError;
use std::fmt;
use syn::{GenericArgument, Path, PathArguments, Type, TypeParamBound};

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Look a primitive up by its schema name or Rust alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" | "bool" => Some(PrimitiveKind::Boolean),
            "byte" | "i8" => Some(PrimitiveKind::Byte),
            "char" | "u16" => Some(PrimitiveKind::Char),
            "short" | "i16" => Some(PrimitiveKind::Short),
            "int" | "i32" => Some(PrimitiveKind::Int),
            "long" | "i64" => Some(PrimitiveKind::Long),
            "float" | "f32" => Some(PrimitiveKind::Float),
            "double" | "f64" => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// The schema name.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// The Rust type the primitive is exposed as.
    pub fn rust_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Byte => "i8",
            PrimitiveKind::Char => "u16",
            PrimitiveKind::Short => "i16",
            PrimitiveKind::Int => "i32",
            PrimitiveKind::Long => "i64",
            PrimitiveKind::Float => "f32",
            PrimitiveKind::Double => "f64",
        }
    }

    /// Name of the built-in wrapper type.
    pub fn boxed_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    /// Inverse of [`boxed_name`](Self::boxed_name).
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.boxed_name() == name)
    }
}

/// A reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive value type.
    Primitive(PrimitiveKind),

    /// The absence of a value.
    Void,

    /// A named type with its type arguments.
    Declared { name: String, args: Vec<TypeRef> },

    /// A type parameter of the enclosing declaration.
    Variable(String),
}

impl TypeRef {
    /// Parse a type expression.
    pub fn parse(expr: &str) -> Result<TypeRef, SchemaError> {
        let ty: Type = syn::parse_str(expr).map_err(|e| SchemaError::InvalidType {
            expr: expr.to_string(),
            reason: e.to_string(),
        })?;
        from_syn_type(&ty).map_err(|reason| SchemaError::InvalidType {
            expr: expr.to_string(),
            reason,
        })
    }

    /// Shorthand for a declared type without arguments.
    pub fn named(name: impl Into<String>) -> TypeRef {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Shorthand for a declared type with arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> TypeRef {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// The declared name, if this is a declared type.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeRef::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a declared type; empty otherwise.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// Whether this is the declared type `name`, ignoring type arguments.
    pub fn has_erasure(&self, name: &str) -> bool {
        self.declared_name() == Some(name)
    }

    /// Turn bare references to any of `params` into [`TypeRef::Variable`]s.
    pub fn with_variables(self, params: &[String]) -> TypeRef {
        match self {
            TypeRef::Declared { name, args } => {
                if args.is_empty() && params.contains(&name) {
                    TypeRef::Variable(name)
                } else {
                    TypeRef::Declared {
                        name,
                        args: args.into_iter().map(|a| a.with_variables(params)).collect(),
                    }
                }
            }
            other => other,
        }
    }

    /// Replace type variables by the positional `args` bound to `params`.
    ///
    /// Variables without a binding are left untouched.
    pub fn substitute(&self, params: &[String], args: &[TypeRef]) -> TypeRef {
        match self {
            TypeRef::Variable(name) => params
                .iter()
                .position(|p| p == name)
                .and_then(|i| args.get(i))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeRef::Declared { name, args: inner } => TypeRef::Declared {
                name: name.clone(),
                args: inner.iter().map(|a| a.substitute(params, args)).collect(),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(kind) => write!(f, "{}", kind.name()),
            TypeRef::Void => write!(f, "void"),
            TypeRef::Variable(name) => write!(f, "{name}"),
            TypeRef::Declared { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}

/// A declared type parameter with its upper bounds, e.g. `T: Number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Parse `Name` or `Name: Bound + Bound`.
    pub fn parse(expr: &str) -> Result<TypeParam, SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidTypeParam {
            expr: expr.to_string(),
            reason,
        };

        let param: syn::TypeParam = syn::parse_str(expr).map_err(|e| invalid(e.to_string()))?;
        let mut bounds = Vec::new();
        for bound in &param.bounds {
            match bound {
                TypeParamBound::Trait(trait_bound) => {
                    bounds.push(from_syn_path(&trait_bound.path, false).map_err(invalid)?);
                }
                _ => return Err(invalid("only type bounds are supported".to_string())),
            }
        }

        Ok(TypeParam {
            name: param.ident.to_string(),
            bounds,
        })
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            let sep = if i == 0 { ": " } else { " + " };
            write!(f, "{sep}{bound}")?;
        }
        Ok(())
    }
}

fn from_syn_type(ty: &Type) -> Result<TypeRef, String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            from_syn_path(&type_path.path, true)
        }
        Type::Tuple(tuple) if tuple.elems.is_empty() => Ok(TypeRef::Void),
        Type::Paren(paren) => from_syn_type(&paren.elem),
        Type::Group(group) => from_syn_type(&group.elem),
        _ => Err("expected a type path such as `Name<Arg>`".to_string()),
    }
}

fn from_syn_path(path: &Path, allow_primitive: bool) -> Result<TypeRef, String> {
    let Some(last) = path.segments.last() else {
        return Err("empty type path".to_string());
    };

    for segment in path.segments.iter().take(path.segments.len() - 1) {
        if !segment.arguments.is_none() {
            return Err(format!(
                "type arguments are only allowed on the last segment, found them on `{}`",
                segment.ident
            ));
        }
    }

    let mut name = String::new();
    if path.leading_colon.is_some() {
        name.push_str("::");
    }
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    name.push_str(&segments.join("::"));

    let args = match &last.arguments {
        PathArguments::None => Vec::new(),
        PathArguments::AngleBracketed(bracketed) => bracketed
            .args
            .iter()
            .map(|arg| match arg {
                GenericArgument::Type(ty) => from_syn_type(ty),
                _ => Err("only type arguments are supported".to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?,
        PathArguments::Parenthesized(_) => {
            return Err("function-style arguments are not supported".to_string());
        }
    };

    if allow_primitive && args.is_empty() && path.segments.len() == 1 && path.leading_colon.is_none()
    {
        if name == "void" {
            return Ok(TypeRef::Void);
        }
        if let Some(kind) = PrimitiveKind::from_name(&name) {
            return Ok(TypeRef::Primitive(kind));
        }
    }

    Ok(TypeRef::Declared { name, args })
}
