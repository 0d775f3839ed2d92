//! The type universe queried at generation time
//!
//! Preferences and serializers are checked against an explicit type schema
//! instead of a compiler's type model. The universe starts with a fixed set of
//! built-in types and is extended by the `[[types]]` entries of the declaration
//! source.
//!
//! | Built-in | Parameters | Supertypes | Constructors |
//! |----------|------------|------------|--------------|
//! | `Object` | | | `()` |
//! | `Number` | | | `()` |
//! | `Byte` `Short` `Integer` `Long` `Float` `Double` | | `Number` | `()` |
//! | `Boolean` `Character` `String` | | | `()` |
//! | `Set` | `E` | | |
//! | `Enum` | `E` | | |
//! | `Class` | `T` | | |
//! | `PreferenceSerializer` | `S, T` | | |
//! | `EnumSerializer` | `T: Enum<T>` | `PreferenceSerializer<T, String>` | `(Class<T>)` |
//!
//! `Object` is the implicit supertype of every declared type. Types of kind
//! `enum` implicitly extend `Enum<Self>`.

use crate::types::{PrimitiveKind, TypeParam, TypeRef};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const OBJECT: &str = "Object";
pub const NUMBER: &str = "Number";
pub const STRING: &str = "String";
pub const SET: &str = "Set";
pub const ENUM: &str = "Enum";
pub const CLASS: &str = "Class";
pub const SERIALIZER: &str = "PreferenceSerializer";
pub const ENUM_SERIALIZER: &str = "EnumSerializer";

/// What sort of type a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub params: Vec<TypeParam>,
    pub supertypes: Vec<TypeRef>,
    /// Parameter lists of the available constructors.
    pub constructors: Vec<Vec<TypeRef>>,
}

impl TypeDecl {
    /// A class with a single zero-argument constructor.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            params: Vec::new(),
            supertypes: Vec::new(),
            constructors: vec![Vec::new()],
        }
    }

    /// An interface, which has no constructors.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            constructors: Vec::new(),
            ..Self::class(name)
        }
    }

    /// An enum, which implicitly extends `Enum<Self>`.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Enum,
            constructors: Vec::new(),
            ..Self::class(name)
        }
    }

    pub fn with_params(mut self, params: Vec<TypeParam>) -> Self {
        self.params = params;
        self
    }

    pub fn with_supertypes(mut self, supertypes: Vec<TypeRef>) -> Self {
        self.supertypes = supertypes;
        self
    }

    pub fn with_constructors(mut self, constructors: Vec<Vec<TypeRef>>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn param_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.name.clone()).collect()
    }

    /// The type this declaration denotes with its own parameters as arguments.
    pub fn self_type(&self) -> TypeRef {
        TypeRef::generic(
            self.name.clone(),
            self.params
                .iter()
                .map(|p| TypeRef::Variable(p.name.clone()))
                .collect(),
        )
    }

    /// Declared supertypes plus the implicit ones.
    pub fn all_supertypes(&self) -> Vec<TypeRef> {
        let mut supertypes = self.supertypes.clone();
        if self.kind == TypeKind::Enum && !supertypes.iter().any(|s| s.has_erasure(ENUM)) {
            supertypes.push(TypeRef::generic(ENUM, vec![self.self_type()]));
        }
        supertypes
    }
}

/// Constructor shape of a serializer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorShape {
    /// A zero-argument constructor.
    NoArgs,
    /// A constructor taking a single type token.
    OneClassArg,
    /// Neither of the above.
    Unsupported,
}

/// Problem found while checking the universe itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseProblem {
    /// Declaration the problem was found in.
    pub type_name: String,
    pub message: String,
}

/// All types known to one generation pass.
#[derive(Debug, Clone)]
pub struct TypeUniverse {
    decls: BTreeMap<String, TypeDecl>,
}

impl TypeUniverse {
    /// A universe holding only the built-in types.
    pub fn with_builtins() -> Self {
        let mut decls = BTreeMap::new();
        let mut add = |decl: TypeDecl| {
            decls.insert(decl.name.clone(), decl);
        };

        add(TypeDecl::class(OBJECT));
        add(TypeDecl::class(NUMBER));
        for kind in PrimitiveKind::ALL {
            let decl = TypeDecl::class(kind.boxed_name());
            let decl = match kind {
                PrimitiveKind::Boolean | PrimitiveKind::Char => decl,
                _ => decl.with_supertypes(vec![TypeRef::named(NUMBER)]),
            };
            add(decl);
        }
        add(TypeDecl::class(STRING));
        add(TypeDecl::interface(SET).with_params(vec![TypeParam::unbounded("E")]));
        add(TypeDecl::class(ENUM)
            .with_params(vec![TypeParam::unbounded("E")])
            .with_constructors(Vec::new()));
        add(TypeDecl::class(CLASS)
            .with_params(vec![TypeParam::unbounded("T")])
            .with_constructors(Vec::new()));
        add(TypeDecl::interface(SERIALIZER)
            .with_params(vec![TypeParam::unbounded("S"), TypeParam::unbounded("T")]));

        let t = TypeRef::Variable("T".to_string());
        add(TypeDecl::class(ENUM_SERIALIZER)
            .with_params(vec![TypeParam {
                name: "T".to_string(),
                bounds: vec![TypeRef::generic(ENUM, vec![t.clone()])],
            }])
            .with_supertypes(vec![TypeRef::generic(
                SERIALIZER,
                vec![t.clone(), TypeRef::named(STRING)],
            )])
            .with_constructors(vec![vec![TypeRef::generic(CLASS, vec![t])]]));

        Self { decls }
    }

    /// Add a declaration, failing if the name is taken.
    pub fn declare(&mut self, decl: TypeDecl) -> Result<(), String> {
        if self.decls.contains_key(&decl.name) {
            return Err(format!("Duplicate type declaration: {}", decl.name));
        }
        tracing::debug!(name = %decl.name, kind = ?decl.kind, "type declared");
        self.decls.insert(decl.name.clone(), decl);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Direct supertypes of `ty` with its type arguments substituted.
    pub fn direct_supertypes(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let TypeRef::Declared { name, args } = ty else {
            return Vec::new();
        };
        let Some(decl) = self.decls.get(name) else {
            return Vec::new();
        };
        let params = decl.param_names();
        decl.all_supertypes()
            .iter()
            .map(|s| s.substitute(&params, args))
            .collect()
    }

    /// Whether `sub` is `sup` or one of its (transitive) subtypes.
    ///
    /// Type arguments are invariant; primitives are only subtypes of themselves.
    pub fn is_subtype(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        self.is_subtype_inner(sub, sup, &mut HashSet::new())
    }

    fn is_subtype_inner(&self, sub: &TypeRef, sup: &TypeRef, visited: &mut HashSet<String>) -> bool {
        if sub == sup {
            return true;
        }
        match sub {
            TypeRef::Primitive(_) | TypeRef::Void => false,
            TypeRef::Variable(_) | TypeRef::Declared { .. } if is_object(sup) => true,
            TypeRef::Variable(_) => false,
            TypeRef::Declared { .. } => {
                if !visited.insert(sub.to_string()) {
                    return false;
                }
                self.direct_supertypes(sub)
                    .iter()
                    .any(|s| self.is_subtype_inner(s, sup, visited))
            }
        }
    }

    /// Whether `arg` satisfies every bound of `param`.
    pub fn satisfies_bounds(&self, arg: &TypeRef, param: &TypeParam) -> bool {
        let names = [param.name.clone()];
        let args = [arg.clone()];
        param
            .bounds
            .iter()
            .all(|bound| self.is_subtype(arg, &bound.substitute(&names, &args)))
    }

    /// Wrapper type of a primitive; other types are returned unchanged.
    pub fn box_type(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Primitive(kind) => TypeRef::named(kind.boxed_name()),
            other => other.clone(),
        }
    }

    /// Primitive of a wrapper type; other types are returned unchanged.
    pub fn unbox_type(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Declared { name, args } if args.is_empty() => {
                match PrimitiveKind::from_boxed_name(name) {
                    Some(kind) => TypeRef::Primitive(kind),
                    None => ty.clone(),
                }
            }
            other => other.clone(),
        }
    }

    /// Whether `ty` is an enum, i.e. directly extends `Enum`.
    pub fn is_enum(&self, ty: &TypeRef) -> bool {
        self.direct_supertypes(ty).iter().any(|s| s.has_erasure(ENUM))
    }

    /// The two type arguments of the serializer capability implemented by `ty`.
    ///
    /// Walks the supertype graph depth-first in declaration order, skipping
    /// `Object`. Returns `None` when the capability is not found or does not
    /// carry exactly two arguments.
    pub fn find_serializer_arguments(&self, ty: &TypeRef) -> Option<(TypeRef, TypeRef)> {
        let found = self.find_serializer_instantiation(ty, &mut HashSet::new())?;
        match found.args() {
            [source, target] => Some((source.clone(), target.clone())),
            _ => None,
        }
    }

    fn find_serializer_instantiation(
        &self,
        ty: &TypeRef,
        visited: &mut HashSet<String>,
    ) -> Option<TypeRef> {
        if ty.has_erasure(SERIALIZER) {
            return Some(ty.clone());
        }
        if !visited.insert(ty.to_string()) {
            return None;
        }
        for supertype in self.direct_supertypes(ty) {
            if is_object(&supertype) {
                continue;
            }
            if let Some(found) = self.find_serializer_instantiation(&supertype, visited) {
                return Some(found);
            }
        }
        None
    }

    /// How a serializer of type `ty` can be constructed.
    ///
    /// A one-argument constructor taking a type token wins over a zero-argument
    /// constructor when both exist.
    pub fn constructor_shape(&self, ty: &TypeRef) -> ConstructorShape {
        let Some(decl) = ty.declared_name().and_then(|name| self.decls.get(name)) else {
            return ConstructorShape::Unsupported;
        };

        let token_constructor = decl
            .constructors
            .iter()
            .any(|params| matches!(params.as_slice(), [param] if param.has_erasure(CLASS)));
        if token_constructor {
            return ConstructorShape::OneClassArg;
        }
        if decl.constructors.iter().any(Vec::is_empty) {
            return ConstructorShape::NoArgs;
        }
        ConstructorShape::Unsupported
    }

    /// Check that every name `ty` references is declared with a matching arity.
    ///
    /// A declared type used without arguments is accepted as its raw form.
    pub fn check_type(&self, ty: &TypeRef) -> Result<(), String> {
        match ty {
            TypeRef::Declared { name, args } => {
                let decl = self
                    .decls
                    .get(name)
                    .ok_or_else(|| format!("Unknown type: {name}"))?;
                if !args.is_empty() && args.len() != decl.params.len() {
                    return Err(format!(
                        "Wrong number of type arguments for {name}: expected {}, found {}",
                        decl.params.len(),
                        args.len()
                    ));
                }
                args.iter().try_for_each(|arg| self.check_type(arg))
            }
            _ => Ok(()),
        }
    }

    /// Check every user declaration for unknown references and cycles.
    pub fn problems(&self) -> Vec<UniverseProblem> {
        let mut problems = Vec::new();

        for decl in self.decls.values() {
            let referenced = decl
                .supertypes
                .iter()
                .chain(decl.params.iter().flat_map(|p| p.bounds.iter()))
                .chain(decl.constructors.iter().flatten());
            for ty in referenced {
                if let Err(message) = self.check_type(ty) {
                    problems.push(UniverseProblem {
                        type_name: decl.name.clone(),
                        message,
                    });
                }
            }
        }

        for name in self.cyclic_types() {
            problems.push(UniverseProblem {
                message: format!("Cyclic inheritance involving {name}"),
                type_name: name,
            });
        }

        problems
    }

    /// Names of declarations that are their own (transitive) supertype.
    fn cyclic_types(&self) -> Vec<String> {
        self.decls
            .keys()
            .filter(|name| self.reaches(name, name, &mut HashSet::new()))
            .cloned()
            .collect()
    }

    fn reaches(&self, from: &str, target: &str, visited: &mut HashSet<String>) -> bool {
        let Some(decl) = self.decls.get(from) else {
            return false;
        };
        for supertype in &decl.supertypes {
            let Some(next) = supertype.declared_name() else {
                continue;
            };
            if next == target {
                return true;
            }
            if visited.insert(next.to_string()) && self.reaches(next, target, visited) {
                return true;
            }
        }
        false
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn is_object(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Declared { name, args } if name == OBJECT && args.is_empty())
}
