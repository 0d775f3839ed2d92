//! Root model builder and the type universe of a declaration source

use super::BuildContext;
use super::group::{self, GroupModel};
use crate::GeneratorConfig;
use crate::diagnostics::{Diagnostics, Location};
use crate::naming::to_snake_case;
use crate::schema::{SchemaDocument, TypeSection};
use crate::types::{TypeParam, TypeRef};
use crate::universe::{TypeDecl, TypeKind, TypeUniverse};
use crate::validate::{is_qualified_name, is_reserved_word, is_usable_identifier};
use std::collections::{HashMap, HashSet};

/// The validated generated class.
#[derive(Debug, Clone)]
pub struct RootModel {
    /// Dotted name as declared.
    pub qualified_name: String,
    /// Enclosing modules, outermost first.
    pub modules: Vec<String>,
    pub class_name: String,
    /// Resource holder the keys are looked up in, for documentation.
    pub resources: Option<TypeRef>,
    pub finalized: bool,
    pub fluent: bool,
    pub editor: bool,
    pub emit_docs: bool,
    /// Path of the runtime crate in generated code.
    pub runtime: syn::Path,
    pub groups: Vec<GroupModel>,
}

impl RootModel {
    /// Name of the private struct holding the bound collaborators.
    pub fn state_type_name(&self) -> String {
        state_type_name(&self.class_name)
    }

    /// Name of the private static holding the state.
    pub fn state_static_name(&self) -> String {
        state_static_name(&self.class_name)
    }

    pub fn preference_count(&self) -> usize {
        self.groups.iter().map(|g| g.preferences.len()).sum()
    }
}

fn state_type_name(class_name: &str) -> String {
    format!("{class_name}State")
}

fn state_static_name(class_name: &str) -> String {
    format!("{}_STATE", to_snake_case(class_name).to_uppercase())
}

/// Build the type universe from the `[[types]]` tables.
///
/// Declarations that do not parse are reported and skipped.
pub fn build_universe(types: &[TypeSection], diagnostics: &mut Diagnostics) -> TypeUniverse {
    let mut universe = TypeUniverse::with_builtins();

    for (index, section) in types.iter().enumerate() {
        let location = Location::type_decl(index, &section.name);
        match type_decl(section) {
            Ok(decl) => {
                if let Err(message) = universe.declare(decl) {
                    diagnostics.report(&location, message);
                }
            }
            Err(message) => diagnostics.report(&location, message),
        }
    }

    let positions: HashMap<&str, usize> = types
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    for problem in universe.problems() {
        let location = match positions.get(problem.type_name.as_str()) {
            Some(&index) => Location::type_decl(index, &problem.type_name),
            None => Location::source(),
        };
        diagnostics.report(&location, problem.message);
    }

    universe
}

fn type_decl(section: &TypeSection) -> Result<TypeDecl, String> {
    match TypeRef::parse(&section.name) {
        Ok(ty) if ty.declared_name().is_some() && ty.args().is_empty() => {}
        _ => return Err(format!("Illegal type name: {}", section.name)),
    }

    let params = section
        .params
        .iter()
        .map(|p| TypeParam::parse(p).map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    let names: Vec<String> = params.iter().map(|p| p.name.clone()).collect();
    let params = params
        .into_iter()
        .map(|p| TypeParam {
            name: p.name,
            bounds: p
                .bounds
                .into_iter()
                .map(|b| b.with_variables(&names))
                .collect(),
        })
        .collect();

    let parse_all = |exprs: &[String]| {
        exprs
            .iter()
            .map(|e| {
                TypeRef::parse(e)
                    .map(|t| t.with_variables(&names))
                    .map_err(|err| err.to_string())
            })
            .collect::<Result<Vec<_>, _>>()
    };
    let supertypes = parse_all(&section.supertypes)?;

    let decl = match section.kind {
        TypeKind::Class => TypeDecl::class(section.name.clone()),
        TypeKind::Interface => TypeDecl::interface(section.name.clone()),
        TypeKind::Enum => TypeDecl::enumeration(section.name.clone()),
    }
    .with_params(params)
    .with_supertypes(supertypes);

    match &section.constructors {
        Some(constructors) => {
            let constructors = constructors
                .iter()
                .map(|c| parse_all(c))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(decl.with_constructors(constructors))
        }
        None => Ok(decl),
    }
}

/// Validate a whole declaration source.
///
/// Returns `None` only when the class name itself is unusable; otherwise the
/// model holds every element that validated, and `diagnostics` everything that
/// did not.
pub fn build(document: &SchemaDocument, diagnostics: &mut Diagnostics) -> Option<RootModel> {
    let root = &document.preferences;
    let location = Location::root(&root.name);

    let runtime = runtime_path(&document.generator, diagnostics);
    let universe = build_universe(&document.types, diagnostics);

    let segments: Vec<&str> = root.name.split('.').collect();
    let state_names = segments
        .last()
        .map(|class| [state_type_name(class), state_static_name(class)]);
    if !is_qualified_name(&root.name)
        || segments.iter().any(|s| is_reserved_word(s))
        || !state_names.is_some_and(|names| names.iter().all(|n| is_usable_identifier(n)))
    {
        diagnostics.report(
            &location,
            format!("Illegal preference class name: {}", root.name),
        );
        return None;
    }
    let (class_name, modules) = match segments.split_last() {
        Some((last, rest)) => (last.to_string(), rest.iter().map(|s| s.to_string()).collect()),
        None => return None,
    };

    let resources = root.resources.as_ref().and_then(|expr| {
        let parsed = TypeRef::parse(expr).map_err(|e| e.to_string());
        match parsed.and_then(|ty| universe.check_type(&ty).map(|()| ty)) {
            Ok(ty) => Some(ty),
            Err(message) => {
                diagnostics.report(&location, message);
                None
            }
        }
    });

    let mut reserved_items: HashSet<String> = [
        class_name.clone(),
        state_type_name(&class_name),
    ]
    .into_iter()
    .collect();
    let mut group_names = HashSet::new();
    let mut groups = Vec::with_capacity(root.groups.len());

    let mut ctx = BuildContext {
        universe: &universe,
        diagnostics: &mut *diagnostics,
        fluent: root.fluent,
        editor: root.editor,
    };
    for (index, decl) in root.groups.iter().enumerate() {
        let group_location = Location::group(index, &decl.name);
        if !group_names.insert(decl.name.as_str()) {
            ctx.diagnostics.report(
                &group_location,
                format!("Duplicate preference group name: {}", decl.name),
            );
            continue;
        }
        let Some(group) = group::build(&mut ctx, index, decl) else {
            continue;
        };

        let clashes: Vec<String> = group
            .item_names()
            .into_iter()
            .filter(|item| !reserved_items.insert(item.clone()))
            .collect();
        if !clashes.is_empty() {
            for item in clashes {
                ctx.diagnostics.report(
                    &group_location,
                    format!(
                        "Preference group {} generates type {item} which already exists",
                        decl.name
                    ),
                );
            }
            continue;
        }
        if ROOT_METHODS.contains(&group.accessor.as_str()) {
            ctx.diagnostics.report(
                &group_location,
                format!(
                    "Preference group {} generates accessor {} which already exists",
                    decl.name, group.accessor
                ),
            );
            continue;
        }

        groups.push(group);
    }

    let model = RootModel {
        qualified_name: root.name.clone(),
        modules,
        class_name,
        resources,
        finalized: root.finalized,
        fluent: root.fluent,
        editor: root.editor,
        emit_docs: document.generator.emit_docs,
        runtime: runtime?,
        groups,
    };

    tracing::info!(
        class = %model.qualified_name,
        groups = model.groups.len(),
        preferences = model.preference_count(),
        errors = diagnostics.error_count(),
        "preferences model built"
    );

    Some(model)
}

/// Associated functions of the root type that group accessors must not shadow.
const ROOT_METHODS: &[&str] = &["initialize", "is_initialized", "clear", "underlying_store"];

fn runtime_path(config: &GeneratorConfig, diagnostics: &mut Diagnostics) -> Option<syn::Path> {
    match config.runtime_path() {
        Ok(path) => Some(path),
        Err(err) => {
            diagnostics.report(
                &Location::generator(),
                format!("Illegal runtime crate path {}: {err}", config.runtime_crate),
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "root/root_tests.rs"]
mod root_tests;
