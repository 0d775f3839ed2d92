//! Group model builder

use super::BuildContext;
use super::preference::{self, PreferenceModel};
use crate::diagnostics::Location;
use crate::naming::{to_pascal_case, to_snake_case};
use crate::schema::GroupSection;
use crate::validate::{
    is_identifier, is_identifier_suffix, is_reserved_word, is_usable_identifier,
};
use std::collections::HashSet;

/// Method names every group type defines besides its accessors.
const GROUP_METHODS: &[&str] = &["new", "keys"];
const EDITOR_METHOD: &str = "edit";
/// Method names every editor type defines besides its setters.
const EDITOR_METHODS: &[&str] = &["apply", "commit"];

/// One validated preference group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupModel {
    pub index: usize,
    /// Name as declared.
    pub name: String,
    /// snake_case accessor on the root type.
    pub accessor: String,
    /// PascalCase name of the group type.
    pub type_name: String,
    pub prefix: String,
    pub suffix: String,
    pub preferences: Vec<PreferenceModel>,
}

impl GroupModel {
    /// Name of the generated key container type.
    pub fn keys_type_name(&self) -> String {
        keys_type_name(&self.type_name)
    }

    /// Name of the generated editor type.
    pub fn editor_type_name(&self) -> String {
        editor_type_name(&self.type_name)
    }

    /// Name of the lazily constructed group field in the root state.
    pub fn cell_field_name(&self) -> String {
        format!("{}_group", self.accessor)
    }

    /// Every item name the group introduces into the generated module.
    pub fn item_names(&self) -> [String; 3] {
        [
            self.type_name.clone(),
            self.keys_type_name(),
            self.editor_type_name(),
        ]
    }
}

fn keys_type_name(type_name: &str) -> String {
    format!("{type_name}Keys")
}

fn editor_type_name(type_name: &str) -> String {
    format!("{type_name}Editor")
}

/// Validate one group and build its preferences.
///
/// An invalid name, prefix or suffix drops the group without looking at its
/// preferences.
pub fn build(ctx: &mut BuildContext<'_>, index: usize, decl: &GroupSection) -> Option<GroupModel> {
    let location = Location::group(index, &decl.name);

    let accessor = to_snake_case(&decl.name);
    let type_name = to_pascal_case(&decl.name);
    let generated_names = [
        accessor.clone(),
        type_name.clone(),
        keys_type_name(&type_name),
        editor_type_name(&type_name),
    ];
    if !is_identifier(&decl.name)
        || is_reserved_word(&decl.name)
        || !generated_names.iter().all(|n| is_usable_identifier(n))
    {
        ctx.diagnostics.report(
            &location,
            format!("Illegal preference group name: {}", decl.name),
        );
        return None;
    }
    if !decl.prefix.is_empty() && !is_identifier(&decl.prefix) {
        ctx.diagnostics.report(
            &location,
            format!("Illegal preference group prefix: {}", decl.prefix),
        );
        return None;
    }
    if !is_identifier_suffix(&decl.suffix) {
        ctx.diagnostics.report(
            &location,
            format!("Illegal preference group suffix: {}", decl.suffix),
        );
        return None;
    }

    if decl.preferences.is_empty() {
        ctx.diagnostics.warn(
            &location,
            format!("Preference group {} declares no preferences", decl.name),
        );
    }

    let mut names = HashSet::new();
    let mut group_methods: HashSet<String> =
        GROUP_METHODS.iter().map(|m| m.to_string()).collect();
    if ctx.editor {
        group_methods.insert(EDITOR_METHOD.to_string());
    }
    let mut editor_methods: HashSet<String> =
        EDITOR_METHODS.iter().map(|m| m.to_string()).collect();
    let mut key_methods = HashSet::new();

    let mut preferences = Vec::with_capacity(decl.preferences.len());
    for (i, pref) in decl.preferences.iter().enumerate() {
        if !names.insert(pref.name.as_str()) {
            ctx.diagnostics.report(
                &Location::preference(index, i, &pref.name),
                format!("Duplicate preference name: {}", pref.name),
            );
            continue;
        }
        let Some(model) = preference::build(ctx, index, &decl.prefix, &decl.suffix, i, pref) else {
            continue;
        };

        let mut collisions = Vec::new();
        if !key_methods.insert(model.method.clone()) {
            collisions.push(model.method.clone());
        }
        if let Some(accessors) = &model.accessors {
            for name in [&accessors.getter, &accessors.setter] {
                if !group_methods.insert(name.clone()) {
                    collisions.push(name.clone());
                }
            }
            if ctx.editor && !editor_methods.insert(accessors.editor_setter.clone()) {
                collisions.push(accessors.editor_setter.clone());
            }
        }
        if !collisions.is_empty() {
            for name in collisions {
                ctx.diagnostics.report(
                    &Location::preference(index, i, &pref.name),
                    format!(
                        "Preference {} generates accessor {name} which already exists in group {}",
                        pref.name, decl.name
                    ),
                );
            }
            continue;
        }

        preferences.push(model);
    }

    tracing::debug!(
        group = %decl.name,
        preferences = preferences.len(),
        "group built"
    );

    Some(GroupModel {
        index,
        name: decl.name.clone(),
        accessor,
        type_name,
        prefix: decl.prefix.clone(),
        suffix: decl.suffix.clone(),
        preferences,
    })
}
