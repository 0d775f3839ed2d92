//! Preference model builder

use super::BuildContext;
use crate::classify::PersistedKind;
use crate::defaults::DefaultValue;
use crate::diagnostics::Location;
use crate::naming::{editor_setter_name, getter_name, setter_name, to_snake_case};
use crate::resolve::{SerializerBinding, resolve};
use crate::schema::PreferenceSection;
use crate::types::TypeRef;
use crate::validate::{is_identifier, is_reserved_word, is_usable_identifier};

/// Method names generated for a non-void preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessors {
    pub getter: String,
    pub setter: String,
    pub editor_setter: String,
}

/// One fully resolved preference.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceModel {
    /// Position within the group declaration.
    pub index: usize,
    /// Name as declared.
    pub name: String,
    /// snake_case name used for the key accessor and fields.
    pub method: String,
    /// String resource holding the key: `prefix + name + suffix`.
    pub key_resource: String,
    pub binding: SerializerBinding,
    pub default: DefaultValue,
    /// Description plus default value, when a description was given.
    pub documentation: Option<String>,
    /// `None` for void preferences, which only get a key accessor.
    pub accessors: Option<Accessors>,
}

impl PreferenceModel {
    pub fn is_void(&self) -> bool {
        self.binding.persisted_kind == PersistedKind::Void
    }

    /// Name of the group field holding the serializer, for preferences that have one.
    pub fn serializer_field(&self) -> String {
        format!("{}_serializer", self.method)
    }
}

/// Validate and resolve one preference declaration.
///
/// Returns `None` after reporting if anything is wrong with it.
pub fn build(
    ctx: &mut BuildContext<'_>,
    group_index: usize,
    prefix: &str,
    suffix: &str,
    index: usize,
    decl: &PreferenceSection,
) -> Option<PreferenceModel> {
    let location = Location::preference(group_index, index, &decl.name);

    if !is_identifier(&decl.name) {
        ctx.diagnostics
            .report(&location, format!("Illegal preference name: {}", decl.name));
        return None;
    }
    let method = to_snake_case(&decl.name);
    if is_reserved_word(&decl.name) || !is_usable_identifier(&method) {
        ctx.diagnostics
            .report(&location, format!("Illegal preference name: {}", decl.name));
        return None;
    }
    let key_resource = format!("{prefix}{}{suffix}", decl.name);
    if !is_identifier(&key_resource) {
        ctx.diagnostics
            .report(&location, format!("Illegal preference key: {key_resource}"));
        return None;
    }

    let declared = parse_checked(ctx, &location, &decl.ty)?;
    let serializer = match &decl.serializer {
        Some(expr) => Some(parse_checked(ctx, &location, expr)?),
        None => None,
    };

    let binding = match resolve(ctx.universe, &decl.name, &declared, serializer.as_ref()) {
        Ok(binding) => binding,
        Err(message) => {
            ctx.diagnostics.report(&location, message);
            return None;
        }
    };

    if binding.persisted_kind == PersistedKind::Void && decl.default.is_some() {
        ctx.diagnostics.warn(
            &location,
            format!("Default value of void preference {} has no effect", decl.name),
        );
    }
    let default = match DefaultValue::resolve(decl.default.as_ref(), binding.persisted_kind) {
        Ok(default) => default,
        Err(message) => {
            ctx.diagnostics.report(&location, message);
            return None;
        }
    };

    let documentation = (!decl.description.is_empty()).then(|| {
        if binding.persisted_kind == PersistedKind::Void {
            decl.description.clone()
        } else {
            format!("{}\n\n(default: {})", decl.description, default.doc_text())
        }
    });

    let accessors = (binding.persisted_kind != PersistedKind::Void).then(|| Accessors {
        getter: getter_name(&method, binding.is_boolean(), ctx.fluent),
        setter: setter_name(&method),
        editor_setter: editor_setter_name(&method, ctx.fluent),
    });

    tracing::debug!(
        preference = %decl.name,
        key = %key_resource,
        kind = %binding.persisted_kind,
        "preference built"
    );

    Some(PreferenceModel {
        index,
        name: decl.name.clone(),
        method,
        key_resource,
        binding,
        default,
        documentation,
        accessors,
    })
}

/// Parse a type expression and check it against the universe, reporting failures.
fn parse_checked(ctx: &mut BuildContext<'_>, location: &Location, expr: &str) -> Option<TypeRef> {
    let ty = match TypeRef::parse(expr) {
        Ok(ty) => ty,
        Err(err) => {
            ctx.diagnostics.report(location, err.to_string());
            return None;
        }
    };
    if let Err(message) = ctx.universe.check_type(&ty) {
        ctx.diagnostics.report(location, message);
        return None;
    }
    Some(ty)
}

#[cfg(test)]
#[path = "preference/preference_tests.rs"]
mod preference_tests;
