//! Rust code emission
//!
//! Turns a validated [`RootModel`] into the token stream of the generated
//! preference class. For a root named `com.example.AppPreferences` with a group
//! `general` the output has this shape:
//!
//! ```text
//! mod com { mod example {
//!     struct AppPreferences            initialize, general, clear, underlying_store
//!     struct AppPreferencesState       bound store and strings, one GroupCell per group
//!     static APP_PREFERENCES_STATE
//!     struct General                   getters, setters, keys(), edit()
//!     struct GeneralKeys               one key accessor per preference
//!     struct GeneralEditor<'a>         chainable setters, apply(), commit()
//! } }
//! ```
//!
//! Every path into the runtime goes through the configured runtime crate path,
//! and every std item is fully qualified, so the output does not depend on the
//! imports of the module it is expanded in.

use crate::classify::PersistedKind;
use crate::defaults::DefaultValue;
use crate::model::{GroupModel, PreferenceModel, RootModel};
use crate::resolve::Construction;
use crate::types::{PrimitiveKind, TypeRef};
use crate::universe::{CLASS, ENUM_SERIALIZER, SET, STRING};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

/// Emit the generated class for `model`.
pub fn emit(model: &RootModel) -> TokenStream {
    let tokens = RustEmitter::new(model).emit();
    tracing::debug!(
        class = %model.qualified_name,
        groups = model.groups.len(),
        "emitted preferences"
    );
    tokens
}

/// Stateless emitter over one root model.
pub struct RustEmitter<'a> {
    model: &'a RootModel,
    rt: &'a syn::Path,
    vis: TokenStream,
}

impl<'a> RustEmitter<'a> {
    pub fn new(model: &'a RootModel) -> Self {
        let vis = if model.finalized {
            quote!(pub)
        } else {
            quote!(pub(crate))
        };
        Self {
            model,
            rt: &model.runtime,
            vis,
        }
    }

    /// The whole output, wrapped in the package modules.
    pub fn emit(&self) -> TokenStream {
        let root = self.root_items();
        let groups = self.model.groups.iter().map(|group| self.group_items(group));
        let items = quote! {
            #root
            #(#groups)*
        };

        let vis = &self.vis;
        self.model.modules.iter().rev().fold(items, |inner, module| {
            let module = ident(module);
            quote! {
                #vis mod #module {
                    #inner
                }
            }
        })
    }

    fn root_items(&self) -> TokenStream {
        let rt = self.rt;
        let vis = &self.vis;
        let model = self.model;
        let class = ident(&model.class_name);
        let state = ident(&model.state_type_name());
        let state_static = ident(&model.state_static_name());

        let cell_fields = model.groups.iter().map(|group| {
            let field = ident(&group.cell_field_name());
            let ty = ident(&group.type_name);
            quote!(#field: #rt::GroupCell<#ty>,)
        });
        let cell_inits = model.groups.iter().map(|group| {
            let field = ident(&group.cell_field_name());
            quote!(#field: #rt::GroupCell::new(),)
        });

        let accessors = model.groups.iter().map(|group| {
            let accessor = ident(&group.accessor);
            let cell = ident(&group.cell_field_name());
            let ty = ident(&group.type_name);
            let doc = self.doc(&format!(
                "The `{}` preference group\n\nConstructed on first use. Fails with `PrefError::NotInitialized` before `initialize`, or with `PrefError::MissingResource` if a key cannot be resolved.",
                group.name
            ));
            quote! {
                #doc
                #vis fn #accessor() -> ::core::result::Result<&'static #ty, #rt::PrefError> {
                    let state = #state_static.get()?;
                    state
                        .#cell
                        .get_or_try_init(|| #ty::new(::std::sync::Arc::clone(&state.store), &*state.strings))
                }
            }
        });

        let clear_groups = model
            .groups
            .iter()
            .filter(|group| !group.preferences.is_empty())
            .map(|group| {
                let accessor = ident(&group.accessor);
                let removals = group.preferences.iter().map(|pref| {
                    let key = ident(&pref.method);
                    quote!(edits.push(#rt::Edit::remove(group.keys().#key()));)
                });
                quote! {
                    {
                        let group = Self::#accessor()?;
                        #(#removals)*
                    }
                }
            });
        let edits_binding = if model.preference_count() == 0 {
            quote!(let edits)
        } else {
            quote!(let mut edits)
        };

        let class_doc = self.doc(&format!(
            "Typed accessors for the `{}` preferences\n\nCall `{}::initialize` once before using any group.",
            model.qualified_name, model.class_name
        ));
        let mut initialize_doc = String::from(
            "Bind the store and the string resources preference keys are resolved from\n\nFails with `PrefError::AlreadyInitialized` on every call after the first.",
        );
        if let Some(resources) = &model.resources {
            initialize_doc.push_str(&format!(
                "\n\nKeys are declared as string resources of `{resources}`."
            ));
        }
        let initialize_doc = self.doc(&initialize_doc);
        let clear_doc = self.doc(
            "Remove the value of every declared preference in a single batch\n\nFails with `PrefError::NotInitialized` before `initialize`.",
        );
        let store_doc = self.doc("The store bound by `initialize`");

        quote! {
            #class_doc
            #[allow(dead_code)]
            #vis struct #class {
                _private: (),
            }

            #[allow(dead_code)]
            struct #state {
                store: ::std::sync::Arc<dyn #rt::KeyValueStore>,
                strings: ::std::sync::Arc<dyn #rt::ResourceStrings>,
                #(#cell_fields)*
            }

            #[allow(dead_code)]
            static #state_static: #rt::PreferencesCell<#state> = #rt::PreferencesCell::new();

            #[allow(dead_code)]
            impl #class {
                #initialize_doc
                #vis fn initialize(
                    store: ::std::sync::Arc<dyn #rt::KeyValueStore>,
                    strings: ::std::sync::Arc<dyn #rt::ResourceStrings>,
                ) -> ::core::result::Result<(), #rt::PrefError> {
                    #state_static.initialize(#state {
                        store,
                        strings,
                        #(#cell_inits)*
                    })
                }

                #vis fn is_initialized() -> bool {
                    #state_static.is_initialized()
                }

                #(#accessors)*

                #clear_doc
                #vis fn clear() -> ::core::result::Result<(), #rt::PrefError> {
                    let state = #state_static.get()?;
                    #edits_binding = ::std::vec::Vec::new();
                    #(#clear_groups)*
                    state.store.apply(edits);
                    ::core::result::Result::Ok(())
                }

                #store_doc
                #vis fn underlying_store() -> ::core::result::Result<::std::sync::Arc<dyn #rt::KeyValueStore>, #rt::PrefError> {
                    ::core::result::Result::Ok(::std::sync::Arc::clone(&#state_static.get()?.store))
                }
            }
        }
    }

    fn group_items(&self, group: &GroupModel) -> TokenStream {
        let rt = self.rt;
        let vis = &self.vis;
        let ty = ident(&group.type_name);
        let keys_ty = ident(&group.keys_type_name());

        let key_fields = group.preferences.iter().map(|pref| {
            let field = ident(&pref.method);
            quote!(#field: ::std::string::String,)
        });
        let key_methods = group.preferences.iter().map(|pref| {
            let field = ident(&pref.method);
            let doc = self.doc(&format!("Store key of the `{}` preference", pref.name));
            quote! {
                #doc
                #vis fn #field(&self) -> &str {
                    &self.#field
                }
            }
        });
        let key_inits = group.preferences.iter().map(|pref| {
            let field = ident(&pref.method);
            let resource = &pref.key_resource;
            quote!(#field: strings.get_string(#resource)?,)
        });

        let serializers: Vec<(Ident, &TypeRef, TokenStream)> = group
            .preferences
            .iter()
            .filter_map(|pref| {
                let field = ident(&pref.serializer_field());
                match &pref.binding.construction {
                    Construction::None => None,
                    Construction::DefaultConstructor(serializer) => {
                        let s = self.rust_type(serializer);
                        Some((field, serializer, quote!(<#s as ::core::default::Default>::default())))
                    }
                    Construction::ClassArgConstructor { serializer, token } => {
                        let s = self.rust_type(serializer);
                        let token = self.rust_type(token);
                        Some((
                            field,
                            serializer,
                            quote!(<#s as #rt::FromTypeToken<#token>>::from_type_token(#rt::TypeToken::new())),
                        ))
                    }
                }
            })
            .collect();
        let serializer_fields = serializers.iter().map(|(field, serializer, _)| {
            let s = self.rust_type(serializer);
            quote!(#field: #s,)
        });
        let serializer_inits = serializers.iter().map(|(field, _, init)| quote!(#field: #init,));

        let strings = if group.preferences.is_empty() {
            format_ident!("_strings")
        } else {
            format_ident!("strings")
        };

        let accessors = group
            .preferences
            .iter()
            .filter(|pref| !pref.is_void())
            .map(|pref| self.accessors(pref));

        let (edit_method, editor) = if self.model.editor {
            let editor_ty = ident(&group.editor_type_name());
            let doc = self.doc("Start a batch of changes, written by `apply` or `commit`");
            (
                quote! {
                    #doc
                    #vis fn edit(&self) -> #editor_ty<'_> {
                        #editor_ty {
                            group: self,
                            edits: ::std::vec::Vec::new(),
                        }
                    }
                },
                self.editor_items(group, &editor_ty),
            )
        } else {
            (quote!(), quote!())
        };

        let group_doc = self.doc(&format!("Accessors for the `{}` preference group", group.name));
        let keys_doc = self.doc(&format!("Store keys of the `{}` preference group", group.name));

        quote! {
            #group_doc
            #[allow(dead_code)]
            #vis struct #ty {
                store: ::std::sync::Arc<dyn #rt::KeyValueStore>,
                keys: #keys_ty,
                #(#serializer_fields)*
            }

            #keys_doc
            #[allow(dead_code)]
            #vis struct #keys_ty {
                #(#key_fields)*
            }

            #[allow(dead_code)]
            impl #keys_ty {
                #(#key_methods)*
            }

            #[allow(dead_code)]
            impl #ty {
                fn new(
                    store: ::std::sync::Arc<dyn #rt::KeyValueStore>,
                    #strings: &dyn #rt::ResourceStrings,
                ) -> ::core::result::Result<Self, #rt::PrefError> {
                    let keys = #keys_ty {
                        #(#key_inits)*
                    };
                    ::core::result::Result::Ok(Self {
                        store,
                        keys,
                        #(#serializer_inits)*
                    })
                }

                #vis fn keys(&self) -> &#keys_ty {
                    &self.keys
                }

                #(#accessors)*

                #edit_method
            }

            #editor
        }
    }

    /// Getter and setter of one non-void preference.
    fn accessors(&self, pref: &PreferenceModel) -> TokenStream {
        let rt = self.rt;
        let vis = &self.vis;
        let Some(names) = &pref.accessors else {
            return quote!();
        };
        let getter = ident(&names.getter);
        let setter = ident(&names.setter);
        let key = ident(&pref.method);
        let persisted = persisted_rust_type(pref.binding.persisted_kind);
        let default = default_tokens(&pref.default, pref.binding.persisted_kind);
        let doc = self.doc(pref.documentation.as_deref().unwrap_or_default());

        match pref.binding.construction.serializer() {
            None => quote! {
                #doc
                #vis fn #getter(&self) -> #persisted {
                    <#persisted as #rt::Persisted>::read(&*self.store, &self.keys.#key, #default)
                }

                #doc
                #vis fn #setter(&self, value: #persisted) {
                    self.store
                        .apply(::std::vec![<#persisted as #rt::Persisted>::into_edit(value, &self.keys.#key)]);
                }
            },
            Some(serializer) => {
                let s = self.rust_type(serializer);
                let field = ident(&pref.serializer_field());
                quote! {
                    #doc
                    #vis fn #getter(&self) -> ::core::result::Result<<#s as #rt::PreferenceSerializer>::Source, #rt::SerializationError> {
                        let value = <#persisted as #rt::Persisted>::read(&*self.store, &self.keys.#key, #default);
                        #rt::PreferenceSerializer::deserialize(&self.#field, value)
                    }

                    #doc
                    #vis fn #setter(&self, value: <#s as #rt::PreferenceSerializer>::Source) -> ::core::result::Result<(), #rt::SerializationError> {
                        let value = #rt::PreferenceSerializer::serialize(&self.#field, value)?;
                        self.store
                            .apply(::std::vec![<#persisted as #rt::Persisted>::into_edit(value, &self.keys.#key)]);
                        ::core::result::Result::Ok(())
                    }
                }
            }
        }
    }

    fn editor_items(&self, group: &GroupModel, editor_ty: &Ident) -> TokenStream {
        let rt = self.rt;
        let vis = &self.vis;
        let ty = ident(&group.type_name);

        let setters = group.preferences.iter().filter_map(|pref| {
            let names = pref.accessors.as_ref()?;
            let setter = ident(&names.editor_setter);
            let key = ident(&pref.method);
            let persisted = persisted_rust_type(pref.binding.persisted_kind);
            let doc = self.doc(pref.documentation.as_deref().unwrap_or_default());

            Some(match pref.binding.construction.serializer() {
                None => quote! {
                    #doc
                    #vis fn #setter(mut self, value: #persisted) -> Self {
                        self.edits
                            .push(<#persisted as #rt::Persisted>::into_edit(value, &self.group.keys.#key));
                        self
                    }
                },
                Some(serializer) => {
                    let s = self.rust_type(serializer);
                    let field = ident(&pref.serializer_field());
                    quote! {
                        #doc
                        #vis fn #setter(mut self, value: <#s as #rt::PreferenceSerializer>::Source) -> ::core::result::Result<Self, #rt::SerializationError> {
                            let value = #rt::PreferenceSerializer::serialize(&self.group.#field, value)?;
                            self.edits
                                .push(<#persisted as #rt::Persisted>::into_edit(value, &self.group.keys.#key));
                            ::core::result::Result::Ok(self)
                        }
                    }
                }
            })
        });

        let editor_doc = self.doc(&format!(
            "Pending changes to the `{}` preference group",
            group.name
        ));
        let apply_doc = self.doc("Write the pending changes without reporting the outcome");
        let commit_doc = self.doc("Write the pending changes atomically, returning whether they were stored");

        quote! {
            #editor_doc
            #[allow(dead_code)]
            #[must_use = "pending edits are only written by `apply` or `commit`"]
            #vis struct #editor_ty<'a> {
                group: &'a #ty,
                edits: ::std::vec::Vec<#rt::Edit>,
            }

            #[allow(dead_code)]
            impl<'a> #editor_ty<'a> {
                #(#setters)*

                #apply_doc
                #vis fn apply(self) {
                    self.group.store.apply(self.edits);
                }

                #commit_doc
                #vis fn commit(self) -> bool {
                    self.group.store.commit(self.edits)
                }
            }
        }
    }

    /// `#[doc]` attributes for `text`, one per line, if docs are enabled.
    fn doc(&self, text: &str) -> TokenStream {
        if !self.model.emit_docs || text.is_empty() {
            return quote!();
        }
        let lines = text.lines().map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!(" {line}")
            }
        });
        quote!(#(#[doc = #lines])*)
    }

    /// Tokens naming `ty` in generated code.
    pub fn rust_type(&self, ty: &TypeRef) -> TokenStream {
        let rt = self.rt;
        match ty {
            TypeRef::Primitive(kind) => primitive_type(*kind),
            TypeRef::Void => quote!(()),
            TypeRef::Variable(name) => {
                let name = ident(name);
                quote!(#name)
            }
            TypeRef::Declared { name, args } => {
                let args: Vec<TokenStream> = args.iter().map(|arg| self.rust_type(arg)).collect();
                if let (Some(kind), true) = (PrimitiveKind::from_boxed_name(name), args.is_empty()) {
                    return primitive_type(kind);
                }
                match name.as_str() {
                    STRING => quote!(::std::string::String),
                    SET => match args.first() {
                        Some(element) => quote!(::std::collections::BTreeSet<#element>),
                        None => quote!(::std::collections::BTreeSet<::std::string::String>),
                    },
                    CLASS => quote!(#rt::TypeToken<#(#args),*>),
                    ENUM_SERIALIZER => quote!(#rt::EnumSerializer<#(#args),*>),
                    _ => {
                        let path = path_tokens(name);
                        if args.is_empty() {
                            path
                        } else {
                            quote!(#path<#(#args),*>)
                        }
                    }
                }
            }
        }
    }
}

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

fn primitive_type(kind: PrimitiveKind) -> TokenStream {
    let name = ident(kind.rust_name());
    quote!(#name)
}

/// `a::b::C` or `::a::C` as path tokens.
fn path_tokens(name: &str) -> TokenStream {
    let (leading, rest) = match name.strip_prefix("::") {
        Some(rest) => (quote!(::), rest),
        None => (quote!(), name),
    };
    let segments = rest.split("::").map(ident);
    quote!(#leading #(#segments)::*)
}

/// The `Persisted` implementor for `kind`.
fn persisted_rust_type(kind: PersistedKind) -> TokenStream {
    match kind {
        PersistedKind::Boolean => quote!(bool),
        PersistedKind::Byte => quote!(i8),
        PersistedKind::Char => quote!(u16),
        PersistedKind::Short => quote!(i16),
        PersistedKind::Int => quote!(i32),
        PersistedKind::Long => quote!(i64),
        PersistedKind::Float => quote!(f32),
        PersistedKind::Double => quote!(f64),
        PersistedKind::String => quote!(::core::option::Option<::std::string::String>),
        PersistedKind::StringSet => {
            quote!(::core::option::Option<::std::collections::BTreeSet<::std::string::String>>)
        }
        PersistedKind::Void => quote!(()),
    }
}

/// Expression producing `default` as a value of the `Persisted` type of `kind`.
fn default_tokens(default: &DefaultValue, kind: PersistedKind) -> TokenStream {
    match default {
        DefaultValue::Bool(value) => quote!(#value),
        DefaultValue::Int(value) => {
            let suffix = match kind {
                PersistedKind::Byte => "i8",
                PersistedKind::Char => "u16",
                PersistedKind::Short => "i16",
                PersistedKind::Int => "i32",
                _ => "i64",
            };
            int_literal(*value, suffix)
        }
        DefaultValue::Float(value) => float_literal(*value, kind),
        DefaultValue::Str(value) => {
            quote!(::core::option::Option::Some(::std::string::String::from(#value)))
        }
        DefaultValue::StringSet(items) if items.is_empty() => {
            quote!(::core::option::Option::Some(::std::collections::BTreeSet::new()))
        }
        DefaultValue::StringSet(items) => quote! {
            ::core::option::Option::Some(
                [#(#items),*]
                    .into_iter()
                    .map(::std::string::String::from)
                    .collect::<::std::collections::BTreeSet<::std::string::String>>(),
            )
        },
        DefaultValue::Absent => quote!(::core::option::Option::None),
    }
}

fn int_literal(value: i64, suffix: &str) -> TokenStream {
    let literal = syn::LitInt::new(
        &format!("{}{suffix}", value.unsigned_abs()),
        Span::call_site(),
    );
    if value < 0 {
        quote!(-#literal)
    } else {
        quote!(#literal)
    }
}

fn float_literal(value: f64, kind: PersistedKind) -> TokenStream {
    let (ty, suffix) = if kind == PersistedKind::Float {
        (quote!(f32), "f32")
    } else {
        (quote!(f64), "f64")
    };
    if value.is_nan() {
        return quote!(#ty::NAN);
    }
    if value.is_infinite() {
        return if value > 0.0 {
            quote!(#ty::INFINITY)
        } else {
            quote!(#ty::NEG_INFINITY)
        };
    }

    let magnitude = if kind == PersistedKind::Float {
        format!("{:?}", (value as f32).abs())
    } else {
        format!("{:?}", value.abs())
    };
    let literal = syn::LitFloat::new(&format!("{magnitude}{suffix}"), Span::call_site());
    if value.is_sign_negative() {
        quote!(-#literal)
    } else {
        quote!(#literal)
    }
}
