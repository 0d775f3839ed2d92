//! prefgen-macros - Procedural macros for typed preferences
//!
//! This crate provides:
//! - `preferences!("path.toml")` - Generate accessors from a declaration file
//! - `inline_preferences!(r#"..."#)` - Generate accessors from an inline declaration
//! - `#[derive(PreferenceEnum)]` - Persist unit enums by variant name
//!
//! Generated code refers to the runtime through `::prefgen_core` unless the
//! declaration overrides `generator.runtime_crate`, so the calling crate must
//! depend on `prefgen-core`.

use darling::{FromDeriveInput, FromVariant};
use prefgen_codegen::{Diagnostic, GenerationFailure};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use std::path::{Path, PathBuf};
use syn::{DeriveInput, LitStr, parse_macro_input};

/// Generate a preference class from a TOML declaration file
///
/// The path is relative to the directory of the calling crate's `Cargo.toml`.
/// Every error found in the declaration becomes a compile error.
///
/// # Example
///
/// ```ignore
/// mod prefs {
///     prefgen_macros::preferences!("prefs.toml");
/// }
///
/// prefs::AppPreferences::initialize(store, Arc::new(IdentityResources))?;
/// let count = prefs::AppPreferences::general()?.count();
/// ```
#[proc_macro]
pub fn preferences(input: TokenStream) -> TokenStream {
    let path = parse_macro_input!(input as LitStr);
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    TokenStream::from(expand_file(&path, Path::new(&manifest_dir)))
}

/// Generate a preference class from a TOML declaration given inline
///
/// # Example
///
/// ```ignore
/// prefgen_macros::inline_preferences!(r#"
///     [preferences]
///     name = "Prefs"
///
///     [[preferences.groups]]
///     name = "general"
///     preferences = [{ name = "count", type = "int" }]
/// "#);
/// ```
#[proc_macro]
pub fn inline_preferences(input: TokenStream) -> TokenStream {
    let source = parse_macro_input!(input as LitStr);
    TokenStream::from(expand_source(&source.value(), source.span()))
}

/// Options for the PreferenceEnum derive macro
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(preference), supports(enum_unit))]
struct PreferenceEnumOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<VariantOpts, ()>,

    /// Name used in error messages (default: the enum name)
    #[darling(default)]
    type_name: Option<String>,

    /// Path of the runtime crate (default: `::prefgen_core`)
    #[darling(default)]
    runtime: Option<syn::Path>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(preference))]
struct VariantOpts {
    ident: syn::Ident,

    /// Persisted name (default: the variant name)
    #[darling(default)]
    rename: Option<String>,
}

/// Derive macro for enums persisted by variant name
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, PreferenceEnum)]
/// enum Theme {
///     Light,
///     #[preference(rename = "night")]
///     Dark,
/// }
/// ```
#[proc_macro_derive(PreferenceEnum, attributes(preference))]
pub fn derive_preference_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_preference_enum(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => TokenStream::from(e.write_errors()),
    }
}

fn expand_file(path: &LitStr, manifest_dir: &Path) -> TokenStream2 {
    let full_path = resolve_path(manifest_dir, &path.value());

    let source = match std::fs::read_to_string(&full_path) {
        Ok(source) => source,
        Err(err) => {
            let message = format!("failed to read {}: {err}", full_path.display());
            return syn::Error::new(path.span(), message).to_compile_error();
        }
    };

    let generated = expand_source(&source, path.span());
    let tracked = full_path.to_string_lossy().into_owned();

    quote! {
        const _: &str = ::core::include_str!(#tracked);
        #generated
    }
}

fn expand_source(source: &str, span: Span) -> TokenStream2 {
    match prefgen_codegen::generate(source) {
        Ok(tokens) => tokens,
        Err(failure) => failure_to_compile_errors(&failure, span),
    }
}

fn resolve_path(manifest_dir: &Path, path: &str) -> PathBuf {
    manifest_dir.join(path)
}

/// One `compile_error!` per reported error, all spanning the macro input
fn failure_to_compile_errors(failure: &GenerationFailure, span: Span) -> TokenStream2 {
    let errors = failure
        .diagnostics()
        .iter()
        .filter(|d| d.is_error())
        .map(|d| syn::Error::new(span, diagnostic_message(d)).to_compile_error());
    quote!(#(#errors)*)
}

fn diagnostic_message(diagnostic: &Diagnostic) -> String {
    format!("{}: {}", diagnostic.location, diagnostic.message)
}

fn expand_preference_enum(input: &DeriveInput) -> Result<TokenStream2, darling::Error> {
    let opts = PreferenceEnumOpts::from_derive_input(input)?;

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();
    let runtime = opts
        .runtime
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::prefgen_core));
    let type_name = opts.type_name.clone().unwrap_or_else(|| name.to_string());

    let variants = opts
        .data
        .take_enum()
        .ok_or_else(|| darling::Error::unsupported_shape("struct").with_span(name))?;

    let mut persisted = Vec::with_capacity(variants.len());
    let mut errors = darling::Error::accumulator();
    for variant in &variants {
        let value = variant
            .rename
            .clone()
            .unwrap_or_else(|| variant.ident.to_string());
        if persisted.contains(&value) {
            errors.push(
                darling::Error::custom(format!("duplicate persisted name '{value}'"))
                    .with_span(&variant.ident),
            );
        }
        persisted.push(value);
    }
    errors.finish()?;

    let idents: Vec<_> = variants.iter().map(|v| &v.ident).collect();

    Ok(quote! {
        impl #impl_generics #runtime::PreferenceEnum for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const VARIANTS: &'static [Self] = &[#(Self::#idents),*];

            fn name(&self) -> &'static str {
                match self {
                    #(Self::#idents => #persisted,)*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#persisted => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

#[cfg(test)]
mod lib_tests;
