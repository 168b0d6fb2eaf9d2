//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in emitted fields.
//! Skipped and private fields are never traversed, so their types carry no
//! requirement.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` always reports `null`, whatever `T` is, so generics that
//! only appear inside it are left unbounded:
//!
//! ```ignore
//! #[derive(MaskJson)]
//! struct TypedId<T> {
//!     pub id: String,
//!     pub marker: PhantomData<T>, // T need not implement Maskable
//! }
//! ```
//!
//! ## Map Keys
//!
//! The map impls stringify keys with `Display`, so a type parameter used
//! directly as the key of a `HashMap` or `BTreeMap` is bounded by
//! `Display` instead of `Maskable`.

use proc_macro2::TokenStream;
use syn::{parse_quote, Ident};

/// Type parameters of emitted fields, grouped by the bound they need.
#[derive(Debug, Default)]
pub(crate) struct UsedGenerics {
    pub(crate) maskable: Vec<Ident>,
    pub(crate) display: Vec<Ident>,
}

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut UsedGenerics,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                let is_map = segment.ident == "HashMap" || segment.ident == "BTreeMap";
                let mut types = args.args.iter().filter_map(|arg| match arg {
                    syn::GenericArgument::Type(inner_ty) => Some(inner_ty),
                    _ => None,
                });
                if is_map {
                    // The hasher parameter, if any, is not part of the output.
                    if let Some(key) = types.next() {
                        collect_key_generics(key, generics, result);
                    }
                    if let Some(value) = types.next() {
                        collect_generics_from_type(value, generics, result);
                    }
                } else {
                    for inner_ty in types {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            if let Some(ident) = bare_ident(path) {
                push_param(ident, generics, &mut result.maskable);
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// A map key is only stringified, never traversed.
fn collect_key_generics(key: &syn::Type, generics: &syn::Generics, result: &mut UsedGenerics) {
    match key {
        syn::Type::Path(path) => {
            if let Some(ident) = bare_ident(path) {
                push_param(ident, generics, &mut result.display);
            }
        }
        syn::Type::Paren(paren) => collect_key_generics(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_key_generics(&group.elem, generics, result),
        _ => {}
    }
}

fn bare_ident(path: &syn::TypePath) -> Option<&Ident> {
    if path.qself.is_some() {
        return None;
    }
    path.path.get_ident()
}

fn push_param(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    for param in generics.type_params() {
        if *ident == param.ident && !result.iter().any(|g| g == &param.ident) {
            result.push(param.ident.clone());
        }
    }
}

/// Adds `Maskable` bounds to generic parameters used in emitted fields, and
/// `Display` bounds to those used as map keys.
pub(crate) fn add_maskable_bounds(
    mut generics: syn::Generics,
    used: &UsedGenerics,
    crate_root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used.maskable.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#crate_root::Maskable));
        }
        if used.display.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::std::fmt::Display));
        }
    }
    generics
}
