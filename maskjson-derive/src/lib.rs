//! Derive macro for `maskjson`.
//!
//! This crate generates the introspection code behind `#[derive(MaskJson)]`. It:
//! - reads `#[json(...)]`, `#[mask]` and (as a fallback) `#[serde(...)]`
//!   attributes
//! - emits a static `FieldMeta` table and a `Record` implementation for
//!   structs with named fields
//! - emits a `Maskable` implementation reporting the type's shape
//!
//! It does **not** mask anything. Masking is applied at runtime by
//! `maskjson::Masker`.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod attrs;
mod container;
mod derive_enum;
mod derive_struct;
mod generics;
use container::parse_container_options;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_maskable_bounds;

/// Derives `maskjson::Maskable` (and, for named structs, `maskjson::Record`).
///
/// # Container Attributes
///
/// - `#[json(rename_all = "...")]`: naming convention applied to fields (or
///   variants) without an explicit name. Accepts `lowercase`, `UPPERCASE`,
///   `PascalCase`, `camelCase`, `snake_case`, `SCREAMING_SNAKE_CASE`,
///   `kebab-case` and `SCREAMING-KEBAB-CASE`. `#[serde(rename_all = "...")]`
///   is honored when no `json` form is given.
///
/// # Field Attributes
///
/// - `#[json(rename = "name")]`: the key used in the output.
/// - `#[json(omit_empty)]`: omit the key when the value is empty (empty
///   string or collection, zero, `false`, `None`).
/// - `#[json(skip)]`: never emit the field. Its type need not implement
///   `Maskable`.
/// - `#[mask]` or `#[mask = true]`: emit the masked rendition of the value.
///   Masked fields are emitted even when `omit_empty` is set.
/// - `#[serde(rename = "...")]`, `#[serde(skip)]` and
///   `#[serde(skip_serializing)]` are honored when no `json` equivalent is
///   given. Other `serde` options are ignored.
///
/// Only `pub` fields (any `pub(...)` form) are emitted; private fields are
/// skipped.
///
/// # Shapes
///
/// | Item | Shape |
/// |------|-------|
/// | struct with named fields | record |
/// | newtype struct | the inner value's shape |
/// | tuple struct | sequence |
/// | unit struct | `null` |
/// | unit enum variant | its (renamed) name as text |
/// | newtype enum variant | dynamic slot holding the payload |
///
/// Struct and tuple enum variants, attributes on tuple fields, and unions are
/// rejected at compile time.
#[proc_macro_derive(MaskJson, attributes(json, mask))]
pub fn derive_mask_json(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the maskjson crate root.
///
/// Handles crate renaming (e.g., `masking = { package = "maskjson", ... }`).
/// Inside maskjson itself the crate declares `extern crate self as maskjson`,
/// so the absolute path resolves there too.
fn crate_root() -> TokenStream {
    match crate_name("maskjson") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::maskjson },
    }
}

/// Generated bodies for one derive input.
struct DeriveOutput {
    /// Body of `Maskable::shape`.
    shape_body: TokenStream,
    /// Body of `Record::fields`, for records only.
    fields_body: Option<TokenStream>,
    /// Type parameters of emitted fields and the bounds they need.
    used_generics: generics::UsedGenerics,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let options = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(data, &generics, &options, &crate_root)?,
        Data::Enum(data) => derive_enum(data, &generics, &options, &crate_root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`MaskJson` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_maskable_bounds(generics, &output.used_generics, &crate_root);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let shape_body = &output.shape_body;

    let record_impl = output.fields_body.as_ref().map(|fields_body| {
        quote! {
            impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
                fn fields(&self) -> ::std::vec::Vec<#crate_root::Field<'_>> {
                    #fields_body
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            fn shape(&self) -> #crate_root::Shape<'_> {
                #shape_body
            }
        }

        #record_impl
    })
}
