//! Struct-specific `MaskJson` derivation.
//!
//! Named structs become records: one static `FieldMeta` per declared field
//! plus a `Record::fields` body pairing each entry with the field's value.
//! Tuple and unit structs report their shape directly.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Result, Visibility};

use crate::{
    attrs::{has_derive_attrs, parse_field_options},
    container::ContainerOptions,
    generics::{collect_generics_from_type, UsedGenerics},
    DeriveOutput,
};

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
    options: &ContainerOptions,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    match data.fields {
        Fields::Named(fields) => derive_named_struct(fields, generics, options, crate_root),
        Fields::Unnamed(fields) => derive_unnamed_struct(fields, generics, crate_root),
        Fields::Unit => Ok(DeriveOutput {
            shape_body: quote! { #crate_root::Shape::Null },
            fields_body: None,
            used_generics: UsedGenerics::default(),
        }),
    }
}

fn derive_named_struct(
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
    options: &ContainerOptions,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut metas = Vec::new();
    let mut entries = Vec::new();
    let mut used_generics = UsedGenerics::default();

    for (index, field) in fields.named.into_iter().enumerate() {
        let span = field.span();
        let field_options = parse_field_options(&field.attrs)?;
        let Some(ident) = field.ident else {
            return Err(syn::Error::new(span, "named field without an identifier"));
        };
        let ident_name = ident.unraw().to_string();
        let exported = !matches!(field.vis, Visibility::Inherited);

        let declared_name = if field_options.skip {
            Some("-".to_string())
        } else if let Some(rename) = &field_options.rename {
            Some(rename.value())
        } else {
            options
                .rename_all
                .map(|rule| rule.apply_to_field(&ident_name))
        };

        let mut meta = quote! { #crate_root::FieldMeta::new(#ident_name) };
        if let Some(name) = &declared_name {
            meta = quote! { #meta.named(#name) };
        }
        if field_options.omit_empty {
            meta = quote! { #meta.omit_empty() };
        }
        if field_options.mask {
            meta = quote! { #meta.masked() };
        }
        if !exported {
            meta = quote! { #meta.private() };
        }
        metas.push(meta);

        let entry = if field_options.skip || !exported {
            quote_spanned! { span =>
                #crate_root::Field::skipped(&FIELDS[#index])
            }
        } else {
            collect_generics_from_type(&field.ty, generics, &mut used_generics);
            quote_spanned! { span =>
                #crate_root::Field::new(&FIELDS[#index], &self.#ident)
            }
        };
        entries.push(entry);
    }

    let count = metas.len();
    Ok(DeriveOutput {
        shape_body: quote! { #crate_root::Shape::Record(self) },
        fields_body: Some(quote! {
            static FIELDS: [#crate_root::FieldMeta; #count] = [#(#metas),*];
            ::std::vec![#(#entries),*]
        }),
        used_generics,
    })
}

fn derive_unnamed_struct(
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = UsedGenerics::default();
    let mut items = Vec::new();

    for (index, field) in fields.unnamed.iter().enumerate() {
        if let Some(span) = has_derive_attrs(&field.attrs) {
            return Err(syn::Error::new(
                span,
                "field attributes are not supported on tuple struct fields",
            ));
        }
        collect_generics_from_type(&field.ty, generics, &mut used_generics);
        let member = syn::Index::from(index);
        items.push(member);
    }

    let shape_body = match items.as_slice() {
        [] => quote! { #crate_root::Shape::Seq(::std::vec::Vec::new()) },
        [only] => quote! { #crate_root::Maskable::shape(&self.#only) },
        _ => {
            let bindings: Vec<Ident> = (0..items.len())
                .map(|index| format_ident!("item_{index}"))
                .collect();
            quote! {
                #(let #bindings: &dyn #crate_root::Maskable = &self.#items;)*
                #crate_root::Shape::Seq(::std::vec![#(#bindings),*])
            }
        }
    };

    Ok(DeriveOutput {
        shape_body,
        fields_body: None,
        used_generics,
    })
}
