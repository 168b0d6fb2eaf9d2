//! Enum-specific `MaskJson` derivation.
//!
//! Each variant becomes one match arm. Unit variants report their (renamed)
//! name as text; newtype variants report a dynamic slot holding the payload,
//! so a record payload is masked exactly like a statically typed field.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    attrs::{has_derive_attrs, parse_field_options},
    container::ContainerOptions,
    generics::{collect_generics_from_type, UsedGenerics},
    DeriveOutput,
};

pub(crate) fn derive_enum(
    data: DataEnum,
    generics: &syn::Generics,
    options: &ContainerOptions,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut arms = Vec::new();
    let mut used_generics = UsedGenerics::default();

    for variant in data.variants {
        let span = variant.span();
        let variant_ident = &variant.ident;
        let variant_options = parse_field_options(&variant.attrs)?;
        if variant_options.mask || variant_options.omit_empty || variant_options.skip {
            return Err(syn::Error::new(
                variant_ident.span(),
                "only `rename` is supported on enum variants",
            ));
        }

        match variant.fields {
            Fields::Unit => {
                let name = variant_options.rename.map_or_else(
                    || {
                        let ident = variant_ident.unraw().to_string();
                        options
                            .rename_all
                            .map_or_else(|| ident.clone(), |rule| rule.apply_to_variant(&ident))
                    },
                    |rename| rename.value(),
                );
                arms.push(quote_spanned! { span =>
                    Self::#variant_ident => #crate_root::Shape::text(#name)
                });
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let field = &fields.unnamed[0];
                if let Some(attr_span) = has_derive_attrs(&field.attrs) {
                    return Err(syn::Error::new(
                        attr_span,
                        "field attributes are not supported on enum variant fields",
                    ));
                }
                collect_generics_from_type(&field.ty, generics, &mut used_generics);
                arms.push(quote_spanned! { span =>
                    Self::#variant_ident(ref inner) => #crate_root::Shape::dynamic(inner)
                });
            }
            _ => {
                return Err(syn::Error::new(
                    variant_ident.span(),
                    "`MaskJson` supports only unit and newtype enum variants",
                ));
            }
        }
    }

    Ok(DeriveOutput {
        shape_body: quote! {
            match *self {
                #(#arms,)*
            }
        },
        fields_body: None,
        used_generics,
    })
}
