//! Parsing of field and variant attributes.
//!
//! This module maps `#[json(...)]`, `#[mask]` and the `#[serde(...)]`
//! fallback to the options the derive writes into each `FieldMeta`, and
//! produces structured errors for invalid forms.

use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, spanned::Spanned, Attribute, Expr, Lit, LitStr, Meta, Result};

use crate::container::serialize_name;

/// Options declared on a single field.
///
/// ## Attribute Mapping
///
/// | Attribute | Option |
/// |-----------|--------|
/// | `#[json(rename = "x")]` | `rename: Some("x")` |
/// | `#[json(omit_empty)]` | `omit_empty: true` |
/// | `#[json(skip)]` | `skip: true` |
/// | `#[mask]`, `#[mask = true]` | `mask: true` |
/// | `#[serde(rename = "x")]` | `rename` when `json` declares none |
/// | `#[serde(skip)]`, `#[serde(skip_serializing)]` | `skip` when `json` declares none |
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldOptions {
    pub(crate) rename: Option<LitStr>,
    pub(crate) omit_empty: bool,
    pub(crate) skip: bool,
    pub(crate) mask: bool,
}

/// Options collected from the `json` attributes alone.
#[derive(Default)]
struct JsonOptions {
    rename: Option<LitStr>,
    omit_empty: bool,
    skip: bool,
}

/// Options collected from the `serde` attributes alone.
#[derive(Default)]
struct SerdeOptions {
    rename: Option<LitStr>,
    skip: bool,
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut json = JsonOptions::default();
    let mut serde = SerdeOptions::default();
    let mut mask: Option<bool> = None;

    for attr in attrs {
        if attr.path().is_ident("json") {
            parse_json_attr(attr, &mut json)?;
        } else if attr.path().is_ident("mask") {
            if mask.is_some() {
                return Err(syn::Error::new(
                    attr.path().span(),
                    "multiple #[mask] attributes specified on the same field",
                ));
            }
            mask = Some(parse_mask_attr(attr)?);
        } else if attr.path().is_ident("serde") {
            parse_serde_attr(attr, &mut serde)?;
        }
    }

    Ok(FieldOptions {
        rename: json.rename.or(serde.rename),
        omit_empty: json.omit_empty,
        skip: json.skip || serde.skip,
        mask: mask.unwrap_or(false),
    })
}

/// Span of the first `json` or `mask` attribute, if any.
pub(crate) fn has_derive_attrs(attrs: &[Attribute]) -> Option<Span> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("json") || attr.path().is_ident("mask"))
        .map(|attr| attr.path().span())
}

fn parse_json_attr(attr: &Attribute, json: &mut JsonOptions) -> Result<()> {
    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new(
            attr.span(),
            "expected a list of options, e.g. #[json(rename = \"name\")]",
        ));
    };

    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if json.rename.is_some() {
                return Err(meta.error("duplicate json option `rename`"));
            }
            json.rename = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("omit_empty") || meta.path.is_ident("omitempty") {
            json.omit_empty = true;
        } else if meta.path.is_ident("skip") {
            json.skip = true;
        } else {
            return Err(meta.error(format!(
                "unknown json option `{}`; expected `rename`, `omit_empty` or `skip`",
                meta.path
                    .get_ident()
                    .map_or_else(|| "?".to_string(), ToString::to_string)
            )));
        }
        Ok(())
    })
}

fn parse_mask_attr(attr: &Attribute) -> Result<bool> {
    match &attr.meta {
        Meta::Path(_) => Ok(true),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Bool(value) => Ok(value.value),
                other => Err(syn::Error::new(
                    other.span(),
                    "expected `true` or `false`, e.g. #[mask = false]",
                )),
            },
            other => Err(syn::Error::new(
                other.span(),
                "expected `true` or `false`, e.g. #[mask = false]",
            )),
        },
        Meta::List(list) => Err(syn::Error::new(
            list.path.span(),
            "#[mask] takes no arguments; use #[mask] or #[mask = <bool>]",
        )),
    }
}

fn parse_serde_attr(attr: &Attribute, serde: &mut SerdeOptions) -> Result<()> {
    let Meta::List(list) = &attr.meta else {
        return Ok(());
    };

    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if let Some(name) = serialize_name(&meta)? {
                serde.rename = Some(name);
            }
        } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
            serde.skip = true;
        } else {
            skip_meta_value(&meta)?;
        }
        Ok(())
    })
}

/// Consumes whatever follows an option this derive does not interpret:
/// `= <expr>`, a parenthesized list, or nothing.
pub(crate) fn skip_meta_value(meta: &ParseNestedMeta<'_>) -> Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_meta_value(&nested))?;
    }
    Ok(())
}
