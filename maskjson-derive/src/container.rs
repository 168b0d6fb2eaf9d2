//! Container-level attribute parsing for `#[derive(MaskJson)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{meta::ParseNestedMeta, spanned::Spanned, Attribute, LitStr, Meta, Result};

use crate::attrs::skip_meta_value;

/// Naming convention applied to fields and variants without a declared name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    const NAMES: [(&'static str, Self); 8] = [
        ("lowercase", Self::Lower),
        ("UPPERCASE", Self::Upper),
        ("PascalCase", Self::Pascal),
        ("camelCase", Self::Camel),
        ("snake_case", Self::Snake),
        ("SCREAMING_SNAKE_CASE", Self::ScreamingSnake),
        ("kebab-case", Self::Kebab),
        ("SCREAMING-KEBAB-CASE", Self::ScreamingKebab),
    ];

    fn parse(lit: &LitStr) -> Result<Self> {
        let value = lit.value();
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, rule)| *rule)
            .ok_or_else(|| {
                let expected = Self::NAMES
                    .iter()
                    .map(|(name, _)| format!("`{name}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                syn::Error::new(
                    lit.span(),
                    format!("unknown rename rule `{value}`; expected one of {expected}"),
                )
            })
    }

    /// Renames a field identifier, assumed to be `snake_case`.
    pub(crate) fn apply_to_field(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            Self::Camel => lower_first(&Self::Pascal.apply_to_field(field)),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => Self::ScreamingSnake.apply_to_field(field).replace('_', "-"),
        }
    }

    /// Renames a variant identifier, assumed to be `PascalCase`.
    pub(crate) fn apply_to_variant(self, variant: &str) -> String {
        match self {
            Self::Pascal => variant.to_string(),
            Self::Lower => variant.to_ascii_lowercase(),
            Self::Upper => variant.to_ascii_uppercase(),
            Self::Camel => lower_first(variant),
            Self::Snake => {
                let mut snake = String::with_capacity(variant.len() + 4);
                for (i, ch) in variant.char_indices() {
                    if i > 0 && ch.is_uppercase() {
                        snake.push('_');
                    }
                    snake.push(ch.to_ascii_lowercase());
                }
                snake
            }
            Self::ScreamingSnake => Self::Snake.apply_to_variant(variant).to_ascii_uppercase(),
            Self::Kebab => Self::Snake.apply_to_variant(variant).replace('_', "-"),
            Self::ScreamingKebab => Self::ScreamingSnake
                .apply_to_variant(variant)
                .replace('_', "-"),
        }
    }
}

fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_lowercase().to_string() + chars.as_str()
    })
}

/// Options parsed from container-level attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Naming convention for undeclared names; `json` wins over `serde`.
    pub(crate) rename_all: Option<RenameRule>,
}

/// Parses container-level `#[json(...)]` and `#[serde(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut json_rule = None;
    let mut serde_rule = None;

    for attr in attrs {
        if attr.path().is_ident("mask") {
            return Err(syn::Error::new(
                attr.span(),
                "#[mask] is only valid on fields",
            ));
        }

        if attr.path().is_ident("json") {
            let Meta::List(list) = &attr.meta else {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a list of options, e.g. #[json(rename_all = \"camelCase\")]",
                ));
            };
            list.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if json_rule.is_some() {
                        return Err(meta.error("duplicate json option `rename_all`"));
                    }
                    json_rule = Some(RenameRule::parse(&meta.value()?.parse()?)?);
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unknown container option `{}`; expected `rename_all`",
                        meta.path
                            .get_ident()
                            .map_or_else(|| "?".to_string(), ToString::to_string)
                    )))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            let Meta::List(list) = &attr.meta else {
                continue;
            };
            list.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(lit) = serialize_name(&meta)? {
                        serde_rule = Some(RenameRule::parse(&lit)?);
                    }
                    Ok(())
                } else {
                    skip_meta_value(&meta)
                }
            })?;
        }
    }

    Ok(ContainerOptions {
        rename_all: json_rule.or(serde_rule),
    })
}

/// Reads `key = "x"` or `key(serialize = "x", ...)` and returns the
/// serialization-side literal.
pub(crate) fn serialize_name(meta: &ParseNestedMeta<'_>) -> Result<Option<LitStr>> {
    if meta.input.peek(syn::Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("serialize") {
                name = Some(nested.value()?.parse()?);
                Ok(())
            } else {
                skip_meta_value(&nested)
            }
        })?;
    }
    Ok(name)
}
