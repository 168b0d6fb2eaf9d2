//! Field metadata and classification.
//!
//! `#[derive(MaskJson)]` emits one static [`FieldMeta`] per declared field.
//! At traversal time [`classify`] turns that metadata into the treatment the
//! builder applies: the output key, whether an empty value is omitted, and
//! whether the value is masked.

use std::borrow::Cow;

/// Serialization name that marks a field as skipped.
pub(crate) const SKIP_SENTINEL: &str = "-";

/// Declared metadata for a record field.
///
/// This mirrors the annotations on the field:
///
/// | Annotation | Metadata |
/// |------------|----------|
/// | `#[json(rename = "x")]` | `name: Some("x")` |
/// | `#[json(skip)]` | `name: Some("-")` |
/// | `#[json(omit_empty)]` | `omit_empty: true` |
/// | `#[mask]` | `mask: true` |
/// | `pub` visibility | `exported: true` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    /// The field's identifier as written in source.
    pub ident: &'static str,
    /// Declared serialization name, if any.
    pub name: Option<&'static str>,
    /// Omit the key when the value is empty.
    pub omit_empty: bool,
    /// Replace the value with its masked rendition.
    pub mask: bool,
    /// Whether the field is visible outside its module.
    pub exported: bool,
}

impl FieldMeta {
    /// Metadata for an exported field with no annotations.
    #[must_use]
    pub const fn new(ident: &'static str) -> Self {
        Self {
            ident,
            name: None,
            omit_empty: false,
            mask: false,
            exported: true,
        }
    }

    /// Sets the declared serialization name.
    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Marks the field as omitted when empty.
    #[must_use]
    pub const fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Marks the field for masking.
    #[must_use]
    pub const fn masked(mut self) -> Self {
        self.mask = true;
        self
    }

    /// Marks the field as not exported.
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Returns `true` when the builder never emits this field.
    pub fn is_skipped(&self) -> bool {
        !self.exported || self.name == Some(SKIP_SENTINEL)
    }
}

/// Treatment the builder applies to a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Key in the output object.
    pub output_name: Cow<'static, str>,
    /// Omit the key when the value is empty.
    pub omit_if_empty: bool,
    /// Emit the masked rendition instead of the value.
    pub mask_required: bool,
}

/// Classifies a field from its declared metadata.
///
/// Returns `None` when the field is skipped: its declared name is `"-"` or it
/// is not exported. An empty declared name falls back to the identifier.
pub fn classify(meta: &FieldMeta) -> Option<FieldDescriptor> {
    if meta.is_skipped() {
        return None;
    }

    let output_name = match meta.name {
        Some(name) if !name.is_empty() => name,
        _ => meta.ident,
    };

    Some(FieldDescriptor {
        output_name: Cow::Borrowed(output_name),
        omit_if_empty: meta.omit_empty,
        mask_required: meta.mask,
    })
}
