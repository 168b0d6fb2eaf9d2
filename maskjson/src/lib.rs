//! Masked JSON projections of structured data.
//!
//! This crate turns a value into a JSON tree in which fields annotated with
//! `#[mask]` are replaced by an asterisk-masked rendition, while every other
//! field is emitted as a standard JSON encoder would emit it.
//!
//! The pieces:
//! - **Masking**: [`mask_str`] keeps a short prefix of a string visible and
//!   replaces the rest with asterisks, governed by [`MaskConfig`].
//! - **Classification**: [`classify`] turns a field's declared metadata
//!   ([`FieldMeta`]) into a [`FieldDescriptor`] (output name, omission, masking).
//! - **Traversal**: values describe themselves through [`Maskable::shape`];
//!   the builder walks records, options, sequences, maps and dynamic values
//!   and produces a [`MaskedTree`].
//! - **Engine**: [`Masker`] owns a config and exposes `marshal`.
//!
//! ```ignore
//! use maskjson::{MaskJson, Masker};
//!
//! #[derive(MaskJson)]
//! struct Auth {
//!     #[json(rename = "account")]
//!     pub account: String,
//!     #[json(rename = "password")]
//!     #[mask]
//!     pub password: String,
//! }
//!
//! let masker = Masker::new(false, 3);
//! let json = masker.to_string(&auth)?;
//! // {"account":"henry","password":"12****"}
//! ```
//!
//! Key rules:
//! - Only exported (`pub`) fields are emitted.
//! - Masked fields are always emitted, even when empty.
//! - A top-level value that is not a record is passed through unmasked.
//!
//! What it does not do:
//! - decide whether a value should be logged
//! - encrypt or hash values
//! - validate values against a schema
//!
//! The `MaskJson` derive macro lives in `maskjson-derive` and is re-exported
//! from this crate. A `slog` adapter is available behind the `slog` feature.

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

pub use maskjson_derive::MaskJson;

#[allow(unused_extern_crates)]
extern crate self as maskjson;

// Module declarations
mod builder;
mod config;
mod error;
mod field;
mod marshal;
mod mask;
mod shape;
#[cfg(feature = "slog")]
pub mod slog;
mod tree;

// Re-exports
pub use config::{MaskConfig, DEFAULT_GRANULARITY, DEFAULT_MAX_DEPTH, MASK_CHAR};
pub use error::{Error, Result};
pub use field::{classify, FieldDescriptor, FieldMeta};
pub use marshal::Masker;
pub use mask::{mask_str, mask_value};
pub use shape::{Any, Field, Maskable, Record, Shape};
pub use tree::MaskedTree;
