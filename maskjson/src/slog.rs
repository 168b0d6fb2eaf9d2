//! Adapters for emitting masked values through `slog`.
//!
//! This module connects [`Masker`] with `slog` by providing `slog::Value`
//! implementations that serialize masked trees as structured JSON via `slog`'s
//! nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the masked tree, not the original
//!   value.
//! - Never blocking a log entry: if masking fails, the field is emitted
//!   unmasked through its `Serialize` impl, and if that fails too a
//!   placeholder string is emitted instead.
//!
//! It does not configure `slog` or decide which values are logged.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{marshal::Masker, shape::Maskable};

/// Emitted when neither the masked nor the original value can be serialized.
pub const FALLBACK_PLACEHOLDER: &str = "Failed to serialize value";

/// An owned `slog::Value` holding an already masked JSON payload.
///
/// Being `'static`, it can be attached to a logger's context with `o!`.
#[derive(Clone, Debug)]
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The JSON payload that will be logged.
    pub const fn as_json(&self) -> &JsonValue {
        &self.value
    }

    /// Consumes the wrapper, returning the payload.
    pub fn into_json(self) -> JsonValue {
        self.value
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// A borrowed `slog::Value` that masks its value when the record is emitted.
///
/// Use it in a logging statement's key-value list:
///
/// ```ignore
/// info!(logger, "login"; "request" => masker.masked(&request));
/// ```
pub struct Masked<'a, T: ?Sized> {
    masker: &'a Masker,
    value: &'a T,
}

impl<T> SlogValue for Masked<'_, T>
where
    T: Maskable + Serialize + ?Sized,
{
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(masked_or_original(self.masker, self.value));
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl Masker {
    /// Masks `value` now and returns an owned `slog::Value`.
    ///
    /// On failure the unmasked value is logged instead.
    pub fn log_value<T>(&self, value: &T) -> MaskedJson
    where
        T: Maskable + Serialize + ?Sized,
    {
        MaskedJson::new(masked_or_original(self, value))
    }

    /// Wraps `value` so it is masked when the log record is emitted.
    pub const fn masked<'a, T: ?Sized>(&'a self, value: &'a T) -> Masked<'a, T> {
        Masked {
            masker: self,
            value,
        }
    }
}

/// Converts values into a `slog::Value` that logs their masked form.
///
/// ## Example
/// ```ignore
/// use maskjson::slog::IntoMaskedJson;
///
/// info!(logger, "event"; "data" => event.into_masked_json(&masker));
/// ```
pub trait IntoMaskedJson: Maskable + Serialize {
    /// Masks `self` with `masker` and returns a `slog::Value`.
    fn into_masked_json(self, masker: &Masker) -> MaskedJson
    where
        Self: Sized,
    {
        masker.log_value(&self)
    }
}

impl<T> IntoMaskedJson for T where T: Maskable + Serialize {}

fn masked_or_original<T>(masker: &Masker, value: &T) -> JsonValue
where
    T: Maskable + Serialize + ?Sized,
{
    match masker.to_value(value) {
        Ok(masked) => masked,
        Err(err) => {
            slog::debug!(masker.logger(), "masking failed, logging unmasked value";
                "error" => %err);
            serde_json::to_value(value)
                .unwrap_or_else(|_| JsonValue::String(FALLBACK_PLACEHOLDER.to_string()))
        }
    }
}
