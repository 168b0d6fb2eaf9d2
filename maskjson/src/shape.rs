//! How values describe themselves to the tree builder.
//!
//! - [`Maskable`]: any value that can be projected into a masked tree
//! - [`Shape`]: the tagged union a value reports (scalar, optional, dynamic,
//!   sequence, mapping, record)
//! - [`Record`]: named fields with static metadata, usually derived
//! - [`Any`]: a dynamically typed slot whose shape is only known at runtime
//!
//! ## Pointer-like types
//!
//! | Type | Shape |
//! |------|-------|
//! | `Option<T>` | `Pointer`: `None` is absent, `Some` is followed |
//! | `Any`, `serde_json::Value` | `Dynamic` / the value's own shape |
//! | `Box<T>`, `&T`, `Rc<T>`, `Arc<T>` | transparent: the shape of `T` |

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    hash::BuildHasher,
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
};

use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::{
    builder::project,
    config::{MaskConfig, DEFAULT_MAX_DEPTH},
    field::FieldMeta,
};

// =============================================================================
// Shape
// =============================================================================

/// The dynamic shape of a value, with borrowed access to its parts.
pub enum Shape<'a> {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// Text.
    Str(Cow<'a, str>),
    /// An integer outside the 64-bit range, in decimal form. Emitted as a
    /// JSON string but masked like any other number.
    BigInt(String),
    /// An optional reference: `None` is absent, `Some` is followed.
    Pointer(Option<&'a dyn Maskable>),
    /// A value whose concrete type is only known at runtime.
    Dynamic(Option<&'a dyn Maskable>),
    /// An ordered sequence.
    Seq(Vec<&'a dyn Maskable>),
    /// A keyed mapping; keys are already in string form.
    Map(Vec<(String, &'a dyn Maskable)>),
    /// A record with named, annotated fields.
    Record(&'a dyn Record),
}

impl<'a> Shape<'a> {
    /// Borrowed text.
    pub const fn text(value: &'a str) -> Self {
        Shape::Str(Cow::Borrowed(value))
    }

    /// A dynamic slot holding `value`.
    pub const fn dynamic(value: &'a dyn Maskable) -> Self {
        Shape::Dynamic(Some(value))
    }

    /// Emptiness used by omit-if-empty.
    ///
    /// Strings, sequences and mappings are empty at length zero; `false`,
    /// numeric zero, null and absent pointers are empty. A dynamic slot is
    /// empty when it holds nothing or when its content is empty. Present
    /// pointers and records are never empty.
    ///
    /// Chains of dynamic slots are followed at most
    /// [`DEFAULT_MAX_DEPTH`] levels; see [`Shape::is_empty_within`].
    pub fn is_empty_value(&self) -> bool {
        self.is_empty_within(DEFAULT_MAX_DEPTH)
    }

    /// Like [`Shape::is_empty_value`], following at most `max_depth` nested
    /// dynamic slots. A chain longer than that counts as non-empty, so the
    /// value is still emitted and the depth bound reports it.
    #[allow(clippy::float_cmp)]
    pub fn is_empty_within(&self, max_depth: usize) -> bool {
        match self {
            Shape::Null | Shape::Pointer(None) | Shape::Dynamic(None) => true,
            Shape::Bool(value) => !value,
            Shape::Int(value) => *value == 0,
            Shape::Uint(value) => *value == 0,
            Shape::Float(value) => *value == 0.0,
            Shape::Str(value) => value.is_empty(),
            Shape::Seq(items) => items.is_empty(),
            Shape::Map(entries) => entries.is_empty(),
            Shape::Dynamic(Some(inner)) => {
                max_depth > 0 && inner.shape().is_empty_within(max_depth - 1)
            }
            Shape::BigInt(_) | Shape::Pointer(Some(_)) | Shape::Record(_) => false,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool(_) => "bool",
            Shape::Int(_) => "int",
            Shape::Uint(_) => "uint",
            Shape::Float(_) => "float",
            Shape::Str(_) => "string",
            Shape::BigInt(_) => "bigint",
            Shape::Pointer(_) => "pointer",
            Shape::Dynamic(_) => "dynamic",
            Shape::Seq(_) => "sequence",
            Shape::Map(_) => "mapping",
            Shape::Record(_) => "record",
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Shape::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Shape::Uint(value) => f.debug_tuple("Uint").field(value).finish(),
            Shape::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Shape::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Shape::BigInt(value) => f.debug_tuple("BigInt").field(value).finish(),
            Shape::Seq(items) => write!(f, "Seq(len = {})", items.len()),
            Shape::Map(entries) => write!(f, "Map(len = {})", entries.len()),
            other => f.write_str(other.kind()),
        }
    }
}

// =============================================================================
// Maskable / Record
// =============================================================================

/// A value that can be projected into a masked tree.
///
/// Derive it with `#[derive(MaskJson)]` for your own structs and enums. It is
/// implemented for scalars, strings, `Option`, smart pointers, std
/// collections and `serde_json::Value`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Maskable`",
    label = "this type cannot be projected into a masked tree",
    note = "use `#[derive(MaskJson)]` on the type definition",
    note = "or mark the field `#[json(skip)]` if it should not be emitted"
)]
pub trait Maskable {
    /// Reports this value's shape.
    fn shape(&self) -> Shape<'_>;
}

/// A record: named fields, each paired with its declared metadata.
///
/// `#[derive(MaskJson)]` implements this from a static metadata table. A
/// hand-written implementation looks like:
///
/// ```rust
/// use maskjson::{Field, FieldMeta, Maskable, Record, Shape};
///
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// static LOGIN_FIELDS: [FieldMeta; 2] = [
///     FieldMeta::new("user"),
///     FieldMeta::new("password").masked(),
/// ];
///
/// impl Record for Login {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new(&LOGIN_FIELDS[0], &self.user),
///             Field::new(&LOGIN_FIELDS[1], &self.password),
///         ]
///     }
/// }
///
/// impl Maskable for Login {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Record(self)
///     }
/// }
/// ```
pub trait Record {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A record field: its metadata and, unless it is never emitted, its value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    meta: &'static FieldMeta,
    value: Option<&'a dyn Maskable>,
}

impl<'a> Field<'a> {
    /// A field with a value.
    pub const fn new(meta: &'static FieldMeta, value: &'a dyn Maskable) -> Self {
        Self {
            meta,
            value: Some(value),
        }
    }

    /// A field whose metadata already rules it out of the output.
    ///
    /// The derive uses this for skipped and private fields so their types
    /// need not implement [`Maskable`].
    pub const fn skipped(meta: &'static FieldMeta) -> Self {
        Self { meta, value: None }
    }

    /// Declared metadata.
    pub const fn meta(&self) -> &'static FieldMeta {
        self.meta
    }

    /// The field's value, if it was provided.
    pub const fn value(&self) -> Option<&'a dyn Maskable> {
        self.value
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("meta", self.meta)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}

// =============================================================================
// Any - dynamically typed slot
// =============================================================================

/// A dynamically typed slot, the equivalent of an `any`-typed field.
///
/// The builder treats the content exactly as if the field had been declared
/// with the content's concrete type. An empty slot is emitted as `null` and
/// counts as empty for omit-if-empty.
#[derive(Default)]
pub struct Any(Option<Box<dyn Maskable + Send + Sync>>);

impl Any {
    /// A slot holding `value`.
    pub fn new<T>(value: T) -> Self
    where
        T: Maskable + Send + Sync + 'static,
    {
        Self(Some(Box::new(value)))
    }

    /// An empty slot.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Returns `true` when the slot holds nothing.
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "Any({})", value.shape().kind()),
            None => f.write_str("Any(None)"),
        }
    }
}

impl Maskable for Any {
    fn shape(&self) -> Shape<'_> {
        match &self.0 {
            Some(value) => Shape::Dynamic(Some(&**value)),
            None => Shape::Dynamic(None),
        }
    }
}

/// Serializes the content's unmasked projection, so records holding an
/// `Any` can still derive `Serialize`.
impl Serialize for Any {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let config = MaskConfig::default();
        let built = project(&config, self.shape());
        if built.truncated {
            return Err(S::Error::custom(format_args!(
                "value nests deeper than the maximum depth of {}",
                config.max_depth()
            )));
        }
        built.tree.serialize(serializer)
    }
}

// =============================================================================
// Maskable implementations for standard library types
// =============================================================================

fn erased<T: Maskable>(value: &T) -> &dyn Maskable {
    value
}

impl Maskable for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

macro_rules! impl_maskable_integer {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl Maskable for $ty {
                fn shape(&self) -> Shape<'_> {
                    <$target>::try_from(*self).map_or_else(
                        |_| Shape::BigInt(self.to_string()),
                        Shape::$variant,
                    )
                }
            }
        )*
    };
}

impl_maskable_integer!(Int as i64: i8, i16, i32, i64, i128, isize);
impl_maskable_integer!(Uint as u64: u8, u16, u32, u64, u128, usize);

impl Maskable for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(f64::from(*self))
    }
}

impl Maskable for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(*self)
    }
}

impl Maskable for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Owned(self.to_string()))
    }
}

impl Maskable for str {
    fn shape(&self) -> Shape<'_> {
        Shape::text(self)
    }
}

impl Maskable for String {
    fn shape(&self) -> Shape<'_> {
        Shape::text(self)
    }
}

impl Maskable for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::text(self)
    }
}

impl Maskable for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Null
    }
}

impl<T: ?Sized> Maskable for PhantomData<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Null
    }
}

impl<T: Maskable> Maskable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(self.as_ref().map(erased))
    }
}

macro_rules! impl_maskable_transparent {
    ($($ty:ty),*) => {
        $(
            impl<T: Maskable + ?Sized> Maskable for $ty {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }
            }
        )*
    };
}

impl_maskable_transparent!(Box<T>, Rc<T>, Arc<T>);

impl<T: Maskable + ?Sized> Maskable for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Maskable + ?Sized> Maskable for &mut T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Maskable> Maskable for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<T: Maskable, const N: usize> Maskable for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<T: Maskable> Maskable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<T: Maskable> Maskable for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<T: Maskable> Maskable for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<T: Maskable, S: BuildHasher> Maskable for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(erased).collect())
    }
}

impl<K: fmt::Display, V: Maskable> Maskable for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), erased(value)))
                .collect(),
        )
    }
}

impl<K: fmt::Display, V: Maskable, S: BuildHasher> Maskable for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), erased(value)))
                .collect(),
        )
    }
}

fn number_shape(number: &Number) -> Shape<'static> {
    if let Some(value) = number.as_u64() {
        Shape::Uint(value)
    } else if let Some(value) = number.as_i64() {
        Shape::Int(value)
    } else {
        number.as_f64().map_or(Shape::Null, Shape::Float)
    }
}

impl Maskable for JsonValue {
    fn shape(&self) -> Shape<'_> {
        match self {
            JsonValue::Null => Shape::Null,
            JsonValue::Bool(value) => Shape::Bool(*value),
            JsonValue::Number(number) => number_shape(number),
            JsonValue::String(value) => Shape::text(value),
            JsonValue::Array(items) => Shape::Seq(items.iter().map(erased).collect()),
            JsonValue::Object(map) => Shape::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), erased(value)))
                    .collect(),
            ),
        }
    }
}
