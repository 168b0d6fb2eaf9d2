//! Recursive traversal from a value's shape to a [`MaskedTree`].
//!
//! The builder holds nothing but a borrowed config and a truncation flag, so
//! every call owns its output and shares no state with other calls.

use std::{cell::Cell, collections::BTreeMap};

use crate::{
    config::MaskConfig,
    field::classify,
    mask::mask_value,
    shape::{Maskable, Record, Shape},
    tree::MaskedTree,
};

/// Output of a build: the tree and whether any subtree was cut off.
pub(crate) struct Built {
    pub(crate) tree: MaskedTree,
    pub(crate) truncated: bool,
}

/// Builds the projection of a root value.
///
/// A root that is a record (after following present pointers and dynamic
/// slots) is masked. Any other root is passed through: it is projected with
/// naming and omission rules but no masking.
pub(crate) fn build(config: &MaskConfig, root: Shape<'_>) -> Built {
    let builder = TreeBuilder {
        config,
        apply_masks: is_record(&root, config.max_depth()),
        truncated: Cell::new(false),
    };
    let tree = builder.shape(root, 0);
    Built {
        tree,
        truncated: builder.truncated.get(),
    }
}

/// Builds the unmasked projection of a value: naming and omission rules
/// apply, masks do not.
pub(crate) fn project(config: &MaskConfig, root: Shape<'_>) -> Built {
    let builder = TreeBuilder {
        config,
        apply_masks: false,
        truncated: Cell::new(false),
    };
    let tree = builder.shape(root, 0);
    Built {
        tree,
        truncated: builder.truncated.get(),
    }
}

/// Follows at most `max_depth` present pointers and dynamic slots.
fn is_record(shape: &Shape<'_>, max_depth: usize) -> bool {
    match shape {
        Shape::Record(_) => true,
        Shape::Pointer(Some(inner)) | Shape::Dynamic(Some(inner)) if max_depth > 0 => {
            is_record(&inner.shape(), max_depth - 1)
        }
        _ => false,
    }
}

struct TreeBuilder<'c> {
    config: &'c MaskConfig,
    apply_masks: bool,
    truncated: Cell<bool>,
}

impl TreeBuilder<'_> {
    fn value(&self, value: &dyn Maskable, depth: usize) -> MaskedTree {
        self.shape(value.shape(), depth)
    }

    fn shape(&self, shape: Shape<'_>, depth: usize) -> MaskedTree {
        if depth > self.config.max_depth() {
            self.truncated.set(true);
            return MaskedTree::Null;
        }

        match shape {
            Shape::Null | Shape::Pointer(None) | Shape::Dynamic(None) => MaskedTree::Null,
            Shape::Bool(value) => MaskedTree::Bool(value),
            Shape::Int(value) => MaskedTree::Int(value),
            Shape::Uint(value) => MaskedTree::Uint(value),
            Shape::Float(value) => MaskedTree::Float(value),
            Shape::Str(value) => MaskedTree::String(value.into_owned()),
            Shape::BigInt(value) => MaskedTree::String(value),
            Shape::Pointer(Some(inner)) | Shape::Dynamic(Some(inner)) => {
                self.value(inner, depth + 1)
            }
            Shape::Seq(items) => MaskedTree::Array(
                items
                    .into_iter()
                    .map(|item| self.value(item, depth + 1))
                    .collect(),
            ),
            Shape::Map(entries) => MaskedTree::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, self.value(value, depth + 1)))
                    .collect(),
            ),
            Shape::Record(record) => self.record(record, depth),
        }
    }

    fn record(&self, record: &dyn Record, depth: usize) -> MaskedTree {
        let mut object = BTreeMap::new();

        for field in record.fields() {
            let Some(descriptor) = classify(field.meta()) else {
                continue;
            };
            let Some(value) = field.value() else {
                continue;
            };
            let key = descriptor.output_name.into_owned();

            // Masked fields are emitted even when empty.
            if descriptor.mask_required && self.apply_masks {
                object.insert(key, MaskedTree::String(mask_value(value, self.config)));
                continue;
            }

            let shape = value.shape();
            if descriptor.omit_if_empty && shape.is_empty_within(self.config.max_depth()) {
                continue;
            }
            object.insert(key, self.shape(shape, depth + 1));
        }

        MaskedTree::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{field::FieldMeta, shape::Field, Any};

    const G3: MaskConfig = MaskConfig::partial(3);

    struct Credentials {
        user: String,
        password: String,
        pin: u32,
        hint: Option<String>,
        internal: String,
    }

    static CREDENTIAL_FIELDS: [FieldMeta; 5] = [
        FieldMeta::new("user"),
        FieldMeta::new("password").masked(),
        FieldMeta::new("pin").masked(),
        FieldMeta::new("hint").omit_empty(),
        FieldMeta::new("internal").private(),
    ];

    impl Record for Credentials {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new(&CREDENTIAL_FIELDS[0], &self.user),
                Field::new(&CREDENTIAL_FIELDS[1], &self.password),
                Field::new(&CREDENTIAL_FIELDS[2], &self.pin),
                Field::new(&CREDENTIAL_FIELDS[3], &self.hint),
                Field::new(&CREDENTIAL_FIELDS[4], &self.internal),
            ]
        }
    }

    impl Maskable for Credentials {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(self)
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            user: "henry".into(),
            password: "123456".into(),
            pin: 1234,
            hint: None,
            internal: "cache".into(),
        }
    }

    fn build_tree<T: Maskable + ?Sized>(value: &T, config: &MaskConfig) -> MaskedTree {
        build(config, value.shape()).tree
    }

    fn text(value: &str) -> MaskedTree {
        MaskedTree::String(value.to_string())
    }

    #[test]
    fn record_fields_are_classified() {
        let tree = build_tree(&credentials(), &G3);
        assert_eq!(tree.get("user"), Some(&text("henry")));
        assert_eq!(tree.get("password"), Some(&text("12****")));
        assert_eq!(tree.get("pin"), Some(&text("***")));
        assert_eq!(tree.get("hint"), None);
        assert_eq!(tree.get("internal"), None);
    }

    #[test]
    fn masked_fields_ignore_emptiness() {
        let mut creds = credentials();
        creds.password = String::new();
        creds.pin = 0;
        let tree = build_tree(&creds, &G3);
        assert_eq!(tree.get("password"), Some(&text("")));
        assert_eq!(tree.get("pin"), Some(&text("***")));
    }

    #[test]
    fn present_optional_is_followed() {
        let mut creds = credentials();
        creds.hint = Some(String::new());
        let tree = build_tree(&creds, &G3);
        // A present pointer is never empty, even if its referent is.
        assert_eq!(tree.get("hint"), Some(&text("")));
    }

    #[test]
    fn records_inside_containers_are_masked() {
        #[derive(Default)]
        struct Holder {
            list: Vec<Credentials>,
            by_name: HashMap<String, Credentials>,
            nested: Vec<Vec<Credentials>>,
            any: Any,
        }

        static HOLDER_FIELDS: [FieldMeta; 4] = [
            FieldMeta::new("list"),
            FieldMeta::new("by_name"),
            FieldMeta::new("nested"),
            FieldMeta::new("any"),
        ];

        impl Record for Holder {
            fn fields(&self) -> Vec<Field<'_>> {
                vec![
                    Field::new(&HOLDER_FIELDS[0], &self.list),
                    Field::new(&HOLDER_FIELDS[1], &self.by_name),
                    Field::new(&HOLDER_FIELDS[2], &self.nested),
                    Field::new(&HOLDER_FIELDS[3], &self.any),
                ]
            }
        }

        impl Maskable for Holder {
            fn shape(&self) -> Shape<'_> {
                Shape::Record(self)
            }
        }

        let mut holder = Holder {
            list: vec![credentials()],
            nested: vec![vec![credentials()]],
            any: Any::new(credentials()),
            ..Holder::default()
        };
        holder.by_name.insert("henry".into(), credentials());

        let tree = build_tree(&holder, &G3);
        let expected = Some(&text("12****"));

        let MaskedTree::Array(list) = tree.get("list").unwrap() else {
            panic!("list should be an array");
        };
        assert_eq!(list[0].get("password"), expected);

        let by_name = tree.get("by_name").unwrap().get("henry").unwrap();
        assert_eq!(by_name.get("password"), expected);

        let MaskedTree::Array(outer) = tree.get("nested").unwrap() else {
            panic!("nested should be an array");
        };
        let MaskedTree::Array(inner) = &outer[0] else {
            panic!("nested[0] should be an array");
        };
        assert_eq!(inner[0].get("password"), expected);

        assert_eq!(tree.get("any").unwrap().get("password"), expected);
    }

    #[test]
    fn top_level_record_behind_pointer_is_masked() {
        let boxed = Some(Box::new(credentials()));
        let tree = build_tree(&boxed, &G3);
        assert_eq!(tree.get("password"), Some(&text("12****")));

        let dynamic = Any::new(credentials());
        let tree = build_tree(&dynamic, &G3);
        assert_eq!(tree.get("password"), Some(&text("12****")));
    }

    #[test]
    fn top_level_non_record_passes_through() {
        let list = vec![credentials()];
        let tree = build_tree(&list, &G3);
        let MaskedTree::Array(items) = tree else {
            panic!("expected array");
        };
        assert_eq!(items[0].get("password"), Some(&text("123456")));
        assert_eq!(items[0].get("internal"), None);

        assert_eq!(build_tree("plain", &G3), text("plain"));
        assert_eq!(build_tree(&7_u8, &G3), MaskedTree::Uint(7));
        assert!(build_tree(&Option::<Credentials>::None, &G3).is_null());
    }

    #[test]
    fn projection_never_masks() {
        let built = project(&G3, credentials().shape());
        assert!(!built.truncated);
        assert_eq!(built.tree.get("password"), Some(&text("123456")));
        assert_eq!(built.tree.get("pin"), Some(&MaskedTree::Uint(1234)));
        assert_eq!(built.tree.get("internal"), None);
    }

    #[test]
    fn depth_bound_cuts_subtrees() {
        let nested = vec![vec![vec![1_u8]]];
        let config = MaskConfig::partial(3).with_max_depth(2);
        let built = build(&config, nested.shape());
        assert!(built.truncated);
        assert_eq!(
            built.tree,
            MaskedTree::Array(vec![MaskedTree::Array(vec![MaskedTree::Array(vec![
                MaskedTree::Null
            ])])])
        );

        let built = build(&MaskConfig::partial(3).with_max_depth(3), nested.shape());
        assert!(!built.truncated);
    }

    #[test]
    fn root_record_lookup_is_bounded() {
        let mut value = Any::new(credentials());
        for _ in 0..4 {
            value = Any::new(value);
        }
        assert!(is_record(&value.shape(), 8));
        assert!(!is_record(&value.shape(), 2));

        let built = build(&MaskConfig::partial(3).with_max_depth(2), value.shape());
        assert!(built.truncated);
    }

    #[test]
    fn omitted_dynamic_chain_is_bounded() {
        struct Sparse {
            value: Any,
        }

        static SPARSE_FIELDS: [FieldMeta; 1] = [FieldMeta::new("value").omit_empty()];

        impl Record for Sparse {
            fn fields(&self) -> Vec<Field<'_>> {
                vec![Field::new(&SPARSE_FIELDS[0], &self.value)]
            }
        }

        impl Maskable for Sparse {
            fn shape(&self) -> Shape<'_> {
                Shape::Record(self)
            }
        }

        let mut value = Any::new(String::new());
        for _ in 0..8 {
            value = Any::new(value);
        }
        let sparse = Sparse { value };

        let built = build(&G3, sparse.shape());
        assert!(!built.truncated);
        assert_eq!(built.tree, MaskedTree::Object(BTreeMap::new()));

        // Past the bound the chain is not judged empty, so the cut is reported.
        let built = build(&MaskConfig::partial(3).with_max_depth(4), sparse.shape());
        assert!(built.truncated);
    }
}
