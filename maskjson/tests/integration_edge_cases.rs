//! Edge case tests for masking and tree building.

use maskjson::{mask_str, Any, Error, MaskConfig, MaskJson, MaskedTree, Masker};
use serde_json::json;

const G3: MaskConfig = MaskConfig::partial(3);

#[test]
fn test_empty_string() {
    assert_eq!(mask_str("", &G3), "");
    assert_eq!(mask_str("", &MaskConfig::full(3)), "***");
}

#[test]
fn test_single_character() {
    assert_eq!(mask_str("a", &G3), "***");
}

#[test]
fn test_short_strings_are_fully_hidden() {
    assert_eq!(mask_str("ab", &G3), "***");
    assert_eq!(mask_str("abc", &G3), "***");
    assert_eq!(mask_str("abcd", &G3), "ab***");
}

#[test]
fn test_unicode_multibyte() {
    assert_eq!(mask_str("пароль123", &G3), "пар******");
    assert_eq!(mask_str("秘密の鍵", &G3), "秘密***");
}

#[test]
fn test_unicode_emoji() {
    assert_eq!(mask_str("🔑🔑🔑🔑🔑🔑", &G3), "🔑🔑****");
}

#[test]
fn test_very_long_string() {
    let input = "x".repeat(3000);
    let masked = mask_str(&input, &G3);
    assert_eq!(masked.len(), 3000);
    assert!(masked.starts_with(&"x".repeat(1000)));
    assert!(masked.ends_with(&"*".repeat(2000)));
}

#[test]
fn test_granularity_one_hides_nothing_but_pads() {
    // visible = n, run = max(0, 1)
    assert_eq!(mask_str("abc", &MaskConfig::partial(1)), "abc*");
}

#[test]
fn test_granularity_zero_keeps_everything_visible() {
    assert_eq!(mask_str("abc", &MaskConfig::partial(0)), "abc");
    assert_eq!(mask_str("", &MaskConfig::partial(0)), "");
}

#[test]
fn test_masked_strings_with_special_characters() {
    assert_eq!(mask_str("a\"b\\c\nd", &G3), "a\"b****");
    let masker = Masker::new(false, 3);
    #[derive(MaskJson)]
    struct Note {
        #[mask]
        pub body: String,
    }
    let note = Note {
        body: "a\"b\\c\nd".into(),
    };
    assert_eq!(
        masker.to_string(&note).unwrap(),
        r#"{"body":"a\"b****"}"#
    );
}

#[test]
fn test_idempotent_masking() {
    let once = mask_str("1234567890", &G3);
    let twice = mask_str(&once, &G3);
    assert_eq!(once, "1234******");
    assert_eq!(twice, "1234******");
}

#[test]
fn test_json_value_fields_are_dynamic() {
    #[derive(MaskJson)]
    struct Event {
        pub payload: serde_json::Value,
        #[mask]
        pub token: serde_json::Value,
        #[json(omit_empty)]
        pub extra: serde_json::Value,
    }

    let event = Event {
        payload: json!({"b": [1, 2.5, null], "a": true}),
        token: json!("abcd1234"),
        extra: json!({}),
    };
    let value = Masker::new(false, 3).to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({"payload": {"a": true, "b": [1, 2.5, null]}, "token": "abc*****"})
    );
}

#[test]
fn test_omit_empty_variants() {
    #[derive(MaskJson)]
    struct Sparse {
        #[json(omit_empty)]
        pub text: String,
        #[json(omit_empty)]
        pub count: i64,
        #[json(omit_empty)]
        pub ratio: f64,
        #[json(omit_empty)]
        pub flag: bool,
        #[json(omit_empty)]
        pub list: Vec<u8>,
        #[json(omit_empty)]
        pub pointer: Option<i64>,
        #[json(omit_empty)]
        pub dynamic: Any,
        #[json(omit_empty)]
        pub dynamic_zero: Any,
    }

    let sparse = Sparse {
        text: String::new(),
        count: 0,
        ratio: 0.0,
        flag: false,
        list: Vec::new(),
        pointer: Some(0),
        dynamic: Any::none(),
        dynamic_zero: Any::new(0_u32),
    };
    let masker = Masker::new(false, 3);
    // A present pointer is never empty; a dynamic slot is judged by its content.
    assert_eq!(masker.to_string(&sparse).unwrap(), r#"{"pointer":0}"#);
}

#[test]
fn test_empty_declared_name_falls_back_to_identifier() {
    #[derive(MaskJson)]
    struct Named {
        #[json(rename = "")]
        pub value: u8,
    }
    let masker = Masker::default();
    assert_eq!(masker.to_string(&Named { value: 1 }).unwrap(), r#"{"value":1}"#);
}

#[test]
fn test_duplicate_output_names_later_field_wins() {
    #[derive(MaskJson)]
    struct Clash {
        #[json(rename = "id")]
        pub first: u8,
        #[json(rename = "id")]
        pub second: u8,
    }
    let masker = Masker::default();
    assert_eq!(
        masker.to_string(&Clash { first: 1, second: 2 }).unwrap(),
        r#"{"id":2}"#
    );
}

#[test]
fn test_raw_identifier() {
    #[derive(MaskJson)]
    struct Raw {
        pub r#type: String,
    }
    let masker = Masker::default();
    assert_eq!(
        masker
            .to_string(&Raw {
                r#type: "card".into()
            })
            .unwrap(),
        r#"{"type":"card"}"#
    );
}

#[test]
fn test_non_finite_float_fails_to_encode() {
    #[derive(MaskJson)]
    struct Measurement {
        pub value: f64,
        #[mask]
        pub masked: f64,
    }

    let masker = Masker::default();
    let err = masker
        .marshal(&Measurement {
            value: f64::INFINITY,
            masked: 1.0,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
    assert!(err.to_string().contains("not a finite number"));

    // Masking replaces the non-finite value, so encoding succeeds.
    let encoded = masker
        .to_string(&Measurement {
            value: 1.0,
            masked: f64::NAN,
        })
        .unwrap();
    assert_eq!(encoded, r#"{"masked":"***","value":1.0}"#);
}

#[test]
fn test_deep_nesting_hits_the_depth_limit() {
    let mut value = Any::new("leaf".to_string());
    for _ in 0..200 {
        value = Any::new(value);
    }

    let masker = Masker::default();
    let err = masker.marshal(&value).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 128 }));

    let lenient = Masker::with_config(MaskConfig::default().with_max_depth(512));
    assert_eq!(lenient.to_string(&value).unwrap(), r#""leaf""#);
}

#[test]
fn test_to_tree_is_total() {
    let mut value = Any::new(1_u8);
    for _ in 0..10 {
        value = Any::new(value);
    }
    let masker = Masker::with_config(MaskConfig::default().with_max_depth(4));
    assert_eq!(masker.to_tree(&value), MaskedTree::Null);
}
