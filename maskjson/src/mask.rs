//! Asterisk masking for leaf values.
//!
//! Masking is a pure string transformation. It does not traverse records or
//! decide which fields are sensitive; the builder calls into it for fields
//! whose descriptor requires masking.

use crate::{
    config::{mask_run, MaskConfig},
    shape::{Maskable, Shape},
};

/// Masks a string according to `config`.
///
/// Lengths are counted in Unicode scalar values.
///
/// - full mask: exactly `granularity` asterisks
/// - empty input: `""` (never padded)
/// - `len <= granularity`: exactly `granularity` asterisks
/// - otherwise: the first `ceil(len / granularity)` characters followed by
///   `max(len - visible, granularity)` asterisks
///
/// A granularity of zero keeps the whole string visible in partial mode.
#[must_use]
pub fn mask_str(value: &str, config: &MaskConfig) -> String {
    if config.full_mask() {
        return config.asterisks();
    }

    let total = value.chars().count();
    if total == 0 {
        return String::new();
    }

    let granularity = config.granularity();
    if total <= granularity {
        return config.asterisks();
    }

    let visible = total.div_ceil(granularity.max(1));
    let masked_len = (total - visible).max(granularity);

    let mut masked: String = value.chars().take(visible).collect();
    masked.push_str(&mask_run(masked_len));
    masked
}

/// Masks an arbitrary value.
///
/// Only text goes through [`mask_str`]. Every other shape becomes exactly
/// `granularity` asterisks: numbers (wide integers included), bools, records,
/// sequences, maps, and optional or dynamic wrappers whether present or not.
/// Transparent smart pointers (`Box`, `Rc`, `Arc`, references) report the
/// shape of their referent and are masked like it.
#[must_use]
pub fn mask_value(value: &dyn Maskable, config: &MaskConfig) -> String {
    match value.shape() {
        Shape::Str(text) => mask_str(&text, config),
        _ => config.asterisks(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Any;

    const G3: MaskConfig = MaskConfig::partial(3);

    #[test]
    fn empty_string_stays_empty() {
        assert_eq!(mask_str("", &G3), "");
        assert_eq!(mask_str("", &MaskConfig::partial(10)), "");
    }

    #[test]
    fn full_mask_ignores_content() {
        let config = MaskConfig::full(4);
        assert_eq!(mask_str("", &config), "****");
        assert_eq!(mask_str("a", &config), "****");
        assert_eq!(mask_str("a much longer secret value", &config), "****");
    }

    #[test]
    fn short_strings_become_granularity_asterisks() {
        assert_eq!(mask_str("a", &G3), "***");
        assert_eq!(mask_str("abc", &G3), "***");
        assert_eq!(mask_str("abcde", &MaskConfig::partial(5)), "*****");
    }

    #[test]
    fn partial_mask_keeps_ceil_prefix() {
        assert_eq!(mask_str("1234567890", &G3), "1234******");
        assert_eq!(mask_str("123456", &G3), "12****");
        assert_eq!(mask_str("abcd1234", &G3), "abc*****");
        assert_eq!(mask_str("my_secret_key", &G3), "my_se********");
        assert_eq!(mask_str("my_secret_iv", &G3), "my_s********");
    }

    #[test]
    fn masked_tail_never_below_granularity() {
        // 4 chars at granularity 3: visible 2, tail max(2, 3) = 3
        assert_eq!(mask_str("abcd", &G3), "ab***");
        // 5 chars at granularity 4: visible 2, tail max(3, 4) = 4
        assert_eq!(mask_str("abcde", &MaskConfig::partial(4)), "ab****");
    }

    #[test]
    fn counts_unicode_scalar_values() {
        assert_eq!(mask_str("héllo wörld", &G3), "héll*******");
        assert_eq!(mask_str("日本語", &G3), "***");
    }

    #[test]
    fn zero_granularity_reveals_whole_string() {
        let config = MaskConfig::partial(0);
        assert_eq!(mask_str("secret", &config), "secret");
        assert_eq!(mask_str("", &config), "");
        assert_eq!(mask_str("secret", &MaskConfig::full(0)), "");
    }

    #[test]
    fn non_string_values_become_asterisks() {
        assert_eq!(mask_value(&42_i32, &G3), "***");
        assert_eq!(mask_value(&0_u64, &G3), "***");
        assert_eq!(mask_value(&true, &G3), "***");
        assert_eq!(mask_value(&1.5_f64, &G3), "***");
        assert_eq!(mask_value(&vec!["abcdef".to_string()], &G3), "***");
    }

    #[test]
    fn wide_integers_are_not_revealed() {
        assert_eq!(mask_value(&123_456_789_012_345_678_901_234_567_890_u128, &G3), "***");
        assert_eq!(mask_value(&i128::MIN, &G3), "***");
        assert_eq!(mask_value(&u128::MAX, &MaskConfig::partial(5)), "*****");
    }

    #[test]
    fn absent_values_become_asterisks() {
        assert_eq!(mask_value(&Option::<String>::None, &G3), "***");
        assert_eq!(mask_value(&Any::none(), &G3), "***");
        assert_eq!(mask_value(&(), &G3), "***");
    }

    #[test]
    fn present_wrappers_are_fully_hidden() {
        assert_eq!(mask_value(&Some("1234567890".to_string()), &G3), "***");
        assert_eq!(mask_value(&Any::new("1234567890".to_string()), &G3), "***");
        assert_eq!(mask_value(&Some(String::new()), &G3), "***");
    }

    #[test]
    fn smart_pointers_mask_their_referent() {
        assert_eq!(mask_value(&Box::new("123456"), &G3), "12****");
        assert_eq!(mask_value(&std::sync::Arc::new("123456".to_string()), &G3), "12****");
    }
}
