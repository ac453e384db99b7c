//! CLDR plural category selection.

use fixed_decimal::{Decimal, FloatPrecision};
use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Cardinal plural category of `count` in `locale`.
///
/// Returns one of `zero`, `one`, `two`, `few`, `many`, `other`. Negative
/// counts are categorised by magnitude. Counts that are not finite and
/// locale identifiers that do not parse yield `other`.
///
/// ```
/// use lexis_core::plural::category_for;
///
/// assert_eq!(category_for("en", 1.0), "one");
/// assert_eq!(category_for("en", 5.0), "other");
/// assert_eq!(category_for("ru", 3.0), "few");
/// ```
pub fn category_for(locale: &str, count: f64) -> &'static str {
    let Some(count) = decimal_of(count) else {
        return "other";
    };

    let Ok(locale) = locale.parse::<Locale>() else {
        return "other";
    };

    match PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()) {
        Ok(rules) => category_name(rules.category_for(&count)),
        Err(_) => "other",
    }
}

// Round-trip precision keeps visible fraction digits ("1.5") and none for
// integral values ("1").
fn decimal_of(count: f64) -> Option<Decimal> {
    if !count.is_finite() {
        return None;
    }
    Decimal::try_from_f64(count.abs(), FloatPrecision::RoundTrip).ok()
}

fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english() {
        assert_eq!(category_for("en", 0.0), "other");
        assert_eq!(category_for("en", 1.0), "one");
        assert_eq!(category_for("en", 2.0), "other");
        assert_eq!(category_for("en-US", 1.0), "one");
        assert_eq!(category_for("en", 1.5), "other");
    }

    #[test]
    fn test_negative_counts_use_magnitude() {
        assert_eq!(category_for("en", -1.0), "one");
        assert_eq!(category_for("ru", -2.0), "few");
    }

    #[test]
    fn test_multi_category_locales() {
        assert_eq!(category_for("ru", 1.0), "one");
        assert_eq!(category_for("ru", 2.0), "few");
        assert_eq!(category_for("ru", 5.0), "many");
        assert_eq!(category_for("ar", 0.0), "zero");
        assert_eq!(category_for("ar", 2.0), "two");
        assert_eq!(category_for("ja", 1.0), "other");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(category_for("en", f64::NAN), "other");
        assert_eq!(category_for("en", f64::INFINITY), "other");
        assert_eq!(category_for("not a locale!", 1.0), "other");
    }
}
