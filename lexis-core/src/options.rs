use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::dictionary::Content;
use crate::replace::ReplacementStyle;

/// Chooses the branch of a pluralization map.
#[derive(Debug, Clone, PartialEq)]
pub enum PluralSelector {
    /// Category name used verbatim as the branch key.
    Category(String),
    /// Count mapped to a CLDR cardinal category for the active locale.
    Count(f64),
}

impl From<&str> for PluralSelector {
    fn from(name: &str) -> Self {
        PluralSelector::Category(name.to_string())
    }
}

impl From<String> for PluralSelector {
    fn from(name: String) -> Self {
        PluralSelector::Category(name)
    }
}

/// A single value inserted in place of a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplacementValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for ReplacementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementValue::Bool(value) => write!(f, "{value}"),
            ReplacementValue::Number(value) => write_number(f, *value),
            ReplacementValue::Text(value) => f.write_str(value),
        }
    }
}

/// Writes a number the way JavaScript's `String(n)` renders it: `-0` as
/// `0`, `Infinity`, and exponent form outside `[1e-6, 1e21)`.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == 0.0 {
        return f.write_str("0");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = value.abs();
    if magnitude.is_nan() || (1e-6..1e21).contains(&magnitude) {
        // f64 prints integral values without a fraction: 3.0 -> "3"
        return write!(f, "{value}");
    }

    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&exponent_form),
    }
}

impl From<&str> for ReplacementValue {
    fn from(value: &str) -> Self {
        ReplacementValue::Text(value.to_string())
    }
}

impl From<String> for ReplacementValue {
    fn from(value: String) -> Self {
        ReplacementValue::Text(value)
    }
}

impl From<bool> for ReplacementValue {
    fn from(value: bool) -> Self {
        ReplacementValue::Bool(value)
    }
}

macro_rules! numeric_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PluralSelector {
                fn from(count: $t) -> Self {
                    PluralSelector::Count(count as f64)
                }
            }

            impl From<$t> for ReplacementValue {
                fn from(value: $t) -> Self {
                    ReplacementValue::Number(value as f64)
                }
            }
        )*
    };
}

numeric_from!(i32, i64, u32, u64, usize, f32, f64);

/// Values for the placeholders of the resolved string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Replacements {
    /// Consumed left to right by `%s`-style markers.
    Positional(Vec<ReplacementValue>),
    /// Looked up by name for `{{name}}` placeholders.
    Named(BTreeMap<String, ReplacementValue>),
}

impl Replacements {
    /// Named values from `(name, value)` pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ReplacementValue>,
    {
        Replacements::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Positional values, consumed in iteration order.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ReplacementValue>,
    {
        Replacements::Positional(values.into_iter().map(Into::into).collect())
    }

    /// The placeholder style these values can fill.
    pub fn style(&self) -> ReplacementStyle {
        match self {
            Replacements::Positional(_) => ReplacementStyle::Positional,
            Replacements::Named(_) => ReplacementStyle::Template,
        }
    }
}

/// Per-call inputs of a resolution.
///
/// Built with chained setters:
///
/// ```
/// use lexis_core::{Content, ResolutionOptions};
///
/// let content = Content::new();
/// let options = ResolutionOptions::new()
///     .locale("pt")
///     .default_locale("en")
///     .content(&content)
///     .plural(3)
///     .fallback("?");
/// assert_eq!(options.fallback_value(), "?");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionOptions<'a> {
    pub locale: Option<String>,
    pub default_locale: Option<String>,
    pub content: Option<&'a Content>,
    pub plural: Option<PluralSelector>,
    pub replacements: Option<Replacements>,
    pub fallback: Option<String>,
    pub silent: bool,
}

impl<'a> ResolutionOptions<'a> {
    /// Empty options; nothing resolves until a locale and content are set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested locale identifier.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Locale tried when the requested one lacks the content or key.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Dictionary keyed by locale identifier.
    pub fn content(mut self, content: &'a Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Plural branch selector: a category name or a count.
    pub fn plural(mut self, selector: impl Into<PluralSelector>) -> Self {
        self.plural = Some(selector.into());
        self
    }

    /// Values for the placeholders of the resolved string.
    pub fn replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = Some(replacements);
        self
    }

    /// String returned on any failure.
    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Suppresses diagnostics for silenceable failures.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Value returned on failure; empty unless configured.
    pub fn fallback_value(&self) -> &str {
        self.fallback.as_deref().unwrap_or("")
    }

    /// True when at least one non-empty locale identifier is configured.
    pub(crate) fn has_locale(&self) -> bool {
        [&self.locale, &self.default_locale]
            .into_iter()
            .any(|locale| locale.as_deref().is_some_and(|l| !l.is_empty()))
    }
}
