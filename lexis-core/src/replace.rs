//! Placeholder detection and substitution.
//!
//! Two placeholder syntaxes are recognised:
//!
//! - template: `{{name}}`, filled from a named map
//! - positional: `%s`, `%d`, `%i`, `%ld`, `%@` (any case), filled in order
//!
//! A translatable unit must stick to one of them.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::options::ReplacementValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementStyle {
    Template,
    Positional,
}

/// Classification of the placeholders found in a string or plural map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementKind {
    Template,
    Positional,
    /// Both syntaxes appear in the same unit.
    Inconsistent,
}

impl ReplacementKind {
    pub fn style(self) -> Option<ReplacementStyle> {
        match self {
            ReplacementKind::Template => Some(ReplacementStyle::Template),
            ReplacementKind::Positional => Some(ReplacementStyle::Positional),
            ReplacementKind::Inconsistent => None,
        }
    }
}

// Compiled regexes hold no match state, so sharing them across calls and
// threads is safe.
fn template_regex() -> &'static Regex {
    static TEMPLATE_REGEX: OnceLock<Regex> = OnceLock::new();
    TEMPLATE_REGEX.get_or_init(|| Regex::new(r"\{\{(.+?)\}\}").expect("Invalid regex pattern"))
}

fn positional_regex() -> &'static Regex {
    static POSITIONAL_REGEX: OnceLock<Regex> = OnceLock::new();
    POSITIONAL_REGEX
        .get_or_init(|| Regex::new(r"(?i)%(?:ld|d|i|s|@)").expect("Invalid regex pattern"))
}

/// Classifies the placeholders of a single string.
///
/// Returns `None` when the string needs no substitution.
pub fn classify(text: &str) -> Option<ReplacementKind> {
    let template = template_regex().is_match(text);
    let positional = positional_regex().is_match(text);

    match (template, positional) {
        (true, true) => Some(ReplacementKind::Inconsistent),
        (true, false) => Some(ReplacementKind::Template),
        (false, true) => Some(ReplacementKind::Positional),
        (false, false) => None,
    }
}

/// Classifies the branches of a pluralization map as one unit.
///
/// Branches without placeholders are ignored; the rest must agree.
pub fn classify_branches<'a, I>(branches: I) -> Option<ReplacementKind>
where
    I: IntoIterator<Item = &'a str>,
{
    branches
        .into_iter()
        .filter_map(classify)
        .try_fold(None, |seen, kind| match (seen, kind) {
            (_, ReplacementKind::Inconsistent) => Err(()),
            (Some(prev), kind) if prev != kind => Err(()),
            (_, kind) => Ok(Some(kind)),
        })
        .unwrap_or(Some(ReplacementKind::Inconsistent))
}

/// Fills `{{name}}` placeholders from `values`.
///
/// Placeholders are visited in order of appearance; each known name is
/// replaced everywhere in the accumulated string, ignoring case. Unknown
/// names are left as they are.
pub fn substitute_template(text: &str, values: &BTreeMap<String, ReplacementValue>) -> String {
    template_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .fold(text.to_string(), |acc, name| {
            let Some(value) = values.get(name.as_str()) else {
                return acc;
            };

            let name = name.as_str().to_lowercase();
            let value = value.to_string();
            template_regex()
                .replace_all(&acc, |caps: &Captures<'_>| {
                    if caps[1].to_lowercase() == name {
                        value.clone()
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned()
        })
}

/// Fills positional markers left to right, one trimmed value per marker.
///
/// Surplus markers stay in the output; surplus values are dropped.
pub fn substitute_positional(text: &str, values: &[ReplacementValue]) -> String {
    let mut values = values.iter();

    positional_regex()
        .replace_all(text, |caps: &Captures<'_>| match values.next() {
            Some(value) => value.to_string().trim().to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pairs: &[(&str, ReplacementValue)]) -> BTreeMap<String, ReplacementValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("plain"), None);
        assert_eq!(classify("Hi {{name}}"), Some(ReplacementKind::Template));
        assert_eq!(classify("Hi %s"), Some(ReplacementKind::Positional));
        assert_eq!(classify("%ld files"), Some(ReplacementKind::Positional));
        assert_eq!(classify("by %@"), Some(ReplacementKind::Positional));
        assert_eq!(classify("%D upper"), Some(ReplacementKind::Positional));
        assert_eq!(
            classify("{{name}} has %d"),
            Some(ReplacementKind::Inconsistent)
        );

        // needs at least one character between the braces
        assert_eq!(classify("empty {{}}"), None);
        assert_eq!(classify("100%"), None);
    }

    #[test]
    fn test_classify_branches() {
        assert_eq!(classify_branches(["a", "b"]), None);
        assert_eq!(classify_branches([]), None);
        assert_eq!(
            classify_branches(["1 item", "{{n}} items"]),
            Some(ReplacementKind::Template)
        );
        assert_eq!(
            classify_branches(["%d item", "%d items"]),
            Some(ReplacementKind::Positional)
        );
        assert_eq!(
            classify_branches(["{{n}} item", "%d items"]),
            Some(ReplacementKind::Inconsistent)
        );
        assert_eq!(
            classify_branches(["none", "{{n}} and %d"]),
            Some(ReplacementKind::Inconsistent)
        );
    }

    #[test]
    fn test_substitute_template() {
        let values = named(&[("name", "Ana".into()), ("n", 3.into())]);

        assert_eq!(
            substitute_template("Hi {{name}}, {{n}} new", &values),
            "Hi Ana, 3 new"
        );
        assert_eq!(
            substitute_template("{{name}} and {{name}}", &values),
            "Ana and Ana"
        );
        assert_eq!(
            substitute_template("Hi {{name}} from {{city}}", &values),
            "Hi Ana from {{city}}"
        );
    }

    #[test]
    fn test_substitute_template_ignores_case_of_repeats() {
        let values = named(&[("name", "Ana".into())]);
        assert_eq!(
            substitute_template("{{name}} / {{NAME}}", &values),
            "Ana / Ana"
        );
        // only a placeholder whose captured name is supplied triggers replacement
        assert_eq!(substitute_template("{{NAME}}", &values), "{{NAME}}");
    }

    #[test]
    fn test_substitute_template_inserts_literally() {
        let values = named(&[("price", "$1.00".into()), ("dot", "x".into())]);
        assert_eq!(
            substitute_template("{{price}} {{dot}}", &values),
            "$1.00 x"
        );

        let values = named(&[("a.b", "ok".into())]);
        assert_eq!(substitute_template("{{a.b}} {{aXb}}", &values), "ok {{aXb}}");
    }

    #[test]
    fn test_substitute_template_long_name() {
        let name = "x".repeat(100_000);
        let values = named(&[(name.as_str(), "ok".into())]);
        let text = format!("[{{{{{name}}}}}] [{{{{{}}}}}]", name.to_uppercase());
        assert_eq!(substitute_template(&text, &values), "[ok] [ok]");
    }

    #[test]
    fn test_substitute_positional() {
        let values = vec!["Ana".into(), 3.into()];
        assert_eq!(
            substitute_positional("Hello %s, you have %d messages", &values),
            "Hello Ana, you have 3 messages"
        );

        let padded = vec!["  Ana ".into()];
        assert_eq!(substitute_positional("Hi %s!", &padded), "Hi Ana!");

        assert_eq!(substitute_positional("%S has %LD", &values), "Ana has 3");
    }

    #[test]
    fn test_substitute_positional_count_mismatch() {
        let one = vec!["a".into()];
        assert_eq!(substitute_positional("%s %s %i", &one), "a %s %i");

        let many = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(substitute_positional("%s-%@", &many), "a-b");

        assert_eq!(substitute_positional("%ld left", &[]), "%ld left");
    }

    #[test]
    fn test_substitute_positional_does_not_rescan_values() {
        let values = vec!["%s".into(), "b".into()];
        assert_eq!(substitute_positional("%s and %s", &values), "%s and b");
    }
}
