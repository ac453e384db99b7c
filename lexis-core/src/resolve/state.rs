use std::collections::BTreeMap;

use crate::dictionary::{Content, DictionaryNode};
use crate::error::{Failure, ResolveError};
use crate::replace::ReplacementKind;

/// The per-locale dictionary picked from `content`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentSelection<'a> {
    pub valid: bool,
    pub dict: Option<&'a DictionaryNode>,
    pub locale: Option<&'a str>,
}

impl<'a> ContentSelection<'a> {
    /// Selects `content[locale]`. Presence is what counts, so a `Null` or
    /// empty-string entry is still a valid selection.
    pub fn select(content: &'a Content, locale: Option<&str>) -> Self {
        let Some((locale, dict)) = locale.and_then(|l| content.get_key_value(l)) else {
            return Self::default();
        };

        Self {
            valid: true,
            dict: Some(dict),
            locale: Some(locale.as_str()),
        }
    }
}

/// What the resolved node is, decided once after traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    PlainString(&'a str),
    PluralMap(&'a BTreeMap<String, DictionaryNode>),
    InvalidShape,
}

impl<'a> Shape<'a> {
    pub fn of(node: &'a DictionaryNode) -> Self {
        match node {
            DictionaryNode::Text(text) => Shape::PlainString(text),
            DictionaryNode::Map(map) if node.is_plural_map() => Shape::PluralMap(map),
            _ => Shape::InvalidShape,
        }
    }
}

/// Result of walking a dotted key through one selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyResolution<'a> {
    pub valid: bool,
    /// The node at the key path, or the deepest node reached on a miss.
    pub selected: Option<&'a DictionaryNode>,
    /// Locale of the selection the walk ran against.
    pub locale: Option<&'a str>,
    pub shape: Option<Shape<'a>>,
    pub replacement: Option<ReplacementKind>,
}

impl<'a> KeyResolution<'a> {
    /// Folds the `.`-separated segments of `key` over `selection`.
    ///
    /// Once a segment is missing the walk stops descending and keeps the
    /// last node it reached.
    pub fn walk(key: &str, selection: &ContentSelection<'a>) -> Self {
        let Some(root) = selection.dict.filter(|_| selection.valid) else {
            return Self::default();
        };

        let start = Self {
            valid: true,
            selected: Some(root),
            locale: selection.locale,
            ..Self::default()
        };

        key.split('.').fold(start, |acc, segment| {
            if !acc.valid {
                return acc;
            }
            match acc.selected.and_then(|node| node.child(segment)) {
                Some(child) => Self {
                    selected: Some(child),
                    ..acc
                },
                None => Self {
                    valid: false,
                    ..acc
                },
            }
        })
    }

    pub fn is_plural(&self) -> bool {
        matches!(self.shape, Some(Shape::PluralMap(_)))
    }
}

/// Everything known about one resolution so far.
///
/// Stages take a state by value and hand back a new one, so a failure can
/// report exactly how far the pipeline got.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionState<'a> {
    pub key: &'a str,
    pub primary: ContentSelection<'a>,
    pub secondary: ContentSelection<'a>,
    pub resolution: KeyResolution<'a>,
    pub text: Option<String>,
}

impl<'a> ResolutionState<'a> {
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    pub(crate) fn fail(self, error: ResolveError) -> Failure<'a> {
        Failure { error, state: self }
    }
}
