use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Locale identifier -> dictionary tree for that locale.
pub type Content = BTreeMap<String, DictionaryNode>;

/// Keys that mark a map node as a pluralization map.
///
/// A single matching key is enough, so `{ one: .., title: .. }` is treated
/// as plural as well.
pub const PLURAL_CATEGORIES: [&str; 5] = ["zero", "one", "two", "few", "many"];

/// One node of a locale dictionary.
///
/// Leaves are usually `Text`; `Map` nodes are either nested sections or
/// pluralization maps. The remaining variants exist so that arbitrary
/// YAML/JSON documents deserialize, but they never resolve to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictionaryNode {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<DictionaryNode>),
    Map(BTreeMap<String, DictionaryNode>),
}

impl DictionaryNode {
    /// Own-property lookup of one key segment.
    ///
    /// Maps are indexed by key, lists by canonical decimal index (`"0"`,
    /// `"12"`, never `"01"`). Scalars have no children.
    pub fn child(&self, segment: &str) -> Option<&DictionaryNode> {
        match self {
            DictionaryNode::Map(map) => map.get(segment),
            DictionaryNode::List(items) => segment
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == segment)
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// The text of a `Text` node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DictionaryNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The entries of a `Map` node.
    pub fn as_map(&self) -> Option<&BTreeMap<String, DictionaryNode>> {
        match self {
            DictionaryNode::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this node is a map with at least one plural-category key.
    pub fn is_plural_map(&self) -> bool {
        self.as_map().is_some_and(|map| {
            map.keys()
                .any(|key| PLURAL_CATEGORIES.contains(&key.as_str()))
        })
    }
}

impl From<&str> for DictionaryNode {
    fn from(text: &str) -> Self {
        DictionaryNode::Text(text.to_string())
    }
}

impl From<String> for DictionaryNode {
    fn from(text: String) -> Self {
        DictionaryNode::Text(text)
    }
}

impl From<BTreeMap<String, DictionaryNode>> for DictionaryNode {
    fn from(map: BTreeMap<String, DictionaryNode>) -> Self {
        DictionaryNode::Map(map)
    }
}

impl<K, V> FromIterator<(K, V)> for DictionaryNode
where
    K: Into<String>,
    V: Into<DictionaryNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DictionaryNode::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(yaml: &str) -> DictionaryNode {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_deserialize_shapes() {
        assert_eq!(node("hello"), DictionaryNode::Text("hello".to_string()));
        assert_eq!(node("~"), DictionaryNode::Null);
        assert_eq!(node("3"), DictionaryNode::Number(3.0));
        assert_eq!(node("true"), DictionaryNode::Bool(true));
        assert_eq!(
            node("[a, b]"),
            DictionaryNode::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            node("title: Menu"),
            [("title", "Menu")].into_iter().collect::<DictionaryNode>()
        );
    }

    #[test]
    fn test_child_lookup() {
        let tree = node("menu:\n  items: [first, second]\n  title: Menu\n");
        let menu = tree.child("menu").unwrap();
        assert_eq!(menu.child("title").and_then(|n| n.as_str()), Some("Menu"));

        let items = menu.child("items").unwrap();
        assert_eq!(items.child("1").and_then(|n| n.as_str()), Some("second"));
        assert!(items.child("01").is_none());
        assert!(items.child("2").is_none());
        assert!(menu.child("title").unwrap().child("0").is_none());
    }

    #[test]
    fn test_plural_map_detection() {
        assert!(node("one: a\nother: b").is_plural_map());
        assert!(node("few: a").is_plural_map());
        assert!(!node("other: b").is_plural_map());
        assert!(!node("title: b").is_plural_map());
        assert!(!node("[one, two]").is_plural_map());
        assert!(!node("one").is_plural_map());

        // a stray `one` key is enough
        assert!(node("one: a\ntitle: b\nsubtitle: c").is_plural_map());
    }
}
