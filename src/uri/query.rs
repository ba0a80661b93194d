//! Ordered, key-sorted query maps.
//!
//! Query strings are decoded into a tree of ordered maps. Bracketed keys nest
//! (`a[b]=1` becomes `{a: {b: 1}}`) and an empty bracket appends the next
//! integer index (`a[]=x&a[]=y` becomes `{a: {0: x, 1: y}}`).
//!
//! Once stored in a [`crate::Uri`] a map is always sorted by key, recursively.
//! Keys that read as canonical integers come first in numeric order, the
//! remaining keys follow in byte order.

use std::cmp::Ordering;

use url::form_urlencoded;

use crate::codec::form_encode;

/// A query value: either a plain string or a nested map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A decoded scalar value.
    Scalar(String),
    /// A nested map produced by bracketed keys.
    Map(QueryMap),
}

impl QueryValue {
    /// The scalar text, if this is not a nested map.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value),
            QueryValue::Map(_) => None,
        }
    }

    /// The nested map, if this is not a scalar.
    pub fn as_map(&self) -> Option<&QueryMap> {
        match self {
            QueryValue::Scalar(_) => None,
            QueryValue::Map(map) => Some(map),
        }
    }

    fn make_map(&mut self) -> &mut QueryMap {
        if let QueryValue::Scalar(_) = self {
            *self = QueryValue::Map(QueryMap::new());
        }
        match self {
            QueryValue::Map(map) => map,
            QueryValue::Scalar(_) => unreachable!("scalar replaced by a map above"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(map: QueryMap) -> Self {
        QueryValue::Map(map)
    }
}

/// An ordered mapping of query keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string (without the leading `?`) into a sorted map.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriparts::QueryMap;
    ///
    /// let query = QueryMap::parse("b=2&a=1&list[]=x&list[]=y");
    /// let keys: Vec<&str> = query.keys().collect();
    /// assert_eq!(keys, vec!["a", "b", "list"]);
    /// assert_eq!(query.get_str("a"), Some("1"));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut map = QueryMap::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match split_key(&key) {
                Some((name, path)) => map.insert_nested(name, &path, value.into_owned()),
                None => tracing::trace!("skipping query pair with unusable key {:?}", key),
            }
        }

        map.sort_recursive();
        map
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// A replaced key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();

        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Look up a scalar value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Sort entries by key, descending into nested maps.
    pub fn sort_recursive(&mut self) {
        self.entries.sort_by(|a, b| compare_keys(&a.0, &b.0));
        for (_, value) in self.entries.iter_mut() {
            if let QueryValue::Map(nested) = value {
                nested.sort_recursive();
            }
        }
    }

    /// Consume the map and return it recursively sorted.
    pub fn sorted(mut self) -> Self {
        self.sort_recursive();
        self
    }

    /// Serialize as `key=value&key=value` form encoding.
    ///
    /// Nested keys are rendered as `outer[inner]`; empty nested maps produce
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriparts::QueryMap;
    ///
    /// let query = QueryMap::parse("q=rust+lang&page[size]=10");
    /// assert_eq!(query.to_query_string(), "page%5Bsize%5D=10&q=rust+lang");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        self.collect_pairs(None, &mut pairs);
        pairs.join("&")
    }

    fn collect_pairs(&self, prefix: Option<&str>, pairs: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let full_key = match prefix {
                Some(prefix) => format!("{}[{}]", prefix, key),
                None => key.clone(),
            };

            match value {
                QueryValue::Scalar(text) => {
                    pairs.push(format!("{}={}", form_encode(&full_key), form_encode(text)));
                }
                QueryValue::Map(nested) => nested.collect_pairs(Some(&full_key), pairs),
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }

    fn next_index(&self) -> i64 {
        self.keys()
            .filter_map(as_index)
            .filter(|index| *index >= 0)
            .max()
            .map_or(0, |max| max + 1)
    }

    fn child_map(&mut self, key: String) -> &mut QueryMap {
        let index = match self.position(&key) {
            Some(index) => index,
            None => {
                self.entries.push((key, QueryValue::Map(QueryMap::new())));
                self.entries.len() - 1
            }
        };
        self.entries[index].1.make_map()
    }

    fn insert_nested(&mut self, key: String, path: &[String], value: String) {
        let Some((first, rest)) = path.split_first() else {
            self.insert(key, value);
            return;
        };

        let child = self.child_map(key);
        let child_key = if first.is_empty() {
            child.next_index().to_string()
        } else {
            first.clone()
        };
        child.insert_nested(child_key, rest, value);
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a str, &'a QueryValue);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, QueryValue)>,
        fn(&'a (String, QueryValue)) -> (&'a str, &'a QueryValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn pair<'b>(entry: &'b (String, QueryValue)) -> (&'b str, &'b QueryValue) {
            (entry.0.as_str(), &entry.1)
        }
        self.entries
            .iter()
            .map(pair as fn(&'a (String, QueryValue)) -> (&'a str, &'a QueryValue))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Split `name[a][b]` into `("name", ["a", "b"])`.
///
/// Returns `None` for keys that cannot be stored (empty name or leading `[`).
/// An unterminated first bracket makes the whole key literal; text after the
/// last complete bracket pair is ignored.
fn split_key(key: &str) -> Option<(String, Vec<String>)> {
    if key.is_empty() || key.starts_with('[') {
        return None;
    }

    let Some(open) = key.find('[') else {
        return Some((key.to_string(), Vec::new()));
    };
    if !key[open..].contains(']') {
        return Some((key.to_string(), Vec::new()));
    }

    let name = key[..open].to_string();
    let mut path = Vec::new();
    let mut rest = &key[open..];

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        path.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }

    Some((name, path))
}

/// Parse a key that reads as a canonical decimal integer.
fn as_index(key: &str) -> Option<i64> {
    let index = key.parse::<i64>().ok()?;
    (index.to_string() == key).then_some(index)
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (as_index(a), as_index(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryValue::Scalar(text) => serializer.serialize_str(text),
            QueryValue::Map(map) => serde::Serialize::serialize(map, serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut state = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}
