//! The immutable URI value.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::UriError;
use crate::types::default_port;
use crate::uri::parser;
use crate::uri::parts::{Parts, QueryInput};
use crate::uri::query::{QueryMap, QueryValue};
use crate::uri::serializer;

/// An immutable URI made of eight optional components.
///
/// Every component is either absent or non-empty. The query is always a
/// recursively key-sorted [`QueryMap`]. A port of zero, or equal to the
/// well-known port of the scheme, is never stored.
///
/// New values are derived with [`Uri::with_parts`]; the receiver is never
/// modified. The string form is computed on first request and cached per
/// instance.
///
/// # Examples
///
/// ```
/// use uriparts::{Parts, Uri};
///
/// let uri = Uri::parse("http://example.org:80/search?q=rust&lang=en")?;
/// assert_eq!(uri.host(), Some("example.org"));
/// assert_eq!(uri.port(), None);
/// assert_eq!(uri.get_str("q"), Some("rust"));
/// assert_eq!(uri.as_uri_str()?, "http://example.org/search?lang=en&q=rust");
///
/// let secure = uri.with_parts(Parts::new().scheme("https").port(8443));
/// assert_eq!(secure.as_uri_str()?, "https://example.org:8443/search?lang=en&q=rust");
/// # Ok::<(), uriparts::UriError>(())
/// ```
#[derive(Default)]
pub struct Uri {
    scheme: Option<String>,
    user: Option<String>,
    pass: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<QueryMap>,
    fragment: Option<String>,
    cached: OnceLock<String>,
}

impl Uri {
    /// Parse a URI string.
    ///
    /// user, pass and fragment are percent-decoded, the host is converted
    /// from IDN to Unicode, the path is decoded except for `%2F` and the
    /// query is decoded into a sorted map.
    pub fn parse(input: &str) -> Result<Uri, UriError> {
        let raw = parser::split(input).map_err(|err| {
            tracing::debug!("failed to parse {:?}: {}", input, err);
            err
        })?;
        Ok(Uri::default().with_parts(raw.decode()))
    }

    /// Parse `base` (an empty base gives the empty value) and optionally
    /// replace its query wholesale. An empty `query` clears it.
    pub fn from_base(base: &str, query: Option<QueryMap>) -> Result<Uri, UriError> {
        let uri = if base.is_empty() {
            Uri::default()
        } else {
            Uri::parse(base)?
        };

        Ok(match query {
            Some(query) => uri.with_parts(Parts::new().query(query)),
            None => uri,
        })
    }

    /// Derive a new value with the supplied components replaced.
    ///
    /// This is a replacement, not a merge: a supplied query discards the
    /// previous one entirely.
    ///
    /// Port canonicalization runs on the result. A port equal to the
    /// well-known port of the resulting scheme is dropped, and so is a stored
    /// port that was dropped earlier: changing the scheme of
    /// `http://h:80/x` to `https` gives `https://h/x`, which means port 443.
    /// Supply the port again together with the scheme to keep it.
    pub fn with_parts(&self, parts: Parts) -> Uri {
        let mut next = Uri {
            scheme: self.scheme.clone(),
            user: self.user.clone(),
            pass: self.pass.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            cached: OnceLock::new(),
        };

        replace_text(&mut next.scheme, parts.scheme);
        replace_text(&mut next.user, parts.user);
        replace_text(&mut next.pass, parts.pass);
        replace_text(&mut next.host, parts.host);
        replace_text(&mut next.path, parts.path);
        replace_text(&mut next.fragment, parts.fragment);

        if let Some(port) = parts.port {
            next.port = Some(port).filter(|port| *port != 0);
        }

        if let Some(query) = parts.query {
            let map = match query {
                QueryInput::Raw(text) => QueryMap::parse(&text),
                QueryInput::Map(map) => map.sorted(),
            };
            next.query = Some(map).filter(|map| !map.is_empty());
        }

        if let (Some(port), Some(scheme)) = (next.port, next.scheme.as_deref()) {
            if default_port(scheme) == Some(port) {
                next.port = None;
            }
        }

        next
    }

    /// All present components as a partial, ready to be applied elsewhere.
    pub fn to_parts(&self) -> Parts {
        Parts {
            scheme: self.scheme.clone(),
            user: self.user.clone(),
            pass: self.pass.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            query: self.query.clone().map(QueryInput::Map),
            fragment: self.fragment.clone(),
        }
    }

    /// The string form, computed once per instance.
    ///
    /// Fails with [`UriError::UnrepresentableUri`] if a host is set together
    /// with a relative path, or if the host has no ASCII-compatible form.
    pub fn as_uri_str(&self) -> Result<&str, UriError> {
        if let Some(cached) = self.cached.get() {
            return Ok(cached);
        }

        let serialized = serializer::serialize(self)?;
        Ok(self.cached.get_or_init(|| serialized))
    }

    /// Owned version of [`Uri::as_uri_str`].
    pub fn to_uri_string(&self) -> Result<String, UriError> {
        self.as_uri_str().map(str::to_string)
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    /// The host in Unicode form.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The decoded path; an encoded slash is kept as the `%2F` token.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn query(&self) -> Option<&QueryMap> {
        self.query.as_ref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Look up a query value by key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.query.as_ref().and_then(|query| query.get(key))
    }

    /// Look up a scalar query value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of top-level query entries, 0 without a query.
    pub fn query_len(&self) -> usize {
        self.query.as_ref().map_or(0, QueryMap::len)
    }

    /// Iterate over top-level query entries in key order.
    pub fn query_iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.query.iter().flat_map(|query| query.iter())
    }
}

fn replace_text(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = Some(value).filter(|value| !value.is_empty());
    }
}

impl Clone for Uri {
    fn clone(&self) -> Self {
        self.with_parts(Parts::new())
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.user == other.user
            && self.pass == other.pass
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("user", &self.user)
            .field("pass", &self.pass)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl TryFrom<&Uri> for String {
    type Error = UriError;

    fn try_from(uri: &Uri) -> Result<Self, Self::Error> {
        uri.to_uri_string()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.as_uri_str().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Uri::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Component;

    #[test]
    fn test_empty_value() {
        let uri = Uri::default();
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.query(), None);
        assert_eq!(uri.query_len(), 0);
        assert_eq!(uri.as_uri_str().unwrap(), "");
        assert_eq!(Uri::parse("").unwrap(), uri);
    }

    #[test]
    fn test_with_parts_does_not_touch_receiver() {
        let original = Uri::parse("http://example.org/a").unwrap();
        let before = original.to_uri_string().unwrap();

        let changed = original.with_parts(Parts::new().path("/b"));

        assert_eq!(original.to_uri_string().unwrap(), before);
        assert_eq!(changed.path(), Some("/b"));
        assert_ne!(original, changed);
    }

    #[test]
    fn test_empty_strings_clear_components() {
        let uri = Uri::parse("http://user:pw@example.org/a?x=1#f").unwrap();
        let cleared = uri.with_parts(
            Parts::new()
                .clear(Component::User)
                .clear(Component::Query)
                .clear(Component::Fragment),
        );

        assert_eq!(cleared.user(), None);
        assert_eq!(cleared.pass(), Some("pw"));
        assert_eq!(cleared.query(), None);
        assert_eq!(cleared.fragment(), None);
        assert_eq!(cleared.host(), Some("example.org"));
    }

    #[test]
    fn test_zero_string_is_kept() {
        let uri = Uri::default().with_parts(Parts::new().user("0").pass("0").host("h"));
        assert_eq!(uri.user(), Some("0"));
        assert_eq!(uri.pass(), Some("0"));
        assert_eq!(uri.as_uri_str().unwrap(), "//0:0@h");
    }

    #[test]
    fn test_default_port_is_stripped_on_store() {
        let uri = Uri::default().with_parts(Parts::new().port(80));
        assert_eq!(uri.port(), Some(80));

        let uri = uri.with_parts(Parts::new().scheme("HTTP"));
        assert_eq!(uri.port(), None);

        let uri = Uri::default().with_parts(Parts::new().scheme("https").port(80));
        assert_eq!(uri.port(), Some(80));
    }

    #[test]
    fn test_query_replacement_not_merge() {
        let uri = Uri::parse("//h/?a=1&b=2").unwrap();
        let replaced = uri.with_parts(Parts::new().query("c=3"));
        assert_eq!(replaced.query_len(), 1);
        assert!(replaced.contains_key("c"));
        assert!(!replaced.contains_key("a"));
    }

    #[test]
    fn test_query_map_input_is_sorted() {
        let map: QueryMap = vec![("b", "2"), ("a", "1")].into_iter().collect();
        let uri = Uri::default().with_parts(Parts::new().query(map));
        let keys: Vec<&str> = uri.query_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_scheme_change_after_default_port() {
        let uri = Uri::parse("http://h:80/x").unwrap();
        assert_eq!(uri.port(), None);

        let secure = uri.with_parts(Parts::new().scheme("https"));
        assert_eq!(secure.port(), None);
        assert_eq!(secure.as_uri_str().unwrap(), "https://h/x");

        let kept = uri.with_parts(Parts::new().scheme("https").port(80));
        assert_eq!(kept.as_uri_str().unwrap(), "https://h:80/x");
    }

    #[test]
    fn test_from_base() {
        let sample = "//localhost/?x=y";

        let uri = Uri::from_base(sample, None).unwrap();
        assert_eq!(uri.get_str("x"), Some("y"));

        let cleared = Uri::from_base(sample, Some(QueryMap::new())).unwrap();
        assert_eq!(cleared.query(), None);
        assert_eq!(cleared.host(), Some("localhost"));

        let overridden =
            Uri::from_base(sample, Some(vec![("z", "t")].into_iter().collect())).unwrap();
        assert_eq!(overridden.get_str("z"), Some("t"));
        assert_eq!(overridden.get("x"), None);

        assert_eq!(Uri::from_base("", None).unwrap(), Uri::default());
    }

    #[test]
    fn test_clone_is_equal() {
        let uri = Uri::parse("https://example.org/x?b=1&a=2").unwrap();
        let _ = uri.as_uri_str().unwrap();
        let copy = uri.clone();
        assert_eq!(uri, copy);
        assert_eq!(copy.as_uri_str().unwrap(), uri.as_uri_str().unwrap());
    }

    #[test]
    fn test_to_parts_round_trip() {
        let uri = Uri::parse("ftp://u:p@files.example:2121/pub?x=1#top").unwrap();
        let rebuilt = Uri::default().with_parts(uri.to_parts());
        assert_eq!(rebuilt, uri);
    }

    #[test]
    fn test_string_conversions() {
        let uri: Uri = "http://example.org/".parse().unwrap();
        let text = String::try_from(&uri).unwrap();
        assert_eq!(text, "http://example.org/");
    }
}
