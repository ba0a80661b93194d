//! Partial component sets used to derive new URI values.

use crate::types::Component;
use crate::uri::query::QueryMap;

/// A query supplied to [`Parts`]: raw text to decode, or an already built map.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryInput {
    /// A query string without the leading `?`.
    Raw(String),
    /// A decoded map; it gets sorted when stored.
    Map(QueryMap),
}

impl From<&str> for QueryInput {
    fn from(query: &str) -> Self {
        QueryInput::Raw(query.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(query: String) -> Self {
        QueryInput::Raw(query)
    }
}

impl From<QueryMap> for QueryInput {
    fn from(map: QueryMap) -> Self {
        QueryInput::Map(map)
    }
}

/// A set of replacement components for [`crate::Uri::with_parts`].
///
/// A field left as `None` is not supplied and keeps its previous value.
/// Supplying an empty value (`""`, port `0`, an empty query) clears the
/// component. Note that `"0"` is a regular non-empty value.
///
/// # Examples
///
/// ```
/// use uriparts::{Parts, Uri};
///
/// let uri = Uri::default().with_parts(
///     Parts::new().scheme("https").host("example.org").path("/docs"),
/// );
/// assert_eq!(uri.to_uri_string().unwrap(), "https://example.org/docs");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parts {
    pub scheme: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    /// Already coerced; `Some(0)` clears the port.
    pub port: Option<u16>,
    pub path: Option<String>,
    pub query: Option<QueryInput>,
    pub fragment: Option<String>,
}

impl Parts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a partial from untyped `(name, value)` pairs.
    ///
    /// Names outside the component set are dropped. Ports are coerced with
    /// [`coerce_port`] and queries are treated as raw query strings.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut parts = Parts::new();
        for (name, value) in pairs {
            match Component::from_name(name.as_ref()) {
                Some(component) => parts = parts.set(component, value),
                None => tracing::trace!("ignoring unknown URI part {:?}", name.as_ref()),
            }
        }
        parts
    }

    /// Supply one component from text.
    pub fn set(mut self, component: Component, value: impl Into<String>) -> Self {
        let value = value.into();
        match component {
            Component::Scheme => self.scheme = Some(value),
            Component::User => self.user = Some(value),
            Component::Pass => self.pass = Some(value),
            Component::Host => self.host = Some(value),
            Component::Port => self.port = Some(coerce_port(&value).unwrap_or(0)),
            Component::Path => self.path = Some(value),
            Component::Query => self.query = Some(QueryInput::Raw(value)),
            Component::Fragment => self.fragment = Some(value),
        }
        self
    }

    /// Supply an empty value for a component, so that it gets cleared.
    pub fn clear(self, component: Component) -> Self {
        self.set(component, "")
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Supply a port from text, coerced with [`coerce_port`].
    pub fn port_text(self, port: &str) -> Self {
        self.set(Component::Port, port)
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, query: impl Into<QueryInput>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Fill every component not supplied here from `fallback`.
    pub fn or(self, fallback: Parts) -> Parts {
        Parts {
            scheme: self.scheme.or(fallback.scheme),
            user: self.user.or(fallback.user),
            pass: self.pass.or(fallback.pass),
            host: self.host.or(fallback.host),
            port: self.port.or(fallback.port),
            path: self.path.or(fallback.path),
            query: self.query.or(fallback.query),
            fragment: self.fragment.or(fallback.fragment),
        }
    }

    /// True if no component is supplied.
    pub fn is_empty(&self) -> bool {
        *self == Parts::default()
    }
}

/// Coerce port text the way an integer cast would.
///
/// Leading whitespace is skipped and the leading run of ASCII digits is read;
/// anything after it is ignored. No digits, zero, or a value above 65535
/// yields `None`.
///
/// # Examples
///
/// ```
/// use uriparts::coerce_port;
///
/// assert_eq!(coerce_port("8080"), Some(8080));
/// assert_eq!(coerce_port(" 443abc"), Some(443));
/// assert_eq!(coerce_port("http"), None);
/// assert_eq!(coerce_port("0"), None);
/// ```
pub fn coerce_port(text: &str) -> Option<u16> {
    let trimmed = text.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];

    let port = digits.parse::<u32>().ok().and_then(|n| u16::try_from(n).ok());
    match port {
        Some(0) | None => {
            tracing::trace!("port {:?} coerced to absent", text);
            None
        }
        port => port,
    }
}
