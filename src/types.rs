//! Component names and the well-known default port table.

use std::fmt;
use std::str::FromStr;

use crate::error::UriError;

/// Well-known schemes and their conventional ports.
///
/// A port equal to the entry for the URI's scheme is never stored nor printed.
pub const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ftps", 990),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("imap", 143),
    ("imaps", 993),
    ("ldap", 389),
    ("ldaps", 636),
    ("nntp", 119),
    ("nntps", 563),
    ("pop3", 110),
    ("pop3s", 995),
    ("ssh", 22),
    ("telnet", 23),
    ("telnets", 992),
];

/// Look up the well-known port for a scheme (case-insensitive).
///
/// # Examples
///
/// ```
/// use uriparts::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("HTTP"), Some(80));
/// assert_eq!(default_port("gemini"), None);
/// ```
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|(_, port)| *port)
}

/// The closed set of URI components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// URI scheme (http, https, ...)
    Scheme,
    /// User name from the authority
    User,
    /// Password from the authority
    Pass,
    /// Host name, stored in Unicode form
    Host,
    /// Port number
    Port,
    /// Path, percent-decoded except for `%2F`
    Path,
    /// Query, always a key-sorted map
    Query,
    /// Fragment without the leading `#`
    Fragment,
}

impl Component {
    /// All components in canonical order.
    pub const ALL: [Component; 8] = [
        Component::Scheme,
        Component::User,
        Component::Pass,
        Component::Host,
        Component::Port,
        Component::Path,
        Component::Query,
        Component::Fragment,
    ];

    /// The name used for this component in untyped part maps.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::User => "user",
            Component::Pass => "pass",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        }
    }

    /// Resolve a part name, returning `None` for names outside the set.
    pub fn from_name(name: &str) -> Option<Component> {
        Component::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::from_name(s)
            .ok_or_else(|| UriError::InvalidArgument(format!("unknown URI component: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports_table() {
        let expected = vec![
            ("ftp", 21),
            ("ftps", 990),
            ("gopher", 70),
            ("http", 80),
            ("https", 443),
            ("imap", 143),
            ("imaps", 993),
            ("ldap", 389),
            ("ldaps", 636),
            ("nntp", 119),
            ("nntps", 563),
            ("pop3", 110),
            ("pop3s", 995),
            ("ssh", 22),
            ("telnet", 23),
            ("telnets", 992),
        ];

        for (scheme, port) in expected {
            assert_eq!(default_port(scheme), Some(port), "wrong port for {}", scheme);
        }
        assert_eq!(default_port("mailto"), None);
        assert_eq!(default_port(""), None);
    }

    #[test]
    fn test_component_names() {
        for component in Component::ALL {
            assert_eq!(Component::from_name(component.name()), Some(component));
            assert_eq!(component.name().parse::<Component>().unwrap(), component);
        }

        assert_eq!(Component::from_name("password"), None);
        assert!("Host".parse::<Component>().is_err());
    }
}
