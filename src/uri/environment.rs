//! Building a self-reference URI from request metadata.
//!
//! The lookup order, highest precedence first:
//!
//! 1. `X-Forwarded-Proto`, `X-Forwarded-Port` and `X-Forwarded-Host`, only
//!    when forwarded headers are trusted
//! 2. the request URI as delivered to the process
//! 3. the request scheme, server name and server port of the connection
//! 4. the `Host` header, if no host was found so far
//!
//! Each stage only fills components that are still missing. Overrides are
//! applied last and win over everything.
//!
//! Trusting forwarded headers is only safe when the upstream proxy strips or
//! overwrites them for untrusted peers; nothing here checks that.

use crate::error::UriError;
use crate::uri::parser::{self, RawComponents};
use crate::uri::parts::Parts;
use crate::uri::value::Uri;

/// Snapshot of the request metadata used by [`Uri::from_environment`].
///
/// Empty strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestEnvironment {
    /// `X-Forwarded-Proto` header
    pub forwarded_proto: Option<String>,
    /// `X-Forwarded-Port` header
    pub forwarded_port: Option<String>,
    /// `X-Forwarded-Host` header, `host[:port]`
    pub forwarded_host: Option<String>,
    /// Request target, origin-form or absolute-form
    pub request_uri: Option<String>,
    /// Scheme of the connection (http, https)
    pub request_scheme: Option<String>,
    /// Configured server name
    pub server_name: Option<String>,
    /// Port the connection was accepted on
    pub server_port: Option<String>,
    /// `Host` header, `host[:port]`
    pub host_header: Option<String>,
}

impl RequestEnvironment {
    /// CGI variable names understood by [`RequestEnvironment::from_vars`].
    pub const VARIABLES: [&'static str; 8] = [
        "HTTP_X_FORWARDED_PROTO",
        "HTTP_X_FORWARDED_PORT",
        "HTTP_X_FORWARDED_HOST",
        "REQUEST_URI",
        "REQUEST_SCHEME",
        "SERVER_NAME",
        "SERVER_PORT",
        "HTTP_HOST",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Read a snapshot from CGI-style variables such as `REQUEST_URI` or
    /// `HTTP_X_FORWARDED_HOST`. Other names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = RequestEnvironment::new();
        for (name, value) in vars {
            let slot = match name.as_ref() {
                "HTTP_X_FORWARDED_PROTO" => &mut env.forwarded_proto,
                "HTTP_X_FORWARDED_PORT" => &mut env.forwarded_port,
                "HTTP_X_FORWARDED_HOST" => &mut env.forwarded_host,
                "REQUEST_URI" => &mut env.request_uri,
                "REQUEST_SCHEME" => &mut env.request_scheme,
                "SERVER_NAME" => &mut env.server_name,
                "SERVER_PORT" => &mut env.server_port,
                "HTTP_HOST" => &mut env.host_header,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        env
    }

    /// Read a snapshot from the process environment, as set up by a CGI server.
    pub fn from_process_env() -> Self {
        Self::from_vars(
            std::env::vars().filter(|(name, _)| Self::VARIABLES.contains(&name.as_str())),
        )
    }

    pub fn forwarded_proto(mut self, value: impl Into<String>) -> Self {
        self.forwarded_proto = Some(value.into());
        self
    }

    pub fn forwarded_port(mut self, value: impl Into<String>) -> Self {
        self.forwarded_port = Some(value.into());
        self
    }

    pub fn forwarded_host(mut self, value: impl Into<String>) -> Self {
        self.forwarded_host = Some(value.into());
        self
    }

    pub fn request_uri(mut self, value: impl Into<String>) -> Self {
        self.request_uri = Some(value.into());
        self
    }

    pub fn request_scheme(mut self, value: impl Into<String>) -> Self {
        self.request_scheme = Some(value.into());
        self
    }

    pub fn server_name(mut self, value: impl Into<String>) -> Self {
        self.server_name = Some(value.into());
        self
    }

    pub fn server_port(mut self, value: impl Into<String>) -> Self {
        self.server_port = Some(value.into());
        self
    }

    pub fn host_header(mut self, value: impl Into<String>) -> Self {
        self.host_header = Some(value.into());
        self
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn fill(slot: &mut Option<String>, value: Option<&str>, source: &str) {
    if slot.is_none() {
        if let Some(value) = value {
            tracing::trace!("taking {:?} from {}", value, source);
            *slot = Some(value.to_string());
        }
    }
}

impl Uri {
    /// Build the URI that was used to reach this process.
    ///
    /// Forwarded headers are ignored unless `trust_forwarded` is set.
    /// `overrides` is applied last through [`Uri::with_parts`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uriparts::{Parts, RequestEnvironment, Uri};
    ///
    /// let env = RequestEnvironment::new()
    ///     .forwarded_proto("https")
    ///     .request_scheme("http")
    ///     .server_name("upstream.internal")
    ///     .server_port("8080")
    ///     .request_uri("/login?next=%2F");
    ///
    /// let direct = Uri::from_environment(&env, false, Parts::new())?;
    /// assert_eq!(direct.as_uri_str()?, "http://upstream.internal:8080/login?next=%2F");
    ///
    /// let proxied = Uri::from_environment(&env, true, Parts::new())?;
    /// assert_eq!(proxied.scheme(), Some("https"));
    /// # Ok::<(), uriparts::UriError>(())
    /// ```
    pub fn from_environment(
        env: &RequestEnvironment,
        trust_forwarded: bool,
        overrides: Parts,
    ) -> Result<Uri, UriError> {
        let mut raw = RawComponents::default();

        if trust_forwarded {
            fill(&mut raw.scheme, present(&env.forwarded_proto), "X-Forwarded-Proto");
            fill(&mut raw.port, present(&env.forwarded_port), "X-Forwarded-Port");

            if let Some(host) = present(&env.forwarded_host) {
                raw.fill_from(parse_authority(host)?);
            }
        }

        if let Some(request_uri) = present(&env.request_uri) {
            raw.fill_from(parser::split(request_uri).map_err(|err| {
                tracing::debug!("unusable request URI {:?}: {}", request_uri, err);
                err
            })?);
        }

        fill(&mut raw.scheme, present(&env.request_scheme), "request scheme");
        fill(&mut raw.host, present(&env.server_name), "server name");
        fill(&mut raw.port, present(&env.server_port), "server port");

        if raw.host.is_none() {
            if let Some(host) = present(&env.host_header) {
                raw.fill_from(parse_authority(host)?);
            }
        }

        Ok(Uri::default().with_parts(overrides.or(raw.decode())))
    }
}

/// Parse `host[:port]` header text as a network-path authority.
fn parse_authority(authority: &str) -> Result<RawComponents, UriError> {
    parser::split(&format!("//{}", authority)).map(|raw| RawComponents {
        host: raw.host,
        port: raw.port,
        ..Default::default()
    })
}
