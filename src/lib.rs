//! uriparts - immutable URI values and path normalization
//!
//! This crate provides an immutable URI value type that can be parsed from a
//! string, derived into new values by replacing components, and turned back
//! into a canonical string. It also builds "self-reference" URIs from request
//! metadata and normalizes filesystem-style paths.
//!
//! # Features
//!
//! - **Typed components**: scheme, user, pass, host, port, path, query, fragment
//! - **Immutable**: every change produces a new value
//! - **Canonical output**: sorted queries, default ports elided, RFC 3986 escaping
//! - **IDN aware**: hosts are stored in Unicode and printed in ASCII form
//! - **Encoded slashes**: `%2F` inside a path segment survives a round trip
//! - **Path normalization**: `.`/`..` resolution with an explicit escape policy
//!
//! # Quick Start
//!
//! ```
//! use uriparts::{normalize_path, Parts, RequestEnvironment, Uri};
//!
//! // Parse and inspect
//! let uri = Uri::parse("https://user@example.org:443/a%2Fb/c?b=2&a=1#top")?;
//! assert_eq!(uri.port(), None);
//! assert_eq!(uri.path(), Some("/a%2Fb/c"));
//! assert_eq!(uri.as_uri_str()?, "https://user@example.org/a%2Fb/c?a=1&b=2#top");
//!
//! // Derive a new value
//! let other = uri.with_parts(Parts::new().host("example.net").query("x=1"));
//! assert_eq!(other.as_uri_str()?, "https://user@example.net/a%2Fb/c?x=1#top");
//!
//! // Build a self-reference from request metadata
//! let env = RequestEnvironment::new()
//!     .request_scheme("http")
//!     .server_name("localhost")
//!     .request_uri("/index");
//! let me = Uri::from_environment(&env, false, Parts::new())?;
//! assert_eq!(me.as_uri_str()?, "http://localhost/index");
//!
//! // Normalize a path
//! assert_eq!(normalize_path("/srv/www/../data", false, "/")?, "/srv/data");
//! # Ok::<(), uriparts::UriError>(())
//! ```
//!
//! # Default Ports
//!
//! | Scheme | Port | Scheme | Port |
//! |--------|------|--------|------|
//! | ftp    | 21   | ldaps  | 636  |
//! | ftps   | 990  | nntp   | 119  |
//! | gopher | 70   | nntps  | 563  |
//! | http   | 80   | pop3   | 110  |
//! | https  | 443  | pop3s  | 995  |
//! | imap   | 143  | ssh    | 22   |
//! | imaps  | 993  | telnet | 23   |
//! | ldap   | 389  | telnets| 992  |
//!
//! # Error Handling
//!
//! Fallible functions return `Result<T, UriError>`:
//!
//! - `MalformedUri` when a string cannot be split into URI components
//! - `UnrepresentableUri` when a value cannot be printed (host with a relative path)
//! - `PathEscape` when a relative path climbs above its start
//!
//! # Limitations
//!
//! Schemes with their own grammar (`mailto:` and the like) are split with the
//! generic grammar only.

// Re-export the URI value and its building blocks
pub use uri::{coerce_port, Parts, QueryInput, QueryMap, QueryValue, RequestEnvironment, Uri};

// Re-export path utilities
pub use path::{normalize_path, path_info, PathInfo, PathNormalizer};

// Re-export public types
pub use error::UriError;
pub use types::{default_port, Component, DEFAULT_PORTS};

// Module declarations
pub mod codec;
pub mod error;
pub mod path;
pub mod types;
pub mod uri;
