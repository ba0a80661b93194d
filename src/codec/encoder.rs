//! Percent-encoding of URI components.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::form_urlencoded;

use crate::codec::ENCODED_SLASH;
use crate::error::UriError;

/// Everything except the RFC 3986 unreserved characters.
pub const RAW_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a component, keeping only `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
///
/// # Examples
///
/// ```
/// use uriparts::codec::raw_encode;
///
/// assert_eq!(raw_encode("a b/c"), "a%20b%2Fc");
/// assert_eq!(raw_encode("~user.name"), "~user.name");
/// ```
pub fn raw_encode(input: &str) -> String {
    utf8_percent_encode(input, RAW_ENCODE_SET).to_string()
}

/// Form-encode a query key or value (space becomes `+`).
pub fn form_encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// Encode a decoded path.
///
/// The path is split on the literal `%2F` token first; each piece has its
/// `/`-delimited segments encoded individually and the pieces are joined back
/// with `%2F`, so an encoded slash never turns into `%252F` nor into `/`.
pub fn encode_path(path: &str) -> String {
    path.split(ENCODED_SLASH)
        .map(|piece| {
            piece
                .split('/')
                .map(raw_encode)
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect::<Vec<_>>()
        .join(ENCODED_SLASH)
}

/// Convert a stored host to its ASCII-compatible form for output.
///
/// ASCII hosts, IP literals included, are emitted verbatim.
pub fn host_to_ascii(host: &str) -> Result<String, UriError> {
    if host.is_ascii() {
        return Ok(host.to_string());
    }

    idna::domain_to_ascii(host).map_err(|_| {
        tracing::debug!("IDN conversion to ASCII failed for host {:?}", host);
        UriError::unrepresentable(format!("host {:?} has no ASCII-compatible form", host))
    })
}
