//! Turning a URI value back into a string.

use crate::codec::{encode_path, host_to_ascii, raw_encode};
use crate::error::UriError;
use crate::types::default_port;
use crate::uri::value::Uri;

/// Build the string form of `uri`.
///
/// 1. `scheme:`
/// 2. `//` + encoded `user[:pass]@` + ASCII host + `:port` unless it is the
///    scheme's well-known port
/// 3. the path, with segments encoded and `%2F` tokens kept; a host-less
///    path starting with `//` gets an empty authority in front
/// 4. `?` + form-encoded query
/// 5. `#` + encoded fragment
pub(crate) fn serialize(uri: &Uri) -> Result<String, UriError> {
    let mut result = String::new();

    if let Some(scheme) = uri.scheme() {
        result.push_str(scheme);
        result.push(':');
    }

    if let Some(host) = uri.host() {
        result.push_str("//");

        if uri.user().is_some() || uri.pass().is_some() {
            result.push_str(&raw_encode(uri.user().unwrap_or_default()));
            if let Some(pass) = uri.pass() {
                result.push(':');
                result.push_str(&raw_encode(pass));
            }
            result.push('@');
        }

        result.push_str(&host_to_ascii(host)?);

        if let Some(port) = uri.port() {
            let elided = uri
                .scheme()
                .and_then(default_port)
                .is_some_and(|default| default == port);
            if !elided {
                result.push(':');
                result.push_str(&port.to_string());
            }
        }
    }

    if let Some(path) = uri.path() {
        if uri.host().is_some() && !path.starts_with('/') {
            return Err(UriError::unrepresentable(format!(
                "host is set but path {:?} is not absolute",
                path
            )));
        }
        // Without an empty authority a leading `//` would read back as a host.
        if uri.host().is_none() && path.starts_with("//") {
            result.push_str("//");
        }
        result.push_str(&encode_path(path));
    }

    if let Some(query) = uri.query() {
        result.push('?');
        result.push_str(&query.to_query_string());
    }

    if let Some(fragment) = uri.fragment() {
        result.push('#');
        result.push_str(&raw_encode(fragment));
    }

    Ok(result)
}
