//! Splitting URI strings into raw components.
//!
//! The split follows the generic RFC 3986 grammar:
//!
//! ```text
//! [scheme ":"] ["//" [userinfo "@"] host [":" port]] path ["?" query] ["#" fragment]
//! ```
//!
//! Components come out still encoded; [`RawComponents::decode`] applies the
//! per-component decoding rules afterwards.

use crate::codec::{decode_path, form_decode, host_to_unicode};
use crate::error::UriError;
use crate::uri::parts::{coerce_port, Parts, QueryInput};

/// Encoded components as found in the input. Absent parts are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawComponents {
    pub scheme: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl RawComponents {
    /// Take every component still missing here from `other`.
    pub fn fill_from(&mut self, other: RawComponents) {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.is_none() {
                *slot = value;
            }
        }

        fill(&mut self.scheme, other.scheme);
        fill(&mut self.user, other.user);
        fill(&mut self.pass, other.pass);
        fill(&mut self.host, other.host);
        fill(&mut self.port, other.port);
        fill(&mut self.path, other.path);
        fill(&mut self.query, other.query);
        fill(&mut self.fragment, other.fragment);
    }

    /// Decode into replacement parts.
    ///
    /// 1. user, pass and fragment are form-decoded
    /// 2. the host is converted from IDN to Unicode
    /// 3. the port is coerced to an integer
    /// 4. the path is percent-decoded except for `%2F`
    /// 5. the query stays raw and is decoded into a map when stored
    pub fn decode(self) -> Parts {
        Parts {
            scheme: self.scheme,
            user: self.user.map(|user| form_decode(&user)),
            pass: self.pass.map(|pass| form_decode(&pass)),
            host: self.host.map(|host| host_to_unicode(&host)),
            port: self.port.map(|port| coerce_port(&port).unwrap_or(0)),
            path: self.path.map(|path| decode_path(&path)),
            query: self.query.map(QueryInput::Raw),
            fragment: self.fragment.map(|fragment| form_decode(&fragment)),
        }
    }
}

/// Split a URI reference into its raw components.
///
/// Fails with [`UriError::MalformedUri`] when the authority cannot be taken
/// apart: an empty host next to a userinfo or port, a non-numeric or
/// out-of-range port, or an unterminated IP literal.
pub(crate) fn split(input: &str) -> Result<RawComponents, UriError> {
    let mut raw = RawComponents::default();
    let mut rest = input;

    if let Some((before, fragment)) = rest.split_once('#') {
        raw.fragment = Some(fragment.to_string());
        rest = before;
    }

    if let Some((before, query)) = rest.split_once('?') {
        raw.query = Some(query.to_string());
        rest = before;
    }

    if let Some((candidate, after)) = rest.split_once(':') {
        if is_scheme(candidate) {
            raw.scheme = Some(candidate.to_string());
            rest = after;
        }
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let authority_end = after_slashes.find('/').unwrap_or(after_slashes.len());
        split_authority(&after_slashes[..authority_end], input, &mut raw)?;
        rest = &after_slashes[authority_end..];
    }

    raw.path = Some(rest.to_string());
    Ok(raw)
}

fn split_authority(authority: &str, input: &str, raw: &mut RawComponents) -> Result<(), UriError> {
    let (userinfo, host_port) = match authority.rfind('@') {
        Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
        None => (None, authority),
    };

    let (host, port) = if host_port.starts_with('[') {
        let close = host_port
            .find(']')
            .ok_or_else(|| UriError::malformed(format!("unterminated IP literal in {:?}", input)))?;
        let after = &host_port[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(port) => Some(port),
            None if after.is_empty() => None,
            None => {
                return Err(UriError::malformed(format!(
                    "unexpected text after IP literal in {:?}",
                    input
                )))
            }
        };
        (&host_port[..=close], port)
    } else {
        match host_port.rfind(':') {
            Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
            None => (host_port, None),
        }
    };

    if host.is_empty() && (userinfo.is_some() || port.is_some()) {
        return Err(UriError::malformed(format!(
            "authority without a host in {:?}",
            input
        )));
    }

    if let Some(port) = port.filter(|port| !port.is_empty()) {
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UriError::malformed(format!("invalid port {:?} in {:?}", port, input)));
        }
        if port.parse::<u32>().map_or(true, |n| n > u32::from(u16::MAX)) {
            return Err(UriError::malformed(format!("port {:?} out of range in {:?}", port, input)));
        }
        raw.port = Some(port.to_string());
    }

    if let Some(userinfo) = userinfo {
        match userinfo.split_once(':') {
            Some((user, pass)) => {
                raw.user = Some(user.to_string());
                raw.pass = Some(pass.to_string());
            }
            None => raw.user = Some(userinfo.to_string()),
        }
    }

    if !host.is_empty() {
        raw.host = Some(host.to_string());
    }

    Ok(())
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(candidate: &str) -> bool {
    let mut bytes = candidate.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        _ => false,
    }
}
