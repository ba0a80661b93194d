//! Percent-decoding of URI components.
//!
//! Decoding is lossy: byte sequences that are not UTF-8 after decoding are
//! replaced with U+FFFD.

use percent_encoding::percent_decode_str;

/// Decode `%XX` escapes only (`+` is kept).
pub fn raw_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Decode `%XX` escapes and turn `+` into a space.
pub fn form_decode(input: &str) -> String {
    if input.contains('+') {
        raw_decode(&input.replace('+', " "))
    } else {
        raw_decode(input)
    }
}

/// Decode a raw path, keeping every `%2F` (any case) as the literal `%2F` token.
///
/// # Examples
///
/// ```
/// use uriparts::codec::decode_path;
///
/// assert_eq!(decode_path("/a%20b/c%2fd"), "/a b/c%2Fd");
/// ```
pub fn decode_path(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut protected = String::with_capacity(input.len() + 8);
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if i + 2 < bytes.len()
            && bytes[i] == b'%'
            && bytes[i + 1] == b'2'
            && (bytes[i + 2] | 0x20) == b'f'
        {
            protected.push_str(&input[start..i]);
            protected.push_str("%252F");
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }
    protected.push_str(&input[start..]);

    raw_decode(&protected)
}

/// Convert a host from ASCII-compatible form to Unicode (UTS-46).
///
/// IP literals are left alone; on conversion errors the input is kept as is.
pub fn host_to_unicode(host: &str) -> String {
    if host.starts_with('[') {
        return host.to_string();
    }

    let (unicode, result) = idna::domain_to_unicode(host);
    match result {
        Ok(()) => unicode,
        Err(_) => {
            tracing::debug!("IDN conversion to Unicode failed for host {:?}, keeping it", host);
            host.to_string()
        }
    }
}
