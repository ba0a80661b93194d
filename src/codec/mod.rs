//! Percent-encoding and IDN helpers shared by the parser and the serializer.
//!
//! This module contains:
//! - RFC 3986 percent-encoding of components (unreserved set kept verbatim)
//! - Form (`application/x-www-form-urlencoded`) encoding and decoding
//! - Path coding that keeps an encoded slash (`%2F`) distinct from a separator
//! - IDN host conversion between Unicode and ASCII-compatible form

pub mod decoder;
pub mod encoder;

/// The encoded slash token kept verbatim inside decoded paths.
pub const ENCODED_SLASH: &str = "%2F";

// Re-export main functionality
pub use decoder::{decode_path, form_decode, host_to_unicode, raw_decode};
pub use encoder::{encode_path, form_encode, host_to_ascii, raw_encode, RAW_ENCODE_SET};
