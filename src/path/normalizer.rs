//! Path normalization.

use crate::error::UriError;

/// Normalizes paths with a fixed escape policy and output separator.
///
/// # Examples
///
/// ```
/// use uriparts::PathNormalizer;
///
/// let normalizer = PathNormalizer::new(false, "/");
/// assert_eq!(normalizer.normalize("/srv/./www//../data/")?, "/srv/data");
/// assert_eq!(normalizer.normalize("C:\\Users\\..\\Temp")?, "C:/Temp");
/// assert!(normalizer.normalize("../etc").is_err());
/// # Ok::<(), uriparts::UriError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    allow_escape: bool,
    separator: String,
}

impl Default for PathNormalizer {
    /// Escapes rejected, platform separator.
    fn default() -> Self {
        Self {
            allow_escape: false,
            separator: std::path::MAIN_SEPARATOR_STR.to_string(),
        }
    }
}

impl PathNormalizer {
    pub fn new(allow_escape: bool, separator: impl Into<String>) -> Self {
        Self {
            allow_escape,
            separator: separator.into(),
        }
    }

    /// Let relative paths keep leading `..` segments instead of failing.
    pub fn with_allow_escape(mut self, allow_escape: bool) -> Self {
        self.allow_escape = allow_escape;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn allow_escape(&self) -> bool {
        self.allow_escape
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn normalize(&self, path: &str) -> Result<String, UriError> {
        normalize_path(path, self.allow_escape, &self.separator)
    }
}

/// Normalize a path, removing `.`, `..` and empty segments.
///
/// Both `/` and `\` are accepted as input separators; `separator` is used for
/// output. A leading drive (`C:`) is carried through unchanged.
///
/// A path is relative unless it starts with a separator (after the drive).
/// On an absolute path `..` never climbs above the root and is dropped. On a
/// relative path a leading `..` is kept when `allow_escape` is set and fails
/// with [`UriError::PathEscape`] otherwise.
pub fn normalize_path(path: &str, allow_escape: bool, separator: &str) -> Result<String, UriError> {
    if path.is_empty() {
        return Ok(String::new());
    }

    let bytes = path.as_bytes();
    let mut drive = "";
    let mut rest = path;
    let mut relative = false;

    // A first byte with the high bit set belongs to a multibyte character,
    // which is taken as the start of a relative name.
    if bytes[0] & 0x80 != 0 {
        relative = true;
    } else if bytes.len() > 1 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() == 2 {
            return Ok(path.to_string());
        }
        drive = &path[..2];
        rest = &path[2..];
    }

    if !rest.starts_with(['/', '\\']) {
        relative = true;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(['/', '\\']).filter(|segment| !segment.is_empty()) {
        match segment {
            "." => {}
            ".." => match segments.last() {
                Some(&"..") => segments.push(".."),
                Some(_) => {
                    segments.pop();
                }
                None if !relative => {}
                None if allow_escape => segments.push(".."),
                None => {
                    tracing::debug!("path {:?} escapes its starting directory", path);
                    return Err(UriError::PathEscape(path.to_string()));
                }
            },
            name => segments.push(name),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    normalized.push_str(drive);
    if !relative {
        normalized.push_str(separator);
    }
    normalized.push_str(&segments.join(separator));
    Ok(normalized)
}
