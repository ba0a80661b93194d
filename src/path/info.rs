//! Splitting a path into directory, file name and extension.

/// A pathinfo structure where every member is always set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    /// Parent directory, `.` when the path has none.
    pub dirname: String,
    /// Last path component, trailing separators removed.
    pub basename: String,
    /// `basename` without its extension.
    pub filename: String,
    /// Extension including the leading dot, or empty.
    pub extension: String,
}

/// Split `path` into a [`PathInfo`].
///
/// A name starting with a dot and having no other dot (`.htaccess`) is a
/// file name, not an extension.
///
/// # Examples
///
/// ```
/// use uriparts::path_info;
///
/// let info = path_info("/var/www/index.html");
/// assert_eq!(info.dirname, "/var/www");
/// assert_eq!(info.filename, "index");
/// assert_eq!(info.extension, ".html");
///
/// let hidden = path_info("/srv/.htaccess");
/// assert_eq!(hidden.filename, ".htaccess");
/// assert_eq!(hidden.extension, "");
/// ```
pub fn path_info(path: &str) -> PathInfo {
    const SEPARATORS: [char; 2] = ['/', '\\'];

    if path.is_empty() {
        return PathInfo::default();
    }

    let trimmed = path.trim_end_matches(SEPARATORS);
    if trimmed.is_empty() {
        return PathInfo {
            dirname: path[..1].to_string(),
            ..Default::default()
        };
    }

    let (dirname, basename) = match trimmed.rfind(SEPARATORS) {
        Some(index) => {
            let parent = trimmed[..index].trim_end_matches(SEPARATORS);
            let dirname = if parent.is_empty() {
                &trimmed[..1]
            } else {
                parent
            };
            (dirname, &trimmed[index + 1..])
        }
        None => (".", trimmed),
    };

    let (filename, extension) = match basename.rfind('.') {
        Some(0) | None => (basename, ""),
        Some(dot) => (&basename[..dot], &basename[dot + 1..]),
    };

    PathInfo {
        dirname: dirname.to_string(),
        basename: basename.to_string(),
        filename: filename.to_string(),
        extension: if extension.is_empty() {
            String::new()
        } else {
            format!(".{}", extension)
        },
    }
}
