//! Tests for path normalization and path info.

use uriparts::*;

#[test]
fn test_escape_policy() {
    assert!(matches!(
        normalize_path("..", false, "/"),
        Err(UriError::PathEscape(_))
    ));
    assert_eq!(normalize_path("..", true, "/").unwrap(), "..");
}

#[test]
fn test_absolute_paths_never_escape() {
    let inputs = vec!["/a/../../..", "/..", "\\..\\..\\x\\..", "C:/../.."];

    for input in inputs {
        let normalized = normalize_path(input, false, "/").unwrap();
        assert!(!normalized.contains(".."), "{:?} gave {:?}", input, normalized);
    }
    assert_eq!(normalize_path("/a/../../..", false, "/").unwrap(), "/");
}

#[test]
fn test_normalizer_struct() {
    let normalizer = PathNormalizer::new(true, "/");
    assert_eq!(normalizer.normalize("a/./b/../../../c").unwrap(), "../c");

    let windows = PathNormalizer::new(false, "\\");
    assert_eq!(windows.normalize("C:/Users/me/./docs").unwrap(), "C:\\Users\\me\\docs");
}

#[test]
fn test_normalize_uri_path() {
    let uri = Uri::parse("http://example.org/a/./b/../c//d").unwrap();
    let path = uri.path().unwrap();
    let normalized = normalize_path(path, false, "/").unwrap();

    let cleaned = uri.with_parts(Parts::new().path(normalized));
    assert_eq!(cleaned.as_uri_str().unwrap(), "http://example.org/a/c/d");
}

#[test]
fn test_path_info_members_always_set() {
    let info = path_info("archive.tar.gz");
    assert_eq!(info.dirname, ".");
    assert_eq!(info.basename, "archive.tar.gz");
    assert_eq!(info.filename, "archive.tar");
    assert_eq!(info.extension, ".gz");

    let info = path_info("/var/log/");
    assert_eq!(info.dirname, "/var");
    assert_eq!(info.basename, "log");
    assert_eq!(info.extension, "");
}
