//! Tests for query map decoding, ordering and encoding.

use uriparts::{Parts, QueryMap, QueryValue, Uri};

#[test]
fn test_query_parse_and_serialize() {
    let test_cases = vec![
        ("b=2&a=1", "a=1&b=2"),
        ("q=hello+world", "q=hello+world"),
        ("q=hello%20world", "q=hello+world"),
        ("flag", "flag="),
        ("x[]=1&x[]=2", "x%5B0%5D=1&x%5B1%5D=2"),
        ("m[z]=1&m[a]=2", "m%5Ba%5D=2&m%5Bz%5D=1"),
        ("a=%26%3D", "a=%26%3D"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(
            QueryMap::parse(input).to_query_string(),
            expected,
            "query {:?}",
            input
        );
    }
}

#[test]
fn test_nested_query_round_trip() {
    let uri = Uri::parse("/?user[name]=bob&user[roles][]=admin&user[roles][]=dev").unwrap();
    let text = uri.to_uri_string().unwrap();
    assert_eq!(Uri::parse(&text).unwrap(), uri);

    let roles = uri
        .get("user")
        .and_then(QueryValue::as_map)
        .and_then(|user| user.get("roles"))
        .and_then(QueryValue::as_map)
        .unwrap();
    let values: Vec<Option<&str>> = roles.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec![Some("admin"), Some("dev")]);
}

#[test]
fn test_numeric_keys_sort_numerically() {
    let uri = Uri::parse("/?10=a&9=b&x=c").unwrap();
    let keys: Vec<&str> = uri.query_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["9", "10", "x"]);
}

#[test]
fn test_empty_query_is_absent() {
    assert_eq!(Uri::parse("/p?").unwrap().query(), None);
    assert_eq!(Uri::parse("/p?&&").unwrap().query(), None);

    let uri = Uri::parse("/p?a=1").unwrap();
    assert_eq!(uri.with_parts(Parts::new().query(QueryMap::new())).query(), None);
}

#[test]
fn test_query_value_conversions() {
    let scalar = QueryValue::from("x");
    assert_eq!(scalar.as_str(), Some("x"));
    assert_eq!(scalar.as_map(), None);

    let nested = QueryValue::from(QueryMap::parse("a=1"));
    assert_eq!(nested.as_str(), None);
    assert_eq!(nested.as_map().map(QueryMap::len), Some(1));
}
