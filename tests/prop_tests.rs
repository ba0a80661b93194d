//! Property tests for round-trip stability and normalization.

use proptest::prelude::*;
use uriparts::{normalize_path, Parts, QueryMap, Uri};

fn scheme() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("http".to_string()),
        Just("https".to_string()),
        Just("ftp".to_string()),
        "[a-z][a-z0-9+.-]{0,7}",
    ]
}

fn hostname() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,16}",
        "[a-z0-9]{1,8}\\.[a-z]{2,4}",
        Just("[::1]".to_string()),
        Just("café.example".to_string()),
    ]
}

// Arbitrary printable text, including reserved characters and non-ASCII.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 !$&'()*+,;=:@/?#%\\[\\]~é-]{1,12}"
}

// Paths with no leading slash, one, or two; segments may be empty.
fn path() -> impl Strategy<Value = (&'static str, Vec<String>)> {
    (
        prop_oneof![Just(""), Just("/"), Just("//")],
        prop::collection::vec("[a-zA-Z0-9 ._~+@:!%-]{0,8}", 0..4),
    )
}

fn query() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,6}", text()), 0..4)
}

// host, user, pass and port; userinfo and port only exist next to a host.
fn authority() -> impl Strategy<Value = Option<(String, Option<String>, Option<String>, Option<u16>)>> {
    proptest::option::of((
        hostname(),
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::option::of(1u16..=65535),
    ))
}

proptest! {
    #[test]
    fn prop_parse_serialize_round_trip(
        scheme in proptest::option::of(scheme()),
        authority in authority(),
        (leading, segments) in path(),
        query in query(),
        fragment in proptest::option::of(text()),
    ) {
        let mut parts = Parts::new();
        if let Some(scheme) = scheme {
            parts = parts.scheme(scheme);
        }

        let mut leading = leading;
        if let Some((host, user, pass, port)) = authority {
            parts = parts.host(host);
            if let Some(user) = user {
                parts = parts.user(user);
            }
            if let Some(pass) = pass {
                parts = parts.pass(pass);
            }
            if let Some(port) = port {
                parts = parts.port(port);
            }
            if leading.is_empty() {
                leading = "/";
            }
        }
        parts = parts.path(format!("{}{}", leading, segments.join("/")));

        if let Some(fragment) = fragment {
            parts = parts.fragment(fragment);
        }
        parts = parts.query(query.into_iter().collect::<QueryMap>());

        let built = Uri::default().with_parts(parts);
        let text = built.to_uri_string().unwrap();
        let parsed = Uri::parse(&text).unwrap();
        prop_assert_eq!(&parsed, &built, "serialized as {:?}", text);

        let again = parsed.to_uri_string().unwrap();
        prop_assert_eq!(again, text);
    }

    #[test]
    fn prop_parse_is_idempotent(input in "[a-z]{1,5}://[a-z]{1,8}(:[0-9]{1,4})?(/[a-zA-Z0-9%._~-]{0,6}){0,3}(\\?[a-z]{1,3}=[a-z0-9]{0,3}(&[a-z]{1,3}=[a-z0-9]{0,3}){0,2})?") {
        let first = Uri::parse(&input).unwrap();
        let text = first.to_uri_string().unwrap();
        let second = Uri::parse(&text).unwrap();
        prop_assert_eq!(&second, &first);
        prop_assert_eq!(second.to_uri_string().unwrap(), text);
    }

    #[test]
    fn prop_query_order_independent(pairs in prop::collection::vec(("[a-z]{1,4}", "[a-z0-9]{0,4}"), 1..6)) {
        // Keep the last value per key so both orders hold the same data.
        let mut deduped: Vec<(String, String)> = Vec::new();
        for (key, value) in pairs {
            deduped.retain(|(existing, _)| *existing != key);
            deduped.push((key, value));
        }
        let mut reversed = deduped.clone();
        reversed.reverse();

        let a = Uri::default().with_parts(Parts::new().query(deduped.into_iter().collect::<QueryMap>()));
        let b = Uri::default().with_parts(Parts::new().query(reversed.into_iter().collect::<QueryMap>()));
        prop_assert_eq!(a.to_uri_string().unwrap(), b.to_uri_string().unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_normalize_is_idempotent(segments in prop::collection::vec(prop_oneof![
        Just(".".to_string()),
        Just("..".to_string()),
        Just(String::new()),
        "[a-z]{1,4}",
    ], 0..8), absolute in any::<bool>()) {
        let joined = segments.join("/");
        let input = if absolute { format!("/{}", joined) } else { joined };

        if let Ok(once) = normalize_path(&input, true, "/") {
            let twice = normalize_path(&once, true, "/").unwrap();
            prop_assert_eq!(&twice, &once);
            if absolute {
                prop_assert!(!once.contains(".."));
            }
        }
    }
}
