use super::{generate_path, match_path, match_path_with};
use crate::decode::{DiagnosticSink, NoopSink};
use crate::error::{DecodeError, RouteError};
use crate::params::Params;
use crate::pattern::PathPattern;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink(Mutex<Vec<String>>);

impl DiagnosticSink for RecordingSink {
    fn malformed_param(&self, param_name: &str, _raw: &str, _error: &DecodeError) {
        self.0.lock().unwrap().push(param_name.to_string());
    }
}

#[test]
fn test_simple_param_match() {
    let m = match_path("/users/:id", "/users/123").unwrap();
    assert_eq!(m.path, "/users/:id");
    assert_eq!(m.pathname, "/users/123");
    assert_eq!(m.get_param("id"), Some("123"));
    assert_eq!(m.params.len(), 1);
}

#[test]
fn test_no_match_is_none() {
    assert!(match_path("/users/:id", "/posts/1").is_none());
    assert!(match_path("/users/:id", "/users").is_none());
}

#[test]
fn test_literal_escaping() {
    assert!(match_path("/a.b+c", "/a.b+c").is_some());
    assert!(match_path("/a.b+c", "/aXbYYc").is_none());
    assert!(match_path("/a.b+c", "/a.bbc").is_none());
}

#[test]
fn test_case_sensitivity() {
    let m = match_path("/Foo", "/foo").unwrap();
    assert_eq!(m.pathname, "/foo");
    assert!(match_path(PathPattern::new("/Foo").case_sensitive(true), "/foo").is_none());
    assert!(match_path(PathPattern::new("/Foo").case_sensitive(true), "/Foo").is_some());
}

#[test]
fn test_wildcard_capture() {
    let m = match_path("/files/*", "/files/a/b/c").unwrap();
    assert_eq!(m.wildcard(), Some("a/b/c"));
    assert_eq!(m.pathname, "/files");
}

#[test]
fn test_wildcard_matches_empty_remainder() {
    assert_eq!(match_path("/files/*", "/files").unwrap().wildcard(), Some(""));
    assert_eq!(match_path("/files/*", "/files/").unwrap().wildcard(), Some(""));
}

#[test]
fn test_wildcard_with_named_params() {
    let m = match_path("/repo/:owner/:name/*", "/repo/rust-lang/regex/src/lib.rs").unwrap();
    assert_eq!(m.get_param("owner"), Some("rust-lang"));
    assert_eq!(m.get_param("name"), Some("regex"));
    assert_eq!(m.wildcard(), Some("src/lib.rs"));
}

#[test]
fn test_trailing_slash_tolerance() {
    let m = match_path("/foo", "/foo/").unwrap();
    assert_eq!(m.pathname, "/foo");
    assert!(match_path("/foo", "/foo//").is_none());
}

#[test]
fn test_prefix_match_without_end() {
    let m = match_path(PathPattern::new("/docs/:section").end(false), "/docs/api/v1").unwrap();
    assert_eq!(m.pathname, "/docs/api");
    assert_eq!(m.get_param("section"), Some("api"));
    assert!(match_path("/docs/:section", "/docs/api/v1").is_none());
}

#[test]
fn test_params_are_decoded() {
    let m = match_path("/q/:term", "/q/rust+lang%21").unwrap();
    assert_eq!(m.get_param("term"), Some("rust lang!"));
    assert_eq!(m.pathname, "/q/rust+lang%21");
}

#[test]
fn test_malformed_encoding_degrades() {
    let sink = RecordingSink::default();
    let m = match_path_with("/q/:term", "/q/%E0%A4%A", &sink).unwrap();
    assert_eq!(m.get_param("term"), Some("%E0%A4%A"));
    assert_eq!(*sink.0.lock().unwrap(), vec!["term".to_string()]);
}

#[test]
fn test_one_bad_param_does_not_affect_others() {
    let sink = RecordingSink::default();
    let m = match_path_with("/:a/:b", "/%zz/ok%20go", &sink).unwrap();
    assert_eq!(m.get_param("a"), Some("%zz"));
    assert_eq!(m.get_param("b"), Some("ok go"));
    assert_eq!(sink.0.lock().unwrap().len(), 1);
}

#[test]
fn test_repeated_name_keeps_last_capture() {
    let m = match_path("/:id/x/:id", "/first/x/second").unwrap();
    assert_eq!(m.params.len(), 1);
    assert_eq!(m.get_param("id"), Some("second"));
}

#[test]
fn test_generate_named_params() {
    let params = Params::from([("id", "42"), ("tab", "posts")]);
    assert_eq!(generate_path("/user/:id/:tab", &params).unwrap(), "/user/42/posts");
}

#[test]
fn test_generate_missing_param() {
    let err = generate_path("/user/:id", &Params::new()).unwrap_err();
    assert_eq!(
        err,
        RouteError::MissingParam {
            name: "id".to_string()
        }
    );
    assert!(err.to_string().contains(":id"));
}

#[test]
fn test_generate_wildcard_omitted() {
    assert_eq!(generate_path("/files/*", &Params::new()).unwrap(), "/files");
    assert_eq!(generate_path("/files*", &Params::new()).unwrap(), "/files");
}

#[test]
fn test_generate_wildcard_slash_handling() {
    let with = |value: &str| Params::from([("*", value)]);
    assert_eq!(generate_path("/files/*", &with("a/b")).unwrap(), "/files/a/b");
    assert_eq!(generate_path("/files/*", &with("/a/b")).unwrap(), "/files/a/b");
    assert_eq!(generate_path("/files/*", &with("//a")).unwrap(), "/files/a");
    assert_eq!(generate_path("/files*", &with("ystem")).unwrap(), "/filesystem");
}

#[test]
fn test_generate_ignores_extra_params() {
    let params = Params::from([("id", "1"), ("unused", "x")]);
    assert_eq!(generate_path("/u/:id", &params).unwrap(), "/u/1");
}

#[test]
fn test_generate_literal_star_in_middle() {
    assert_eq!(generate_path("/a*/b", &Params::new()).unwrap(), "/a*/b");
}

#[test]
fn test_round_trip_named_params() {
    let cases = [
        ("/blog/:blogId", Params::from([("blogId", "hello")])),
        (
            "/org/:org/team/:team",
            Params::from([("org", "acme"), ("team", "core-infra")]),
        ),
        ("/:a-:b.json", Params::from([("a", "x"), ("b", "y")])),
    ];
    for (pattern, params) in cases {
        let path = generate_path(pattern, &params).unwrap();
        let m = match_path_with(pattern, &path, &NoopSink).unwrap();
        assert_eq!(m.params, params, "round trip failed for {pattern}");
    }
}

#[test]
fn test_round_trip_wildcard() {
    let params = Params::from([("id", "9"), ("*", "deep/nested/file.txt")]);
    let path = generate_path("/u/:id/*", &params).unwrap();
    assert_eq!(path, "/u/9/deep/nested/file.txt");
    assert_eq!(match_path("/u/:id/*", &path).unwrap().params, params);
}
