use super::{PathPattern, Route};
use crate::error::RouteError;
use crate::handler::{Body, EchoHandler};
use crate::resolver::Resolver;
use std::collections::HashMap;

fn route(name: &str, pattern: &str) -> Route {
    Route::new(name, pattern, EchoHandler::new(name)).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_root_path() {
    let pattern = PathPattern::compile("/").unwrap();
    assert!(pattern.is_match("/"));
    assert!(!pattern.is_match("/x"));
    assert!(pattern.param_names().is_empty());
    assert_eq!(pattern.regex().as_str(), "^/$");
}

#[test]
fn test_parameterized_path() {
    let pattern = PathPattern::compile("/items/{id}").unwrap();
    assert!(pattern.is_match("/items/123"));
    assert!(!pattern.is_match("/items/"));
    assert!(!pattern.is_match("/items/1/2"));
    assert_eq!(pattern.param_names().len(), 1);
    assert_eq!(pattern.param_names()[0].as_ref(), "id");
}

#[test]
fn test_nested_path() {
    let pattern = PathPattern::compile("/a/{b}/c").unwrap();
    let captured = pattern.captures("/a/1/c").unwrap();
    assert_eq!(captured.get("b"), Some("1"));
}

#[test]
fn test_literals_are_escaped() {
    let pattern = PathPattern::compile("/files/v1.0").unwrap();
    assert!(pattern.is_match("/files/v1.0"));
    assert!(!pattern.is_match("/files/v1x0"));
}

#[test]
fn test_empty_segments_are_ignored() {
    let pattern = PathPattern::compile("//users/{id}/").unwrap();
    assert_eq!(pattern.template(), "/users/{id}");
    assert!(pattern.is_match("/users/9"));
}

#[test]
fn test_invalid_patterns() {
    for bad in ["users", "/users/{}", "/users/{1d}", "/u{id}", "/a/{x}/{x}", "/a/{b-c}"] {
        match PathPattern::compile(bad) {
            Err(RouteError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, bad),
            other => panic!("expected InvalidPattern for {bad}, got {other:?}"),
        }
    }
}

#[test]
fn test_expand_requires_every_param() {
    let pattern = PathPattern::compile("/users/{id}/posts/{post_id}").unwrap();
    assert_eq!(
        pattern.expand(&params(&[("id", "7"), ("post_id", "abc"), ("extra", "x")])),
        Some("/users/7/posts/abc".to_string())
    );
    assert_eq!(pattern.expand(&params(&[("id", "7")])), None);
}

#[test]
fn test_route_rejects_delimiter_in_name() {
    let err = Route::new("a:b", "/", EchoHandler::new("a")).unwrap_err();
    assert_eq!(
        err,
        RouteError::InvalidName {
            name: "a:b".to_string()
        }
    );
}

#[test]
fn test_route_resolve_returns_itself() {
    let users = route("users", "/users/{id}");
    let matched = users.resolve("/users/42").unwrap();
    assert!(matched.route.ptr_eq(&users));
    assert_eq!(matched.get_path_param("id"), Some("42"));
    assert!(users.resolve("/users").is_none());
}

#[test]
fn test_route_reverse_rejects_suffix() {
    let users = route("users", "/users/{id}");
    let p = params(&[("id", "42")]);
    assert_eq!(users.reverse("", &p), Some("/users/42".to_string()));
    assert_eq!(users.reverse("detail", &p), None);
    assert_eq!(users.reverse("", &HashMap::new()), None);
}

#[test]
fn test_groups() {
    let users = route("users", "/users/{id}/posts/{post_id}");
    let groups = users.groups("/users/1/posts/2");
    assert_eq!(groups.get("id").map(String::as_str), Some("1"));
    assert_eq!(groups.get("post_id").map(String::as_str), Some("2"));
    assert!(users.groups("/nope").is_empty());
}

#[test]
fn test_route_info() {
    let users = route("users", "/users/{id}");
    let infos = users.routes();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].name, "");
    assert_eq!(infos[0].path, "/users/{id}");
}

#[test]
fn test_closure_handler_route() {
    let r = Route::new("ping", "/ping", |_req: http::Request<Body>| {
        http::Response::new(b"pong".to_vec())
    })
    .unwrap();
    let response = r.handler().call(http::Request::new(Body::new()));
    assert_eq!(response.body(), b"pong");
}
