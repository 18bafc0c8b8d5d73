#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::{Request, Response, StatusCode};
use nestrouter::handler::{Body, EchoHandler, Handler, RequestExt};
use nestrouter::{PathParams, Route, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::new()).unwrap()
}

/// Marker another layer might store on the request
#[derive(Clone)]
struct TraceTag(&'static str);

fn params_handler(req: Request<Body>) -> Response<Body> {
    let params = req.path_params().cloned().unwrap_or_default();
    let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    Response::new(rendered.join("&").into_bytes())
}

#[test]
fn test_handler_receives_params_from_stripped_path() {
    let post = Route::new("post", "/users/{id}/posts/{post_id}", params_handler).unwrap();
    let v1 = Router::new("/api/v1", "v1").unwrap().with_resolver(post);
    let root = Router::new("/", "root").unwrap().with_resolver(v1);

    let response = root.handle(get("/api/v1/users/3/posts/9"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), b"id=3&post_id=9");
}

#[test]
fn test_unrelated_extensions_survive() {
    let route = Route::new("tagged", "/tagged/{id}", |req: Request<Body>| {
        let tag = req.extensions().get::<TraceTag>().map(|t| t.0).unwrap_or("none");
        let id = req.path_param("id").unwrap_or("none");
        Response::new(format!("{tag}:{id}").into_bytes())
    })
    .unwrap();
    let router = Router::new("/", "root").unwrap().with_resolver(route);

    let mut request = get("/tagged/5");
    request.extensions_mut().insert(TraceTag("abc"));
    let response = router.handle(request);
    assert_eq!(response.body(), b"abc:5");
}

#[test]
fn test_default_route_handles_unmatched_paths() {
    let fallback = Route::new("fallback", "/", |req: Request<Body>| {
        let mut response = Response::new(req.uri().path().as_bytes().to_vec());
        *response.status_mut() = StatusCode::IM_A_TEAPOT;
        response
    })
    .unwrap();
    let router = Router::new("/app", "app")
        .unwrap()
        .with_default_route(fallback)
        .with_resolver(Route::new("home", "/", EchoHandler::new("home")).unwrap());

    let response = router.handle(get("/app/no/such/page"));
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(response.body(), b"/app/no/such/page");

    let response = router.handle(get("/elsewhere"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.body().is_empty());
}

#[test]
fn test_default_route_receives_its_captures() {
    let fallback = Route::new("fallback", "/{page}", |req: Request<Body>| {
        let page = req.path_param("page").unwrap_or("<none>");
        let count = req.path_params().map(PathParams::len).unwrap_or(usize::MAX);
        Response::new(format!("{page}:{count}").into_bytes())
    })
    .unwrap();
    let router = Router::new("/", "root").unwrap().with_default_route(fallback);

    assert_eq!(router.handle(get("/about")).body(), b"about:1");
    // The fallback still runs when its own pattern does not match
    assert_eq!(router.handle(get("/about/team")).body(), b"<none>:0");
}

#[test]
fn test_default_route_captures_use_stripped_path() {
    let fallback = Route::new("fallback", "/{page}", params_handler).unwrap();
    let router = Router::new("/docs", "docs")
        .unwrap()
        .with_default_route(fallback)
        .with_resolver(Route::new("index", "/", EchoHandler::new("index")).unwrap());

    assert_eq!(router.handle(get("/docs/intro")).body(), b"page=intro");
    assert_eq!(router.handle(get("/docs/intro/")).body(), b"page=intro");
}

#[test]
fn test_router_as_handler() {
    let inner = Router::new("/", "inner")
        .unwrap()
        .with_resolver(Route::new("ping", "/ping", EchoHandler::new("ping")).unwrap());
    let handler: Arc<dyn Handler> = Arc::new(inner);

    let response = handler.call(get("/ping"));
    assert_eq!(response.status(), StatusCode::OK);
    let response = handler.call(get("/pong"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_echo_dispatch() {
    let users = Route::new("users", "/users/{id}", EchoHandler::new("users")).unwrap();
    let router = Router::new("/v1", "v1").unwrap().with_resolver(users);

    let response = router.handle(get("/v1/users/7"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["route"], "users");
    assert_eq!(body["path"], "/v1/users/7");
    assert_eq!(body["params"]["id"], "7");
}

#[test]
fn test_concurrent_dispatch_with_late_registration() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Arc::new(Router::new("/", "root").unwrap());
    router.add(
        Route::new("count", "/count", move |_req: Request<Body>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Response::new(Body::new())
        })
        .unwrap(),
    );

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || {
                for j in 0..100 {
                    let response = router.handle(get("/count"));
                    assert_eq!(response.status(), StatusCode::OK);
                    if j == 50 {
                        let name = format!("late{i}");
                        let late =
                            Route::new(&name, &format!("/{name}"), EchoHandler::new(&name))
                                .unwrap();
                        router.add(late);
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(hits.load(Ordering::SeqCst), 800);
    assert_eq!(router.handle(get("/late3")).status(), StatusCode::OK);
}
