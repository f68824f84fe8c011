//! Tests for route registration and first-match-wins resolution
//!
//! # Test Coverage
//!
//! - Ordered matching: overlapping templates resolve by registration order
//! - Parameter merge: path captures override query parameters
//! - No-match outcome: `Ok(None)` and no handler invocation
//! - Named handler registration and `InvalidHandler`
//! - `run()` through a request source

use serde_json::json;
use simple_router::dispatcher::{HandlerRegistry, HandlerResponse};
use simple_router::server::RawRequest;
use simple_router::{IncomingRequest, RequestSource, Route, RouteMatch, Router, RouterError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn handler_named(name: &'static str) -> impl Fn(&IncomingRequest) -> HandlerResponse {
    move |req: &IncomingRequest| {
        HandlerResponse::ok_json(json!({ "handler": name, "path": req.path() }))
    }
}

fn counting_handler(counter: Arc<AtomicUsize>) -> impl Fn(&IncomingRequest) -> HandlerResponse {
    move |_req: &IncomingRequest| {
        counter.fetch_add(1, Ordering::SeqCst);
        HandlerResponse::ok_json(json!(null))
    }
}

fn assert_route_match(router: &Router, method: &str, path: &str, expected_handler: &str) {
    let mut req = IncomingRequest::new(method, path).unwrap();
    match router.match_request(&mut req).unwrap() {
        Some(RouteMatch { response, .. }) => {
            assert_eq!(
                response.body["handler"], expected_handler,
                "Handler mismatch for {method} {path}"
            );
        }
        None => assert_eq!(expected_handler, "<none>", "Expected route to match for {method} {path}"),
    }
}

fn news_router() -> Router {
    let mut router = Router::new();
    router
        .add_route("/", handler_named("home"), None, Some("home"))
        .unwrap()
        .add_route("/news", handler_named("news_index"), None, None)
        .unwrap()
        .add_route("/news/[s:slug]", handler_named("article"), None, Some("article"))
        .unwrap()
        .add_route("/users/[i:id]/posts/[h:hash]?", handler_named("user_posts"), None, None)
        .unwrap()
        .add_route("/static/[**:file]", handler_named("static"), None, None)
        .unwrap();
    router
}

#[test]
fn test_router_matches_table() {
    let router = news_router();
    let cases = [
        ("GET", "/", "home"),
        ("GET", "/news", "news_index"),
        ("GET", "/news/", "news_index"),
        ("GET", "/news/my-article", "article"),
        ("GET", "/news/my-article/", "article"),
        ("GET", "/users/42/posts", "user_posts"),
        ("GET", "/users/42/posts/beef", "user_posts"),
        ("GET", "/users/abc/posts", "<none>"),
        ("GET", "/static/css/site.css", "static"),
        ("GET", "/does/not/exist", "<none>"),
    ];
    for (method, path, expected) in cases {
        assert_route_match(&router, method, path, expected);
    }
}

#[test]
fn test_first_registered_route_wins() {
    let mut capture_first = Router::new();
    capture_first
        .add_route("/[s:x]", handler_named("capture"), None, None)
        .unwrap()
        .add_route("/fixed", handler_named("fixed"), None, None)
        .unwrap();
    let mut req = IncomingRequest::new("GET", "/fixed").unwrap();
    let matched = capture_first.match_request(&mut req).unwrap().unwrap();
    assert_eq!(matched.route.url(), "/[s:x]");
    assert_eq!(req.param("x"), Some("fixed"));

    let mut fixed_first = Router::new();
    fixed_first
        .add_route("/fixed", handler_named("fixed"), None, None)
        .unwrap()
        .add_route("/[s:x]", handler_named("capture"), None, None)
        .unwrap();
    let mut req = IncomingRequest::new("GET", "/fixed").unwrap();
    let matched = fixed_first.match_request(&mut req).unwrap().unwrap();
    assert_eq!(matched.route.url(), "/fixed");
    assert_eq!(req.param("x"), None);
}

#[test]
fn test_path_params_override_query_params() {
    let router = news_router();
    let mut req = IncomingRequest::new("GET", "/news/from-path")
        .unwrap()
        .with_param("slug", "from-query")
        .with_param("a", "x");
    let matched = router.match_request(&mut req).unwrap().unwrap();
    assert_eq!(req.param("slug"), Some("from-path"));
    assert_eq!(req.param("a"), Some("x"));
    assert_eq!(matched.get_path_param("slug"), Some("from-path"));
    assert_eq!(req.params().len(), 2);
}

#[test]
fn test_optional_segment_absent_adds_no_param() {
    let router = news_router();
    let mut req = IncomingRequest::new("GET", "/users/7/posts").unwrap();
    let matched = router.match_request(&mut req).unwrap().unwrap();
    assert_eq!(req.param("id"), Some("7"));
    assert_eq!(req.param("hash"), None);
    assert_eq!(matched.path_params.len(), 1);
}

#[test]
fn test_handler_sees_enriched_request() {
    let mut router = Router::new();
    router
        .add_route(
            "/news/[s:slug]",
            |req: &IncomingRequest| HandlerResponse::ok_json(json!({ "slug": req.param("slug") })),
            None,
            None,
        )
        .unwrap();
    let mut req = IncomingRequest::new("GET", "/news/2019-acura-rdx-headed-new-york/").unwrap();
    let matched = router.match_request(&mut req).unwrap().unwrap();
    assert_eq!(matched.response.body, json!({ "slug": "2019-acura-rdx-headed-new-york" }));
}

#[test]
fn test_no_match_does_not_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));

    let empty = Router::new();
    let mut req = IncomingRequest::new("GET", "/anything").unwrap();
    assert!(empty.match_request(&mut req).unwrap().is_none());

    let mut router = Router::new();
    router
        .add_route("fail", counting_handler(Arc::clone(&calls)), None, None)
        .unwrap()
        .add_route("/news/[s:slug]", counting_handler(Arc::clone(&calls)), None, None)
        .unwrap();
    let mut req = IncomingRequest::new("GET", "/news").unwrap().with_param("a", "x");
    assert!(router.match_request(&mut req).unwrap().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(req.params().len(), 1);

    let mut req = IncomingRequest::new("GET", "/news/ok").unwrap();
    assert!(router.match_request(&mut req).unwrap().is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_routes_keep_registration_order() {
    let router = news_router();
    let urls: Vec<&str> = router.routes().iter().map(|r| r.url()).collect();
    assert_eq!(
        urls,
        vec!["/", "/news", "/news/[s:slug]", "/users/[i:id]/posts/[h:hash]?", "/static/[**:file]"]
    );
    assert_eq!(router.route_by_name("article").unwrap().url(), "/news/[s:slug]");
    assert!(router.route_by_name("missing").is_none());
}

#[test]
fn test_from_routes_and_load_from_file() {
    let router = Router::from_routes(vec![]);
    assert!(router.routes().is_empty());

    let loaded = Router::load_from_file("routes.yaml");
    assert!(loaded.routes().is_empty());

    let route = Route::new(Some("/a"), handler_named("a"), Some("put"))
        .unwrap()
        .named(Some("a"));
    let router = Router::from_routes(vec![route]);
    assert_eq!(router.routes().len(), 1);
    assert_eq!(router.routes()[0].method().as_str(), "PUT");
    assert_route_match(&router, "GET", "/a", "a");
}

#[test]
fn test_named_route_registration() {
    let mut registry = HandlerRegistry::new();
    registry.register("page", handler_named("page"));

    let mut router = Router::new();
    router
        .add_named_route("/news/[s:slug]", "page", Some("get"), Some("news"), &registry)
        .unwrap();
    assert_route_match(&router, "GET", "/news/x", "page");

    let err = router
        .add_named_route("/other", "missing", None, None, &registry)
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidHandler { ref handler } if handler == "missing"));
    assert_eq!(router.routes().len(), 1);
}

#[test]
fn test_invalid_registrations_surface_immediately() {
    let mut router = Router::new();
    assert!(matches!(
        router.add_route("/", handler_named("x"), Some("FETCH"), None),
        Err(RouterError::InvalidMethod { .. })
    ));
    assert!(matches!(
        router.add_route("/[s:slug", handler_named("x"), None, None),
        Err(RouterError::MalformedTemplate { .. })
    ));
    assert!(router.routes().is_empty());
}

#[test]
fn test_panicking_handler_is_reported() {
    let mut router = Router::new();
    router
        .add_route(
            "/boom",
            |_req: &IncomingRequest| -> HandlerResponse { panic!("handler failure") },
            None,
            None,
        )
        .unwrap();
    let mut req = IncomingRequest::new("GET", "/boom").unwrap();
    assert!(matches!(
        router.match_request(&mut req),
        Err(RouterError::NotInvocable { .. })
    ));
}

#[test]
fn test_run_uses_request_source() {
    let router = news_router();
    let source = RawRequest::new(
        "GET",
        "/news/2019-acura-rdx-headed-new-york/?a=x&y=asdf&j=true&something=5&article",
    );
    let matched = router.run(&source).unwrap().unwrap();
    assert_eq!(matched.route.name(), Some("article"));
    assert_eq!(
        matched.get_path_param("slug"),
        Some("2019-acura-rdx-headed-new-york")
    );

    let miss = RawRequest::new("GET", "/nowhere?a=1");
    assert!(router.run(&miss).unwrap().is_none());
}

struct FailingSource;

impl RequestSource for FailingSource {
    fn incoming(&self) -> simple_router::Result<IncomingRequest> {
        Err(RouterError::InvalidRequest("transport closed".to_string()))
    }
}

#[test]
fn test_run_propagates_source_errors() {
    let router = news_router();
    assert!(matches!(
        router.run(&FailingSource),
        Err(RouterError::InvalidRequest(_))
    ));
}

#[test]
fn test_router_is_shareable_across_threads() {
    let router = Arc::new(news_router());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || {
                let mut req = IncomingRequest::new("GET", &format!("/users/{i}/posts")).unwrap();
                let matched = router.match_request(&mut req).unwrap().unwrap();
                matched.get_path_param("id").map(str::to_string)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i.to_string()));
    }
}
