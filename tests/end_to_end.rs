//! End-to-end tests: Gate trees served over real TCP connections.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use torii::cookie::{self, SameSite};
use torii::gate::{self, GateExt, NotFound};
use torii::http::{GateHandler, StatusCode};
use torii::{Context, Endpoint, Fork, Method, Request, Response};

mod common;

fn target_reporter(name: &'static str) -> impl torii::Gate {
    gate::from_fn(move |_ctx: Context, request: Request| async move {
        Response::text(StatusCode::OK, format!("{name}:{}", request.target))
    })
}

fn sample_tree() -> Fork {
    let inner = Fork::new(
        target_reporter("inner-fallback"),
        [Endpoint::new(Method::Get, "/b", target_reporter("b")).unwrap()],
    )
    .unwrap();

    Fork::new(
        target_reporter("fallback"),
        [
            Endpoint::new(Method::Get, "/a", inner).unwrap(),
            Endpoint::new(Method::Get, "/plain", target_reporter("plain")).unwrap(),
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_routing_over_the_wire() {
    let server = common::start_server(sample_tree()).await;
    let client = common::client();

    let res = client.get(server.url("/plain")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "plain:/");

    let res = client.get(server.url("/a/b/c?x=1")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "b:/c?x=1");

    let res = client.get(server.url("/a/zzz")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "inner-fallback:/zzz");

    let res = client.get(server.url("/other/path")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "fallback:/other/path");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_method_not_allowed_gets_reason_phrase() {
    let server = common::start_server(sample_tree()).await;
    let client = common::client();

    let res = client.post(server.url("/plain")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.text().await.unwrap(), "Method Not Allowed");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_not_found_fallback() {
    let fork = Fork::new(NotFound, Vec::<Endpoint>::new()).unwrap();
    let server = common::start_server(fork).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_cookie_headers_reach_client() {
    let options = vec![
        cookie::http_only(),
        cookie::path("/").unwrap(),
        cookie::same_site(SameSite::Strict),
    ];
    let login = gate::from_fn(|_ctx, _request| async { Response::new(StatusCode::OK) })
        .map_response(move |response| {
            let response = cookie::set(response, "session", "abc", options.clone());
            cookie::set(response, "theme", "dark", [cookie::secure()])
        });
    let fork = Fork::new(
        NotFound,
        [Endpoint::new(Method::Post, "/login", login).unwrap()],
    )
    .unwrap();
    let server = common::start_server(fork).await;

    let res = common::client().post(server.url("/login")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let cookies: Vec<_> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        cookies,
        vec!["session=abc; HttpOnly; Path=/; SameSite=Strict", "theme=dark; Secure"]
    );

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_large_body_streams_in_small_chunks() {
    let payload = "x".repeat(10_000);
    let echo = gate::from_fn(|_ctx, request: Request| async move {
        Response::new(StatusCode::OK).with_body(request.body)
    });
    let handler = GateHandler::new(echo).with_buffer_size(7).unwrap();
    let server = common::start_with_handler(handler).await;

    let res = common::client()
        .post(server.url("/anything"))
        .body(payload.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), payload);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_share_one_tree() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let counted = gate::from_fn(move |_ctx, _request| {
        counter.fetch_add(1, Ordering::SeqCst);
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Response::text(StatusCode::OK, "counted")
        }
    });
    let fork = Fork::new(
        NotFound,
        [Endpoint::new(Method::Get, "/count", counted).unwrap()],
    )
    .unwrap();
    let server = common::start_server(fork).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let client = client.clone();
        let url = server.url("/count");
        tasks.push(tokio::spawn(async move {
            client.get(url).send().await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 20);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_request() {
    let slow = gate::from_fn(|ctx: Context, _request| async move {
        tokio::select! {
            _ = ctx.cancelled() => Response::text(StatusCode::SERVICE_UNAVAILABLE, "cancelled"),
            _ = tokio::time::sleep(Duration::from_secs(10)) => Response::text(StatusCode::OK, "finished"),
        }
    });
    let server = common::start_server(slow).await;

    let pending = tokio::spawn(common::client().get(server.url("/slow")).send());
    tokio::time::sleep(Duration::from_millis(100)).await;
    server.shutdown.trigger();

    let res = tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(res.status(), 503);
    assert_eq!(res.text().await.unwrap(), "cancelled");
}
