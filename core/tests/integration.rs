//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the executor through
//! `UreqTransport` over real HTTP. Covers decoding, every status branch, and
//! what the builder actually puts on the wire.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use gallery_core::{
    endpoints, AlwaysConnected, Authorization, Beer, ClientConfig, CompletionQueue, EncodingMode,
    ErrorKind, Executor, HttpMethod, MemorySettings, RequestBuilder, RequestDescriptor, Transport,
    TOKEN_KEY, UreqTransport,
};
use mock_server::{Echo, SESSION_TOKEN};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn executor_with(addr: SocketAddr, settings: MemorySettings) -> Executor {
    let config = ClientConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_secs(10));
    Executor::new(
        RequestBuilder::new(config, Arc::new(settings)),
        Arc::new(UreqTransport::new()),
        Arc::new(AlwaysConnected),
        CompletionQueue::spawn().unwrap(),
    )
}

fn executor(addr: SocketAddr) -> Executor {
    executor_with(addr, MemorySettings::new())
}

#[test]
fn fetch_ale_beers_decodes_fixture() {
    let addr = start_server();
    let beers: Vec<Beer> = executor(addr).fetch(&endpoints::ale_beers()).unwrap();

    let expected: Vec<Beer> =
        serde_json::from_value(serde_json::to_value(mock_server::ale_beers()).unwrap()).unwrap();
    assert_eq!(beers, expected);
}

#[test]
fn execute_delivers_beers_on_completion_queue() {
    let addr = start_server();
    let (tx, rx) = std::sync::mpsc::channel();
    executor(addr).execute::<Vec<Beer>, _>(endpoints::ale_beers(), move |result| {
        tx.send(result).unwrap();
    });

    let beers = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
    assert_eq!(beers.len(), 2);
    assert_eq!(beers[1].name, "Blue Moon Belgian White");
}

#[test]
fn session_without_token_is_unauthorized() {
    let addr = start_server();
    let descriptor =
        RequestDescriptor::new(HttpMethod::Get, Authorization::Required).with_path("session");
    let err = executor(addr)
        .fetch::<serde_json::Value>(&descriptor)
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.http_status, Some(401));
    assert_eq!(err.code, 1);
    assert!(err.description.contains("expired"));
}

#[test]
fn session_with_stored_token_succeeds() {
    let addr = start_server();
    let exec = executor_with(addr, MemorySettings::new().with(TOKEN_KEY, SESSION_TOKEN));
    let descriptor =
        RequestDescriptor::new(HttpMethod::Get, Authorization::Required).with_path("session");
    let body: serde_json::Value = exec.fetch(&descriptor).unwrap();

    assert_eq!(body["user"], "gallery");
}

#[test]
fn server_error_body_is_surfaced() {
    let addr = start_server();
    let descriptor =
        RequestDescriptor::new(HttpMethod::Get, Authorization::Never).with_path("fail/500");
    let err = executor(addr).fetch::<Vec<Beer>>(&descriptor).unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerReported);
    assert_eq!(err.label, "Unknown Error");
    assert_eq!(err.code, 77);
    assert_eq!(err.http_status, Some(500));
    assert_eq!(err.description, "boom");
}

#[test]
fn undecodable_error_body_is_unknown() {
    let addr = start_server();
    let descriptor =
        RequestDescriptor::new(HttpMethod::Delete, Authorization::Never).with_path("broken/500");
    let err = executor(addr).fetch::<Vec<Beer>>(&descriptor).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.code, 1);
    assert_eq!(err.http_status, Some(500));
    assert_eq!(err.description, "unknown error");
}

#[test]
fn missing_route_with_empty_body_is_unknown() {
    let addr = start_server();
    let descriptor =
        RequestDescriptor::new(HttpMethod::Get, Authorization::Never).with_path("beers/stout");
    let err = executor(addr).fetch::<Vec<Beer>>(&descriptor).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.http_status, Some(404));
}

#[test]
fn form_body_and_headers_reach_the_server() {
    let addr = start_server();
    let exec = executor_with(addr, MemorySettings::new().with(TOKEN_KEY, "abc"));
    let descriptor = RequestDescriptor::new(HttpMethod::Post, Authorization::Required)
        .with_path("echo")
        .with_encoding(EncodingMode::UrlEncoded)
        .with_parameter("style", "pale ale");
    let echo: Echo = exec.fetch(&descriptor).unwrap();

    assert_eq!(echo.method, "POST");
    assert_eq!(
        echo.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(echo.authorization.as_deref(), Some("bearer abc"));
    assert_eq!(echo.cache_control.as_deref(), Some("no-cache"));
    assert_eq!(echo.body, "style=pale+ale");
}

#[test]
fn json_body_reaches_the_server() {
    let addr = start_server();
    let descriptor = RequestDescriptor::new(HttpMethod::Put, Authorization::Never)
        .with_path("echo")
        .with_parameter("name", "Jane");
    let echo: Echo = executor(addr).fetch(&descriptor).unwrap();

    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.content_type.as_deref(), Some("application/json"));
    assert!(echo.authorization.is_none());
    let body: serde_json::Value = serde_json::from_str(&echo.body).unwrap();
    assert_eq!(body, serde_json::json!({"name": "Jane"}));
}

#[test]
fn unreachable_host_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = executor(addr)
        .fetch::<Vec<Beer>>(&endpoints::ale_beers())
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.http_status, Some(300));
}

#[test]
fn delete_with_form_parameter_sends_body() {
    let addr = start_server();
    let descriptor = RequestDescriptor::new(HttpMethod::Delete, Authorization::Never)
        .with_path("echo")
        .with_encoding(EncodingMode::UrlEncoded)
        .with_parameter("id", "7");
    let echo: Echo = executor(addr).fetch(&descriptor).unwrap();

    assert_eq!(echo.method, "DELETE");
    assert_eq!(
        echo.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(echo.body, "id=7");
}

#[test]
fn get_without_parameters_sends_no_body() {
    let addr = start_server();
    let descriptor =
        RequestDescriptor::new(HttpMethod::Get, Authorization::Never).with_path("echo");
    let echo: Echo = executor(addr).fetch(&descriptor).unwrap();

    assert_eq!(echo.method, "GET");
    assert_eq!(echo.body, "");
}

#[test]
fn transport_returns_response_headers() {
    let addr = start_server();
    let exec = executor(addr);
    let request = exec.builder().build(&endpoints::ale_beers());
    let response = UreqTransport::new().send(&request).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.headers.get("Content-Type"), Some("application/json"));
    assert!(response.body.is_some_and(|body| !body.is_empty()));
}
